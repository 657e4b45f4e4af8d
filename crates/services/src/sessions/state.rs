use std::collections::HashMap;

use chrono::{DateTime, Utc};

use statics_core::model::{Answer, ProblemId, SessionId, Stage, SubcheckId};
use statics_core::time::StudyTimer;

/// Mutable record of one learner's attempt at one problem.
///
/// Owned exclusively by the caller and threaded through every `TutorService`
/// operation. Only the services layer mutates stage, flags and answers.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    problem_id: ProblemId,
    stage: Stage,
    flags: HashMap<SubcheckId, bool>,
    answers: HashMap<SubcheckId, Answer>,
    drafts: HashMap<String, String>,
    attempts: HashMap<SubcheckId, u32>,
    timer: StudyTimer,
    begun_at: Option<DateTime<Utc>>,
}

impl Session {
    #[must_use]
    pub fn new(problem_id: ProblemId, study_seconds: u32) -> Self {
        Self {
            id: SessionId::generate(),
            problem_id,
            stage: Stage::NotStarted,
            flags: HashMap::new(),
            answers: HashMap::new(),
            drafts: HashMap::new(),
            attempts: HashMap::new(),
            timer: StudyTimer::new(study_seconds),
            begun_at: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn problem_id(&self) -> &ProblemId {
        &self.problem_id
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[must_use]
    pub fn begun_at(&self) -> Option<DateTime<Utc>> {
        self.begun_at
    }

    #[must_use]
    pub fn is_begun(&self) -> bool {
        self.begun_at.is_some()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.stage == Stage::Complete
    }

    #[must_use]
    pub fn timer(&self) -> &StudyTimer {
        &self.timer
    }

    /// True once the sub-check has passed at least once.
    #[must_use]
    pub fn is_passed(&self, id: &str) -> bool {
        self.flags.get(id).copied().unwrap_or(false)
    }

    /// Pass/fail flag of every evaluated sub-check.
    #[must_use]
    pub fn flags(&self) -> &HashMap<SubcheckId, bool> {
        &self.flags
    }

    #[must_use]
    pub fn answer(&self, id: &str) -> Option<&Answer> {
        self.answers.get(id)
    }

    #[must_use]
    pub fn answers(&self) -> &HashMap<SubcheckId, Answer> {
        &self.answers
    }

    #[must_use]
    pub fn attempts(&self, id: &str) -> u32 {
        self.attempts.get(id).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn draft(&self, key: &str) -> Option<&str> {
        self.drafts.get(key).map(String::as_str)
    }

    /// Stashes a transient input for the current stage. Cleared on every stage
    /// change.
    pub fn set_draft(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.drafts.insert(key.into(), value.into());
    }

    pub(crate) fn begin(&mut self, now: DateTime<Utc>) {
        self.begun_at = Some(now);
        self.timer.start(now);
        self.enter_stage(Stage::StudyTimer);
    }

    pub(crate) fn timer_mut(&mut self) -> &mut StudyTimer {
        &mut self.timer
    }

    pub(crate) fn enter_stage(&mut self, stage: Stage) {
        self.stage = stage;
        self.drafts.clear();
    }

    /// Records one evaluation. A pass is sticky; later failures do not clear
    /// it.
    pub(crate) fn record(&mut self, id: &SubcheckId, passed: bool, answer: Option<Answer>) {
        *self.attempts.entry(id.clone()).or_insert(0) += 1;
        let flag = self.flags.entry(id.clone()).or_insert(false);
        *flag |= passed;
        if let Some(answer) = answer {
            self.answers.insert(id.clone(), answer);
        }
    }

    /// Counts an attempt that was rejected as invalid input.
    pub(crate) fn record_rejected(&mut self, id: &SubcheckId) {
        *self.attempts.entry(id.clone()).or_insert(0) += 1;
    }

    /// Clears all progress. Identity, problem and study duration survive.
    pub(crate) fn reset(&mut self) {
        let duration = self.timer.duration_secs();
        *self = Self {
            id: self.id,
            ..Self::new(self.problem_id.clone(), duration)
        };
    }
}
