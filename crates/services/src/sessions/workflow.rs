use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use statics_core::model::{ProblemDefinition, Stage, Subcheck, Submission, TutorSettings};
use statics_core::verify::{verify, Diagnostics, Verdict};

use super::choices::presented_choices;
use super::events::{Presenter, SubcheckResult, TutorEvent, INVALID_INPUT_HINT};
use super::gate::StageGate;
use super::progress::SessionProgress;
use super::state::Session;
use crate::error::TutorError;
use crate::Clock;

/// One learner action, as delivered by the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum TutorAction {
    Begin,
    PollTimer,
    SkipTimer,
    Submit { subcheck: String, submission: Submission },
    Advance(Stage),
    Reset,
}

/// Drives sessions of one problem: applies learner actions, enforces the
/// stage gate and reports every outcome to a `Presenter`.
#[derive(Debug, Clone)]
pub struct TutorService {
    clock: Clock,
    settings: TutorSettings,
    problem: Arc<ProblemDefinition>,
}

impl TutorService {
    #[must_use]
    pub fn new(clock: Clock, problem: Arc<ProblemDefinition>) -> Self {
        Self {
            clock,
            settings: TutorSettings::default(),
            problem,
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: TutorSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn problem(&self) -> &ProblemDefinition {
        &self.problem
    }

    #[must_use]
    pub fn settings(&self) -> &TutorSettings {
        &self.settings
    }

    fn gate(&self) -> StageGate<'_> {
        StageGate::new(&self.problem)
    }

    /// Fresh, not yet begun session for this service's problem.
    #[must_use]
    pub fn new_session(&self) -> Session {
        Session::new(
            self.problem.id().clone(),
            self.settings.study_seconds_or(self.problem.study_seconds()),
        )
    }

    //
    // ─── LIFECYCLE ─────────────────────────────────────────────────────────────
    //

    /// Starts the session and the study countdown. A second call is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `TutorError::Completed` for a finished session.
    pub fn begin(&self, session: &mut Session, presenter: &mut impl Presenter) -> Result<Stage, TutorError> {
        if session.is_complete() {
            return Err(TutorError::Completed);
        }
        if session.is_begun() {
            return Ok(session.stage());
        }

        let now = self.clock.now();
        session.begin(now);
        info!(
            session = %session.id(),
            problem = %self.problem.id(),
            study_seconds = session.timer().duration_secs(),
            "session begun"
        );
        presenter.present(&TutorEvent::StageChanged {
            stage: Stage::StudyTimer,
        });
        presenter.present(&TutorEvent::TimeRemaining {
            seconds: session.timer().remaining(now),
        });
        self.settle(session, now, presenter);
        Ok(session.stage())
    }

    /// Clears the session back to `NotStarted`.
    pub fn request_reset(&self, session: &mut Session, presenter: &mut impl Presenter) {
        let from = session.stage();
        session.reset();
        info!(session = %session.id(), from = %from, "session reset");
        presenter.present(&TutorEvent::StageChanged {
            stage: Stage::NotStarted,
        });
    }

    //
    // ─── STUDY TIMER ───────────────────────────────────────────────────────────
    //

    /// Reports the time left using the service clock.
    ///
    /// # Errors
    ///
    /// Returns `TutorError::NotStarted` before `begin`.
    pub fn poll_timer(&self, session: &mut Session, presenter: &mut impl Presenter) -> Result<u32, TutorError> {
        self.poll_timer_at(session, self.clock.now(), presenter)
    }

    /// Externally driven tick: reports the time left at `now` and, once it
    /// reaches zero, finishes the timer.
    ///
    /// # Errors
    ///
    /// Returns `TutorError::NotStarted` before `begin`.
    pub fn poll_timer_at(
        &self,
        session: &mut Session,
        now: DateTime<Utc>,
        presenter: &mut impl Presenter,
    ) -> Result<u32, TutorError> {
        if !session.is_begun() {
            return Err(TutorError::NotStarted);
        }
        let remaining = session.timer().remaining(now);
        presenter.present(&TutorEvent::TimeRemaining { seconds: remaining });
        if remaining == 0 {
            session.timer_mut().finish();
        }
        self.settle(session, now, presenter);
        Ok(remaining)
    }

    /// Ends the study countdown early.
    ///
    /// # Errors
    ///
    /// - `TutorError::NotStarted` before `begin`.
    /// - `TutorError::TimerSkipDisabled` when settings forbid skipping.
    pub fn skip_timer(&self, session: &mut Session, presenter: &mut impl Presenter) -> Result<Stage, TutorError> {
        if !session.is_begun() {
            return Err(TutorError::NotStarted);
        }
        if session.stage() != Stage::StudyTimer {
            return Ok(session.stage());
        }
        if !self.settings.allow_timer_skip() {
            return Err(TutorError::TimerSkipDisabled);
        }

        let now = self.clock.now();
        debug!(
            session = %session.id(),
            remaining = session.timer().remaining(now),
            "study timer skipped"
        );
        session.timer_mut().finish();
        presenter.present(&TutorEvent::TimeRemaining { seconds: 0 });
        self.settle(session, now, presenter);
        Ok(session.stage())
    }

    //
    // ─── CHECKS & NAVIGATION ───────────────────────────────────────────────────
    //

    /// Evaluates one submission against the current stage.
    ///
    /// A wrong answer is `Ok` with a failing verdict and a hint event. On a pass
    /// that completes the stage, the session moves on when auto-advance is on.
    ///
    /// # Errors
    ///
    /// - Gate errors (`NotStarted`, `Completed`, `UnknownSubcheck`,
    ///   `PrerequisiteNotMet`, `StageBehind`, `NotReady`) leave the session
    ///   untouched.
    /// - `TutorError::InvalidInput` for malformed input; a failing result with
    ///   the `invalid-input` hint key is presented first.
    pub fn submit(
        &self,
        session: &mut Session,
        subcheck: &str,
        submission: &Submission,
        presenter: &mut impl Presenter,
    ) -> Result<Verdict, TutorError> {
        let check = self.gate().ready(session, subcheck)?;

        let verdict = match verify(check.kind(), submission, session.answers()) {
            Ok(verdict) => verdict,
            Err(err) => {
                session.record_rejected(check.id());
                debug!(subcheck = %check.id(), error = %err, "submission rejected");
                presenter.present(&TutorEvent::SubcheckResult(SubcheckResult {
                    subcheck: check.id().clone(),
                    passed: false,
                    hint_key: Some(INVALID_INPUT_HINT.to_string()),
                    hint: Some(err.to_string()),
                    diagnostics: Diagnostics::new(),
                }));
                return Err(err.into());
            }
        };

        session.record(check.id(), verdict.passed, submission.to_answer());
        debug!(
            subcheck = %check.id(),
            passed = verdict.passed,
            reason = verdict.hint_key().unwrap_or("-"),
            attempts = session.attempts(check.id().as_str()),
            "sub-check evaluated"
        );
        presenter.present(&TutorEvent::SubcheckResult(result_for(check, &verdict)));

        if verdict.passed {
            self.settle(session, self.clock.now(), presenter);
        }
        Ok(verdict)
    }

    /// Moves to `target` if its predecessor is complete. Repeating the request
    /// for the current stage changes nothing.
    ///
    /// # Errors
    ///
    /// - `TutorError::NotStarted` before `begin`.
    /// - `TutorError::TimerRunning` while the study countdown is running.
    /// - `TutorError::UnknownStage`, `TutorError::StageBehind` or
    ///   `TutorError::PrerequisiteNotMet` from the stage gate.
    pub fn request_advance(
        &self,
        session: &mut Session,
        target: Stage,
        presenter: &mut impl Presenter,
    ) -> Result<Stage, TutorError> {
        if !session.is_begun() {
            return Err(TutorError::NotStarted);
        }
        let now = self.clock.now();
        let from = session.stage();
        if from == Stage::StudyTimer && target > from && !session.timer().is_finished(now) {
            return Err(TutorError::TimerRunning {
                remaining: session.timer().remaining(now),
            });
        }
        if self.gate().advance(session, target, now)? {
            self.announce(session, from, presenter);
        }
        Ok(session.stage())
    }

    /// Applies one action. Convenience for presentation loops.
    ///
    /// # Errors
    ///
    /// Propagates the error of the underlying operation.
    pub fn handle(
        &self,
        session: &mut Session,
        action: TutorAction,
        presenter: &mut impl Presenter,
    ) -> Result<(), TutorError> {
        match action {
            TutorAction::Begin => self.begin(session, presenter).map(|_| ()),
            TutorAction::PollTimer => self.poll_timer(session, presenter).map(|_| ()),
            TutorAction::SkipTimer => self.skip_timer(session, presenter).map(|_| ()),
            TutorAction::Submit {
                subcheck,
                submission,
            } => self
                .submit(session, &subcheck, &submission, presenter)
                .map(|_| ()),
            TutorAction::Advance(stage) => self.request_advance(session, stage, presenter).map(|_| ()),
            TutorAction::Reset => {
                self.request_reset(session, presenter);
                Ok(())
            }
        }
    }

    /// With auto-advance on, walks forward through every completed stage.
    fn settle(&self, session: &mut Session, now: DateTime<Utc>, presenter: &mut impl Presenter) {
        if !self.settings.auto_advance() {
            return;
        }
        let gate = self.gate();
        while gate.is_stage_complete(session, session.stage(), now) {
            let from = session.stage();
            let Some(next) = self.problem.next_stage(from) else {
                break;
            };
            match gate.advance(session, next, now) {
                Ok(true) => self.announce(session, from, presenter),
                _ => break,
            }
        }
    }

    fn announce(&self, session: &Session, from: Stage, presenter: &mut impl Presenter) {
        let stage = session.stage();
        info!(session = %session.id(), from = %from, to = %stage, "stage changed");
        presenter.present(&TutorEvent::StageChanged { stage });
    }

    //
    // ─── QUERIES ───────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn progress(&self, session: &Session) -> SessionProgress {
        let sequence = self.problem.stage_sequence();
        let passed = self
            .problem
            .stages()
            .iter()
            .flat_map(|def| def.required())
            .filter(|check| session.is_passed(check.id().as_str()))
            .count();
        SessionProgress {
            stage: session.stage(),
            stage_index: sequence
                .iter()
                .position(|stage| *stage == session.stage())
                .unwrap_or(0),
            stage_total: sequence.len(),
            passed,
            required: self.problem.required_count(),
            is_complete: session.is_complete(),
        }
    }

    /// Sub-checks of the current stage that can be answered now and have not
    /// passed yet, optional ones included.
    #[must_use]
    pub fn open_subchecks(&self, session: &Session) -> Vec<&Subcheck> {
        let gate = self.gate();
        self.problem
            .stage(session.stage())
            .map(|def| {
                def.subchecks
                    .iter()
                    .filter(|check| !session.is_passed(check.id().as_str()))
                    .filter(|check| gate.missing_dependencies(session, check).is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// First required sub-check the learner should answer next.
    #[must_use]
    pub fn next_subcheck(&self, session: &Session) -> Option<&Subcheck> {
        self.open_subchecks(session)
            .into_iter()
            .find(|check| !check.is_optional())
    }

    /// Options for a choice question, shuffled when configured.
    #[must_use]
    pub fn choices_for(&self, check: &Subcheck) -> Vec<String> {
        presented_choices(check.kind(), self.settings.shuffle_choices())
    }
}

fn result_for(check: &Subcheck, verdict: &Verdict) -> SubcheckResult {
    SubcheckResult {
        subcheck: check.id().clone(),
        passed: verdict.passed,
        hint_key: verdict.hint_key().map(str::to_string),
        hint: verdict
            .reason
            .map(|reason| check.hints().for_reason(reason).to_string()),
        diagnostics: verdict.diagnostics.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use statics_core::model::{
        FailureReason, ProblemDraft, StageDefinition, SubcheckKind, Tolerance, TutorSettingsDraft,
    };
    use statics_core::time::{fixed_clock, fixed_now};

    fn problem() -> Arc<ProblemDefinition> {
        let def = ProblemDraft::new("beam", "Beam")
            .stage(
                StageDefinition::new(Stage::StudyVocab, "Vocabulary")
                    .check(Subcheck::new("vocab", "Ready?", SubcheckKind::Acknowledge)),
            )
            .stage(
                StageDefinition::new(Stage::Compute(1), "Ay")
                    .check(
                        Subcheck::new("ay", "Ay (kips)", SubcheckKind::numeric(6.0, Tolerance::Absolute(0.1)))
                            .hint("Sum moments about B.")
                            .hint_on(FailureReason::TooHigh, "Check the sign of the 15 kip arm."),
                    ),
            )
            .validate()
            .unwrap();
        Arc::new(def)
    }

    fn service() -> TutorService {
        TutorService::new(fixed_clock(), problem())
    }

    #[test]
    fn begin_starts_timer_and_reports_time() {
        let tutor = service();
        let mut session = tutor.new_session();
        let mut events: Vec<TutorEvent> = Vec::new();

        assert_eq!(tutor.begin(&mut session, &mut events).unwrap(), Stage::StudyTimer);
        assert_eq!(
            events,
            vec![
                TutorEvent::StageChanged {
                    stage: Stage::StudyTimer
                },
                TutorEvent::TimeRemaining { seconds: 180 },
            ]
        );

        events.clear();
        assert_eq!(tutor.begin(&mut session, &mut events).unwrap(), Stage::StudyTimer);
        assert!(events.is_empty());
    }

    #[test]
    fn polling_to_zero_opens_vocabulary() {
        let tutor = service();
        let mut session = tutor.new_session();
        let mut events: Vec<TutorEvent> = Vec::new();
        tutor.begin(&mut session, &mut events).unwrap();

        assert_eq!(
            tutor
                .poll_timer_at(&mut session, fixed_now() + Duration::seconds(60), &mut events)
                .unwrap(),
            120
        );
        assert_eq!(session.stage(), Stage::StudyTimer);

        events.clear();
        tutor
            .poll_timer_at(&mut session, fixed_now() + Duration::seconds(181), &mut events)
            .unwrap();
        assert_eq!(
            events,
            vec![
                TutorEvent::TimeRemaining { seconds: 0 },
                TutorEvent::StageChanged {
                    stage: Stage::StudyVocab
                },
            ]
        );
    }

    #[test]
    fn skip_can_be_disabled() {
        let settings = TutorSettingsDraft {
            allow_timer_skip: false,
            ..TutorSettingsDraft::default()
        }
        .validate()
        .unwrap();
        let tutor = service().with_settings(settings);
        let mut session = tutor.new_session();
        let mut events: Vec<TutorEvent> = Vec::new();
        tutor.begin(&mut session, &mut events).unwrap();

        assert_eq!(
            tutor.skip_timer(&mut session, &mut events).unwrap_err(),
            TutorError::TimerSkipDisabled
        );
    }

    #[test]
    fn zero_second_study_goes_straight_to_vocabulary() {
        let settings = TutorSettingsDraft {
            study_seconds: Some(0),
            ..TutorSettingsDraft::default()
        }
        .validate()
        .unwrap();
        let tutor = service().with_settings(settings);
        let mut session = tutor.new_session();
        let mut events: Vec<TutorEvent> = Vec::new();

        assert_eq!(tutor.begin(&mut session, &mut events).unwrap(), Stage::StudyVocab);
    }

    #[test]
    fn wrong_answer_selects_reason_hint() {
        let tutor = service();
        let mut session = tutor.new_session();
        let mut events: Vec<TutorEvent> = Vec::new();
        tutor.begin(&mut session, &mut events).unwrap();
        tutor.skip_timer(&mut session, &mut events).unwrap();
        tutor
            .submit(&mut session, "vocab", &Submission::Confirm, &mut events)
            .unwrap();
        assert_eq!(session.stage(), Stage::Compute(1));

        events.clear();
        let verdict = tutor
            .submit(&mut session, "ay", &Submission::Number(9.0), &mut events)
            .unwrap();
        assert!(!verdict.passed);
        let TutorEvent::SubcheckResult(result) = &events[0] else {
            panic!("expected a sub-check result, got {events:?}");
        };
        assert_eq!(result.hint_key.as_deref(), Some("too-high"));
        assert_eq!(result.hint.as_deref(), Some("Check the sign of the 15 kip arm."));
        assert!(!result.hint.as_deref().unwrap_or_default().contains('6'));
    }

    #[test]
    fn invalid_input_is_reported_and_recoverable() {
        let tutor = service();
        let mut session = tutor.new_session();
        let mut events: Vec<TutorEvent> = Vec::new();
        tutor.begin(&mut session, &mut events).unwrap();
        tutor.skip_timer(&mut session, &mut events).unwrap();
        tutor
            .submit(&mut session, "vocab", &Submission::Confirm, &mut events)
            .unwrap();

        events.clear();
        let err = tutor
            .submit(&mut session, "ay", &Submission::Number(f64::NAN), &mut events)
            .unwrap_err();
        assert!(matches!(err, TutorError::InvalidInput(_)));
        assert!(matches!(
            &events[0],
            TutorEvent::SubcheckResult(result) if result.hint_key.as_deref() == Some(INVALID_INPUT_HINT)
        ));

        tutor
            .submit(&mut session, "ay", &Submission::Number(6.05), &mut events)
            .unwrap();
        assert!(session.is_complete());
        assert_eq!(session.attempts("ay"), 2);
    }

    #[test]
    fn manual_advance_waits_for_request() {
        let settings = TutorSettingsDraft {
            auto_advance: false,
            ..TutorSettingsDraft::default()
        }
        .validate()
        .unwrap();
        let tutor = service().with_settings(settings);
        let mut session = tutor.new_session();
        let mut events: Vec<TutorEvent> = Vec::new();
        tutor.begin(&mut session, &mut events).unwrap();
        tutor.skip_timer(&mut session, &mut events).unwrap();
        assert_eq!(session.stage(), Stage::StudyTimer);

        tutor
            .request_advance(&mut session, Stage::StudyVocab, &mut events)
            .unwrap();
        tutor
            .submit(&mut session, "vocab", &Submission::Confirm, &mut events)
            .unwrap();
        assert_eq!(session.stage(), Stage::StudyVocab);

        events.clear();
        tutor
            .request_advance(&mut session, Stage::Compute(1), &mut events)
            .unwrap();
        tutor
            .request_advance(&mut session, Stage::Compute(1), &mut events)
            .unwrap();
        assert_eq!(
            events,
            vec![TutorEvent::StageChanged {
                stage: Stage::Compute(1)
            }]
        );
    }

    #[test]
    fn advance_waits_for_the_timer() {
        let tutor = service();
        let mut session = tutor.new_session();
        let mut events: Vec<TutorEvent> = Vec::new();
        tutor.begin(&mut session, &mut events).unwrap();

        assert_eq!(
            tutor
                .request_advance(&mut session, Stage::StudyVocab, &mut events)
                .unwrap_err(),
            TutorError::TimerRunning { remaining: 180 }
        );
        assert_eq!(session.stage(), Stage::StudyTimer);
    }

    #[test]
    fn next_subcheck_follows_authoring() {
        let tutor = service();
        let mut session = tutor.new_session();
        let mut events: Vec<TutorEvent> = Vec::new();
        assert!(tutor.next_subcheck(&session).is_none());

        tutor.begin(&mut session, &mut events).unwrap();
        tutor.skip_timer(&mut session, &mut events).unwrap();
        assert_eq!(
            tutor.next_subcheck(&session).map(|check| check.id().as_str()),
            Some("vocab")
        );
        let progress = tutor.progress(&session);
        assert_eq!(progress.stage_index, 2);
        assert_eq!(progress.stage_total, 5);
        assert_eq!(progress.remaining(), 2);
    }
}
