use chrono::{DateTime, Utc};

use statics_core::model::{ProblemDefinition, Stage, Subcheck, SubcheckId};

use super::state::Session;
use crate::error::TutorError;

/// Forward-only traversal rules over a problem's stage sequence.
///
/// The gate only reads the session, except for `advance`, which moves it.
#[derive(Debug, Clone, Copy)]
pub struct StageGate<'a> {
    problem: &'a ProblemDefinition,
}

impl<'a> StageGate<'a> {
    #[must_use]
    pub fn new(problem: &'a ProblemDefinition) -> Self {
        Self { problem }
    }

    /// True when everything the stage requires has been satisfied.
    #[must_use]
    pub fn is_stage_complete(&self, session: &Session, stage: Stage, now: DateTime<Utc>) -> bool {
        match stage {
            Stage::NotStarted => session.is_begun(),
            Stage::StudyTimer => session.timer().is_finished(now),
            Stage::Complete => false,
            authored => self.problem.stage(authored).is_some_and(|def| {
                def.required()
                    .all(|check| session.is_passed(check.id().as_str()))
            }),
        }
    }

    /// Dependencies of `check` that have not passed yet, in authored order.
    #[must_use]
    pub fn missing_dependencies(&self, session: &Session, check: &Subcheck) -> Vec<SubcheckId> {
        check
            .depends_on()
            .iter()
            .chain(check.kind().captured_source())
            .filter(|dep| !session.is_passed(dep.as_str()))
            .cloned()
            .collect()
    }

    /// Resolves a sub-check that may be evaluated right now.
    ///
    /// # Errors
    ///
    /// - `TutorError::NotStarted` / `TutorError::Completed` outside an active
    ///   session.
    /// - `TutorError::UnknownSubcheck` for ids not in the problem.
    /// - `TutorError::PrerequisiteNotMet` for a sub-check of a later stage and
    ///   `TutorError::StageBehind` for one of an earlier stage.
    /// - `TutorError::NotReady` when dependencies have not passed.
    pub fn ready(&self, session: &Session, id: &str) -> Result<&'a Subcheck, TutorError> {
        if !session.is_begun() {
            return Err(TutorError::NotStarted);
        }
        if session.is_complete() {
            return Err(TutorError::Completed);
        }

        let (stage, check) = self
            .problem
            .subcheck(id)
            .ok_or_else(|| TutorError::UnknownSubcheck(id.to_string()))?;

        let current = session.stage();
        if stage > current {
            return Err(TutorError::PrerequisiteNotMet { stage });
        }
        if stage < current {
            return Err(TutorError::StageBehind {
                requested: stage,
                current,
            });
        }

        let missing = self.missing_dependencies(session, check);
        if !missing.is_empty() {
            return Err(TutorError::NotReady {
                subcheck: check.id().clone(),
                missing,
            });
        }
        Ok(check)
    }

    /// Moves the session to `target`.
    ///
    /// Returns `Ok(false)` when the session is already at `target`.
    ///
    /// # Errors
    ///
    /// - `TutorError::UnknownStage` if the problem does not have `target`.
    /// - `TutorError::StageBehind` if `target` is before the current stage.
    /// - `TutorError::PrerequisiteNotMet` unless `target` directly follows the
    ///   current stage and the current stage is complete.
    pub fn advance(&self, session: &mut Session, target: Stage, now: DateTime<Utc>) -> Result<bool, TutorError> {
        if !self.problem.has_stage(target) {
            return Err(TutorError::UnknownStage(target));
        }

        let current = session.stage();
        if target == current {
            return Ok(false);
        }
        if target < current {
            return Err(TutorError::StageBehind {
                requested: target,
                current,
            });
        }

        let follows_current = self.problem.previous_stage(target) == Some(current);
        if !follows_current || !self.is_stage_complete(session, current, now) {
            return Err(TutorError::PrerequisiteNotMet { stage: target });
        }

        session.enter_stage(target);
        Ok(true)
    }
}
