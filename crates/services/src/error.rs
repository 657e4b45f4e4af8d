//! Shared error types for the services crate.

use thiserror::Error;

use statics_core::model::{Stage, SubcheckId};
use statics_core::verify::InputError;

/// Errors emitted by `TutorService`.
///
/// None of these are fatal: the session is left unchanged and the learner can
/// try another action.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum TutorError {
    #[error("session has not been started")]
    NotStarted,
    #[error("session already completed")]
    Completed,
    #[error("cannot enter {stage} before the previous stage is complete")]
    PrerequisiteNotMet { stage: Stage },
    #[error("`{subcheck}` is not ready; finish {} first", join(.missing))]
    NotReady {
        subcheck: SubcheckId,
        missing: Vec<SubcheckId>,
    },
    #[error("cannot return to {requested}; session is already at {current}")]
    StageBehind { requested: Stage, current: Stage },
    #[error("unknown sub-check `{0}`")]
    UnknownSubcheck(String),
    #[error("{0} is not part of this problem")]
    UnknownStage(Stage),
    #[error("study timer still running ({remaining}s left)")]
    TimerRunning { remaining: u32 },
    #[error("skipping the study timer is disabled")]
    TimerSkipDisabled,
    #[error(transparent)]
    InvalidInput(#[from] InputError),
}

fn join(ids: &[SubcheckId]) -> String {
    ids.iter()
        .map(SubcheckId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
