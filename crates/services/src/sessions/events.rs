use serde::Serialize;

use statics_core::model::{Stage, SubcheckId};
use statics_core::verify::Diagnostics;

/// Hint key reported when a submission is rejected as malformed.
pub const INVALID_INPUT_HINT: &str = "invalid-input";

/// Outcome of one sub-check evaluation, as shown to the learner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubcheckResult {
    pub subcheck: SubcheckId,
    pub passed: bool,
    /// Stable key of the failure reason; `None` on pass.
    pub hint_key: Option<String>,
    /// Socratic hint text; never the expected answer.
    pub hint: Option<String>,
    pub diagnostics: Diagnostics,
}

/// Output events for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TutorEvent {
    StageChanged { stage: Stage },
    SubcheckResult(SubcheckResult),
    TimeRemaining { seconds: u32 },
}

/// Rendering collaborator the tutor reports to.
pub trait Presenter {
    fn present(&mut self, event: &TutorEvent);
}

/// Records events in order; handy for tests and replay.
impl Presenter for Vec<TutorEvent> {
    fn present(&mut self, event: &TutorEvent) {
        self.push(event.clone());
    }
}
