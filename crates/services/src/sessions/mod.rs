mod choices;
mod events;
mod gate;
mod progress;
mod state;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::TutorError;
pub use choices::presented_choices;
pub use events::{Presenter, SubcheckResult, TutorEvent, INVALID_INPUT_HINT};
pub use gate::StageGate;
pub use progress::SessionProgress;
pub use state::Session;
pub use workflow::{TutorAction, TutorService};
