#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod sessions;

pub use statics_core::Clock;

pub use catalog::ProblemCatalog;
pub use error::TutorError;

pub use sessions::{
    Presenter, Session, SessionProgress, StageGate, SubcheckResult, TutorAction, TutorEvent,
    TutorService,
};
