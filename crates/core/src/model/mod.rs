mod answer;
mod feedback;
mod ids;
mod problem;
mod settings;
mod stage;
mod subcheck;

pub use answer::{Answer, Drawing, Submission};
pub use feedback::{FailureReason, Hints};
pub use ids::{ProblemId, SessionId, SubcheckId};

pub use problem::{
    DEFAULT_STUDY_SECONDS, ProblemDefinition, ProblemDraft, ProblemError, StageDefinition, VocabTerm,
};
pub use settings::{SettingsError, TutorSettings, TutorSettingsDraft, MAX_STUDY_SECONDS};
pub use stage::Stage;
pub use subcheck::{AngleTarget, ChoiceItem, LengthRatio, Subcheck, SubcheckKind, Tolerance};
