use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use crate::model::ids::{ProblemId, SubcheckId};
use crate::model::stage::Stage;
use crate::model::subcheck::{Subcheck, SubcheckKind};

/// Study countdown used when a problem does not author its own.
pub const DEFAULT_STUDY_SECONDS: u32 = 180;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ProblemError {
    #[error("problem id must not be empty")]
    MissingId,
    #[error("problem has no authored stages")]
    NoStages,
    #[error("stage {0} is supplied by the engine and cannot be authored")]
    NotAuthored(Stage),
    #[error("compute parts are numbered from 1")]
    ComputePartZero,
    #[error("stage {stage} is listed after {previous}")]
    StagesOutOfOrder { stage: Stage, previous: Stage },
    #[error("stage {0} has no required sub-check")]
    EmptyStage(Stage),
    #[error("sub-check id `{0}` is used more than once")]
    DuplicateSubcheck(SubcheckId),
    #[error("sub-check `{subcheck}` depends on unknown `{dependency}`")]
    UnknownDependency {
        subcheck: SubcheckId,
        dependency: SubcheckId,
    },
    #[error("sub-check `{subcheck}` depends on `{dependency}`, which comes later")]
    ForwardDependency {
        subcheck: SubcheckId,
        dependency: SubcheckId,
    },
    #[error("sub-check `{0}` has a negative or non-finite tolerance")]
    InvalidTolerance(SubcheckId),
    #[error("sub-check `{0}` has a non-finite expected value")]
    NonFiniteExpected(SubcheckId),
    #[error("sub-check `{0}` has an empty domain")]
    InvalidBounds(SubcheckId),
    #[error("sub-check `{0}` has no options")]
    EmptyChoices(SubcheckId),
    #[error("sub-check `{0}` expects an answer that is not among its options")]
    ExpectedNotAChoice(SubcheckId),
    #[error("sub-check `{0}` has no correct option")]
    NoCorrectItem(SubcheckId),
    #[error("sub-check `{subcheck}` lists role `{role}` more than once")]
    DuplicateRole { subcheck: SubcheckId, role: String },
    #[error("sub-check `{subcheck}` compares lengths of unlisted role `{role}`")]
    RatioRoleMissing { subcheck: SubcheckId, role: String },
}

/// A term the learner reviews during the vocabulary stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VocabTerm {
    pub term: String,
    pub meaning: String,
}

impl VocabTerm {
    #[must_use]
    pub fn new(term: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            meaning: meaning.into(),
        }
    }
}

/// One authored stage and its gated sub-checks, in presentation order.
#[derive(Debug, Clone, PartialEq)]
pub struct StageDefinition {
    pub stage: Stage,
    pub title: String,
    pub subchecks: Vec<Subcheck>,
}

impl StageDefinition {
    #[must_use]
    pub fn new(stage: Stage, title: impl Into<String>) -> Self {
        Self {
            stage,
            title: title.into(),
            subchecks: Vec::new(),
        }
    }

    #[must_use]
    pub fn check(mut self, subcheck: Subcheck) -> Self {
        self.subchecks.push(subcheck);
        self
    }

    /// Sub-checks that must pass before the stage is complete.
    pub fn required(&self) -> impl Iterator<Item = &Subcheck> {
        self.subchecks.iter().filter(|check| !check.is_optional())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProblemDraft {
    pub id: String,
    pub title: String,
    pub statement: String,
    pub study_seconds: Option<u32>,
    pub vocabulary: Vec<VocabTerm>,
    pub stages: Vec<StageDefinition>,
}

/// Immutable description of one statics scenario: its stages, sub-checks and
/// answer key.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemDefinition {
    id: ProblemId,
    title: String,
    statement: String,
    study_seconds: u32,
    vocabulary: Vec<VocabTerm>,
    stages: Vec<StageDefinition>,
}

impl ProblemDraft {
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn statement(mut self, text: impl Into<String>) -> Self {
        self.statement = text.into();
        self
    }

    #[must_use]
    pub fn term(mut self, term: impl Into<String>, meaning: impl Into<String>) -> Self {
        self.vocabulary.push(VocabTerm::new(term, meaning));
        self
    }

    #[must_use]
    pub fn stage(mut self, stage: StageDefinition) -> Self {
        self.stages.push(stage);
        self
    }

    /// Validate the draft into an immutable problem definition.
    ///
    /// # Errors
    ///
    /// Returns `ProblemError` when the stages are not authored in traversal
    /// order, a stage has nothing to pass, sub-check ids collide, a dependency
    /// points at an unknown or later sub-check, or a sub-check's answer key is
    /// unusable.
    pub fn validate(self) -> Result<ProblemDefinition, ProblemError> {
        let id = self.id.trim().to_string();
        if id.is_empty() {
            return Err(ProblemError::MissingId);
        }
        if self.stages.is_empty() {
            return Err(ProblemError::NoStages);
        }

        let mut previous: Option<Stage> = None;
        for def in &self.stages {
            if !def.stage.is_authored() {
                return Err(ProblemError::NotAuthored(def.stage));
            }
            if def.stage == Stage::Compute(0) {
                return Err(ProblemError::ComputePartZero);
            }
            if let Some(prev) = previous {
                if def.stage <= prev {
                    return Err(ProblemError::StagesOutOfOrder {
                        stage: def.stage,
                        previous: prev,
                    });
                }
            }
            if def.required().next().is_none() {
                return Err(ProblemError::EmptyStage(def.stage));
            }
            previous = Some(def.stage);
        }

        let mut all_ids = HashSet::new();
        for check in self.stages.iter().flat_map(|def| def.subchecks.iter()) {
            if !all_ids.insert(check.id().clone()) {
                return Err(ProblemError::DuplicateSubcheck(check.id().clone()));
            }
        }

        let mut seen: HashSet<&SubcheckId> = HashSet::new();
        for check in self.stages.iter().flat_map(|def| def.subchecks.iter()) {
            let upstream = check
                .depends_on()
                .iter()
                .chain(check.kind().captured_source());
            for dependency in upstream {
                if seen.contains(dependency) {
                    continue;
                }
                let subcheck = check.id().clone();
                let dependency = dependency.clone();
                return Err(if all_ids.contains(&dependency) {
                    ProblemError::ForwardDependency {
                        subcheck,
                        dependency,
                    }
                } else {
                    ProblemError::UnknownDependency {
                        subcheck,
                        dependency,
                    }
                });
            }
            validate_kind(check.id(), check.kind())?;
            seen.insert(check.id());
        }

        Ok(ProblemDefinition {
            id: ProblemId::new(id),
            title: self.title.trim().to_string(),
            statement: self.statement,
            study_seconds: self.study_seconds.unwrap_or(DEFAULT_STUDY_SECONDS),
            vocabulary: self.vocabulary,
            stages: self.stages,
        })
    }
}

fn validate_kind(id: &SubcheckId, kind: &SubcheckKind) -> Result<(), ProblemError> {
    let tolerance_ok = |t: f64| t.is_finite() && t >= 0.0;
    let err = |make: fn(SubcheckId) -> ProblemError| Err(make(id.clone()));

    match kind {
        SubcheckKind::Numeric {
            expected,
            tolerance,
            min,
            max,
        } => {
            if !expected.is_finite() {
                return err(ProblemError::NonFiniteExpected);
            }
            if !tolerance_ok(tolerance.raw()) {
                return err(ProblemError::InvalidTolerance);
            }
            if let (Some(lo), Some(hi)) = (min, max) {
                if lo > hi {
                    return err(ProblemError::InvalidBounds);
                }
            }
        }
        SubcheckKind::Direction {
            expected_deg,
            tolerance_deg,
        } => {
            if !expected_deg.is_finite() {
                return err(ProblemError::NonFiniteExpected);
            }
            if !tolerance_ok(*tolerance_deg) {
                return err(ProblemError::InvalidTolerance);
            }
        }
        SubcheckKind::Categorical { expected, choices } => {
            if choices.is_empty() {
                return err(ProblemError::EmptyChoices);
            }
            if !choices.contains(expected) {
                return err(ProblemError::ExpectedNotAChoice);
            }
        }
        SubcheckKind::MultiSelect { items } | SubcheckKind::Checklist { items } => {
            if items.is_empty() {
                return err(ProblemError::EmptyChoices);
            }
            if !items.iter().any(|item| item.correct) {
                return err(ProblemError::NoCorrectItem);
            }
        }
        SubcheckKind::Keyword { keywords } => {
            if keywords.iter().all(|kw| kw.trim().is_empty()) {
                return err(ProblemError::EmptyChoices);
            }
        }
        SubcheckKind::Drawing {
            targets,
            tolerance_deg,
            ratio,
        } => {
            if targets.is_empty() {
                return err(ProblemError::EmptyChoices);
            }
            if !tolerance_ok(*tolerance_deg) {
                return err(ProblemError::InvalidTolerance);
            }
            let mut roles = HashSet::new();
            for target in targets {
                if !target.expected_deg.is_finite() {
                    return err(ProblemError::NonFiniteExpected);
                }
                if !roles.insert(target.role.as_str()) {
                    return Err(ProblemError::DuplicateRole {
                        subcheck: id.clone(),
                        role: target.role.clone(),
                    });
                }
            }
            if let Some(ratio) = ratio {
                for role in [&ratio.numerator, &ratio.denominator] {
                    if !roles.contains(role.as_str()) {
                        return Err(ProblemError::RatioRoleMissing {
                            subcheck: id.clone(),
                            role: role.clone(),
                        });
                    }
                }
                if !(ratio.expected.is_finite() && ratio.expected > 0.0) {
                    return err(ProblemError::NonFiniteExpected);
                }
                if !tolerance_ok(ratio.tolerance_pct) {
                    return err(ProblemError::InvalidTolerance);
                }
            }
        }
        SubcheckKind::LineCount { min, max } => {
            if max.is_some_and(|max| max < *min) {
                return err(ProblemError::InvalidBounds);
            }
        }
        SubcheckKind::Acknowledge => {}
        SubcheckKind::CapturedRange { min, max, .. } => {
            if !(min.is_finite() && max.is_finite()) || min > max {
                return err(ProblemError::InvalidBounds);
            }
        }
        SubcheckKind::CapturedDirection {
            expected_deg,
            tolerance_deg,
            sector,
            ..
        } => {
            if !expected_deg.is_finite() {
                return err(ProblemError::NonFiniteExpected);
            }
            if !tolerance_ok(*tolerance_deg) {
                return err(ProblemError::InvalidTolerance);
            }
            if !(sector.0.is_finite() && sector.1.is_finite()) || sector.0 >= sector.1 {
                return err(ProblemError::InvalidBounds);
            }
        }
    }
    Ok(())
}

impl ProblemDefinition {
    #[must_use]
    pub fn id(&self) -> &ProblemId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn statement(&self) -> &str {
        &self.statement
    }

    #[must_use]
    pub fn study_seconds(&self) -> u32 {
        self.study_seconds
    }

    #[must_use]
    pub fn vocabulary(&self) -> &[VocabTerm] {
        &self.vocabulary
    }

    #[must_use]
    pub fn stages(&self) -> &[StageDefinition] {
        &self.stages
    }

    #[must_use]
    pub fn stage(&self, stage: Stage) -> Option<&StageDefinition> {
        self.stages.iter().find(|def| def.stage == stage)
    }

    /// Finds a sub-check and the stage that owns it.
    #[must_use]
    pub fn subcheck(&self, id: &str) -> Option<(Stage, &Subcheck)> {
        self.stages.iter().find_map(|def| {
            def.subchecks
                .iter()
                .find(|check| check.id().as_str() == id)
                .map(|check| (def.stage, check))
        })
    }

    /// Every stage a session of this problem walks through, in order.
    #[must_use]
    pub fn stage_sequence(&self) -> Vec<Stage> {
        let mut sequence = Vec::with_capacity(self.stages.len() + 3);
        sequence.push(Stage::NotStarted);
        sequence.push(Stage::StudyTimer);
        sequence.extend(self.stages.iter().map(|def| def.stage));
        sequence.push(Stage::Complete);
        sequence
    }

    /// True if the stage appears in this problem's sequence.
    #[must_use]
    pub fn has_stage(&self, stage: Stage) -> bool {
        !stage.is_authored() || self.stage(stage).is_some()
    }

    #[must_use]
    pub fn next_stage(&self, stage: Stage) -> Option<Stage> {
        let sequence = self.stage_sequence();
        let pos = sequence.iter().position(|s| *s == stage)?;
        sequence.get(pos + 1).copied()
    }

    #[must_use]
    pub fn previous_stage(&self, stage: Stage) -> Option<Stage> {
        let sequence = self.stage_sequence();
        let pos = sequence.iter().position(|s| *s == stage)?;
        pos.checked_sub(1).and_then(|prev| sequence.get(prev).copied())
    }

    /// Number of sub-checks that gate progression.
    #[must_use]
    pub fn required_count(&self) -> usize {
        self.stages.iter().map(|def| def.required().count()).sum()
    }
}
