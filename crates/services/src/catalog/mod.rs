//! Built-in statics problems with precomputed answer keys.

mod beam_reactions;
mod distributed_load;
mod force_triangle;
mod method_joints;
mod method_sections;
mod moment;
mod three_force_body;

use std::sync::Arc;

use statics_core::model::{ProblemDefinition, ProblemError, ProblemId};

/// Validated problem definitions, listed in teaching order.
#[derive(Debug, Clone, Default)]
pub struct ProblemCatalog {
    problems: Vec<Arc<ProblemDefinition>>,
}

impl ProblemCatalog {
    /// Builds every bundled problem.
    ///
    /// # Errors
    ///
    /// Returns the first `ProblemError` raised while validating a definition.
    pub fn builtin() -> Result<Self, ProblemError> {
        let builders: [fn() -> Result<ProblemDefinition, ProblemError>; 7] = [
            force_triangle::definition,
            moment::definition,
            distributed_load::definition,
            beam_reactions::definition,
            three_force_body::definition,
            method_joints::definition,
            method_sections::definition,
        ];
        let mut catalog = Self::default();
        for build in builders {
            catalog.insert(build()?);
        }
        Ok(catalog)
    }

    /// Adds or replaces a definition with the same id.
    pub fn insert(&mut self, problem: ProblemDefinition) {
        let problem = Arc::new(problem);
        match self.problems.iter_mut().find(|p| p.id() == problem.id()) {
            Some(slot) => *slot = problem,
            None => self.problems.push(problem),
        }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Arc<ProblemDefinition>> {
        self.problems
            .iter()
            .find(|problem| problem.id().as_str() == id)
            .cloned()
    }

    #[must_use]
    pub fn ids(&self) -> Vec<&ProblemId> {
        self.problems.iter().map(|problem| problem.id()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProblemDefinition> {
        self.problems.iter().map(AsRef::as_ref)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.problems.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statics_core::model::{DEFAULT_STUDY_SECONDS, Stage, SubcheckKind};

    #[test]
    fn every_builtin_problem_validates() {
        let catalog = ProblemCatalog::builtin().unwrap();
        let ids: Vec<&str> = catalog.ids().into_iter().map(ProblemId::as_str).collect();
        assert_eq!(
            ids,
            vec![
                "force-triangle",
                "moment",
                "distributed-load",
                "beam-reactions",
                "three-force-body",
                "method-joints",
                "method-sections",
            ]
        );
    }

    #[test]
    fn problems_walk_the_full_method() {
        let catalog = ProblemCatalog::builtin().unwrap();
        for problem in catalog.iter() {
            assert_eq!(problem.study_seconds(), DEFAULT_STUDY_SECONDS, "{}", problem.id());
            assert!(problem.has_stage(Stage::StudyVocab), "{}", problem.id());
            assert!(problem.has_stage(Stage::Translate), "{}", problem.id());
            assert!(problem.has_stage(Stage::Compute(1)), "{}", problem.id());
            assert!(problem.has_stage(Stage::SanityCheck), "{}", problem.id());
            assert!(!problem.statement().is_empty(), "{}", problem.id());
        }
    }

    #[test]
    fn force_triangle_answer_key() {
        let catalog = ProblemCatalog::builtin().unwrap();
        let problem = catalog.get("force-triangle").unwrap();

        let (stage, gamma) = problem.subcheck("compute.gamma").unwrap();
        assert_eq!(stage, Stage::Compute(1));
        assert!(matches!(gamma.kind(), SubcheckKind::Numeric { expected, .. } if *expected == 75.0));

        let (_, theta) = problem.subcheck("compute.theta3").unwrap();
        assert!(matches!(
            theta.kind(),
            SubcheckKind::Direction { expected_deg, .. } if (*expected_deg - 245.76).abs() < 1e-9
        ));
        assert!(problem.subcheck("assign.f1x").is_some_and(|(_, check)| check.is_optional()));

        // The ballpark band is centred on |F3|, not on F1.
        let (_, ballpark) = problem.subcheck("sanity.ballpark").unwrap();
        assert!(!ballpark.prompt().contains("F1"));
        assert!(matches!(
            ballpark.kind(),
            SubcheckKind::CapturedRange { min, max, .. } if *min < 413.2 && *max > 413.2 && *min > 300.0
        ));
    }

    #[test]
    fn insert_replaces_by_id() {
        let mut catalog = ProblemCatalog::builtin().unwrap();
        let before = catalog.len();
        let moment = moment::definition().unwrap();
        catalog.insert(moment);
        assert_eq!(catalog.len(), before);
        assert!(catalog.get("missing").is_none());
        assert!(!catalog.is_empty());
    }
}
