use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::geometry::Segment;

/// Value a learner submitted for one sub-check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Submission {
    Number(f64),
    /// One option of a categorical question.
    Choice(String),
    /// Labels ticked in a multi-select or checklist.
    Selection(BTreeSet<String>),
    Text(String),
    Drawing(Drawing),
    /// Explicit "check" / "continue" click with no value attached.
    Confirm,
}

impl Submission {
    /// Convenience constructor for selections.
    #[must_use]
    pub fn selection<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Selection(labels.into_iter().map(Into::into).collect())
    }

    /// Short name of the submission shape, used in error messages.
    #[must_use]
    pub fn shape(&self) -> &'static str {
        match self {
            Submission::Number(_) => "number",
            Submission::Choice(_) => "choice",
            Submission::Selection(_) => "selection",
            Submission::Text(_) => "text",
            Submission::Drawing(_) => "drawing",
            Submission::Confirm => "confirm",
        }
    }

    /// The value kept in the session after this submission, if any.
    ///
    /// Drawings are re-measured on every check and never kept.
    #[must_use]
    pub fn to_answer(&self) -> Option<Answer> {
        match self {
            Submission::Number(value) => Some(Answer::Number(*value)),
            Submission::Choice(value) | Submission::Text(value) => Some(Answer::Text(value.clone())),
            Submission::Selection(labels) => Some(Answer::Selection(labels.clone())),
            Submission::Drawing(_) | Submission::Confirm => None,
        }
    }
}

/// Raw drawing plus the learner's assignment of roles (e.g. `F1`) to lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Drawing {
    pub lines: Vec<Segment>,
    /// Role name → index into `lines`.
    pub roles: BTreeMap<String, usize>,
}

impl Drawing {
    #[must_use]
    pub fn new(lines: Vec<Segment>) -> Self {
        Self {
            lines,
            roles: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>, line_index: usize) -> Self {
        self.roles.insert(role.into(), line_index);
        self
    }
}

/// Last submitted value of a sub-check, kept for display and for later checks
/// that depend on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Number(f64),
    Text(String),
    Selection(BTreeSet<String>),
}

impl Answer {
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Answer::Number(value) => Some(*value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drawings_and_confirms_are_not_kept() {
        assert_eq!(Submission::Confirm.to_answer(), None);
        assert_eq!(Submission::Drawing(Drawing::default()).to_answer(), None);
        assert_eq!(
            Submission::Number(67.5).to_answer(),
            Some(Answer::Number(67.5))
        );
        assert_eq!(
            Submission::Choice("Point B".into()).to_answer(),
            Some(Answer::Text("Point B".into()))
        );
    }

    #[test]
    fn selection_builder_collects_labels() {
        let Submission::Selection(labels) = Submission::selection(["b", "a", "b"]) else {
            panic!("expected selection");
        };
        assert_eq!(labels.len(), 2);
        assert!(labels.contains("a"));
    }
}
