//! Answer verification.
//!
//! Every verifier is a pure function of the sub-check's answer key, the
//! learner's submission and, for cross-stage checks, previously captured
//! answers. A wrong answer is a normal [`Verdict`]; only malformed input is an
//! error.

mod choice;
mod drawing;
mod numeric;

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use thiserror::Error;

use crate::model::{Answer, FailureReason, Submission, SubcheckId, SubcheckKind};

pub use choice::{verify_categorical, verify_checklist, verify_keywords, verify_multi_select};
pub use drawing::{verify_drawing, verify_line_count};
pub use numeric::{verify_captured_direction, verify_captured_range, verify_direction, verify_numeric};

// Absorbs representation error at the exact band edge (6.0 + 0.1 != 6.1).
pub(crate) const EDGE_SLACK: f64 = 1e-9;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum InputError {
    #[error("enter a finite number")]
    NotFinite,
    #[error("value must be at least {min}")]
    BelowMinimum { min: f64 },
    #[error("value must be at most {max}")]
    AboveMaximum { max: f64 },
    #[error("this question expects a {expected}, got a {got}")]
    WrongSubmission {
        expected: &'static str,
        got: &'static str,
    },
    #[error("`{0}` is not one of the options")]
    UnknownChoice(String),
    #[error("answer is empty")]
    EmptyText,
    #[error("no line is assigned to {0}")]
    MissingRole(String),
    #[error("{role} points at line {index}, but only {count} lines were drawn")]
    LineOutOfRange {
        role: String,
        index: usize,
        count: usize,
    },
    #[error("line {index} assigned to {role} has no length")]
    DegenerateLine { role: String, index: usize },
    #[error("answer `{0}` must be entered first")]
    MissingCapturedAnswer(SubcheckId),
}

//
// ─── VERDICT ───────────────────────────────────────────────────────────────────
//

/// One diagnostic measurement attached to a verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DiagnosticValue {
    Number(f64),
    Count(usize),
    Flag(bool),
    Text(String),
}

impl From<f64> for DiagnosticValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<usize> for DiagnosticValue {
    fn from(value: usize) -> Self {
        Self::Count(value)
    }
}

impl From<bool> for DiagnosticValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<String> for DiagnosticValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Named measurements describing the submission. Never contains the expected
/// answer.
pub type Diagnostics = BTreeMap<String, DiagnosticValue>;

/// Outcome of checking one submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub passed: bool,
    pub reason: Option<FailureReason>,
    pub diagnostics: Diagnostics,
}

impl Verdict {
    #[must_use]
    pub fn pass() -> Self {
        Self {
            passed: true,
            reason: None,
            diagnostics: Diagnostics::new(),
        }
    }

    #[must_use]
    pub fn fail(reason: FailureReason) -> Self {
        Self {
            passed: false,
            reason: Some(reason),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Pass when `ok`, otherwise fail with `reason`.
    #[must_use]
    pub fn check(ok: bool, reason: FailureReason) -> Self {
        if ok { Self::pass() } else { Self::fail(reason) }
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<DiagnosticValue>) -> Self {
        self.diagnostics.insert(key.into(), value.into());
        self
    }

    /// Stable key selecting the hint text on failure.
    #[must_use]
    pub fn hint_key(&self) -> Option<&'static str> {
        self.reason.map(FailureReason::key)
    }
}

//
// ─── DISPATCH ──────────────────────────────────────────────────────────────────
//

/// Read access to answers captured earlier in the session.
pub trait AnswerLookup {
    fn answer(&self, id: &str) -> Option<&Answer>;
}

impl AnswerLookup for HashMap<SubcheckId, Answer> {
    fn answer(&self, id: &str) -> Option<&Answer> {
        self.get(id)
    }
}

impl AnswerLookup for BTreeMap<SubcheckId, Answer> {
    fn answer(&self, id: &str) -> Option<&Answer> {
        self.get(id)
    }
}

/// Checks a submission against a sub-check's answer key.
///
/// # Errors
///
/// Returns `InputError` when the submission is malformed or outside the
/// question's domain. A wrong but well-formed answer is `Ok` with
/// `passed == false`.
pub fn verify(
    kind: &SubcheckKind,
    submission: &Submission,
    captured: &dyn AnswerLookup,
) -> Result<Verdict, InputError> {
    match kind {
        SubcheckKind::Numeric {
            expected,
            tolerance,
            min,
            max,
        } => verify_numeric(*expected, *tolerance, *min, *max, number(submission)?),
        SubcheckKind::Direction {
            expected_deg,
            tolerance_deg,
        } => verify_direction(*expected_deg, *tolerance_deg, number(submission)?),
        SubcheckKind::Categorical { expected, choices } => {
            verify_categorical(expected, choices, text(submission, "choice")?)
        }
        SubcheckKind::MultiSelect { items } => verify_multi_select(items, selection(submission)?),
        SubcheckKind::Checklist { items } => verify_checklist(items, selection(submission)?),
        SubcheckKind::Keyword { keywords } => verify_keywords(keywords, text(submission, "text")?),
        SubcheckKind::Drawing {
            targets,
            tolerance_deg,
            ratio,
        } => verify_drawing(targets, *tolerance_deg, ratio.as_ref(), drawing(submission)?),
        SubcheckKind::LineCount { min, max } => {
            Ok(verify_line_count(*min, *max, &drawing(submission)?.lines))
        }
        SubcheckKind::Acknowledge => {
            confirm(submission)?;
            Ok(Verdict::pass())
        }
        SubcheckKind::CapturedRange { source, min, max } => {
            confirm(submission)?;
            verify_captured_range(captured_number(captured, source)?, *min, *max)
        }
        SubcheckKind::CapturedDirection {
            source,
            expected_deg,
            tolerance_deg,
            sector,
        } => {
            confirm(submission)?;
            verify_captured_direction(
                captured_number(captured, source)?,
                *expected_deg,
                *tolerance_deg,
                *sector,
            )
        }
    }
}

fn wrong(expected: &'static str, submission: &Submission) -> InputError {
    InputError::WrongSubmission {
        expected,
        got: submission.shape(),
    }
}

fn number(submission: &Submission) -> Result<f64, InputError> {
    match submission {
        Submission::Number(value) => Ok(*value),
        other => Err(wrong("number", other)),
    }
}

fn text<'a>(submission: &'a Submission, expected: &'static str) -> Result<&'a str, InputError> {
    match submission {
        Submission::Choice(value) | Submission::Text(value) => Ok(value),
        other => Err(wrong(expected, other)),
    }
}

fn selection(submission: &Submission) -> Result<&std::collections::BTreeSet<String>, InputError> {
    match submission {
        Submission::Selection(labels) => Ok(labels),
        other => Err(wrong("selection", other)),
    }
}

fn drawing(submission: &Submission) -> Result<&crate::model::Drawing, InputError> {
    match submission {
        Submission::Drawing(drawing) => Ok(drawing),
        other => Err(wrong("drawing", other)),
    }
}

fn confirm(submission: &Submission) -> Result<(), InputError> {
    match submission {
        Submission::Confirm => Ok(()),
        other => Err(wrong("confirm", other)),
    }
}

fn captured_number(captured: &dyn AnswerLookup, source: &SubcheckId) -> Result<f64, InputError> {
    captured
        .answer(source.as_str())
        .and_then(Answer::as_number)
        .ok_or_else(|| InputError::MissingCapturedAnswer(source.clone()))
}
