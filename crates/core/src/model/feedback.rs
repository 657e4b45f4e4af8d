use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a verification did not pass.
///
/// Each reason has a stable hint key. Reasons describe the kind of mistake,
/// never the expected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureReason {
    TooLow,
    TooHigh,
    Mismatch,
    MissedCorrect,
    PickedIncorrect,
    MissingRequired,
    MissingKeyword,
    Misaligned,
    RatioOff,
    TooFewLines,
    TooManyLines,
    WrongQuadrant,
    AngleOff,
}

impl FailureReason {
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            FailureReason::TooLow => "too-low",
            FailureReason::TooHigh => "too-high",
            FailureReason::Mismatch => "mismatch",
            FailureReason::MissedCorrect => "missed-correct",
            FailureReason::PickedIncorrect => "picked-incorrect",
            FailureReason::MissingRequired => "missing-required",
            FailureReason::MissingKeyword => "missing-keyword",
            FailureReason::Misaligned => "misaligned",
            FailureReason::RatioOff => "ratio-off",
            FailureReason::TooFewLines => "too-few-lines",
            FailureReason::TooManyLines => "too-many-lines",
            FailureReason::WrongQuadrant => "wrong-quadrant",
            FailureReason::AngleOff => "angle-off",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Socratic hint text for a sub-check: one default plus optional overrides for
/// specific failure reasons.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hints {
    default: String,
    by_reason: Vec<(FailureReason, String)>,
}

impl Hints {
    #[must_use]
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            default: default.into(),
            by_reason: Vec::new(),
        }
    }

    pub(crate) fn set_default(&mut self, text: impl Into<String>) {
        self.default = text.into();
    }

    pub(crate) fn set_for(&mut self, reason: FailureReason, text: impl Into<String>) {
        let text = text.into();
        match self.by_reason.iter_mut().find(|(r, _)| *r == reason) {
            Some(slot) => slot.1 = text,
            None => self.by_reason.push((reason, text)),
        }
    }

    /// Hint for `reason`, falling back to the default text.
    #[must_use]
    pub fn for_reason(&self, reason: FailureReason) -> &str {
        self.by_reason
            .iter()
            .find(|(r, _)| *r == reason)
            .map_or(self.default.as_str(), |(_, text)| text.as_str())
    }

    #[must_use]
    pub fn default_text(&self) -> &str {
        &self.default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins_over_default() {
        let mut hints = Hints::new("Re-read the problem.");
        hints.set_for(FailureReason::TooHigh, "Did you forget the 1/2?");
        assert_eq!(hints.for_reason(FailureReason::TooHigh), "Did you forget the 1/2?");
        assert_eq!(hints.for_reason(FailureReason::TooLow), "Re-read the problem.");

        hints.set_for(FailureReason::TooHigh, "Triangle, not rectangle.");
        assert_eq!(hints.for_reason(FailureReason::TooHigh), "Triangle, not rectangle.");
    }

    #[test]
    fn keys_are_kebab_case() {
        assert_eq!(FailureReason::PickedIncorrect.key(), "picked-incorrect");
        let json = serde_json::to_string(&FailureReason::WrongQuadrant).unwrap();
        assert_eq!(json, "\"wrong-quadrant\"");
    }
}
