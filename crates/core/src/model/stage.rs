use serde::{Deserialize, Serialize};
use std::fmt;

/// Position in the fixed Study → Translate → Assign → Implement → Compute →
/// Sanity-check sequence.
///
/// The derived ordering is the traversal order: variants compare by
/// declaration order, and compute parts compare by part number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    NotStarted,
    /// Quiet focus countdown before any question is shown.
    StudyTimer,
    StudyVocab,
    StudyIdentify,
    Translate,
    Assign,
    Implement,
    /// Guided computation, split into numbered parts starting at 1.
    Compute(u8),
    SanityCheck,
    Complete,
}

impl Stage {
    /// Single-letter tag of the method step this stage belongs to.
    #[must_use]
    pub fn letter(self) -> Option<char> {
        match self {
            Stage::NotStarted | Stage::Complete => None,
            Stage::StudyTimer | Stage::StudyVocab | Stage::StudyIdentify | Stage::SanityCheck => {
                Some('S')
            }
            Stage::Translate => Some('T'),
            Stage::Assign => Some('A'),
            Stage::Implement => Some('I'),
            Stage::Compute(_) => Some('C'),
        }
    }

    /// True for stages that a problem definition may list.
    ///
    /// The start, the study countdown and the completion marker are supplied by
    /// the engine itself.
    #[must_use]
    pub fn is_authored(self) -> bool {
        !matches!(self, Stage::NotStarted | Stage::StudyTimer | Stage::Complete)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::NotStarted => f.write_str("not started"),
            Stage::StudyTimer => f.write_str("S: study (focus timer)"),
            Stage::StudyVocab => f.write_str("S: study (vocabulary)"),
            Stage::StudyIdentify => f.write_str("S: study (givens & target)"),
            Stage::Translate => f.write_str("T: translate"),
            Stage::Assign => f.write_str("A: assign"),
            Stage::Implement => f.write_str("I: implement"),
            Stage::Compute(part) => write!(f, "C: compute (part {part})"),
            Stage::SanityCheck => f.write_str("S: sanity check"),
            Stage::Complete => f.write_str("complete"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_method_sequence() {
        let ordered = [
            Stage::NotStarted,
            Stage::StudyTimer,
            Stage::StudyVocab,
            Stage::StudyIdentify,
            Stage::Translate,
            Stage::Assign,
            Stage::Implement,
            Stage::Compute(1),
            Stage::Compute(2),
            Stage::SanityCheck,
            Stage::Complete,
        ];
        assert!(ordered.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn letters_and_authoring() {
        assert_eq!(Stage::SanityCheck.letter(), Some('S'));
        assert_eq!(Stage::Compute(3).letter(), Some('C'));
        assert!(!Stage::StudyTimer.is_authored());
        assert!(Stage::Compute(1).is_authored());
        assert_eq!(Stage::Compute(2).to_string(), "C: compute (part 2)");
    }
}
