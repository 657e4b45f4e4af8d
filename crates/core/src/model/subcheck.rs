use serde::{Deserialize, Serialize};

use crate::model::feedback::{FailureReason, Hints};
use crate::model::ids::SubcheckId;

//
// ─── TOLERANCE ─────────────────────────────────────────────────────────────────
//

/// Allowed deviation between a submitted and an expected number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tolerance {
    /// Fixed band in the quantity's own units.
    Absolute(f64),
    /// Band proportional to the magnitude of the expected value.
    Percent(f64),
}

impl Tolerance {
    /// Half-width of the accepted band around `expected`.
    #[must_use]
    pub fn band(self, expected: f64) -> f64 {
        match self {
            Tolerance::Absolute(width) => width,
            Tolerance::Percent(pct) => expected.abs() * pct / 100.0,
        }
    }

    pub(crate) fn raw(self) -> f64 {
        match self {
            Tolerance::Absolute(v) | Tolerance::Percent(v) => v,
        }
    }
}

//
// ─── KIND PAYLOADS ─────────────────────────────────────────────────────────────
//

/// One labelled option and whether it belongs in the answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceItem {
    pub label: String,
    pub correct: bool,
}

impl ChoiceItem {
    #[must_use]
    pub fn new(label: impl Into<String>, correct: bool) -> Self {
        Self {
            label: label.into(),
            correct,
        }
    }
}

/// Expected direction for one labelled line of a drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleTarget {
    pub role: String,
    /// Degrees CCW from +x.
    pub expected_deg: f64,
}

/// Expected ratio between the drawn lengths of two roles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LengthRatio {
    pub numerator: String,
    pub denominator: String,
    pub expected: f64,
    pub tolerance_pct: f64,
}

/// What a sub-check compares and how.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubcheckKind {
    /// `|submitted - expected| <= band`.
    Numeric {
        expected: f64,
        tolerance: Tolerance,
        min: Option<f64>,
        max: Option<f64>,
    },
    /// Angle entry compared with the minimal circular difference.
    Direction { expected_deg: f64, tolerance_deg: f64 },
    /// Exact, case-sensitive match against one of `choices`.
    Categorical { expected: String, choices: Vec<String> },
    /// All correct items and no incorrect item must be selected.
    MultiSelect { items: Vec<ChoiceItem> },
    /// Every `correct` item must be ticked; the others are optional.
    Checklist { items: Vec<ChoiceItem> },
    /// Free text containing every keyword, case-insensitive.
    Keyword { keywords: Vec<String> },
    /// Labelled lines must point in the expected directions.
    Drawing {
        targets: Vec<AngleTarget>,
        tolerance_deg: f64,
        ratio: Option<LengthRatio>,
    },
    /// A drawing must contain a plausible number of lines.
    LineCount { min: usize, max: Option<usize> },
    /// Passes on confirmation.
    Acknowledge,
    /// A number captured by an earlier sub-check must lie in `[min, max]`.
    CapturedRange {
        source: SubcheckId,
        min: f64,
        max: f64,
    },
    /// An angle captured by an earlier sub-check must lie strictly inside
    /// `sector` and within tolerance of `expected_deg`.
    CapturedDirection {
        source: SubcheckId,
        expected_deg: f64,
        tolerance_deg: f64,
        sector: (f64, f64),
    },
}

impl SubcheckKind {
    #[must_use]
    pub fn numeric(expected: f64, tolerance: Tolerance) -> Self {
        Self::Numeric {
            expected,
            tolerance,
            min: None,
            max: None,
        }
    }

    /// Numeric entry for a physically non-negative quantity.
    #[must_use]
    pub fn magnitude(expected: f64, tolerance: Tolerance) -> Self {
        Self::Numeric {
            expected,
            tolerance,
            min: Some(0.0),
            max: None,
        }
    }

    /// Numeric entry restricted to `[min, max]`.
    #[must_use]
    pub fn bounded(expected: f64, tolerance: Tolerance, min: f64, max: f64) -> Self {
        Self::Numeric {
            expected,
            tolerance,
            min: Some(min),
            max: Some(max),
        }
    }

    #[must_use]
    pub fn direction(expected_deg: f64, tolerance_deg: f64) -> Self {
        Self::Direction {
            expected_deg,
            tolerance_deg,
        }
    }

    #[must_use]
    pub fn categorical(expected: &str, choices: &[&str]) -> Self {
        Self::Categorical {
            expected: expected.to_string(),
            choices: choices.iter().map(ToString::to_string).collect(),
        }
    }

    #[must_use]
    pub fn multi_select(items: &[(&str, bool)]) -> Self {
        Self::MultiSelect {
            items: to_items(items),
        }
    }

    #[must_use]
    pub fn checklist(items: &[(&str, bool)]) -> Self {
        Self::Checklist {
            items: to_items(items),
        }
    }

    #[must_use]
    pub fn keywords(keywords: &[&str]) -> Self {
        Self::Keyword {
            keywords: keywords.iter().map(ToString::to_string).collect(),
        }
    }

    #[must_use]
    pub fn drawing(targets: &[(&str, f64)], tolerance_deg: f64) -> Self {
        Self::Drawing {
            targets: targets
                .iter()
                .map(|(role, expected_deg)| AngleTarget {
                    role: (*role).to_string(),
                    expected_deg: *expected_deg,
                })
                .collect(),
            tolerance_deg,
            ratio: None,
        }
    }

    /// Adds a length-ratio requirement to a drawing check. No-op on other kinds.
    #[must_use]
    pub fn with_ratio(mut self, numerator: &str, denominator: &str, expected: f64, tolerance_pct: f64) -> Self {
        if let Self::Drawing { ratio, .. } = &mut self {
            *ratio = Some(LengthRatio {
                numerator: numerator.to_string(),
                denominator: denominator.to_string(),
                expected,
                tolerance_pct,
            });
        }
        self
    }

    #[must_use]
    pub fn line_count(min: usize, max: Option<usize>) -> Self {
        Self::LineCount { min, max }
    }

    #[must_use]
    pub fn captured_range(source: &str, min: f64, max: f64) -> Self {
        Self::CapturedRange {
            source: SubcheckId::new(source),
            min,
            max,
        }
    }

    #[must_use]
    pub fn captured_direction(source: &str, expected_deg: f64, tolerance_deg: f64, sector: (f64, f64)) -> Self {
        Self::CapturedDirection {
            source: SubcheckId::new(source),
            expected_deg,
            tolerance_deg,
            sector,
        }
    }

    /// Option labels in authored order, for kinds that present options.
    #[must_use]
    pub fn choice_labels(&self) -> Vec<&str> {
        match self {
            SubcheckKind::Categorical { choices, .. } => choices.iter().map(String::as_str).collect(),
            SubcheckKind::MultiSelect { items } | SubcheckKind::Checklist { items } => {
                items.iter().map(|item| item.label.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Sub-check this kind reads a captured answer from, if any.
    #[must_use]
    pub fn captured_source(&self) -> Option<&SubcheckId> {
        match self {
            SubcheckKind::CapturedRange { source, .. }
            | SubcheckKind::CapturedDirection { source, .. } => Some(source),
            _ => None,
        }
    }
}

fn to_items(items: &[(&str, bool)]) -> Vec<ChoiceItem> {
    items
        .iter()
        .map(|(label, correct)| ChoiceItem::new(*label, *correct))
        .collect()
}

//
// ─── SUB-CHECK ─────────────────────────────────────────────────────────────────
//

/// One gated question inside a stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subcheck {
    id: SubcheckId,
    prompt: String,
    kind: SubcheckKind,
    depends_on: Vec<SubcheckId>,
    optional: bool,
    hints: Hints,
}

impl Subcheck {
    #[must_use]
    pub fn new(id: &str, prompt: impl Into<String>, kind: SubcheckKind) -> Self {
        Self {
            id: SubcheckId::new(id),
            prompt: prompt.into(),
            kind,
            depends_on: Vec::new(),
            optional: false,
            hints: Hints::new("Not quite. Re-check your work and try again."),
        }
    }

    /// Requires the listed sub-checks to pass before this one can be evaluated.
    #[must_use]
    pub fn after(mut self, ids: &[&str]) -> Self {
        self.depends_on
            .extend(ids.iter().map(|id| SubcheckId::new(*id)));
        self
    }

    /// Marks the sub-check as practice that never blocks its stage.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    #[must_use]
    pub fn hint(mut self, text: impl Into<String>) -> Self {
        self.hints.set_default(text);
        self
    }

    #[must_use]
    pub fn hint_on(mut self, reason: FailureReason, text: impl Into<String>) -> Self {
        self.hints.set_for(reason, text);
        self
    }

    #[must_use]
    pub fn id(&self) -> &SubcheckId {
        &self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn kind(&self) -> &SubcheckKind {
        &self.kind
    }

    #[must_use]
    pub fn depends_on(&self) -> &[SubcheckId] {
        &self.depends_on
    }

    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    #[must_use]
    pub fn hints(&self) -> &Hints {
        &self.hints
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_band_scales_with_expected() {
        assert_eq!(Tolerance::Absolute(0.5).band(67.5), 0.5);
        assert!((Tolerance::Percent(5.0).band(1200.0) - 60.0).abs() < 1e-9);
        assert!((Tolerance::Percent(5.0).band(-40.0) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn builder_sets_dependencies_and_hints() {
        let check = Subcheck::new(
            "compute.fr",
            "Resultant force (kN)",
            SubcheckKind::magnitude(67.5, Tolerance::Absolute(0.5)),
        )
        .after(&["implement.pivot"])
        .hint("Area of the load diagram.")
        .hint_on(FailureReason::TooHigh, "Did you remember the 1/2?");

        assert_eq!(check.depends_on(), &[SubcheckId::new("implement.pivot")]);
        assert_eq!(check.hints().for_reason(FailureReason::TooHigh), "Did you remember the 1/2?");
        assert_eq!(check.hints().for_reason(FailureReason::TooLow), "Area of the load diagram.");
        assert!(!check.is_optional());
    }

    #[test]
    fn ratio_only_attaches_to_drawings() {
        let drawing = SubcheckKind::drawing(&[("F1", 30.0), ("F2", 135.0)], 12.0)
            .with_ratio("F1", "F2", 1.6, 20.0);
        assert!(matches!(drawing, SubcheckKind::Drawing { ratio: Some(_), .. }));

        let plain = SubcheckKind::Acknowledge.with_ratio("a", "b", 1.0, 1.0);
        assert_eq!(plain, SubcheckKind::Acknowledge);
    }

    #[test]
    fn choice_labels_follow_authoring_order() {
        let kind = SubcheckKind::multi_select(&[("b", true), ("a", false)]);
        assert_eq!(kind.choice_labels(), vec!["b", "a"]);
        assert!(SubcheckKind::Acknowledge.choice_labels().is_empty());
    }
}
