use statics_core::model::Stage;

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub stage: Stage,
    /// Zero-based position of `stage` in the problem's sequence.
    pub stage_index: usize,
    pub stage_total: usize,
    /// Required sub-checks passed so far.
    pub passed: usize,
    pub required: usize,
    pub is_complete: bool,
}

impl SessionProgress {
    /// Required sub-checks still open.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.required.saturating_sub(self.passed)
    }
}
