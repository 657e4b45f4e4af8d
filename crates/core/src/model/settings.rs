use thiserror::Error;

/// Longest study countdown a learner can configure.
pub const MAX_STUDY_SECONDS: u32 = 3600;

/// Per-run tutor behaviour, independent of the problem being studied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TutorSettings {
    study_seconds: Option<u32>,
    auto_advance: bool,
    allow_timer_skip: bool,
    shuffle_choices: bool,
}

#[derive(Clone, Debug)]
pub struct TutorSettingsDraft {
    pub study_seconds: Option<u32>,
    pub auto_advance: bool,
    pub allow_timer_skip: bool,
    pub shuffle_choices: bool,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("study duration must be at most {MAX_STUDY_SECONDS} seconds, got {0}")]
    StudyTooLong(u32),
}

impl Default for TutorSettingsDraft {
    fn default() -> Self {
        Self {
            study_seconds: None,
            auto_advance: true,
            allow_timer_skip: true,
            shuffle_choices: false,
        }
    }
}

impl TutorSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the draft into settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::StudyTooLong` if the study override exceeds
    /// [`MAX_STUDY_SECONDS`].
    pub fn validate(self) -> Result<TutorSettings, SettingsError> {
        if let Some(secs) = self.study_seconds {
            if secs > MAX_STUDY_SECONDS {
                return Err(SettingsError::StudyTooLong(secs));
            }
        }

        Ok(TutorSettings {
            study_seconds: self.study_seconds,
            auto_advance: self.auto_advance,
            allow_timer_skip: self.allow_timer_skip,
            shuffle_choices: self.shuffle_choices,
        })
    }
}

impl TutorSettings {
    /// Study duration to use, falling back to the problem's own.
    #[must_use]
    pub fn study_seconds_or(&self, problem_default: u32) -> u32 {
        self.study_seconds.unwrap_or(problem_default)
    }

    #[must_use]
    pub fn study_seconds(&self) -> Option<u32> {
        self.study_seconds
    }

    #[must_use]
    pub fn auto_advance(&self) -> bool {
        self.auto_advance
    }

    #[must_use]
    pub fn allow_timer_skip(&self) -> bool {
        self.allow_timer_skip
    }

    #[must_use]
    pub fn shuffle_choices(&self) -> bool {
        self.shuffle_choices
    }
}

impl Default for TutorSettings {
    fn default() -> Self {
        Self {
            study_seconds: None,
            auto_advance: true,
            allow_timer_skip: true,
            shuffle_choices: false,
        }
    }
}
