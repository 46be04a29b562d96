//! Survey stage machine — tracks which screen the user is on.

use serde::{Deserialize, Serialize};

/// The screens of the survey, in traversal order.
///
/// Progresses linearly: Landing → TshirtSelection → PreferencesIntro →
/// Questions → RegistrationIntro → Registration → Completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Landing,
    TshirtSelection,
    PreferencesIntro,
    Questions,
    RegistrationIntro,
    Registration,
    Completed,
}

impl Stage {
    /// Get the next stage in the linear progression, if any.
    pub fn next(&self) -> Option<Stage> {
        use Stage::*;
        match self {
            Landing => Some(TshirtSelection),
            TshirtSelection => Some(PreferencesIntro),
            PreferencesIntro => Some(Questions),
            Questions => Some(RegistrationIntro),
            RegistrationIntro => Some(Registration),
            Registration => Some(Completed),
            Completed => None,
        }
    }

    /// Whether this stage is terminal (the survey is done).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::Landing
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Landing => "landing",
            Self::TshirtSelection => "tshirt_selection",
            Self::PreferencesIntro => "preferences_intro",
            Self::Questions => "questions",
            Self::RegistrationIntro => "registration_intro",
            Self::Registration => "registration",
            Self::Completed => "completed",
        };
        write!(f, "{s}")
    }
}
