// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Failure deriving a display string from the profile.
///
/// The record is a build-time artifact, so these only fire on upstream data
/// corruption. They must never degrade to an empty string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("profile name is empty")]
    EmptyName,

    #[error("profile name '{name}' has no first name before the first space")]
    EmptyFirstName { name: String },
}

/// Root domain error type.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Cannot format profile: {0}")]
    Format(#[from] FormatError),

    #[error("Duplicate experience id '{id}' (entries {first} and {second})")]
    DuplicateJobId {
        id: String,
        first: usize,
        second: usize,
    },

    #[error("Experience entry '{id}' has no achievements")]
    EmptyAchievements { id: String },

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    #[error("Unknown section '{0}'")]
    UnknownSection(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Format(FormatError::EmptyName) => vec![
                "Set profile.name in the resume record".into(),
                "Example: \"name\": \"Jordan Rivera\"".into(),
            ],
            Self::Format(FormatError::EmptyFirstName { .. }) => vec![
                "Remove leading whitespace from profile.name".into(),
            ],
            Self::DuplicateJobId { id, .. } => vec![
                format!("Give each experience entry a unique id ('{}' is repeated)", id),
            ],
            Self::EmptyAchievements { id } => vec![
                format!("Add at least one achievement to experience entry '{}'", id),
                "The timeline shows the first achievement as the entry's quote".into(),
            ],
            Self::UnknownSection(_) => vec![
                "Valid sections: navigation, hero, services, experience, education, contact"
                    .into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Format(_)
            | Self::DuplicateJobId { .. }
            | Self::EmptyAchievements { .. } => ErrorCategory::Validation,
            Self::UnknownSection(_) => ErrorCategory::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
}
