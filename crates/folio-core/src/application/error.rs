//! Application layer errors.
//!
//! These errors represent failures in orchestration, not presentation logic.
//! Record and formatting errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The resume record file does not exist.
    #[error("Resume record not found at {path}")]
    RecordNotFound { path: PathBuf },

    /// The resume record could not be decoded.
    #[error("Cannot load resume record {path}: {reason}")]
    RecordLoad { path: PathBuf, reason: String },

    /// The event script could not be read or decoded.
    #[error("Cannot load event script {path}: {reason}")]
    EventScript { path: PathBuf, reason: String },

    /// Page rendering failed.
    #[error("Page rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Adapter state lock poisoned.
    #[error("Adapter state lock poisoned")]
    LockPoisoned,

    /// Output file exists and overwriting was not requested.
    #[error("Output already exists at {path}")]
    OutputExists { path: PathBuf },

    /// Strict mode and the page is not complete.
    #[error("Strict mode: {} issue(s) found", issues.len())]
    StrictModeViolation { issues: Vec<String> },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::RecordNotFound { path } => vec![
                format!("No file at {}", path.display()),
                "Create a starting record with: folio sample -o resume.json".into(),
            ],
            Self::RecordLoad { reason, .. } => vec![
                format!("Decoding failed: {}", reason),
                "The record needs at least a profile with name, role and email".into(),
                "Run 'folio check <RECORD>' for details".into(),
            ],
            Self::EventScript { .. } => vec![
                "Event scripts look like: {\"events\": [{\"scroll\": 120.0}]}".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::OutputExists { path } => vec![
                format!("File already exists: {}", path.display()),
                "Use --force to overwrite".into(),
                "Or choose another directory with --output".into(),
            ],
            Self::StrictModeViolation { issues } => {
                let mut out: Vec<String> = issues.iter().map(|i| format!("  • {i}")).collect();
                out.push("Fix the record or drop --strict to render what is valid".into());
                out
            }
            Self::RenderingFailed { .. } | Self::LockPoisoned => {
                vec!["Check the error details above".into()]
            }
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::RecordNotFound { .. } => ErrorCategory::NotFound,
            Self::RecordLoad { .. }
            | Self::EventScript { .. }
            | Self::OutputExists { .. }
            | Self::StrictModeViolation { .. } => ErrorCategory::Validation,
            Self::RenderingFailed { .. } | Self::FilesystemError { .. } | Self::LockPoisoned => {
                ErrorCategory::Internal
            }
        }
    }
}
