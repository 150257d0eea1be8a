//! JSON record source.
//!
//! The profile is mandatory and must decode. Every other top-level list is
//! decoded on its own: a list that fails to decode is replaced by an empty
//! one and reported as a [`LoadWarning`], so one bad section never takes the
//! whole page down.
//!
//! ```json
//! {
//!   "profile": { "name": "Jordan Rivera", "role": "Senior Growth Lead", "email": "j@example.com" },
//!   "core_expertise": ["Funnels", "Pricing"],
//!   "experience": [ { "id": "acme", "role": "Lead", "company": "Acme",
//!                     "period": "2022 - now", "achievements": ["..."], "tags": [] } ],
//!   "education": [ { "degree": "MBA", "school": "INSEAD" } ]
//! }
//! ```

use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use folio_core::{
    application::{
        ApplicationError,
        ports::{Filesystem, LoadWarning, LoadedRecord, RecordSource},
    },
    domain::{EventScript, Profile, ResumeRecord},
    error::{FolioError, FolioResult},
};

use crate::filesystem::LocalFilesystem;

/// Why a document could not be decoded at all.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("expected a JSON object at the top level")]
    NotAnObject,

    #[error("missing required `profile` object")]
    MissingProfile,

    #[error("profile: {0}")]
    Profile(serde_json::Error),
}

/// Loads records and event scripts from JSON documents.
#[derive(Debug, Clone, Default)]
pub struct JsonRecordSource<F = LocalFilesystem> {
    fs: F,
}

impl JsonRecordSource<LocalFilesystem> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<F: Filesystem> JsonRecordSource<F> {
    /// Read through another filesystem (e.g. `MemoryFilesystem` in tests).
    pub fn with_filesystem(fs: F) -> Self {
        Self { fs }
    }

    fn read(&self, location: &Path) -> FolioResult<String> {
        self.fs.read_file(location)
    }
}

/// Decode a record from text.
pub fn decode_record(text: &str) -> Result<LoadedRecord, DecodeError> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Object(mut document) = value else {
        return Err(DecodeError::NotAnObject);
    };

    let profile = document
        .remove("profile")
        .ok_or(DecodeError::MissingProfile)?;
    let profile: Profile = serde_json::from_value(profile).map_err(DecodeError::Profile)?;

    let mut warnings = Vec::new();
    let mut record = ResumeRecord::with_profile(profile);
    record.core_expertise = section(&mut document, "core_expertise", &mut warnings);
    record.experience = section(&mut document, "experience", &mut warnings);
    record.education = section(&mut document, "education", &mut warnings);
    record.certifications = section(&mut document, "certifications", &mut warnings);
    record.services = section(&mut document, "services", &mut warnings);
    record.highlights = section(&mut document, "highlights", &mut warnings);

    for key in document.keys() {
        debug!(key = %key, "ignoring unknown top-level key");
    }

    Ok(LoadedRecord { record, warnings })
}

/// Take `key` out of the document and decode it, falling back to the
/// default (and a warning) when it does not fit.
fn section<T>(document: &mut Map<String, Value>, key: &str, warnings: &mut Vec<LoadWarning>) -> T
where
    T: DeserializeOwned + Default,
{
    match document.remove(key) {
        None | Some(Value::Null) => T::default(),
        Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
            warn!(section = key, error = %e, "section does not decode, using empty");
            warnings.push(LoadWarning {
                field: key.to_owned(),
                message: e.to_string(),
            });
            T::default()
        }),
    }
}

impl<F: Filesystem> RecordSource for JsonRecordSource<F> {
    #[instrument(skip(self), fields(path = %location.display()))]
    fn load_record(&self, location: &Path) -> FolioResult<LoadedRecord> {
        let text = self.read(location)?;
        let loaded = decode_record(&text).map_err(|e| ApplicationError::RecordLoad {
            path: location.to_path_buf(),
            reason: e.to_string(),
        })?;
        debug!(
            jobs = loaded.record.experience.len(),
            warnings = loaded.warnings.len(),
            "record loaded"
        );
        Ok(loaded)
    }

    #[instrument(skip(self), fields(path = %location.display()))]
    fn load_script(&self, location: &Path) -> FolioResult<EventScript> {
        let to_script_error = |reason: String| -> FolioError {
            ApplicationError::EventScript {
                path: location.to_path_buf(),
                reason,
            }
            .into()
        };

        let text = self.read(location).map_err(|e| match e {
            FolioError::Application(ApplicationError::RecordNotFound { .. }) => {
                to_script_error("file not found".into())
            }
            other => other,
        })?;
        let script: EventScript =
            serde_json::from_str(&text).map_err(|e| to_script_error(e.to_string()))?;
        debug!(events = script.events.len(), "event script loaded");
        Ok(script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::MemoryFilesystem;
    use folio_core::domain::ViewEvent;

    const PROFILE: &str = r#""profile": {"name": "Jordan Rivera", "role": "Senior Growth Lead", "email": "j@example.com"}"#;

    fn source(json: &str) -> JsonRecordSource<MemoryFilesystem> {
        JsonRecordSource::with_filesystem(MemoryFilesystem::new().with_file("resume.json", json))
    }

    #[test]
    fn loads_minimal_record() {
        let loaded = source(&format!("{{{PROFILE}}}"))
            .load_record(Path::new("resume.json"))
            .unwrap();
        assert_eq!(loaded.record.profile.name, "Jordan Rivera");
        assert!(loaded.record.experience.is_empty());
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn broken_section_degrades_with_warning() {
        let json = format!(
            r#"{{{PROFILE}, "experience": [{{"id": 7}}], "core_expertise": ["SQL", "Pricing"]}}"#
        );
        let loaded = source(&json).load_record(Path::new("resume.json")).unwrap();
        assert!(loaded.record.experience.is_empty());
        assert_eq!(loaded.record.core_expertise, vec!["SQL", "Pricing"]);
        assert_eq!(loaded.warnings.len(), 1);
        assert_eq!(loaded.warnings[0].field, "experience");
    }

    #[test]
    fn null_section_is_silently_empty() {
        let json = format!(r#"{{{PROFILE}, "education": null}}"#);
        let loaded = source(&json).load_record(Path::new("resume.json")).unwrap();
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn broken_profile_is_fatal() {
        let err = source(r#"{"profile": {"name": "x"}}"#)
            .load_record(Path::new("resume.json"))
            .unwrap_err();
        assert!(matches!(
            err,
            FolioError::Application(ApplicationError::RecordLoad { ref reason, .. })
                if reason.starts_with("profile:")
        ));
    }

    #[test]
    fn non_object_document_is_fatal() {
        assert!(matches!(
            decode_record("[1, 2]"),
            Err(DecodeError::NotAnObject)
        ));
        assert!(matches!(
            decode_record("{}"),
            Err(DecodeError::MissingProfile)
        ));
    }

    #[test]
    fn missing_record_is_not_found() {
        let err = source("{}")
            .load_record(Path::new("other.json"))
            .unwrap_err();
        assert!(matches!(
            err,
            FolioError::Application(ApplicationError::RecordNotFound { .. })
        ));
    }

    #[test]
    fn loads_event_script() {
        let fs = MemoryFilesystem::new().with_file(
            "events.json",
            r#"{"events": [{"scroll": 10.0}, {"scroll": 60.0}]}"#,
        );
        let script = JsonRecordSource::with_filesystem(fs)
            .load_script(Path::new("events.json"))
            .unwrap();
        assert_eq!(script.events[1], ViewEvent::Scroll(60.0));
    }

    #[test]
    fn missing_script_is_script_error() {
        let err = source("{}")
            .load_script(Path::new("events.json"))
            .unwrap_err();
        assert!(matches!(
            err,
            FolioError::Application(ApplicationError::EventScript { .. })
        ));
    }
}
