//! The built-in sample record written by `folio sample`.

use folio_core::application::ports::LoadedRecord;

use crate::source::{DecodeError, decode_record};

/// Sample record document, as written to disk.
pub const SAMPLE_RECORD: &str = include_str!("../assets/sample_resume.json");

/// The sample record, decoded.
pub fn sample_record() -> Result<LoadedRecord, DecodeError> {
    decode_record(SAMPLE_RECORD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_is_clean() {
        let loaded = sample_record().unwrap();
        assert!(loaded.warnings.is_empty());
        assert!(loaded.record.validate().is_empty());
        assert_eq!(loaded.record.experience.len(), 4);
        assert_eq!(loaded.record.services.len(), 3);
    }
}
