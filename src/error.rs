//! Error types for the crate.
//!
//! Conformance violations have their own type,
//! [`ConformanceViolation`](crate::compliance::ConformanceViolation). This module wraps it
//! together with the failures that belong to document authoring (I/O, configuration,
//! misuse of the object graph).

use crate::compliance::ConformanceViolation;

/// Result type alias for crate operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building or closing a PDF/A document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document violates its PDF/A conformance level
    #[error(transparent)]
    Conformance(#[from] ConformanceViolation),

    /// A PDF/A document was opened without an output intent
    #[error("PDF/A documents require an output intent")]
    MissingOutputIntent,

    /// Object has wrong type
    #[error("Invalid object type: expected {expected}, found {found}")]
    InvalidObjectType {
        /// Expected object type
        expected: String,
        /// Actual object type found
        found: String,
    },

    /// Page index does not exist
    #[error("Page index {index} out of range (document has {count} pages)")]
    PageIndexOutOfRange {
        /// Requested page index
        index: usize,
        /// Number of pages in the document
        count: usize,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::ViolationKind;

    #[test]
    fn test_conformance_error_is_transparent() {
        let violation =
            ConformanceViolation::new("acro-form", ViolationKind::NeedAppearancesMustBeAbsentOrFalse);
        let err = Error::from(violation);
        assert_eq!(
            err.to_string(),
            "NeedAppearances flag of the interactive form dictionary shall either not be present or shall be false."
        );
    }

    #[test]
    fn test_invalid_object_type_error() {
        let err = Error::InvalidObjectType {
            expected: "Dictionary".to_string(),
            found: "Array".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Dictionary"));
        assert!(msg.contains("Array"));
    }

    #[test]
    fn test_page_index_error() {
        let err = Error::PageIndexOutOfRange { index: 3, count: 1 };
        assert!(err.to_string().contains("3"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
