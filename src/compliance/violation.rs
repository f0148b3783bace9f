//! Conformance violations.
//!
//! Every violation kind has one canonical message. The message text is part of the
//! public contract: callers match on it, so existing messages never change. New
//! constraints get new kinds.

use std::fmt;

/// Message for [`ViolationKind::NeedAppearancesMustBeAbsentOrFalse`].
pub const NEED_APPEARANCES_MUST_BE_ABSENT_OR_FALSE: &str =
    "NeedAppearances flag of the interactive form dictionary shall either not be present or shall be false.";

/// Message for [`ViolationKind::MalformedInteractiveForm`].
pub const MALFORMED_INTERACTIVE_FORM: &str =
    "Interactive form entry of the document catalog shall be a dictionary.";

/// Message for [`ViolationKind::EmbeddedFileMustBePdfMimeType`].
pub const EMBEDDED_FILE_MUST_BE_PDF_MIME_TYPE: &str = "Embedded file shall be of pdf mime type.";

/// Message for [`ViolationKind::EmbeddedFilesNotAllowed`].
pub const EMBEDDED_FILES_NOT_ALLOWED: &str =
    "File specification dictionary shall not contain the EF key.";

/// Message for [`ViolationKind::EmbeddedFileMissingMimeType`].
pub const EMBEDDED_FILE_MISSING_MIME_TYPE: &str =
    "MIME type of an embedded file shall be specified using the Subtype key.";

/// Message for [`ViolationKind::MissingAfRelationship`].
pub const MISSING_AF_RELATIONSHIP: &str =
    "File specification dictionary shall contain one of the predefined values for the AFRelationship key.";

/// Message for [`ViolationKind::MalformedEmbeddedFile`].
pub const MALFORMED_EMBEDDED_FILE: &str =
    "EF key of the file specification dictionary shall contain a dictionary with a valid F key.";

/// Message for [`ViolationKind::MissingOutputIntent`].
pub const MISSING_OUTPUT_INTENT: &str =
    "Document shall contain a PDF/A output intent with an embedded destination profile.";

/// Kinds of PDF/A violations detected by the rule engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    // Interactive forms
    /// `/NeedAppearances` is present and not `false`
    NeedAppearancesMustBeAbsentOrFalse,
    /// `/AcroForm` is present but not a dictionary
    MalformedInteractiveForm,

    // Embedded files
    /// Embedded file type is not in the allowed set for the level
    EmbeddedFileMustBePdfMimeType,
    /// The level does not allow embedded files at all
    EmbeddedFilesNotAllowed,
    /// Embedded file stream declares no `/Subtype`
    EmbeddedFileMissingMimeType,
    /// File specification lacks a valid `/AFRelationship`
    MissingAfRelationship,
    /// `/EF` is not a dictionary or its `/F` entry is not a stream
    MalformedEmbeddedFile,

    // Color
    /// No PDF/A output intent with a destination profile
    MissingOutputIntent,
}

impl ViolationKind {
    /// Every kind, in declaration order.
    pub const ALL: [ViolationKind; 8] = [
        ViolationKind::NeedAppearancesMustBeAbsentOrFalse,
        ViolationKind::MalformedInteractiveForm,
        ViolationKind::EmbeddedFileMustBePdfMimeType,
        ViolationKind::EmbeddedFilesNotAllowed,
        ViolationKind::EmbeddedFileMissingMimeType,
        ViolationKind::MissingAfRelationship,
        ViolationKind::MalformedEmbeddedFile,
        ViolationKind::MissingOutputIntent,
    ];

    /// The canonical message for this kind.
    pub fn message(&self) -> &'static str {
        match self {
            ViolationKind::NeedAppearancesMustBeAbsentOrFalse => {
                NEED_APPEARANCES_MUST_BE_ABSENT_OR_FALSE
            },
            ViolationKind::MalformedInteractiveForm => MALFORMED_INTERACTIVE_FORM,
            ViolationKind::EmbeddedFileMustBePdfMimeType => EMBEDDED_FILE_MUST_BE_PDF_MIME_TYPE,
            ViolationKind::EmbeddedFilesNotAllowed => EMBEDDED_FILES_NOT_ALLOWED,
            ViolationKind::EmbeddedFileMissingMimeType => EMBEDDED_FILE_MISSING_MIME_TYPE,
            ViolationKind::MissingAfRelationship => MISSING_AF_RELATIONSHIP,
            ViolationKind::MalformedEmbeddedFile => MALFORMED_EMBEDDED_FILE,
            ViolationKind::MissingOutputIntent => MISSING_OUTPUT_INTENT,
        }
    }

    /// Stable short code, e.g. `FORM-001`.
    pub fn code(&self) -> &'static str {
        match self {
            ViolationKind::NeedAppearancesMustBeAbsentOrFalse => "FORM-001",
            ViolationKind::MalformedInteractiveForm => "FORM-002",
            ViolationKind::EmbeddedFileMustBePdfMimeType => "FILE-001",
            ViolationKind::EmbeddedFilesNotAllowed => "FILE-002",
            ViolationKind::EmbeddedFileMissingMimeType => "FILE-003",
            ViolationKind::MissingAfRelationship => "FILE-004",
            ViolationKind::MalformedEmbeddedFile => "FILE-005",
            ViolationKind::MissingOutputIntent => "COLOR-001",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A violated PDF/A constraint.
///
/// Displays as the canonical message of its kind, with nothing interpolated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", .kind.message())]
pub struct ConformanceViolation {
    rule_id: &'static str,
    kind: ViolationKind,
}

impl ConformanceViolation {
    /// Create a violation raised by the rule with the given id.
    pub fn new(rule_id: &'static str, kind: ViolationKind) -> Self {
        Self { rule_id, kind }
    }

    /// Id of the rule that detected the violation.
    pub fn rule_id(&self) -> &'static str {
        self.rule_id
    }

    /// The violation kind.
    pub fn kind(&self) -> ViolationKind {
        self.kind
    }

    /// The canonical message.
    pub fn message(&self) -> &'static str {
        self.kind.message()
    }
}
