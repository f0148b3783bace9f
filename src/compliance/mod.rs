//! PDF/A conformance checking.
//!
//! A document is opened under a [`ConformanceProfile`] (a [`PdfALevel`] plus an
//! [`OutputIntent`]). When it is closed, [`PdfAValidator`] runs the rules of a
//! [`RuleRegistry`] against the document graph and returns the first
//! [`ConformanceViolation`] it finds. A violation aborts the close.
//!
//! ## PDF/A Conformance Levels (Archival)
//!
//! - **PDF/A-1b**: Basic conformance, visual appearance preservation
//! - **PDF/A-1a**: Full conformance, includes logical structure (Tagged PDF)
//! - **PDF/A-2b**: Based on PDF 1.7, allows JPEG2000, transparency
//! - **PDF/A-2a**: PDF/A-2b plus logical structure
//! - **PDF/A-2u**: PDF/A-2b plus Unicode mapping
//! - **PDF/A-3b**: PDF/A-2b plus embedded files of any type
//! - **PDF/A-3a**: PDF/A-3b plus logical structure
//! - **PDF/A-3u**: PDF/A-3b plus Unicode mapping
//!
//! ## Rules
//!
//! | Rule | Levels | Constraint |
//! |------|--------|------------|
//! | [`AcroFormRule`] | all | `/NeedAppearances` absent or `false` |
//! | [`EmbeddedFilesRule`] | per policy table | embedded file MIME type / AFRelationship |
//! | [`OutputIntentRule`] | all | `/GTS_PDFA1` output intent with ICC profile |
//!
//! ## Standards Reference
//!
//! - ISO 19005-1:2005 (PDF/A-1)
//! - ISO 19005-2:2011 (PDF/A-2)
//! - ISO 19005-3:2012 (PDF/A-3)

mod pdf_a;
mod registry;
pub mod rules;
mod types;
mod violation;

pub use pdf_a::{validate_pdf_a, PdfAValidator};
pub use registry::{default_registry, RuleRegistry};
pub use rules::{
    AcroFormRule, AcroFormStatus, ConformanceRule, EmbeddedFilesRule, FileSpecSource,
    OutputIntentRule,
};
pub use types::{ConformanceProfile, OutputIntent, PdfALevel, PdfAPart};
pub use violation::{
    ConformanceViolation, ViolationKind, EMBEDDED_FILES_NOT_ALLOWED,
    EMBEDDED_FILE_MISSING_MIME_TYPE, EMBEDDED_FILE_MUST_BE_PDF_MIME_TYPE, MALFORMED_EMBEDDED_FILE,
    MALFORMED_INTERACTIVE_FORM, MISSING_AF_RELATIONSHIP, MISSING_OUTPUT_INTENT,
    NEED_APPEARANCES_MUST_BE_ABSENT_OR_FALSE,
};
