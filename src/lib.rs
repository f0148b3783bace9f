// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::enum_variant_names)]
#![allow(clippy::new_without_default)]

//! # PDF/A Guard
//!
//! PDF/A conformance checking for documents authored in Rust. A document is opened at
//! a conformance level (PDF/A-1a through PDF/A-3u), built up in memory, and validated
//! when it is closed. A document that violates its level is never written.
//!
//! ## Core Features
//!
//! - **Typed object graph**: [`object::Object`] sum type with checked accessors and
//!   reference resolution through [`graph::ObjectGraph`]
//! - **Rule registry**: ordered, fail-fast [`compliance::RuleRegistry`] shared by every
//!   document through a process-wide default
//! - **Interactive forms**: `/NeedAppearances` must be absent or `false` (ISO 19005-1 6.9)
//! - **Embedded files**: per-part MIME type policy, configurable from JSON
//!   ([`config::ValidationConfig`])
//! - **Output intents**: every document carries a `/GTS_PDFA1` output intent with an
//!   embedded ICC profile
//! - **Writing**: header, xref table, trailer `/ID`, XMP `pdfaid` identification
//!
//! ## Quick Start
//!
//! ```ignore
//! use pdfa_guard::compliance::{OutputIntent, PdfALevel, ViolationKind};
//! use pdfa_guard::document::PdfADocument;
//! use pdfa_guard::writer::AcroFormBuilder;
//! use pdfa_guard::Error;
//!
//! let intent = OutputIntent::new("Custom", "", "http://www.color.org", "sRGB IEC61966-2.1", icc);
//! let mut doc = PdfADocument::new(Vec::new(), PdfALevel::A1b, intent)?;
//! doc.add_new_page()?;
//! doc.set_acro_form(&AcroFormBuilder::new().need_appearances());
//!
//! match doc.close() {
//!     Err(Error::Conformance(violation)) => {
//!         assert_eq!(violation.kind(), ViolationKind::NeedAppearancesMustBeAbsentOrFalse);
//!     },
//!     _ => unreachable!(),
//! }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Object model
pub mod graph;
pub mod object;

// PDF/A conformance rules
pub mod compliance;

// Configuration
pub mod config;

// Document authoring
pub mod document;

// PDF writing
pub mod writer;

// Re-exports
pub use compliance::{
    ConformanceProfile, ConformanceViolation, OutputIntent, PdfALevel, PdfAValidator,
    ViolationKind,
};
pub use config::{EmbeddedFilePolicy, ValidationConfig};
pub use document::PdfADocument;
pub use error::{Error, Result};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
