//! PDF writing module for PDF/A documents.
//!
//! This module provides the builders that put objects into a document graph and the
//! writer that serializes the graph once it has passed validation.
//!
//! ## Architecture
//!
//! ```text
//! [FileAttachment] / [AcroFormBuilder] / output intent / [XmpWriter]
//!     ↓
//! DocumentGraph (catalog + object store)
//!     ↓
//! PdfAValidator (close time)
//!     ↓
//! [PdfWriter] (assembles header, body, xref, trailer)
//!     ↓
//! [ObjectSerializer] (serializes PDF objects)
//!     ↓
//! PDF bytes
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use pdfa_guard::writer::{FileAttachment, PdfWriterConfig};
//!
//! let config = PdfWriterConfig::default().with_title("Quarterly report");
//! let mut document = PdfADocument::with_config(sink, profile, config, PdfAValidator::new())?;
//! document.add_file_attachment(FileAttachment::new("report.pdf", bytes, "application/pdf"))?;
//! let sink = document.close()?;
//! ```

mod acroform;
mod embedded_files;
mod object_serializer;
mod output_intent;
mod pdf_writer;
mod xmp_metadata;

pub use acroform::AcroFormBuilder;
pub use embedded_files::{build_names_array, AFRelationship, FileAttachment};
pub use object_serializer::ObjectSerializer;
pub use output_intent::{build_icc_stream, build_output_intent};
pub use pdf_writer::{PdfWriter, PdfWriterConfig};
pub use xmp_metadata::XmpWriter;
