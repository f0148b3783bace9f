//! PDF document writer.
//!
//! Serializes a [`DocumentGraph`] with proper structure: header, body, xref table,
//! and trailer. The catalog is written as the last object of the body.

use super::embedded_files::pdf_date;
use super::object_serializer::ObjectSerializer;
use crate::error::Result;
use crate::graph::{DocumentGraph, ObjectGraph};
use crate::object::{Dictionary, Object, ObjectRef};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::io::Write;
use uuid::Uuid;

/// Configuration for PDF generation.
#[derive(Debug, Clone)]
pub struct PdfWriterConfig {
    /// Document title
    pub title: Option<String>,
    /// Document author
    pub author: Option<String>,
    /// Document subject
    pub subject: Option<String>,
    /// Creator application
    pub creator: Option<String>,
    /// Producer recorded in the Info dictionary and XMP metadata
    pub producer: Option<String>,
    /// Whether to compress streams
    pub compress: bool,
}

impl Default for PdfWriterConfig {
    fn default() -> Self {
        Self {
            title: None,
            author: None,
            subject: None,
            creator: None,
            producer: Some(format!("pdfa_guard {}", env!("CARGO_PKG_VERSION"))),
            compress: false,
        }
    }
}

impl PdfWriterConfig {
    /// Set document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set document author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set document subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the creator application.
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    /// Set the producer.
    pub fn with_producer(mut self, producer: impl Into<String>) -> Self {
        self.producer = Some(producer.into());
        self
    }

    /// Enable or disable stream compression.
    ///
    /// When enabled, embedded files and the ICC profile are compressed with
    /// FlateDecode. The XMP metadata stream is never compressed.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}

/// Compress data using Flate/Deflate compression.
///
/// Returns compressed bytes suitable for FlateDecode filter.
pub(crate) fn compress_data(data: &[u8]) -> std::io::Result<Vec<u8>> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// PDF document writer.
#[derive(Debug, Clone)]
pub struct PdfWriter {
    config: PdfWriterConfig,
    version: &'static str,
}

impl PdfWriter {
    /// Create a writer for a header version such as `"1.4"` or `"1.7"`.
    pub fn new(config: PdfWriterConfig, version: &'static str) -> Self {
        Self { config, version }
    }

    /// The writer configuration.
    pub fn config(&self) -> &PdfWriterConfig {
        &self.config
    }

    /// Build the document Info dictionary.
    pub fn build_info(&self, date: &DateTime<Utc>) -> Dictionary {
        let mut info = Dictionary::new();
        let entries = [
            ("Title", &self.config.title),
            ("Author", &self.config.author),
            ("Subject", &self.config.subject),
            ("Creator", &self.config.creator),
            ("Producer", &self.config.producer),
        ];
        for (key, value) in entries {
            if let Some(value) = value {
                info.insert(key.to_string(), ObjectSerializer::text_string(value));
            }
        }
        let date = Object::String(pdf_date(date).into_bytes());
        info.insert("CreationDate".to_string(), date.clone());
        info.insert("ModDate".to_string(), date);
        info
    }

    /// Serialize a graph into a complete PDF file.
    pub fn write_graph(&self, graph: &DocumentGraph, info: Option<ObjectRef>) -> Result<Vec<u8>> {
        let serializer = ObjectSerializer::compact();
        let mut output = Vec::new();
        let mut offsets: HashMap<u32, usize> = HashMap::new();

        writeln!(output, "%PDF-{}", self.version)?;
        // Binary marker: at least four bytes above 127
        output.extend_from_slice(b"%\xE2\xE3\xCF\xD3\n");

        for (reference, obj) in graph.objects().iter() {
            offsets.insert(reference.id, output.len());
            serializer.write_indirect(&mut output, reference, obj)?;
        }

        let catalog_ref = ObjectRef::new(graph.objects().next_id(), 0);
        offsets.insert(catalog_ref.id, output.len());
        serializer.write_indirect(
            &mut output,
            catalog_ref,
            &Object::Dictionary(graph.catalog().clone()),
        )?;

        let size = catalog_ref.id + 1;
        let xref_start = output.len();
        writeln!(output, "xref")?;
        writeln!(output, "0 {}", size)?;
        writeln!(output, "0000000000 65535 f ")?;
        for id in 1..size {
            // Reserved ids that were never filled are written as free entries
            match offsets.get(&id) {
                Some(offset) => writeln!(output, "{:010} 00000 n ", offset)?,
                None => writeln!(output, "0000000000 65535 f ")?,
            }
        }

        let id = Object::String(Uuid::new_v4().as_bytes().to_vec());
        let mut trailer = Dictionary::new();
        trailer.insert("Size".to_string(), Object::Integer(size as i64));
        trailer.insert("Root".to_string(), Object::Reference(catalog_ref));
        if let Some(info) = info {
            trailer.insert("Info".to_string(), Object::Reference(info));
        }
        trailer.insert("ID".to_string(), Object::Array(vec![id.clone(), id]));

        writeln!(output, "trailer")?;
        serializer.write_object(&mut output, &Object::Dictionary(trailer))?;
        writeln!(output)?;
        writeln!(output, "startxref")?;
        writeln!(output, "{}", xref_start)?;
        write!(output, "%%EOF")?;

        log::debug!("Serialized {} objects ({} bytes)", size - 1, output.len());
        Ok(output)
    }
}
