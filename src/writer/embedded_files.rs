//! File attachments for PDF/A documents.
//!
//! An attachment is written as two objects:
//! - an embedded file stream (`/Type /EmbeddedFile`) whose `/Subtype` is the MIME type
//!   and whose `/Params` carry size, MD5 checksum and dates
//! - a file specification (`/Type /Filespec`) pointing at the stream through `/EF`
//!
//! The file specification is then referenced from the catalog's `/EmbeddedFiles` name
//! tree or from a file attachment annotation.
//!
//! ## Example
//!
//! ```ignore
//! use pdfa_guard::writer::{AFRelationship, FileAttachment};
//!
//! let file = FileAttachment::new("invoice.xml", xml_bytes, "application/xml")
//!     .with_description("Structured invoice data")
//!     .with_af_relationship(AFRelationship::Alternative);
//! document.add_file_attachment(file)?;
//! ```

use super::object_serializer::{encode_utf16_be, ObjectSerializer};
use super::pdf_writer::compress_data;
use crate::object::{Dictionary, Object, ObjectRef};
use bytes::Bytes;
use chrono::{DateTime, Utc};

/// Associated file relationship (`/AFRelationship`), ISO 32000-2 Table 43.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AFRelationship {
    /// The file is the original source
    Source,
    /// The file contains data referenced by the document
    Data,
    /// An alternative representation
    Alternative,
    /// Supplementary data
    Supplement,
    /// Encrypted payload (for protected content)
    EncryptedPayload,
    /// A form data file
    FormData,
    /// A schema definition
    Schema,
    /// Unspecified relationship
    Unspecified,
}

impl AFRelationship {
    /// Every relationship value.
    pub const ALL: [AFRelationship; 8] = [
        AFRelationship::Source,
        AFRelationship::Data,
        AFRelationship::Alternative,
        AFRelationship::Supplement,
        AFRelationship::EncryptedPayload,
        AFRelationship::FormData,
        AFRelationship::Schema,
        AFRelationship::Unspecified,
    ];

    /// Get the PDF name for this relationship.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            AFRelationship::Source => "Source",
            AFRelationship::Data => "Data",
            AFRelationship::Alternative => "Alternative",
            AFRelationship::Supplement => "Supplement",
            AFRelationship::EncryptedPayload => "EncryptedPayload",
            AFRelationship::FormData => "FormData",
            AFRelationship::Schema => "Schema",
            AFRelationship::Unspecified => "Unspecified",
        }
    }

    /// Parse a PDF name (without the leading `/`).
    pub fn from_pdf_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.pdf_name() == name)
    }
}

/// A file to be embedded in a document.
#[derive(Debug, Clone)]
pub struct FileAttachment {
    /// The file name (used as the key in the EmbeddedFiles name tree)
    pub file_name: String,
    /// The file data
    pub data: Bytes,
    /// MIME type of the file (e.g., "application/pdf", "text/plain")
    pub mime_type: String,
    /// Optional description of the file
    pub description: Option<String>,
    /// Creation date
    pub creation_date: Option<DateTime<Utc>>,
    /// Modification date
    pub modification_date: Option<DateTime<Utc>>,
    /// Associated file relationship
    pub af_relationship: Option<AFRelationship>,
    /// Extra `/Params` entries
    pub params: Dictionary,
}

impl FileAttachment {
    /// Create an attachment with its declared MIME type.
    ///
    /// The MIME type is recorded as given; the data is never sniffed.
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>, mime_type: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            data: data.into(),
            mime_type: mime_type.into(),
            description: None,
            creation_date: None,
            modification_date: None,
            af_relationship: None,
            params: Dictionary::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the creation date.
    pub fn with_creation_date(mut self, date: DateTime<Utc>) -> Self {
        self.creation_date = Some(date);
        self
    }

    /// Set the modification date.
    pub fn with_modification_date(mut self, date: DateTime<Utc>) -> Self {
        self.modification_date = Some(date);
        self
    }

    /// Set the associated file relationship.
    pub fn with_af_relationship(mut self, relationship: AFRelationship) -> Self {
        self.af_relationship = Some(relationship);
        self
    }

    /// Add extra `/Params` entries. Size and checksum are always computed.
    pub fn with_params(mut self, params: Dictionary) -> Self {
        self.params.extend(params);
        self
    }

    /// Get the size of the embedded file data.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Build the embedded file stream.
    ///
    /// With `compress` the data is Flate-encoded; `/Params /Size` always records the
    /// uncompressed length.
    pub fn build_stream(&self, compress: bool) -> std::io::Result<Object> {
        let mut dict = Dictionary::new();
        dict.insert("Type".to_string(), Object::Name("EmbeddedFile".to_string()));
        dict.insert("Subtype".to_string(), Object::Name(self.mime_type.clone()));

        let mut params = self.params.clone();
        params.insert("Size".to_string(), Object::Integer(self.data.len() as i64));
        params.insert("CheckSum".to_string(), Object::String(md5_hash(&self.data)));
        if let Some(date) = &self.creation_date {
            params.insert("CreationDate".to_string(), Object::String(pdf_date(date).into_bytes()));
        }
        if let Some(date) = &self.modification_date {
            params.insert("ModDate".to_string(), Object::String(pdf_date(date).into_bytes()));
        }
        dict.insert("Params".to_string(), Object::Dictionary(params));

        let data = if compress {
            dict.insert("Filter".to_string(), Object::Name("FlateDecode".to_string()));
            Bytes::from(compress_data(&self.data)?)
        } else {
            self.data.clone()
        };

        Ok(Object::Stream { dict, data })
    }

    /// Build the file specification dictionary that references the embedded file stream.
    pub fn build_filespec(&self, embedded_stream_ref: ObjectRef) -> Dictionary {
        let mut dict = Dictionary::new();

        dict.insert("Type".to_string(), Object::Name("Filespec".to_string()));
        dict.insert("F".to_string(), Object::String(self.file_name.as_bytes().to_vec()));
        dict.insert("UF".to_string(), Object::String(encode_utf16_be(&self.file_name)));

        if let Some(desc) = &self.description {
            dict.insert("Desc".to_string(), ObjectSerializer::text_string(desc));
        }

        let mut ef_dict = Dictionary::new();
        ef_dict.insert("F".to_string(), Object::Reference(embedded_stream_ref));
        ef_dict.insert("UF".to_string(), Object::Reference(embedded_stream_ref));
        dict.insert("EF".to_string(), Object::Dictionary(ef_dict));

        if let Some(relationship) = self.af_relationship {
            dict.insert(
                "AFRelationship".to_string(),
                Object::Name(relationship.pdf_name().to_string()),
            );
        }

        dict
    }
}

/// Build the `/Names` array of a flat name tree: keys alternating with values, sorted
/// bytewise by key. Keys are expected to be unique.
pub fn build_names_array(mut entries: Vec<(Vec<u8>, Object)>) -> Object {
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let mut names = Vec::with_capacity(entries.len() * 2);
    for (key, value) in entries {
        names.push(Object::String(key));
        names.push(value);
    }
    Object::Array(names)
}

/// Format a date as a PDF date string (`D:YYYYMMDDHHmmSS+00'00'`).
pub(crate) fn pdf_date(date: &DateTime<Utc>) -> String {
    format!("D:{}+00'00'", date.format("%Y%m%d%H%M%S"))
}

fn md5_hash(data: &[u8]) -> Vec<u8> {
    use md5::{Digest, Md5};

    let mut hasher = Md5::new();
    hasher.update(data);
    hasher.finalize().to_vec()
}
