//! XMP metadata writing for PDF/A documents.
//!
//! PDF/A identifies itself through the `pdfaid` schema of the catalog's metadata
//! stream: `pdfaid:part` and `pdfaid:conformance` must match the level the document
//! was validated against. See ISO 19005-1:2005, Section 6.7.11.

use crate::compliance::PdfALevel;
use crate::object::{Dictionary, Object};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// XMP namespace URIs
const NS_X: &str = "adobe:ns:meta/";
const NS_RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
const NS_DC: &str = "http://purl.org/dc/elements/1.1/";
const NS_XMP: &str = "http://ns.adobe.com/xap/1.0/";
const NS_PDF: &str = "http://ns.adobe.com/pdf/1.3/";
const NS_XMP_MM: &str = "http://ns.adobe.com/xap/1.0/mm/";
const NS_PDFAID: &str = "http://www.aiim.org/pdfa/ns/id/";

/// XMP metadata writer/builder.
#[derive(Debug, Clone)]
pub struct XmpWriter {
    level: PdfALevel,
    title: Option<String>,
    creators: Vec<String>,
    description: Option<String>,
    creator_tool: Option<String>,
    producer: Option<String>,
    create_date: DateTime<Utc>,
    modify_date: DateTime<Utc>,
    document_id: Uuid,
}

impl XmpWriter {
    /// Create a writer for a level, dated now with a fresh document id.
    pub fn new(level: PdfALevel) -> Self {
        let now = Utc::now();
        Self {
            level,
            title: None,
            creators: Vec::new(),
            description: None,
            creator_tool: None,
            producer: None,
            create_date: now,
            modify_date: now,
            document_id: Uuid::new_v4(),
        }
    }

    /// Set the document title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add a creator/author.
    pub fn creator(mut self, creator: impl Into<String>) -> Self {
        self.creators.push(creator.into());
        self
    }

    /// Set the description.
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Set the creator tool.
    pub fn creator_tool(mut self, tool: impl Into<String>) -> Self {
        self.creator_tool = Some(tool.into());
        self
    }

    /// Set the PDF producer.
    pub fn producer(mut self, producer: impl Into<String>) -> Self {
        self.producer = Some(producer.into());
        self
    }

    /// Set the creation date. The modification date follows it.
    pub fn create_date(mut self, date: DateTime<Utc>) -> Self {
        self.create_date = date;
        self.modify_date = date;
        self
    }

    /// Set the document id.
    pub fn document_id(mut self, id: Uuid) -> Self {
        self.document_id = id;
        self
    }

    /// Build the XMP packet as an XML string.
    pub fn build(&self) -> String {
        self.to_xml()
    }

    /// Build the catalog `/Metadata` stream.
    ///
    /// Metadata streams stay unfiltered so that archival tools can read them without
    /// decoding.
    pub fn build_stream(&self) -> Object {
        let mut dict = Dictionary::new();
        dict.insert("Type".to_string(), Object::Name("Metadata".to_string()));
        dict.insert("Subtype".to_string(), Object::Name("XML".to_string()));
        Object::Stream {
            dict,
            data: Bytes::from(self.to_xml().into_bytes()),
        }
    }

    fn to_xml(&self) -> String {
        let mut xml = String::new();

        xml.push_str("<?xpacket begin=\"\u{FEFF}\" id=\"W5M0MpCehiHzreSzNTczkc9d\"?>\n");
        xml.push_str(&format!("<x:xmpmeta xmlns:x=\"{}\">\n", NS_X));
        xml.push_str(&format!("  <rdf:RDF xmlns:rdf=\"{}\">\n", NS_RDF));

        xml.push_str("    <rdf:Description rdf:about=\"\"\n");
        xml.push_str(&format!("        xmlns:pdfaid=\"{}\">\n", NS_PDFAID));
        xml.push_str(&format!("      <pdfaid:part>{}</pdfaid:part>\n", self.level.xmp_part()));
        xml.push_str(&format!(
            "      <pdfaid:conformance>{}</pdfaid:conformance>\n",
            self.level.xmp_conformance()
        ));
        xml.push_str("    </rdf:Description>\n");

        xml.push_str("    <rdf:Description rdf:about=\"\"\n");
        xml.push_str(&format!("        xmlns:dc=\"{}\"\n", NS_DC));
        xml.push_str(&format!("        xmlns:xmp=\"{}\"\n", NS_XMP));
        xml.push_str(&format!("        xmlns:pdf=\"{}\"\n", NS_PDF));
        xml.push_str(&format!("        xmlns:xmpMM=\"{}\">\n", NS_XMP_MM));
        xml.push_str("      <dc:format>application/pdf</dc:format>\n");

        if let Some(title) = &self.title {
            push_alt(&mut xml, "dc:title", title);
        }

        if !self.creators.is_empty() {
            xml.push_str("      <dc:creator>\n");
            xml.push_str("        <rdf:Seq>\n");
            for creator in &self.creators {
                xml.push_str(&format!("          <rdf:li>{}</rdf:li>\n", escape_xml(creator)));
            }
            xml.push_str("        </rdf:Seq>\n");
            xml.push_str("      </dc:creator>\n");
        }

        if let Some(desc) = &self.description {
            push_alt(&mut xml, "dc:description", desc);
        }

        if let Some(tool) = &self.creator_tool {
            xml.push_str(&format!(
                "      <xmp:CreatorTool>{}</xmp:CreatorTool>\n",
                escape_xml(tool)
            ));
        }
        xml.push_str(&format!(
            "      <xmp:CreateDate>{}</xmp:CreateDate>\n",
            iso_timestamp(&self.create_date)
        ));
        xml.push_str(&format!(
            "      <xmp:ModifyDate>{}</xmp:ModifyDate>\n",
            iso_timestamp(&self.modify_date)
        ));

        if let Some(producer) = &self.producer {
            xml.push_str(&format!("      <pdf:Producer>{}</pdf:Producer>\n", escape_xml(producer)));
        }

        xml.push_str(&format!(
            "      <xmpMM:DocumentID>uuid:{}</xmpMM:DocumentID>\n",
            self.document_id
        ));

        xml.push_str("    </rdf:Description>\n");
        xml.push_str("  </rdf:RDF>\n");
        xml.push_str("</x:xmpmeta>\n");

        // 2KB of padding for in-place editing
        for _ in 0..40 {
            xml.push_str("                                                  \n");
        }
        xml.push_str("<?xpacket end=\"w\"?>");

        xml
    }
}

fn push_alt(xml: &mut String, element: &str, value: &str) {
    xml.push_str(&format!("      <{}>\n", element));
    xml.push_str("        <rdf:Alt>\n");
    xml.push_str(&format!(
        "          <rdf:li xml:lang=\"x-default\">{}</rdf:li>\n",
        escape_xml(value)
    ));
    xml.push_str("        </rdf:Alt>\n");
    xml.push_str(&format!("      </{}>\n", element));
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Format a timestamp in ISO 8601 format.
fn iso_timestamp(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
