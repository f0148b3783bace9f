//! PDF/A document authoring.
//!
//! A [`PdfADocument`] is opened at a fixed conformance level and buffers its object
//! graph in memory. Nothing reaches the sink until [`PdfADocument::close`] has validated
//! the graph, so a document that violates its level leaves the sink untouched.
//!
//! # Example
//!
//! ```ignore
//! use pdfa_guard::compliance::{OutputIntent, PdfALevel};
//! use pdfa_guard::document::PdfADocument;
//! use pdfa_guard::writer::FileAttachment;
//!
//! let intent = OutputIntent::new("Custom", "", "http://www.color.org", "sRGB IEC61966-2.1", icc);
//! let mut doc = PdfADocument::new(Vec::new(), PdfALevel::A2b, intent)?;
//! doc.add_new_page()?;
//! doc.add_file_attachment(FileAttachment::new("other.pdf", pdf_bytes, "application/pdf"))?;
//! let bytes = doc.close()?;
//! # Ok::<(), pdfa_guard::error::Error>(())
//! ```

use crate::compliance::{
    ConformanceProfile, ConformanceViolation, OutputIntent, PdfALevel, PdfAPart, PdfAValidator,
};
use crate::error::{Error, Result};
use crate::graph::{DocumentGraph, ObjectGraph};
use crate::object::{Dictionary, Object, ObjectRef};
use crate::writer::{
    build_icc_stream, build_names_array, build_output_intent, AcroFormBuilder, FileAttachment,
    ObjectSerializer, PdfWriter, PdfWriterConfig, XmpWriter,
};
use chrono::Utc;
use std::io::Write;
use std::path::Path;

/// A4 width in points.
const A4_WIDTH: f64 = 595.0;
/// A4 height in points.
const A4_HEIGHT: f64 = 842.0;

/// Annotation flag bit 3 (Print), required on PDF/A annotations.
const ANNOT_FLAG_PRINT: i64 = 4;

/// A PDF/A document being authored.
#[derive(Debug)]
pub struct PdfADocument<W: Write> {
    sink: W,
    profile: ConformanceProfile,
    config: PdfWriterConfig,
    validator: PdfAValidator,
    graph: DocumentGraph,
    pages_ref: ObjectRef,
    page_refs: Vec<ObjectRef>,
}

impl<W: Write> PdfADocument<W> {
    /// Open a document at a conformance level.
    pub fn new(sink: W, level: PdfALevel, output_intent: OutputIntent) -> Result<Self> {
        Self::with_profile(sink, ConformanceProfile::new(level, output_intent))
    }

    /// Open a document with a profile, the default writer config and the default rules.
    pub fn with_profile(sink: W, profile: ConformanceProfile) -> Result<Self> {
        Self::with_config(sink, profile, PdfWriterConfig::default(), PdfAValidator::new())
    }

    /// Open a document with a writer config and a validator.
    ///
    /// # Errors
    ///
    /// [`Error::MissingOutputIntent`] when the profile has no output intent.
    pub fn with_config(
        sink: W,
        profile: ConformanceProfile,
        config: PdfWriterConfig,
        validator: PdfAValidator,
    ) -> Result<Self> {
        let intent = profile.output_intent().ok_or(Error::MissingOutputIntent)?;

        let mut graph = DocumentGraph::new();
        let icc_ref = graph
            .objects_mut()
            .add(build_icc_stream(intent, config.compress)?);
        let intent_ref = graph
            .objects_mut()
            .add(Object::Dictionary(build_output_intent(intent, icc_ref)));
        graph.catalog_mut().insert(
            "OutputIntents".to_string(),
            Object::Array(vec![Object::Reference(intent_ref)]),
        );

        let pages_ref = graph.objects_mut().add(ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("Pages")),
            ("Kids", Object::Array(Vec::new())),
            ("Count", Object::Integer(0)),
        ]));
        graph
            .catalog_mut()
            .insert("Pages".to_string(), Object::Reference(pages_ref));

        log::info!("Opened {} document", profile.level());

        Ok(Self {
            sink,
            profile,
            config,
            validator,
            graph,
            pages_ref,
            page_refs: Vec::new(),
        })
    }

    /// The profile the document was opened with.
    pub fn profile(&self) -> &ConformanceProfile {
        &self.profile
    }

    /// The conformance level.
    pub fn level(&self) -> PdfALevel {
        self.profile.level()
    }

    /// The document graph.
    pub fn graph(&self) -> &DocumentGraph {
        &self.graph
    }

    /// Mutable access to the document graph.
    pub fn graph_mut(&mut self) -> &mut DocumentGraph {
        &mut self.graph
    }

    /// The catalog dictionary.
    pub fn catalog(&self) -> &Dictionary {
        self.graph.catalog()
    }

    /// Mutable access to the catalog dictionary.
    pub fn catalog_mut(&mut self) -> &mut Dictionary {
        self.graph.catalog_mut()
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.page_refs.len()
    }

    /// Add an A4 page and return its index.
    pub fn add_new_page(&mut self) -> Result<usize> {
        self.add_page(A4_WIDTH, A4_HEIGHT)
    }

    /// Add a page with the given dimensions in points and return its index.
    pub fn add_page(&mut self, width: f64, height: f64) -> Result<usize> {
        let page_ref = self.graph.objects_mut().add(ObjectSerializer::dict(vec![
            ("Type", ObjectSerializer::name("Page")),
            ("Parent", Object::Reference(self.pages_ref)),
            ("MediaBox", ObjectSerializer::rect(0.0, 0.0, width, height)),
            ("Resources", Object::Dictionary(Dictionary::new())),
        ]));
        self.page_refs.push(page_ref);

        let count = self.page_refs.len() as i64;
        let kids = self.page_refs.iter().copied().map(Object::Reference).collect();
        let pages = self.dict_mut(self.pages_ref)?;
        pages.insert("Kids".to_string(), Object::Array(kids));
        pages.insert("Count".to_string(), Object::Integer(count));

        Ok(self.page_refs.len() - 1)
    }

    /// Put an interactive form dictionary into the catalog.
    pub fn set_acro_form(&mut self, acro_form: &AcroFormBuilder) {
        self.graph
            .catalog_mut()
            .insert("AcroForm".to_string(), Object::Dictionary(acro_form.build()));
    }

    /// Embed a file in the document-level `/EmbeddedFiles` name tree.
    ///
    /// The tree is keyed by file name; a name that is already taken gets a numeric
    /// suffix (`report.pdf (2)`). Entries already in the tree are kept, and a tree with
    /// `/Kids` is flattened into a single `/Names` array. An indirect catalog `/Names`
    /// dictionary is updated in place. PDF/A-3 documents also list the file
    /// specification in the catalog `/AF` array.
    ///
    /// Returns the reference of the file specification.
    pub fn add_file_attachment(&mut self, file: FileAttachment) -> Result<ObjectRef> {
        let spec_ref = self.add_file_spec(&file)?;

        let mut entries = self.embedded_file_entries();
        let key = unique_name_key(&file.file_name, &entries);
        entries.push((key, Object::Reference(spec_ref)));
        let mut tree = Dictionary::new();
        tree.insert("Names".to_string(), build_names_array(entries));
        self.set_embedded_files_tree(tree)?;

        if self.level().part() == PdfAPart::Part3 {
            push_array_entry(self.graph.catalog_mut(), "AF", Object::Reference(spec_ref));
        }

        log::debug!("Embedded {} ({} bytes)", file.file_name, file.size());
        Ok(spec_ref)
    }

    /// Attach a file to a page through a file attachment annotation.
    ///
    /// `rect` is `[llx, lly, urx, ury]` in default user space. Returns the reference of
    /// the annotation.
    ///
    /// # Errors
    ///
    /// [`Error::PageIndexOutOfRange`] when the page does not exist.
    pub fn attach_file_to_page(
        &mut self,
        page_index: usize,
        rect: [f64; 4],
        file: FileAttachment,
    ) -> Result<ObjectRef> {
        let page_ref = *self
            .page_refs
            .get(page_index)
            .ok_or(Error::PageIndexOutOfRange {
                index: page_index,
                count: self.page_refs.len(),
            })?;

        let spec_ref = self.add_file_spec(&file)?;
        let contents = file.description.as_deref().unwrap_or(&file.file_name);

        let mut annot = Dictionary::new();
        annot.insert("Type".to_string(), ObjectSerializer::name("Annot"));
        annot.insert("Subtype".to_string(), ObjectSerializer::name("FileAttachment"));
        annot.insert("Rect".to_string(), Object::Array(rect.iter().copied().map(Object::Real).collect()));
        annot.insert("FS".to_string(), Object::Reference(spec_ref));
        annot.insert("Contents".to_string(), ObjectSerializer::text_string(contents));
        annot.insert("Name".to_string(), ObjectSerializer::name("PushPin"));
        annot.insert("F".to_string(), Object::Integer(ANNOT_FLAG_PRINT));
        if self.level().part() == PdfAPart::Part3 {
            annot.insert("AF".to_string(), Object::Array(vec![Object::Reference(spec_ref)]));
        }
        let annot_ref = self.graph.objects_mut().add(Object::Dictionary(annot));

        push_array_entry(self.dict_mut(page_ref)?, "Annots", Object::Reference(annot_ref));

        log::debug!("Attached {} to page {}", file.file_name, page_index);
        Ok(annot_ref)
    }

    /// Validate the document against its conformance level without closing it.
    pub fn validate(&self) -> std::result::Result<(), ConformanceViolation> {
        self.validator.validate(&self.profile, &self.graph)
    }

    /// Validate, serialize and write the document, then return the sink.
    ///
    /// # Errors
    ///
    /// [`Error::Conformance`] when the document violates its level; the sink then
    /// receives no bytes. I/O errors from the sink are passed through.
    pub fn close(self) -> Result<W> {
        let level = self.level();
        let (mut sink, bytes) = self.finish()?;
        sink.write_all(&bytes)?;
        sink.flush()?;
        log::info!("Closed {} document ({} bytes)", level, bytes.len());
        Ok(sink)
    }

    /// Validate and serialize the document into a file.
    ///
    /// The file is only created when validation passes. The sink is dropped unwritten.
    pub fn save(self, path: impl AsRef<Path>) -> Result<()> {
        let level = self.level();
        let (_, bytes) = self.finish()?;
        std::fs::write(path.as_ref(), &bytes)?;
        log::info!("Saved {} document to {}", level, path.as_ref().display());
        Ok(())
    }

    fn finish(mut self) -> Result<(W, Vec<u8>)> {
        self.validate()?;

        let level = self.level();
        let now = Utc::now();

        let mut xmp = XmpWriter::new(level).create_date(now);
        if let Some(title) = &self.config.title {
            xmp = xmp.title(title.clone());
        }
        if let Some(author) = &self.config.author {
            xmp = xmp.creator(author.clone());
        }
        if let Some(subject) = &self.config.subject {
            xmp = xmp.description(subject.clone());
        }
        if let Some(creator) = &self.config.creator {
            xmp = xmp.creator_tool(creator.clone());
        }
        if let Some(producer) = &self.config.producer {
            xmp = xmp.producer(producer.clone());
        }
        let metadata_ref = self.graph.objects_mut().add(xmp.build_stream());
        self.graph
            .catalog_mut()
            .insert("Metadata".to_string(), Object::Reference(metadata_ref));

        let writer = PdfWriter::new(self.config.clone(), level.pdf_version());
        let info = writer.build_info(&now);
        let info_ref = self.graph.objects_mut().add(Object::Dictionary(info));
        let bytes = writer.write_graph(&self.graph, Some(info_ref))?;

        Ok((self.sink, bytes))
    }

    fn add_file_spec(&mut self, file: &FileAttachment) -> Result<ObjectRef> {
        let stream = file.build_stream(self.config.compress)?;
        let stream_ref = self.graph.objects_mut().add(stream);
        let spec = file.build_filespec(stream_ref);
        Ok(self.graph.objects_mut().add(Object::Dictionary(spec)))
    }

    /// Leaf entries of the current `/EmbeddedFiles` name tree.
    fn embedded_file_entries(&self) -> Vec<(Vec<u8>, Object)> {
        let Some(tree) = self
            .graph
            .catalog_entry("Names")
            .and_then(Object::as_dict)
            .and_then(|names| names.get("EmbeddedFiles"))
        else {
            return Vec::new();
        };
        self.graph
            .name_tree_entries(tree)
            .into_iter()
            .map(|(key, value)| (key.to_vec(), value.clone()))
            .collect()
    }

    fn set_embedded_files_tree(&mut self, tree: Dictionary) -> Result<()> {
        let tree_ref = self
            .graph
            .catalog_entry("Names")
            .and_then(Object::as_dict)
            .and_then(|names| names.get("EmbeddedFiles"))
            .and_then(Object::as_reference)
            .filter(|r| self.graph.object(*r).is_some());

        match tree_ref {
            Some(r) => self.graph.objects_mut().set(r, Object::Dictionary(tree)),
            None => {
                self.names_dict_mut()?
                    .insert("EmbeddedFiles".to_string(), Object::Dictionary(tree));
            },
        }
        Ok(())
    }

    /// The catalog `/Names` dictionary, created when missing.
    fn names_dict_mut(&mut self) -> Result<&mut Dictionary> {
        let names_ref = match self.graph.catalog().get("Names") {
            Some(Object::Reference(r))
                if matches!(self.graph.object(*r), Some(Object::Dictionary(_))) =>
            {
                Some(*r)
            },
            _ => None,
        };
        if let Some(r) = names_ref {
            return self.dict_mut(r);
        }

        let names = self
            .graph
            .catalog_mut()
            .entry("Names".to_string())
            .or_insert_with(|| Object::Dictionary(Dictionary::new()));
        if !matches!(names, Object::Dictionary(_)) {
            log::warn!("Replacing catalog /Names entry of type {}", names.type_name());
            *names = Object::Dictionary(Dictionary::new());
        }
        let found = names.type_name();
        names.as_dict_mut().ok_or_else(|| Error::InvalidObjectType {
            expected: "Dictionary".to_string(),
            found: found.to_string(),
        })
    }

    fn dict_mut(&mut self, reference: ObjectRef) -> Result<&mut Dictionary> {
        let obj = self
            .graph
            .objects_mut()
            .get_mut(reference)
            .ok_or_else(|| Error::InvalidObjectType {
                expected: "Dictionary".to_string(),
                found: "Null".to_string(),
            })?;
        let found = obj.type_name();
        obj.as_dict_mut().ok_or_else(|| Error::InvalidObjectType {
            expected: "Dictionary".to_string(),
            found: found.to_string(),
        })
    }
}

/// A name tree key for `name` that no entry uses yet.
fn unique_name_key(name: &str, entries: &[(Vec<u8>, Object)]) -> Vec<u8> {
    let taken = |key: &[u8]| entries.iter().any(|(existing, _)| existing.as_slice() == key);

    let mut key = name.as_bytes().to_vec();
    let mut counter = 1;
    while taken(&key) {
        counter += 1;
        key = format!("{} ({})", name, counter).into_bytes();
    }
    key
}

/// Append to an array entry, replacing a non-array value.
fn push_array_entry(dict: &mut Dictionary, key: &str, value: Object) {
    let entry = dict
        .entry(key.to_string())
        .or_insert_with(|| Object::Array(Vec::new()));
    match entry.as_array_mut() {
        Some(items) => items.push(value),
        None => *entry = Object::Array(vec![value]),
    }
}
