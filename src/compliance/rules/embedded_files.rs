//! Embedded file rule.
//!
//! Every file specification that embeds a file stream (`/EF`) must satisfy the
//! embedded-file policy of the document's PDF/A part. Only the declared MIME type
//! (`/Subtype` of the embedded file stream) is checked; the payload is never read, so a
//! file declared as `application/pdf` passes whatever its bytes are.
//!
//! File specifications are collected from the `/EmbeddedFiles` name tree, the catalog
//! `/AF` array, and per page from the page `/AF` array and from annotations (`/FS` of
//! file attachment annotations, `/AF` of any annotation). A specification reachable from
//! several places is checked once.

use super::ConformanceRule;
use crate::compliance::types::{ConformanceProfile, PdfALevel};
use crate::compliance::violation::{ConformanceViolation, ViolationKind};
use crate::config::{EmbeddedFilePolicy, EmbeddedFilePolicyTable};
use crate::graph::ObjectGraph;
use crate::object::{Dictionary, Object};
use crate::writer::AFRelationship;
use std::collections::HashSet;

/// Where a file specification was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSpecSource {
    /// The catalog's `/Names /EmbeddedFiles` name tree.
    EmbeddedFilesTree,
    /// The catalog's `/AF` array.
    CatalogAssociatedFiles,
    /// A page's `/AF` array, or the `/AF` array of one of its annotations.
    PageAssociatedFiles {
        /// Zero-based page index
        page_index: usize,
    },
    /// The `/FS` entry of a file attachment annotation.
    PageAnnotation {
        /// Zero-based page index
        page_index: usize,
    },
}

/// Checks embedded files against the per-part policy table.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedFilesRule {
    policies: EmbeddedFilePolicyTable,
}

/// Collects file specifications, skipping ones already seen.
struct SpecCollector<'a> {
    graph: &'a dyn ObjectGraph,
    seen: HashSet<*const Dictionary>,
    specs: Vec<(FileSpecSource, &'a Dictionary)>,
}

impl<'a> SpecCollector<'a> {
    fn push(&mut self, source: FileSpecSource, value: &'a Object) {
        let graph = self.graph;
        // Entries that are not dictionaries cannot embed files
        if let Some(spec) = graph.resolve(value).as_dict() {
            if self.seen.insert(spec as *const Dictionary) {
                self.specs.push((source, spec));
            }
        }
    }

    fn push_array(&mut self, source: FileSpecSource, dict: &'a Dictionary, key: &str) {
        let graph = self.graph;
        if let Some(items) = graph.lookup(dict, key).and_then(Object::as_array) {
            for item in items {
                self.push(source, item);
            }
        }
    }
}

impl EmbeddedFilesRule {
    /// Rule id.
    pub const ID: &'static str = "embedded-files";

    /// Create the rule with a policy table.
    pub fn new(policies: EmbeddedFilePolicyTable) -> Self {
        Self { policies }
    }

    /// The policy table.
    pub fn policies(&self) -> &EmbeddedFilePolicyTable {
        &self.policies
    }

    /// File specification dictionaries of a graph, in document order.
    ///
    /// The embedded files name tree comes first, then the catalog `/AF` array, then page
    /// by page the page `/AF` array and the annotations. Each specification is listed
    /// once, under the first place it was found.
    pub fn file_specifications(graph: &dyn ObjectGraph) -> Vec<(FileSpecSource, &Dictionary)> {
        let mut collector = SpecCollector {
            graph,
            seen: HashSet::new(),
            specs: Vec::new(),
        };

        if let Some(tree) = graph
            .catalog_entry("Names")
            .and_then(Object::as_dict)
            .and_then(|names| names.get("EmbeddedFiles"))
        {
            for (_, value) in graph.name_tree_entries(tree) {
                collector.push(FileSpecSource::EmbeddedFilesTree, value);
            }
        }

        collector.push_array(FileSpecSource::CatalogAssociatedFiles, graph.catalog(), "AF");

        for (page_index, page) in graph.pages().into_iter().enumerate() {
            collector.push_array(FileSpecSource::PageAssociatedFiles { page_index }, page, "AF");

            let Some(annots) = graph.lookup(page, "Annots").and_then(Object::as_array) else {
                continue;
            };
            for annot in annots {
                let Some(annot) = graph.resolve(annot).as_dict() else {
                    continue;
                };
                if graph.lookup(annot, "Subtype").and_then(Object::as_name)
                    == Some("FileAttachment")
                {
                    if let Some(fs) = annot.get("FS") {
                        collector.push(FileSpecSource::PageAnnotation { page_index }, fs);
                    }
                }
                collector.push_array(
                    FileSpecSource::PageAssociatedFiles { page_index },
                    annot,
                    "AF",
                );
            }
        }

        collector.specs
    }

    fn check_file_spec(
        policy: &EmbeddedFilePolicy,
        graph: &dyn ObjectGraph,
        spec: &Dictionary,
    ) -> Result<(), ViolationKind> {
        let Some(ef) = spec.get("EF") else {
            return Ok(());
        };
        if *policy == EmbeddedFilePolicy::Forbidden {
            return Err(ViolationKind::EmbeddedFilesNotAllowed);
        }

        let ef = graph
            .resolve(ef)
            .as_dict()
            .ok_or(ViolationKind::MalformedEmbeddedFile)?;
        let (stream_dict, _) = graph
            .lookup(ef, "F")
            .and_then(Object::as_stream)
            .ok_or(ViolationKind::MalformedEmbeddedFile)?;
        let mime_type = graph.lookup(stream_dict, "Subtype").and_then(Object::as_name);

        match policy {
            EmbeddedFilePolicy::Forbidden => Err(ViolationKind::EmbeddedFilesNotAllowed),
            EmbeddedFilePolicy::AllowList(_) => match mime_type {
                Some(mime) if policy.allows_mime_type(mime) => Ok(()),
                _ => Err(ViolationKind::EmbeddedFileMustBePdfMimeType),
            },
            EmbeddedFilePolicy::Unrestricted {
                require_af_relationship,
            } => {
                if mime_type.is_none() {
                    return Err(ViolationKind::EmbeddedFileMissingMimeType);
                }
                let relationship = graph
                    .lookup(spec, "AFRelationship")
                    .and_then(Object::as_name)
                    .and_then(AFRelationship::from_pdf_name);
                if *require_af_relationship && relationship.is_none() {
                    return Err(ViolationKind::MissingAfRelationship);
                }
                Ok(())
            },
        }
    }
}

impl ConformanceRule for EmbeddedFilesRule {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn applies_to(&self, level: PdfALevel) -> bool {
        self.policies.for_part(level.part()).is_some()
    }

    fn check(
        &self,
        profile: &ConformanceProfile,
        graph: &dyn ObjectGraph,
    ) -> Result<(), ConformanceViolation> {
        let Some(policy) = self.policies.for_part(profile.level().part()) else {
            return Ok(());
        };

        for (source, spec) in Self::file_specifications(graph) {
            log::debug!("Checking file specification from {:?}", source);
            if let Err(kind) = Self::check_file_spec(policy, graph, spec) {
                log::warn!("Embedded file from {:?} violates {}: {}", source, profile.level(), kind);
                return Err(ConformanceViolation::new(Self::ID, kind));
            }
        }
        Ok(())
    }
}
