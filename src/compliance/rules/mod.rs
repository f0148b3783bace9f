//! Individual PDF/A conformance rules.
//!
//! Each rule inspects one concern of the document graph. Rules hold no per-document
//! state and never mutate the graph, so one registry serves every document.

mod acroform;
mod embedded_files;
mod output_intent;

pub use acroform::{AcroFormRule, AcroFormStatus};
pub use embedded_files::{EmbeddedFilesRule, FileSpecSource};
pub use output_intent::OutputIntentRule;
pub(crate) use output_intent::PDFA_OUTPUT_INTENT_SUBTYPE;

use super::types::{ConformanceProfile, PdfALevel};
use super::violation::ConformanceViolation;
use crate::graph::ObjectGraph;

/// A single conformance check.
pub trait ConformanceRule: Send + Sync + std::fmt::Debug {
    /// Stable identifier, reported in violations.
    fn id(&self) -> &'static str;

    /// Whether the rule is evaluated for documents of this level.
    fn applies_to(&self, level: PdfALevel) -> bool;

    /// Evaluate the rule against a graph.
    fn check(
        &self,
        profile: &ConformanceProfile,
        graph: &dyn ObjectGraph,
    ) -> Result<(), ConformanceViolation>;
}
