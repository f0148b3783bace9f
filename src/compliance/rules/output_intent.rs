//! Output intent rule.
//!
//! The profile must carry an output intent, and the catalog must declare a
//! `/GTS_PDFA1` output intent whose destination profile is an embedded stream.

use super::ConformanceRule;
use crate::compliance::types::{ConformanceProfile, PdfALevel};
use crate::compliance::violation::{ConformanceViolation, ViolationKind};
use crate::graph::ObjectGraph;
use crate::object::Object;

/// Output intent subtype for PDF/A.
pub(crate) const PDFA_OUTPUT_INTENT_SUBTYPE: &str = "GTS_PDFA1";

/// Checks that a PDF/A output intent is present.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputIntentRule;

impl OutputIntentRule {
    /// Rule id.
    pub const ID: &'static str = "output-intent";

    fn has_pdfa_output_intent(graph: &dyn ObjectGraph) -> bool {
        let Some(intents) = graph.catalog_entry("OutputIntents").and_then(Object::as_array)
        else {
            return false;
        };

        intents.iter().any(|intent| {
            let Some(intent) = graph.resolve(intent).as_dict() else {
                return false;
            };
            let is_pdfa = graph.lookup(intent, "S").and_then(Object::as_name)
                == Some(PDFA_OUTPUT_INTENT_SUBTYPE);
            let has_profile = graph
                .lookup(intent, "DestOutputProfile")
                .and_then(Object::as_stream)
                .is_some();
            is_pdfa && has_profile
        })
    }
}

impl ConformanceRule for OutputIntentRule {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn applies_to(&self, _level: PdfALevel) -> bool {
        true
    }

    fn check(
        &self,
        profile: &ConformanceProfile,
        graph: &dyn ObjectGraph,
    ) -> Result<(), ConformanceViolation> {
        if profile.output_intent().is_none() || !Self::has_pdfa_output_intent(graph) {
            return Err(ConformanceViolation::new(
                Self::ID,
                ViolationKind::MissingOutputIntent,
            ));
        }
        Ok(())
    }
}
