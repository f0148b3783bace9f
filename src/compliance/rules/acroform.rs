//! Interactive form rule.
//!
//! A PDF/A viewer must not be asked to regenerate field appearances, so the catalog's
//! `/AcroForm` dictionary may only carry `/NeedAppearances false`, or no flag at all.

use super::ConformanceRule;
use crate::compliance::types::{ConformanceProfile, PdfALevel};
use crate::compliance::violation::{ConformanceViolation, ViolationKind};
use crate::graph::ObjectGraph;
use crate::object::Object;

/// What the rule found in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcroFormStatus {
    /// The catalog has no `/AcroForm` entry.
    NoForm,
    /// `/AcroForm` exists without `/NeedAppearances`.
    FlagAbsent,
    /// `/NeedAppearances` is the boolean `false`.
    FlagFalse,
    /// `/NeedAppearances` is present with any other value.
    NeedAppearancesSet,
    /// `/AcroForm` is not a dictionary.
    Malformed,
}

impl AcroFormStatus {
    /// Whether the status is conformant.
    pub fn is_conformant(&self) -> bool {
        matches!(
            self,
            AcroFormStatus::NoForm | AcroFormStatus::FlagAbsent | AcroFormStatus::FlagFalse
        )
    }
}

/// Checks the `/NeedAppearances` flag of the interactive form dictionary.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcroFormRule;

impl AcroFormRule {
    /// Rule id.
    pub const ID: &'static str = "acro-form";

    /// Classify the interactive form dictionary of a graph.
    pub fn inspect(graph: &dyn ObjectGraph) -> AcroFormStatus {
        let Some(acro_form) = graph.catalog_entry("AcroForm") else {
            return AcroFormStatus::NoForm;
        };
        let Some(form_dict) = acro_form.as_dict() else {
            return AcroFormStatus::Malformed;
        };

        match graph.lookup(form_dict, "NeedAppearances") {
            None => AcroFormStatus::FlagAbsent,
            Some(Object::Boolean(false)) => AcroFormStatus::FlagFalse,
            Some(other) => {
                log::debug!("NeedAppearances has value of type {}", other.type_name());
                AcroFormStatus::NeedAppearancesSet
            },
        }
    }
}

impl ConformanceRule for AcroFormRule {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn applies_to(&self, _level: PdfALevel) -> bool {
        true
    }

    fn check(
        &self,
        _profile: &ConformanceProfile,
        graph: &dyn ObjectGraph,
    ) -> Result<(), ConformanceViolation> {
        match Self::inspect(graph) {
            AcroFormStatus::NoForm | AcroFormStatus::FlagAbsent | AcroFormStatus::FlagFalse => {
                Ok(())
            },
            AcroFormStatus::NeedAppearancesSet => Err(ConformanceViolation::new(
                Self::ID,
                ViolationKind::NeedAppearancesMustBeAbsentOrFalse,
            )),
            AcroFormStatus::Malformed => Err(ConformanceViolation::new(
                Self::ID,
                ViolationKind::MalformedInteractiveForm,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DocumentGraph;
    use crate::object::Dictionary;

    fn profile() -> ConformanceProfile {
        ConformanceProfile::without_output_intent(PdfALevel::A1b)
    }

    fn graph_with_form(entries: Vec<(&str, Object)>) -> DocumentGraph {
        let mut graph = DocumentGraph::new();
        let form: Dictionary = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        graph
            .catalog_mut()
            .insert("AcroForm".into(), Object::Dictionary(form));
        graph
    }

    #[test]
    fn test_no_form() {
        let graph = DocumentGraph::new();
        assert_eq!(AcroFormRule::inspect(&graph), AcroFormStatus::NoForm);
        assert!(AcroFormRule.check(&profile(), &graph).is_ok());
    }

    #[test]
    fn test_empty_form_is_flag_absent() {
        let graph = graph_with_form(vec![]);
        assert_eq!(AcroFormRule::inspect(&graph), AcroFormStatus::FlagAbsent);
        assert!(AcroFormRule.check(&profile(), &graph).is_ok());
    }

    #[test]
    fn test_flag_false() {
        let graph = graph_with_form(vec![("NeedAppearances", Object::Boolean(false))]);
        assert_eq!(AcroFormRule::inspect(&graph), AcroFormStatus::FlagFalse);
        assert!(AcroFormRule.check(&profile(), &graph).is_ok());
    }

    #[test]
    fn test_flag_true() {
        let graph = graph_with_form(vec![("NeedAppearances", Object::Boolean(true))]);
        let err = AcroFormRule.check(&profile(), &graph).unwrap_err();
        assert_eq!(err.kind(), ViolationKind::NeedAppearancesMustBeAbsentOrFalse);
        assert_eq!(err.rule_id(), AcroFormRule::ID);
    }

    #[test]
    fn test_non_boolean_flag_is_rejected() {
        for value in [
            Object::Name("false".into()),
            Object::Integer(0),
            Object::Null,
            Object::String(b"false".to_vec()),
        ] {
            let graph = graph_with_form(vec![("NeedAppearances", value)]);
            assert_eq!(AcroFormRule::inspect(&graph), AcroFormStatus::NeedAppearancesSet);
        }
    }

    #[test]
    fn test_flag_behind_reference() {
        let mut graph = DocumentGraph::new();
        let flag = graph.objects_mut().add(Object::Boolean(false));
        let mut form = Dictionary::new();
        form.insert("NeedAppearances".into(), Object::Reference(flag));
        let form_ref = graph.objects_mut().add(Object::Dictionary(form));
        graph
            .catalog_mut()
            .insert("AcroForm".into(), Object::Reference(form_ref));

        assert_eq!(AcroFormRule::inspect(&graph), AcroFormStatus::FlagFalse);
    }

    #[test]
    fn test_form_not_a_dictionary() {
        let mut graph = DocumentGraph::new();
        graph
            .catalog_mut()
            .insert("AcroForm".into(), Object::Array(vec![]));
        let err = AcroFormRule.check(&profile(), &graph).unwrap_err();
        assert_eq!(err.kind(), ViolationKind::MalformedInteractiveForm);
    }

    #[test]
    fn test_applies_to_every_level() {
        assert!(PdfALevel::ALL.iter().all(|l| AcroFormRule.applies_to(*l)));
    }
}
