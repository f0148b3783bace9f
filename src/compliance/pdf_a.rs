//! PDF/A validator implementation.
//!
//! This module provides the validator that runs the rule registry against a document
//! graph at close time.

use super::registry::{default_registry, RuleRegistry};
use super::rules::{AcroFormRule, EmbeddedFilesRule, OutputIntentRule};
use super::types::ConformanceProfile;
use super::violation::ConformanceViolation;
use crate::graph::ObjectGraph;
use std::sync::Arc;

#[derive(Debug, Clone)]
enum RegistryHandle {
    Default,
    Custom(Arc<RuleRegistry>),
}

/// PDF/A compliance validator.
///
/// Validation is fail-fast: at most one violation is reported per call, and calling
/// it again on an unchanged graph gives the same answer.
///
/// # Example
///
/// ```ignore
/// use pdfa_guard::compliance::{ConformanceProfile, PdfAValidator};
///
/// let validator = PdfAValidator::new();
/// match validator.validate(document.profile(), document.graph()) {
///     Ok(()) => println!("conformant"),
///     Err(violation) => println!("[{}] {}", violation.kind(), violation),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PdfAValidator {
    registry: RegistryHandle,
}

impl Default for PdfAValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfAValidator {
    /// Create a validator backed by the default registry.
    pub fn new() -> Self {
        Self {
            registry: RegistryHandle::Default,
        }
    }

    /// Create a validator backed by a custom registry.
    pub fn with_registry(registry: Arc<RuleRegistry>) -> Self {
        Self {
            registry: RegistryHandle::Custom(registry),
        }
    }

    /// The registry in use.
    pub fn registry(&self) -> &RuleRegistry {
        match &self.registry {
            RegistryHandle::Default => default_registry(),
            RegistryHandle::Custom(registry) => registry,
        }
    }

    /// Validate a graph against the profile's conformance level.
    pub fn validate(
        &self,
        profile: &ConformanceProfile,
        graph: &dyn ObjectGraph,
    ) -> Result<(), ConformanceViolation> {
        self.registry().validate(profile, graph)
    }

    /// Check only the interactive form rule.
    pub fn check_acro_form(
        &self,
        profile: &ConformanceProfile,
        graph: &dyn ObjectGraph,
    ) -> Result<(), ConformanceViolation> {
        self.check_rule(AcroFormRule::ID, profile, graph)
    }

    /// Check only the embedded file rule.
    pub fn check_embedded_files(
        &self,
        profile: &ConformanceProfile,
        graph: &dyn ObjectGraph,
    ) -> Result<(), ConformanceViolation> {
        self.check_rule(EmbeddedFilesRule::ID, profile, graph)
    }

    /// Check only the output intent rule.
    pub fn check_output_intents(
        &self,
        profile: &ConformanceProfile,
        graph: &dyn ObjectGraph,
    ) -> Result<(), ConformanceViolation> {
        self.check_rule(OutputIntentRule::ID, profile, graph)
    }

    // A rule missing from a custom registry has nothing to report.
    fn check_rule(
        &self,
        rule_id: &str,
        profile: &ConformanceProfile,
        graph: &dyn ObjectGraph,
    ) -> Result<(), ConformanceViolation> {
        self.registry()
            .validate_rule(rule_id, profile, graph)
            .unwrap_or(Ok(()))
    }
}

/// Quick validation with the default registry.
///
/// # Example
///
/// ```ignore
/// use pdfa_guard::compliance::validate_pdf_a;
///
/// validate_pdf_a(document.profile(), document.graph())?;
/// ```
pub fn validate_pdf_a(
    profile: &ConformanceProfile,
    graph: &dyn ObjectGraph,
) -> Result<(), ConformanceViolation> {
    PdfAValidator::new().validate(profile, graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::types::PdfALevel;
    use crate::compliance::violation::ViolationKind;
    use crate::config::ValidationConfig;
    use crate::graph::DocumentGraph;
    use crate::object::{Dictionary, Object};

    fn form_graph(need_appearances: bool) -> DocumentGraph {
        let mut graph = DocumentGraph::new();
        let mut form = Dictionary::new();
        form.insert("NeedAppearances".into(), Object::Boolean(need_appearances));
        graph
            .catalog_mut()
            .insert("AcroForm".into(), Object::Dictionary(form));
        graph
    }

    #[test]
    fn test_validator_creation() {
        let validator = PdfAValidator::new();
        assert_eq!(validator.registry().len(), 3);
    }

    #[test]
    fn test_check_acro_form_only() {
        let validator = PdfAValidator::new();
        let profile = ConformanceProfile::without_output_intent(PdfALevel::A1b);

        // The full pass fails on the missing output intent, the form check alone passes
        let graph = form_graph(false);
        assert!(validator.check_acro_form(&profile, &graph).is_ok());
        assert_eq!(
            validator.validate(&profile, &graph).unwrap_err().kind(),
            ViolationKind::MissingOutputIntent
        );

        let graph = form_graph(true);
        assert_eq!(
            validator.check_acro_form(&profile, &graph).unwrap_err().kind(),
            ViolationKind::NeedAppearancesMustBeAbsentOrFalse
        );
    }

    #[test]
    fn test_custom_registry_without_rule() {
        let validator = PdfAValidator::with_registry(Arc::new(RuleRegistry::new()));
        let profile = ConformanceProfile::without_output_intent(PdfALevel::A1b);
        let graph = form_graph(true);
        assert!(validator.check_acro_form(&profile, &graph).is_ok());
        assert!(validator.validate(&profile, &graph).is_ok());
    }

    #[test]
    fn test_custom_registry_from_config() {
        let config = ValidationConfig::new()
            .with_embedded_file_policy(crate::compliance::PdfAPart::Part2, None);
        let validator = PdfAValidator::with_registry(Arc::new(RuleRegistry::standard(&config)));
        let profile = ConformanceProfile::without_output_intent(PdfALevel::A2b);
        assert!(validator
            .check_embedded_files(&profile, &DocumentGraph::new())
            .is_ok());
        assert!(validator
            .check_output_intents(&profile, &DocumentGraph::new())
            .is_err());
    }
}
