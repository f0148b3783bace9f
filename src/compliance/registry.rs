//! Ordered rule registry.
//!
//! Rules run in registration order and the first violation ends the pass. The standard
//! order is:
//!
//! 1. [`AcroFormRule`]
//! 2. [`EmbeddedFilesRule`]
//! 3. [`OutputIntentRule`]
//!
//! so when a document breaks several rules, the one listed first is reported.

use super::rules::{AcroFormRule, ConformanceRule, EmbeddedFilesRule, OutputIntentRule};
use super::types::ConformanceProfile;
use super::violation::ConformanceViolation;
use crate::config::ValidationConfig;
use crate::graph::ObjectGraph;
use lazy_static::lazy_static;

lazy_static! {
    static ref DEFAULT_REGISTRY: RuleRegistry = RuleRegistry::standard(&ValidationConfig::default());
}

/// The process-wide registry built from the default configuration.
pub fn default_registry() -> &'static RuleRegistry {
    &DEFAULT_REGISTRY
}

/// An ordered set of conformance rules.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    rules: Vec<Box<dyn ConformanceRule>>,
}

impl RuleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create a registry with the standard rules, in the standard order.
    pub fn standard(config: &ValidationConfig) -> Self {
        let mut registry = Self::new();
        registry
            .register(AcroFormRule)
            .register(EmbeddedFilesRule::new(config.embedded_files.clone()))
            .register(OutputIntentRule);
        registry
    }

    /// Append a rule.
    pub fn register(&mut self, rule: impl ConformanceRule + 'static) -> &mut Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Ids of the registered rules, in evaluation order.
    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.id()).collect()
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every applicable rule, stopping at the first violation.
    pub fn validate(
        &self,
        profile: &ConformanceProfile,
        graph: &dyn ObjectGraph,
    ) -> Result<(), ConformanceViolation> {
        let level = profile.level();
        for rule in &self.rules {
            if !rule.applies_to(level) {
                log::debug!("Skipping rule {} (not applicable to {})", rule.id(), level);
                continue;
            }
            log::debug!("Running rule {} for {}", rule.id(), level);
            rule.check(profile, graph).map_err(|violation| {
                log::warn!("{} violation [{}]: {}", level, violation.kind(), violation);
                violation
            })?;
        }
        Ok(())
    }

    /// Run a single registered rule by id.
    ///
    /// Returns `None` when no rule with that id is registered. A rule that does not apply
    /// to the profile's level passes.
    pub fn validate_rule(
        &self,
        rule_id: &str,
        profile: &ConformanceProfile,
        graph: &dyn ObjectGraph,
    ) -> Option<Result<(), ConformanceViolation>> {
        let rule = self.rules.iter().find(|rule| rule.id() == rule_id)?;
        if !rule.applies_to(profile.level()) {
            return Some(Ok(()));
        }
        Some(rule.check(profile, graph))
    }
}
