//! Validated registry for conditional pricing rules.
//!
//! Rule authoring happens elsewhere; the catalog is the engine's in-memory
//! working set, kept sorted and free of rules that fail validation.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::EngineConfig;
use crate::domain::rule::{DiscountKind, PricingRule, RuleId};
use crate::errors::DomainError;

/// Outcome of a bulk import: how many rules landed, and why the rest did not.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImportOutcome {
    pub imported: usize,
    pub errors: Vec<DomainError>,
}

#[derive(Clone, Debug, Default)]
pub struct RuleCatalog {
    rules: Vec<PricingRule>,
    config: EngineConfig,
}

impl RuleCatalog {
    pub fn new(config: EngineConfig) -> Self {
        Self { rules: Vec::new(), config }
    }

    /// Validate and insert a rule, replacing any existing rule with the same
    /// id. The catalog stays sorted by priority (stable, so earlier inserts
    /// win ties among equal priorities).
    pub fn add_rule(&mut self, rule: PricingRule) -> Result<(), DomainError> {
        self.validate_rule(&rule)?;
        self.rules.retain(|existing| existing.id != rule.id);
        debug!(rule_id = %rule.id, rule = %rule.name, "catalog rule added");
        self.rules.push(rule);
        self.rules.sort_by_key(|rule| rule.priority);
        Ok(())
    }

    pub fn remove_rule(&mut self, id: &RuleId) -> bool {
        let before = self.rules.len();
        self.rules.retain(|rule| rule.id != *id);
        self.rules.len() < before
    }

    pub fn rules(&self) -> &[PricingRule] {
        &self.rules
    }

    pub fn active_rules(&self) -> impl Iterator<Item = &PricingRule> {
        self.rules.iter().filter(|rule| rule.status.is_active())
    }

    /// Import a batch, collecting per-rule failures instead of aborting.
    pub fn import_rules(&mut self, rules: Vec<PricingRule>) -> ImportOutcome {
        let mut outcome = ImportOutcome::default();
        for rule in rules {
            match self.add_rule(rule) {
                Ok(()) => outcome.imported += 1,
                Err(error) => outcome.errors.push(error),
            }
        }
        outcome
    }

    pub fn export_rules(&self) -> Vec<PricingRule> {
        self.rules.clone()
    }

    fn validate_rule(&self, rule: &PricingRule) -> Result<(), DomainError> {
        let mut issues = Vec::new();

        if rule.id.0.trim().is_empty() {
            issues.push("rule id must not be blank".to_string());
        }
        if rule.name.trim().is_empty() {
            issues.push("rule name must not be blank".to_string());
        }
        if rule.action.value < Decimal::ZERO {
            issues.push("action value must be non-negative".to_string());
        }
        if rule.action.kind == DiscountKind::Percentage {
            if rule.action.value > Decimal::ONE_HUNDRED {
                issues.push("percentage discount cannot exceed 100%".to_string());
            } else if rule.action.value > self.config.max_discount_pct {
                issues.push(format!(
                    "percentage discount exceeds configured cap of {}%",
                    self.config.max_discount_pct
                ));
            }
        }
        if let Some(cap) = rule.action.max_discount {
            if cap <= Decimal::ZERO {
                issues.push("max_discount cap must be positive".to_string());
            }
        }
        if let (Some(start), Some(end)) = (rule.start_date, rule.end_date) {
            if end < start {
                issues.push("end_date precedes start_date".to_string());
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(DomainError::InvalidRule { rule_id: rule.id.clone(), issues })
        }
    }
}
