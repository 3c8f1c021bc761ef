//! The pricing engine: condition evaluation, rule matching, per-family
//! resolution, no-stacking selection, and the store-backed service that
//! ties them together.

pub mod catalog;
pub mod conditions;
pub mod discount;
pub mod matcher;
pub mod selector;
pub mod templates;
pub mod tiered;
pub mod volume;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::domain::context::PricingContext;
use crate::domain::product::Product;
use crate::domain::result::{PricingResult, RuleFamily};
use crate::domain::rule::PricingRule;
use crate::history::{record_price_history, PriceHistoryEntry};
use crate::store::{AuditStore, RuleStore, ScopeFilter, StoreError};

use self::catalog::RuleCatalog;
use self::discount::discount_amount;
use self::matcher::applicable_rules;
use self::selector::{build_result, select_best, DiscountCandidate};
use self::tiered::resolve_tiered;
use self::volume::resolve_volume;

/// Projected savings at one quantity rung, for "you could save X%" surfaces.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavingsProjection {
    pub quantity: u32,
    pub savings: Decimal,
    pub savings_percentage: Decimal,
    pub final_price: Decimal,
}

/// Pure entry point for callers who already hold a conditional rule set.
/// Computation never fails: unusable inputs collapse to a passthrough
/// result at the (clamped) base price.
pub fn calculate_best_price(
    product: &Product,
    context: &PricingContext,
    rules: &[PricingRule],
    now: DateTime<Utc>,
) -> PricingResult {
    let subtotal = subtotal_for(product, context);
    if subtotal <= Decimal::ZERO {
        return PricingResult::passthrough(Decimal::ZERO, selector::NO_DISCOUNT_EXPLANATION);
    }

    let candidates = conditional_candidates(product, context, rules, subtotal, now);
    build_result(subtotal, select_best(&candidates))
}

fn subtotal_for(product: &Product, context: &PricingContext) -> Decimal {
    if product.base_price <= Decimal::ZERO || context.quantity == 0 {
        return Decimal::ZERO;
    }
    product.base_price * Decimal::from(context.quantity)
}

fn conditional_candidates(
    product: &Product,
    context: &PricingContext,
    rules: &[PricingRule],
    subtotal: Decimal,
    now: DateTime<Utc>,
) -> Vec<DiscountCandidate> {
    applicable_rules(rules, product, context, now)
        .into_iter()
        .map(|rule| DiscountCandidate {
            family: RuleFamily::Conditional,
            rule_id: rule.id.clone(),
            rule_name: rule.name.clone(),
            amount: discount_amount(&rule.action, subtotal),
        })
        .collect()
}

/// Store-backed pricing service. Holds its collaborators by value so tests
/// can inject in-memory fakes; every calculation is a pure function of the
/// fetched rule sets, and only store I/O can fail.
pub struct PricingService<R, A> {
    rule_store: R,
    audit_store: A,
    catalog: RuleCatalog,
    config: EngineConfig,
}

impl<R, A> PricingService<R, A> {
    pub fn new(rule_store: R, audit_store: A) -> Self {
        Self {
            rule_store,
            audit_store,
            catalog: RuleCatalog::default(),
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.catalog = RuleCatalog::new(config.clone());
        self.config = config;
        self
    }

    pub fn catalog_mut(&mut self) -> &mut RuleCatalog {
        &mut self.catalog
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    pub fn rule_store(&self) -> &R {
        &self.rule_store
    }

    pub fn audit_store(&self) -> &A {
        &self.audit_store
    }
}

impl<R: RuleStore, A: AuditStore> PricingService<R, A> {
    /// Price one product for one context. Each rule family contributes its
    /// single best outcome; the largest discount wins outright. A
    /// calculation that finds nothing still returns a valid, explainable
    /// result at the base price; only store failures surface.
    pub async fn calculate_price(
        &self,
        product: &Product,
        context: &PricingContext,
    ) -> Result<PricingResult, StoreError> {
        self.calculate_price_at(product, context, Utc::now()).await
    }

    /// Clock-injected variant used by tests and replays.
    pub async fn calculate_price_at(
        &self,
        product: &Product,
        context: &PricingContext,
        now: DateTime<Utc>,
    ) -> Result<PricingResult, StoreError> {
        let subtotal = subtotal_for(product, context);
        if subtotal <= Decimal::ZERO {
            debug!(product_id = %product.id, "unusable inputs, returning passthrough");
            return Ok(PricingResult::passthrough(
                Decimal::ZERO,
                selector::NO_DISCOUNT_EXPLANATION,
            ));
        }

        let filter = ScopeFilter::for_product(product);
        let mut candidates =
            conditional_candidates(product, context, self.catalog.rules(), subtotal, now);

        let volume_rules = self.rule_store.find_volume_rules(&filter, now).await?;
        if let Some(selection) =
            resolve_volume(&volume_rules, product, context.quantity, subtotal, now)
        {
            candidates.push(DiscountCandidate {
                family: RuleFamily::Volume,
                rule_id: selection.rule_id,
                rule_name: selection.rule_name,
                amount: selection.amount,
            });
        }

        if let Some(tier) = context.customer_tier {
            let tiered_rules = self.rule_store.find_tiered_rules(tier, &filter, now).await?;
            if let Some(selection) = resolve_tiered(&tiered_rules, tier, product, subtotal, now) {
                candidates.push(DiscountCandidate {
                    family: RuleFamily::Tiered,
                    rule_id: selection.rule_id,
                    rule_name: selection.rule_name,
                    amount: selection.amount,
                });
            }
        }

        let result = build_result(subtotal, select_best(&candidates));
        info!(
            product_id = %product.id,
            quantity = context.quantity,
            original = %result.original_price,
            discounted = %result.final_price,
            "price calculated"
        );
        Ok(result)
    }

    /// Calculate and persist the audit record in one step. The history
    /// entry itself is always well-formed; only the store write can fail.
    pub async fn calculate_and_record(
        &self,
        product: &Product,
        context: &PricingContext,
    ) -> Result<(PricingResult, PriceHistoryEntry), StoreError> {
        let result = self.calculate_price(product, context).await?;
        let entry = record_price_history(
            &product.id,
            result.original_price,
            result.final_price,
            result.applied_rules.iter().map(|applied| applied.rule_id.clone()).collect(),
            context,
            BTreeMap::new(),
            None,
        );
        self.audit_store.insert(entry.clone()).await?;
        Ok((result, entry))
    }

    /// Savings projections over the configured quantity ladder; only rungs
    /// where a discount applies are returned.
    pub async fn savings_summary(
        &self,
        product: &Product,
        context: &PricingContext,
    ) -> Result<Vec<SavingsProjection>, StoreError> {
        let mut projections = Vec::new();
        for &quantity in &self.config.summary_quantities {
            let mut rung = context.clone();
            rung.quantity = quantity;
            let result = self.calculate_price(product, &rung).await?;
            if result.total_discount > Decimal::ZERO {
                projections.push(SavingsProjection {
                    quantity,
                    savings: result.total_discount,
                    savings_percentage: result.discount_percentage,
                    final_price: result.final_price,
                });
            }
        }
        Ok(projections)
    }
}
