//! Price history records. Recording is infallible by construction: any
//! calculation outcome, including a degraded one, becomes a well-formed
//! entry so the audit trail never has holes.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::context::PricingContext;
use crate::domain::customer::CustomerId;
use crate::domain::product::ProductId;
use crate::domain::rule::RuleId;

/// The slice of the pricing context worth keeping alongside each entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContextSnapshot {
    pub market: String,
    pub order_quantity: u32,
    pub customer_tier: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceHistoryEntry {
    pub id: String,
    pub product_id: ProductId,
    pub customer_id: Option<CustomerId>,
    pub original_price: Decimal,
    pub final_price: Decimal,
    pub discount_amount: Decimal,
    pub applied_rules: Vec<RuleId>,
    pub context: ContextSnapshot,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

/// Build a history entry from a calculation outcome. Prices are clamped to
/// non-negative and the discount is re-derived, so a malformed input still
/// produces a consistent record. Caller-supplied `metadata` is carried
/// through; a degraded calculation passes `error` and the reason lands in
/// the entry's metadata under the `error` key.
pub fn record_price_history(
    product_id: &ProductId,
    original_price: Decimal,
    final_price: Decimal,
    applied_rules: Vec<RuleId>,
    context: &PricingContext,
    mut metadata: BTreeMap<String, String>,
    error: Option<&str>,
) -> PriceHistoryEntry {
    let original = original_price.max(Decimal::ZERO);
    let final_price = final_price.max(Decimal::ZERO);
    let discount = (original - final_price).max(Decimal::ZERO);

    if let Some(reason) = error {
        metadata.insert("error".to_string(), reason.to_string());
    }

    PriceHistoryEntry {
        id: uuid::Uuid::new_v4().to_string(),
        product_id: product_id.clone(),
        customer_id: context.customer_id.clone(),
        original_price: original,
        final_price,
        discount_amount: discount,
        applied_rules,
        context: ContextSnapshot {
            market: context.market.clone(),
            order_quantity: context.quantity,
            customer_tier: context
                .customer_tier
                .map(|tier| tier.as_str().to_string())
                .unwrap_or_default(),
            timestamp: Utc::now(),
        },
        metadata,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rust_decimal::Decimal;

    use crate::domain::context::PricingContext;
    use crate::domain::customer::{CustomerId, CustomerTier};
    use crate::domain::product::ProductId;
    use crate::domain::rule::RuleId;

    use super::record_price_history;

    fn context() -> PricingContext {
        PricingContext::new(ProductId("p1".to_string()), 5, "IL")
            .with_customer(CustomerId("c1".to_string()), Some(CustomerTier::B))
    }

    #[test]
    fn derives_discount_from_prices() {
        let entry = record_price_history(
            &ProductId("p1".to_string()),
            Decimal::from(200),
            Decimal::from(150),
            vec![RuleId("tier-b".to_string())],
            &context(),
            BTreeMap::new(),
            None,
        );

        assert_eq!(entry.discount_amount, Decimal::from(50));
        assert_eq!(entry.context.customer_tier, "B");
        assert_eq!(entry.context.order_quantity, 5);
        assert!(entry.metadata.is_empty());
    }

    #[test]
    fn clamps_negative_prices_to_zero() {
        let entry = record_price_history(
            &ProductId("p1".to_string()),
            Decimal::from(-10),
            Decimal::from(-5),
            Vec::new(),
            &context(),
            BTreeMap::new(),
            None,
        );

        assert_eq!(entry.original_price, Decimal::ZERO);
        assert_eq!(entry.final_price, Decimal::ZERO);
        assert_eq!(entry.discount_amount, Decimal::ZERO);
    }

    #[test]
    fn final_above_original_never_yields_negative_discount() {
        let entry = record_price_history(
            &ProductId("p1".to_string()),
            Decimal::from(100),
            Decimal::from(120),
            Vec::new(),
            &context(),
            BTreeMap::new(),
            None,
        );

        assert_eq!(entry.discount_amount, Decimal::ZERO);
    }

    #[test]
    fn degraded_calculation_is_flagged_in_metadata() {
        let entry = record_price_history(
            &ProductId("p1".to_string()),
            Decimal::from(100),
            Decimal::from(100),
            Vec::new(),
            &context(),
            BTreeMap::new(),
            Some("rule store unavailable"),
        );

        assert_eq!(
            entry.metadata.get("error").map(String::as_str),
            Some("rule store unavailable")
        );
    }

    #[test]
    fn caller_metadata_is_carried_and_merged_with_the_error_flag() {
        let mut metadata = BTreeMap::new();
        metadata.insert("source".to_string(), "pos-terminal-4".to_string());

        let entry = record_price_history(
            &ProductId("p1".to_string()),
            Decimal::from(100),
            Decimal::from(100),
            Vec::new(),
            &context(),
            metadata,
            Some("rule store unavailable"),
        );

        assert_eq!(
            entry.metadata.get("source").map(String::as_str),
            Some("pos-terminal-4")
        );
        assert_eq!(
            entry.metadata.get("error").map(String::as_str),
            Some("rule store unavailable")
        );
    }

    #[test]
    fn entries_get_unique_ids() {
        let ctx = context();
        let a = record_price_history(
            &ProductId("p1".to_string()),
            Decimal::from(100),
            Decimal::from(90),
            Vec::new(),
            &ctx,
            BTreeMap::new(),
            None,
        );
        let b = record_price_history(
            &ProductId("p1".to_string()),
            Decimal::from(100),
            Decimal::from(90),
            Vec::new(),
            &ctx,
            BTreeMap::new(),
            None,
        );
        assert_ne!(a.id, b.id);
    }
}
