use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::product::Product;
use crate::domain::rule::RuleId;
use crate::domain::volume::{VolumePricingRule, VolumeTier};
use crate::engine::discount::discount_amount;

/// The winning volume rule/tier pair for one calculation.
#[derive(Clone, Debug, PartialEq)]
pub struct VolumeSelection {
    pub rule_id: RuleId,
    pub rule_name: String,
    pub tier: VolumeTier,
    pub amount: Decimal,
}

/// For each scope-matching active rule, find the tier containing the order
/// quantity and price its discount against the subtotal; keep the pair with
/// the strictly largest discount. Earlier rules win ties.
pub fn resolve_volume(
    rules: &[VolumePricingRule],
    product: &Product,
    quantity: u32,
    subtotal: Decimal,
    now: DateTime<Utc>,
) -> Option<VolumeSelection> {
    let mut best: Option<VolumeSelection> = None;

    for rule in rules {
        if !rule.is_effective_at(now) || !rule.scope.matches(product) {
            continue;
        }
        let Some(tier) = rule.tier_for_quantity(quantity) else {
            continue;
        };

        let amount = discount_amount(&tier.discount, subtotal);
        if amount <= Decimal::ZERO {
            continue;
        }
        debug!(rule_id = %rule.id, %amount, "volume tier candidate");

        if best.as_ref().map_or(true, |current| amount > current.amount) {
            best = Some(VolumeSelection {
                rule_id: rule.id.clone(),
                rule_name: rule.name.clone(),
                tier: tier.clone(),
                amount,
            });
        }
    }

    best
}
