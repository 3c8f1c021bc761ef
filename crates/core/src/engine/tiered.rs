use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::customer::CustomerTier;
use crate::domain::product::Product;
use crate::domain::rule::RuleId;
use crate::domain::tiered::TieredPricingRule;
use crate::engine::discount::discount_amount;

/// The winning tiered rule for one calculation.
#[derive(Clone, Debug, PartialEq)]
pub struct TierSelection {
    pub rule_id: RuleId,
    pub rule_name: String,
    pub priority: u32,
    pub amount: Decimal,
}

/// Among rules declaring the customer's tier whose scope and date window
/// match, the highest declared priority wins unconditionally; ties keep the
/// first rule in the supplied order (the store convention is
/// priority-descending, so that is simply the first survivor). Only the
/// winner is priced: a winner whose discount comes out zero yields no
/// selection rather than falling through to a lower-priority rule.
pub fn resolve_tiered(
    rules: &[TieredPricingRule],
    customer_tier: CustomerTier,
    product: &Product,
    subtotal: Decimal,
    now: DateTime<Utc>,
) -> Option<TierSelection> {
    let mut winner: Option<&TieredPricingRule> = None;

    for rule in rules {
        if !rule.is_effective_at(now)
            || !rule.applies_to_tier(customer_tier)
            || !rule.scope.matches(product)
        {
            continue;
        }
        if winner.map_or(true, |current| rule.priority > current.priority) {
            winner = Some(rule);
        }
    }

    let rule = winner?;
    let amount = discount_amount(&rule.discount, subtotal);
    if amount <= Decimal::ZERO {
        debug!(rule_id = %rule.id, priority = rule.priority, "tiered winner prices to zero");
        return None;
    }
    debug!(rule_id = %rule.id, priority = rule.priority, %amount, "tiered rule selected");

    Some(TierSelection {
        rule_id: rule.id.clone(),
        rule_name: rule.name.clone(),
        priority: rule.priority,
        amount,
    })
}
