use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::customer::CustomerTier;
use crate::domain::rule::{window_contains, DiscountAction, RuleId, RuleStatus};
use crate::domain::scope::RuleScope;

/// Scoped customer-segment rule. `priority` breaks ties among several active
/// tiered rules for the same customer: the highest number wins.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TieredPricingRule {
    pub id: RuleId,
    pub name: String,
    pub scope: RuleScope,
    pub customer_tiers: Vec<CustomerTier>,
    pub discount: DiscountAction,
    pub priority: u32,
    pub status: RuleStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

impl TieredPricingRule {
    pub fn is_effective_at(&self, now: DateTime<Utc>) -> bool {
        self.status.is_active() && window_contains(self.start_date, self.end_date, now)
    }

    pub fn applies_to_tier(&self, tier: CustomerTier) -> bool {
        self.customer_tiers.contains(&tier)
    }
}
