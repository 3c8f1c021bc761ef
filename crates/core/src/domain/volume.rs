use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::rule::{window_contains, DiscountAction, RuleId, RuleStatus};
use crate::domain::scope::RuleScope;
use crate::errors::DomainError;

/// A quantity band within a volume rule. `max_quantity: None` means the band
/// is unbounded above.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VolumeTier {
    pub min_quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_quantity: Option<u32>,
    pub discount: DiscountAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl VolumeTier {
    pub fn contains(&self, quantity: u32) -> bool {
        quantity >= self.min_quantity
            && self.max_quantity.map_or(true, |max| quantity <= max)
    }
}

/// Scoped quantity-break rule carrying an ordered tier list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VolumePricingRule {
    pub id: RuleId,
    pub name: String,
    pub scope: RuleScope,
    pub status: RuleStatus,
    pub tiers: Vec<VolumeTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

impl VolumePricingRule {
    pub fn is_effective_at(&self, now: DateTime<Utc>) -> bool {
        self.status.is_active() && window_contains(self.start_date, self.end_date, now)
    }

    /// First tier whose quantity band contains `quantity`, in authored order.
    pub fn tier_for_quantity(&self, quantity: u32) -> Option<&VolumeTier> {
        self.tiers.iter().find(|tier| tier.contains(quantity))
    }

    /// Tiers with two finite bounds must not overlap each other.
    pub fn validate(&self) -> Result<(), DomainError> {
        for (i, a) in self.tiers.iter().enumerate() {
            for b in self.tiers.iter().skip(i + 1) {
                let (Some(a_max), Some(b_max)) = (a.max_quantity, b.max_quantity) else {
                    continue;
                };
                if a.min_quantity <= b_max && b.min_quantity <= a_max {
                    return Err(DomainError::OverlappingVolumeTiers {
                        rule_id: self.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::rule::{DiscountAction, RuleId, RuleStatus};
    use crate::domain::scope::RuleScope;
    use crate::errors::DomainError;

    use super::{VolumePricingRule, VolumeTier};

    fn tier(min: u32, max: Option<u32>, pct: i64) -> VolumeTier {
        VolumeTier {
            min_quantity: min,
            max_quantity: max,
            discount: DiscountAction::percentage(Decimal::from(pct)),
            label: None,
        }
    }

    fn rule(tiers: Vec<VolumeTier>) -> VolumePricingRule {
        VolumePricingRule {
            id: RuleId("vol-1".to_string()),
            name: "Case Break".to_string(),
            scope: RuleScope::Global,
            status: RuleStatus::Active,
            tiers,
            start_date: None,
            end_date: None,
        }
    }

    #[test]
    fn tier_bounds_are_inclusive_and_open_above() {
        let tier = tier(10, Some(24), 10);
        assert!(!tier.contains(9));
        assert!(tier.contains(10));
        assert!(tier.contains(24));
        assert!(!tier.contains(25));

        let open = super::VolumeTier { max_quantity: None, ..tier };
        assert!(open.contains(999_999));
    }

    #[test]
    fn tier_lookup_returns_first_containing_band() {
        let rule = rule(vec![tier(1, Some(9), 0), tier(10, Some(24), 10), tier(25, None, 15)]);
        assert_eq!(rule.tier_for_quantity(12).unwrap().min_quantity, 10);
        assert_eq!(rule.tier_for_quantity(25).unwrap().min_quantity, 25);
    }

    #[test]
    fn validate_rejects_overlapping_finite_bands() {
        let rule = rule(vec![tier(1, Some(10), 5), tier(8, Some(20), 10)]);
        assert!(matches!(
            rule.validate(),
            Err(DomainError::OverlappingVolumeTiers { .. })
        ));
    }

    #[test]
    fn validate_ignores_unbounded_bands() {
        let rule = rule(vec![tier(1, Some(10), 5), tier(5, None, 10)]);
        assert!(rule.validate().is_ok());
    }
}
