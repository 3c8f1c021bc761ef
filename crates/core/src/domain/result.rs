use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::rule::RuleId;

/// Which resolver produced a discount candidate. At most one family's
/// discount ever reaches the final price.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleFamily {
    Conditional,
    Volume,
    Tiered,
}

impl RuleFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conditional => "conditional",
            Self::Volume => "volume",
            Self::Tiered => "tiered",
        }
    }
}

/// Reference to the rule that won the calculation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppliedRule {
    pub rule_id: RuleId,
    pub rule_name: String,
    pub family: RuleFamily,
}

/// Per-family amounts feeding the no-stacking comparison. Losing families
/// are zeroed so the breakdown always sums to a single applied discount.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiscountBreakdown {
    pub base_price: Decimal,
    pub conditional_discount: Decimal,
    pub volume_discount: Decimal,
    pub tier_discount: Decimal,
    pub final_price: Decimal,
}

/// Outcome of one pricing calculation. Contains no timestamps: identical
/// inputs against an unchanged rule set produce an identical value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    pub original_price: Decimal,
    pub final_price: Decimal,
    pub total_discount: Decimal,
    pub discount_percentage: Decimal,
    pub applied_rules: Vec<AppliedRule>,
    pub breakdown: DiscountBreakdown,
    pub explanation: String,
}

impl PricingResult {
    /// Zero-discount result used both for "nothing matched" and as the safe
    /// fallback when inputs are unusable.
    pub fn passthrough(original_price: Decimal, explanation: impl Into<String>) -> Self {
        let original_price = original_price.max(Decimal::ZERO);
        Self {
            original_price,
            final_price: original_price,
            total_discount: Decimal::ZERO,
            discount_percentage: Decimal::ZERO,
            applied_rules: Vec::new(),
            breakdown: DiscountBreakdown {
                base_price: original_price,
                conditional_discount: Decimal::ZERO,
                volume_discount: Decimal::ZERO,
                tier_discount: Decimal::ZERO,
                final_price: original_price,
            },
            explanation: explanation.into(),
        }
    }
}
