//! No-stacking selection and result assembly.
//!
//! Each rule family contributes at most one candidate; the single candidate
//! with the strictly largest discount wins and every other family is zeroed
//! in the breakdown. Family discounts are never summed.

use rust_decimal::Decimal;

use crate::domain::result::{
    AppliedRule, DiscountBreakdown, PricingResult, RuleFamily,
};
use crate::domain::rule::RuleId;

pub const NO_DISCOUNT_EXPLANATION: &str = "No applicable discounts found";

/// One family's best outcome, priced and ready for comparison.
#[derive(Clone, Debug, PartialEq)]
pub struct DiscountCandidate {
    pub family: RuleFamily,
    pub rule_id: RuleId,
    pub rule_name: String,
    pub amount: Decimal,
}

/// Strictly largest positive discount wins; the first candidate seen keeps
/// ties. All-zero or empty input selects nothing.
pub fn select_best(candidates: &[DiscountCandidate]) -> Option<&DiscountCandidate> {
    let mut best: Option<&DiscountCandidate> = None;
    for candidate in candidates {
        if candidate.amount <= Decimal::ZERO {
            continue;
        }
        if best.map_or(true, |current| candidate.amount > current.amount) {
            best = Some(candidate);
        }
    }
    best
}

/// Assemble the final result from the subtotal and the winning candidate.
/// The final price is floored at zero and can never exceed the original.
pub fn build_result(subtotal: Decimal, winner: Option<&DiscountCandidate>) -> PricingResult {
    let subtotal = subtotal.max(Decimal::ZERO);

    let Some(winner) = winner else {
        return PricingResult::passthrough(subtotal, NO_DISCOUNT_EXPLANATION);
    };

    let discount = winner.amount.clamp(Decimal::ZERO, subtotal);
    let final_price = (subtotal - discount).max(Decimal::ZERO);
    let discount_percentage = if subtotal > Decimal::ZERO {
        (discount / subtotal * Decimal::ONE_HUNDRED).round_dp(1)
    } else {
        Decimal::ZERO
    };

    let mut breakdown = DiscountBreakdown {
        base_price: subtotal,
        conditional_discount: Decimal::ZERO,
        volume_discount: Decimal::ZERO,
        tier_discount: Decimal::ZERO,
        final_price,
    };
    match winner.family {
        RuleFamily::Conditional => breakdown.conditional_discount = discount,
        RuleFamily::Volume => breakdown.volume_discount = discount,
        RuleFamily::Tiered => breakdown.tier_discount = discount,
    }

    PricingResult {
        original_price: subtotal,
        final_price,
        total_discount: discount,
        discount_percentage,
        applied_rules: vec![AppliedRule {
            rule_id: winner.rule_id.clone(),
            rule_name: winner.rule_name.clone(),
            family: winner.family,
        }],
        breakdown,
        explanation: format!(
            "Applied {}: {discount_percentage}% discount (no-stacking policy)",
            winner.rule_name
        ),
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::result::RuleFamily;
    use crate::domain::rule::RuleId;

    use super::{build_result, select_best, DiscountCandidate, NO_DISCOUNT_EXPLANATION};

    fn candidate(family: RuleFamily, id: &str, amount: i64) -> DiscountCandidate {
        DiscountCandidate {
            family,
            rule_id: RuleId(id.to_string()),
            rule_name: id.to_string(),
            amount: Decimal::from(amount),
        }
    }

    #[test]
    fn largest_discount_wins_never_the_sum() {
        let candidates = vec![
            candidate(RuleFamily::Volume, "vol", 20),
            candidate(RuleFamily::Tiered, "tier", 35),
        ];

        let result = build_result(Decimal::from(200), select_best(&candidates));
        assert_eq!(result.total_discount, Decimal::from(35));
        assert_eq!(result.final_price, Decimal::from(165));
        assert_eq!(result.breakdown.tier_discount, Decimal::from(35));
        assert_eq!(result.breakdown.volume_discount, Decimal::ZERO);
    }

    #[test]
    fn first_candidate_keeps_a_tie() {
        let candidates = vec![
            candidate(RuleFamily::Conditional, "first", 25),
            candidate(RuleFamily::Volume, "second", 25),
        ];

        let winner = select_best(&candidates).unwrap();
        assert_eq!(winner.rule_id.0, "first");
    }

    #[test]
    fn all_zero_candidates_select_nothing() {
        let candidates = vec![candidate(RuleFamily::Volume, "vol", 0)];
        assert!(select_best(&candidates).is_none());

        let result = build_result(Decimal::from(100), None);
        assert_eq!(result.final_price, Decimal::from(100));
        assert_eq!(result.explanation, NO_DISCOUNT_EXPLANATION);
    }

    #[test]
    fn discount_larger_than_subtotal_floors_final_price_at_zero() {
        let candidates = vec![candidate(RuleFamily::Conditional, "huge", 500)];
        let result = build_result(Decimal::from(50), select_best(&candidates));

        assert_eq!(result.total_discount, Decimal::from(50));
        assert_eq!(result.final_price, Decimal::ZERO);
    }

    #[test]
    fn explanation_names_winner_and_effective_percentage() {
        let candidates = vec![candidate(RuleFamily::Volume, "Case Break", 20)];
        let result = build_result(Decimal::from(200), select_best(&candidates));

        assert_eq!(
            result.explanation,
            "Applied Case Break: 10.0% discount (no-stacking policy)"
        );
    }
}
