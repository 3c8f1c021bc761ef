use rust_decimal::Decimal;

use crate::domain::rule::{DiscountAction, DiscountKind};

/// Compute the discount an action takes off `subtotal`, clamped to
/// `[0, subtotal]`.
///
/// Percentage values outside `[0, 100]` contribute nothing; a fixed price at
/// or above the subtotal is never applied as a markup. The action's
/// `max_discount` cap, when present, applies after the kind-specific
/// computation.
pub fn discount_amount(action: &DiscountAction, subtotal: Decimal) -> Decimal {
    if subtotal <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let mut amount = match action.kind {
        DiscountKind::Percentage => {
            if action.value >= Decimal::ZERO && action.value <= Decimal::ONE_HUNDRED {
                subtotal * action.value / Decimal::ONE_HUNDRED
            } else {
                Decimal::ZERO
            }
        }
        DiscountKind::FixedAmount => {
            if action.value >= Decimal::ZERO {
                action.value.min(subtotal)
            } else {
                Decimal::ZERO
            }
        }
        DiscountKind::FixedPrice => {
            if action.value >= Decimal::ZERO && action.value < subtotal {
                subtotal - action.value
            } else {
                Decimal::ZERO
            }
        }
    };

    if let Some(cap) = action.max_discount {
        if cap > Decimal::ZERO {
            amount = amount.min(cap);
        }
    }

    amount.clamp(Decimal::ZERO, subtotal)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::rule::DiscountAction;

    use super::discount_amount;

    #[test]
    fn percentage_of_subtotal() {
        let action = DiscountAction::percentage(Decimal::from(10));
        assert_eq!(discount_amount(&action, Decimal::from(200)), Decimal::from(20));
    }

    #[test]
    fn percentage_outside_bounds_contributes_zero() {
        let over = DiscountAction::percentage(Decimal::from(120));
        assert_eq!(discount_amount(&over, Decimal::from(200)), Decimal::ZERO);

        let negative = DiscountAction::percentage(Decimal::from(-5));
        assert_eq!(discount_amount(&negative, Decimal::from(200)), Decimal::ZERO);
    }

    #[test]
    fn fixed_amount_clamps_to_subtotal() {
        let action = DiscountAction::fixed_amount(Decimal::from(500));
        assert_eq!(discount_amount(&action, Decimal::from(50)), Decimal::from(50));
    }

    #[test]
    fn fixed_price_below_subtotal_discounts_down_to_it() {
        let action = DiscountAction::fixed_price(Decimal::from(150));
        assert_eq!(discount_amount(&action, Decimal::from(200)), Decimal::from(50));
    }

    #[test]
    fn fixed_price_at_or_above_subtotal_is_never_a_markup() {
        let action = DiscountAction::fixed_price(Decimal::from(250));
        assert_eq!(discount_amount(&action, Decimal::from(200)), Decimal::ZERO);
    }

    #[test]
    fn max_discount_caps_after_computation() {
        let action = DiscountAction::percentage(Decimal::from(20)).capped(Decimal::from(25));
        assert_eq!(discount_amount(&action, Decimal::from(200)), Decimal::from(25));
    }

    #[test]
    fn zero_subtotal_yields_zero() {
        let action = DiscountAction::percentage(Decimal::from(50));
        assert_eq!(discount_amount(&action, Decimal::ZERO), Decimal::ZERO);
    }
}
