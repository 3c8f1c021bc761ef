//! Canned cannabis-industry rules covering the markdowns every retail
//! operator runs: expiring stock, wholesale volume, low-THC flower, customer
//! tiers, and internal dispensary transfers.
//!
//! Inputs outside sane bounds clamp to conservative defaults so a template
//! always yields a valid rule.

use rust_decimal::Decimal;

use crate::domain::customer::CustomerTier;
use crate::domain::rule::{
    Condition, ContextField, DiscountAction, FieldRef, FieldValue, Predicate, PricingRule,
    ProductField, RuleId, RuleKind, RuleStatus,
};
use crate::domain::scope::RuleScope;

fn clamp_pct(pct: Decimal, default: i64) -> Decimal {
    if pct > Decimal::ZERO && pct <= Decimal::ONE_HUNDRED {
        pct
    } else {
        Decimal::from(default)
    }
}

fn rule(
    id: String,
    name: String,
    kind: RuleKind,
    priority: u32,
    conditions: Vec<Condition>,
    action: DiscountAction,
) -> PricingRule {
    PricingRule {
        id: RuleId(id),
        name,
        kind,
        priority,
        scope: RuleScope::Global,
        conditions,
        action,
        status: RuleStatus::Active,
        start_date: None,
        end_date: None,
    }
}

/// Markdown for stock expiring within `days` days.
pub fn expiration_markdown(days: u32, pct: Decimal) -> PricingRule {
    let days = if days == 0 { 30 } else { days };
    let pct = clamp_pct(pct, 15);
    rule(
        format!("expiration-{days}-day"),
        format!("{days}-Day Expiration Discount"),
        RuleKind::Expiration,
        1,
        vec![Condition::new(
            FieldRef::Product(ProductField::DaysUntilExpiration),
            Predicate::LessThan(Decimal::from(days)),
        )],
        DiscountAction::percentage(pct),
    )
}

/// Volume discount for orders above `min_quantity` units.
pub fn volume_discount(min_quantity: u32, pct: Decimal) -> PricingRule {
    let min_quantity = if min_quantity == 0 { 5 } else { min_quantity };
    let pct = clamp_pct(pct, 10);
    rule(
        format!("volume-{min_quantity}"),
        format!("Volume Discount ({min_quantity}+ units)"),
        RuleKind::Volume,
        3,
        vec![Condition::new(
            FieldRef::Context(ContextField::OrderQuantity),
            Predicate::GreaterThan(Decimal::from(min_quantity)),
        )],
        DiscountAction::percentage(pct),
    )
}

/// Markdown for flower testing below `thc_threshold` percent THC.
pub fn low_thc_markdown(thc_threshold: Decimal, pct: Decimal) -> PricingRule {
    let threshold = if thc_threshold > Decimal::ZERO && thc_threshold <= Decimal::ONE_HUNDRED {
        thc_threshold
    } else {
        Decimal::from(15)
    };
    let pct = clamp_pct(pct, 10);
    rule(
        format!("low-thc-{threshold}"),
        format!("Low THC Discount (<{threshold}%)"),
        RuleKind::Thc,
        2,
        vec![
            Condition::new(
                FieldRef::Product(ProductField::Category),
                Predicate::Equals(FieldValue::Text("Flower".to_string())),
            ),
            Condition::new(
                FieldRef::Product(ProductField::ThcPercentage),
                Predicate::LessThan(threshold),
            ),
        ],
        DiscountAction::percentage(pct),
    )
}

/// Flat discount for customers in `tier`.
pub fn customer_tier_discount(tier: CustomerTier, pct: Decimal) -> PricingRule {
    let pct = clamp_pct(pct, 8);
    rule(
        format!("customer-tier-{}", tier.as_str().to_lowercase()),
        format!("{tier} Customer Discount"),
        RuleKind::Customer,
        2,
        vec![Condition::new(
            FieldRef::Context(ContextField::CustomerTier),
            Predicate::Equals(FieldValue::Text(tier.as_str().to_string())),
        )],
        DiscountAction::percentage(pct),
    )
}

/// Discount for internal dispensary transfer orders.
pub fn internal_dispensary_discount(pct: Decimal) -> PricingRule {
    let pct = clamp_pct(pct, 12);
    rule(
        "internal-dispensary".to_string(),
        "Internal Dispensary Discount".to_string(),
        RuleKind::Customer,
        2,
        vec![Condition::new(
            FieldRef::Context(ContextField::IsInternalDispensary),
            Predicate::Equals(FieldValue::Flag(true)),
        )],
        DiscountAction::percentage(pct),
    )
}

/// The standard starter set an operator seeds a new market with.
pub fn standard_rules() -> Vec<PricingRule> {
    let mut expiration = expiration_markdown(30, Decimal::from(20));
    expiration.action = expiration.action.capped(Decimal::from(50));
    vec![
        expiration,
        volume_discount(100, Decimal::from(15)),
        low_thc_markdown(Decimal::from(15), Decimal::from(10)),
        internal_dispensary_discount(Decimal::from(12)),
    ]
}
