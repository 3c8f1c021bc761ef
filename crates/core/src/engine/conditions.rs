//! Condition evaluation against a product/context pair.
//!
//! Conditions are a safe filter, never a crash source: a field that does not
//! resolve (no expiration date, no customer tier) or an operand of the wrong
//! type makes the condition false rather than erroring.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::context::PricingContext;
use crate::domain::product::Product;
use crate::domain::rule::{
    Condition, ContextField, FieldRef, FieldValue, Predicate, ProductField,
};

/// Resolve a typed field reference. `now` anchors the days-until-expiration
/// computation so evaluation stays deterministic for a fixed clock.
pub fn resolve_field(
    field: FieldRef,
    product: &Product,
    context: &PricingContext,
    now: DateTime<Utc>,
) -> Option<FieldValue> {
    match field {
        FieldRef::Product(field) => match field {
            ProductField::BasePrice => Some(FieldValue::Number(product.base_price)),
            ProductField::Category => Some(FieldValue::Text(product.category.clone())),
            ProductField::Brand => Some(FieldValue::Text(product.brand.clone())),
            ProductField::ThcPercentage => Some(FieldValue::Number(product.thc_percentage)),
            ProductField::InventoryCount => {
                Some(FieldValue::Number(Decimal::from(product.inventory_count)))
            }
            ProductField::DaysUntilExpiration => product
                .days_until_expiration(now)
                .map(|days| FieldValue::Number(Decimal::from(days))),
        },
        FieldRef::Context(field) => match field {
            ContextField::OrderQuantity => {
                Some(FieldValue::Number(Decimal::from(context.quantity)))
            }
            ContextField::CustomerTier => context
                .customer_tier
                .map(|tier| FieldValue::Text(tier.as_str().to_string())),
            ContextField::Market => Some(FieldValue::Text(context.market.clone())),
            ContextField::IsInternalDispensary => {
                Some(FieldValue::Flag(context.is_internal_dispensary))
            }
            ContextField::IsWholesale => Some(FieldValue::Flag(context.is_wholesale)),
        },
    }
}

/// Evaluate one condition. Missing fields and type mismatches are `false`.
pub fn evaluate_condition(
    condition: &Condition,
    product: &Product,
    context: &PricingContext,
    now: DateTime<Utc>,
) -> bool {
    let Some(value) = resolve_field(condition.field, product, context, now) else {
        return false;
    };

    match &condition.predicate {
        Predicate::Equals(expected) => value == *expected,
        Predicate::GreaterThan(threshold) => {
            matches!(value, FieldValue::Number(n) if n > *threshold)
        }
        Predicate::LessThan(threshold) => {
            matches!(value, FieldValue::Number(n) if n < *threshold)
        }
        Predicate::Contains(needle) => match value {
            FieldValue::Text(haystack) => {
                haystack.to_lowercase().contains(&needle.to_lowercase())
            }
            _ => false,
        },
        Predicate::InRange { low, high } => {
            matches!(value, FieldValue::Number(n) if n >= *low && n <= *high)
        }
    }
}
