//! Conditional pricing rules: a typed condition list plus one discount action.
//!
//! Field references are a closed enum rather than dotted string paths, so a
//! rule can only ever point at fields the engine actually resolves.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::scope::RuleScope;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RuleId(pub String);

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rule family tag, used for reporting and template construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Expiration,
    Volume,
    Thc,
    Customer,
    Bundle,
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expiration => "expiration",
            Self::Volume => "volume",
            Self::Thc => "thc",
            Self::Customer => "customer",
            Self::Bundle => "bundle",
        }
    }
}

/// Authoring lifecycle state. Only `Active` rules participate in matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleStatus {
    Active,
    Inactive,
    Scheduled,
    Expired,
}

impl RuleStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Product-side fields a condition may reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductField {
    BasePrice,
    Category,
    Brand,
    ThcPercentage,
    InventoryCount,
    DaysUntilExpiration,
}

/// Context-side fields a condition may reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextField {
    OrderQuantity,
    CustomerTier,
    Market,
    IsInternalDispensary,
    IsWholesale,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRef {
    Product(ProductField),
    Context(ContextField),
}

/// Resolved value of a field reference, or a comparison operand.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldValue {
    Number(Decimal),
    Text(String),
    Flag(bool),
}

/// Comparison applied to a resolved field value. Numeric predicates are
/// false for non-numeric operands; `Contains` is false for non-strings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    Equals(FieldValue),
    GreaterThan(Decimal),
    LessThan(Decimal),
    Contains(String),
    InRange { low: Decimal, high: Decimal },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub field: FieldRef,
    pub predicate: Predicate,
}

impl Condition {
    pub fn new(field: FieldRef, predicate: Predicate) -> Self {
        Self { field, predicate }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    Percentage,
    FixedAmount,
    FixedPrice,
}

impl DiscountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::FixedAmount => "fixed_amount",
            Self::FixedPrice => "fixed_price",
        }
    }
}

/// The single effect a winning rule applies to a subtotal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiscountAction {
    pub kind: DiscountKind,
    pub value: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_discount: Option<Decimal>,
}

impl DiscountAction {
    pub fn percentage(value: Decimal) -> Self {
        Self { kind: DiscountKind::Percentage, value, max_discount: None }
    }

    pub fn fixed_amount(value: Decimal) -> Self {
        Self { kind: DiscountKind::FixedAmount, value, max_discount: None }
    }

    pub fn fixed_price(value: Decimal) -> Self {
        Self { kind: DiscountKind::FixedPrice, value, max_discount: None }
    }

    pub fn capped(mut self, max_discount: Decimal) -> Self {
        self.max_discount = Some(max_discount);
        self
    }
}

/// A conditional discount rule. Authored and edited outside this engine;
/// read-only input to every calculation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricingRule {
    pub id: RuleId,
    pub name: String,
    pub kind: RuleKind,
    /// Catalog ordering hint; lower numbers sort first. Discount size, not
    /// priority, decides the winner.
    pub priority: u32,
    #[serde(default)]
    pub scope: RuleScope,
    pub conditions: Vec<Condition>,
    pub action: DiscountAction,
    pub status: RuleStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
}

/// Shared active-window test: absent bounds are open.
pub fn window_contains(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> bool {
    if let Some(start) = start {
        if now < start {
            return false;
        }
    }
    if let Some(end) = end {
        if now > end {
            return false;
        }
    }
    true
}

impl PricingRule {
    pub fn is_effective_at(&self, now: DateTime<Utc>) -> bool {
        self.status.is_active() && window_contains(self.start_date, self.end_date, now)
    }
}
