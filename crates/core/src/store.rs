//! Collaborator seams for the external rule and audit stores.
//!
//! The engine owns no persistence: candidate rules are fetched through
//! `RuleStore`, completed calculations are logged through `AuditStore`, and
//! `StoreError` is the only failure class a calculation surfaces to callers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::customer::CustomerTier;
use crate::domain::product::{Product, ProductId};
use crate::domain::scope::RuleScope;
use crate::domain::tiered::TieredPricingRule;
use crate::domain::volume::VolumePricingRule;
use crate::history::PriceHistoryEntry;

/// Narrows a rule query to one product's identity, category, and brand.
/// Global-scoped rules always pass the filter.
#[derive(Clone, Debug, PartialEq)]
pub struct ScopeFilter {
    pub product_id: ProductId,
    pub category: String,
    pub brand: String,
}

impl ScopeFilter {
    pub fn for_product(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            category: product.category.clone(),
            brand: product.brand.clone(),
        }
    }

    /// Whether a rule at `scope` belongs in this filter's result set.
    /// Store implementations apply this on the query path.
    pub fn admits(&self, scope: &RuleScope) -> bool {
        match scope {
            RuleScope::Global => true,
            RuleScope::Product(id) => *id == self.product_id,
            RuleScope::Category(category) => *category == self.category,
            RuleScope::Brand(brand) => *brand == self.brand,
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store returned malformed data: {0}")]
    Decode(String),
}

#[async_trait]
pub trait RuleStore: Send + Sync {
    /// Active volume rules whose scope covers the filter at `active_at`,
    /// joined with their tiers, in the store's insertion order.
    async fn find_volume_rules(
        &self,
        filter: &ScopeFilter,
        active_at: DateTime<Utc>,
    ) -> Result<Vec<VolumePricingRule>, StoreError>;

    /// Active tiered rules for `tier` whose scope covers the filter at
    /// `active_at`, ordered priority-descending.
    async fn find_tiered_rules(
        &self,
        tier: CustomerTier,
        filter: &ScopeFilter,
        active_at: DateTime<Utc>,
    ) -> Result<Vec<TieredPricingRule>, StoreError>;
}

#[async_trait]
pub trait AuditStore: Send + Sync {
    /// Durably persist one immutable history entry. No update or delete is
    /// ever issued by this engine.
    async fn insert(&self, entry: PriceHistoryEntry) -> Result<(), StoreError>;
}
