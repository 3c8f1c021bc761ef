use tokio::sync::RwLock;
use tracing::debug;

use chrono::{DateTime, Utc};

use canopy_core::domain::customer::CustomerTier;
use canopy_core::domain::rule::RuleId;
use canopy_core::domain::tiered::TieredPricingRule;
use canopy_core::domain::volume::VolumePricingRule;
use canopy_core::errors::DomainError;
use canopy_core::history::PriceHistoryEntry;
use canopy_core::store::{AuditStore, RuleStore, ScopeFilter, StoreError};

/// Rule store backed by process memory. Used by tests and demos; the
/// query path applies the same status, scope, and date filtering a real
/// backend would push into its queries.
#[derive(Default)]
pub struct InMemoryRuleStore {
    volume: RwLock<Vec<VolumePricingRule>>,
    tiered: RwLock<Vec<TieredPricingRule>>,
}

impl InMemoryRuleStore {
    /// Insert or replace a volume rule by id. The rule's tier bands are
    /// validated before it becomes visible to queries.
    pub async fn upsert_volume_rule(&self, rule: VolumePricingRule) -> Result<(), DomainError> {
        rule.validate()?;
        let mut rules = self.volume.write().await;
        rules.retain(|existing| existing.id != rule.id);
        debug!(rule_id = %rule.id.0, "volume rule stored");
        rules.push(rule);
        Ok(())
    }

    pub async fn upsert_tiered_rule(&self, rule: TieredPricingRule) {
        let mut rules = self.tiered.write().await;
        rules.retain(|existing| existing.id != rule.id);
        debug!(rule_id = %rule.id.0, "tiered rule stored");
        rules.push(rule);
    }

    pub async fn remove_rule(&self, id: &RuleId) -> bool {
        let mut volume = self.volume.write().await;
        let mut tiered = self.tiered.write().await;
        let before = volume.len() + tiered.len();
        volume.retain(|rule| &rule.id != id);
        tiered.retain(|rule| &rule.id != id);
        volume.len() + tiered.len() < before
    }
}

#[async_trait::async_trait]
impl RuleStore for InMemoryRuleStore {
    async fn find_volume_rules(
        &self,
        filter: &ScopeFilter,
        active_at: DateTime<Utc>,
    ) -> Result<Vec<VolumePricingRule>, StoreError> {
        let rules = self.volume.read().await;
        Ok(rules
            .iter()
            .filter(|rule| rule.is_effective_at(active_at) && filter.admits(&rule.scope))
            .cloned()
            .collect())
    }

    async fn find_tiered_rules(
        &self,
        tier: CustomerTier,
        filter: &ScopeFilter,
        active_at: DateTime<Utc>,
    ) -> Result<Vec<TieredPricingRule>, StoreError> {
        let rules = self.tiered.read().await;
        let mut selected: Vec<TieredPricingRule> = rules
            .iter()
            .filter(|rule| {
                rule.is_effective_at(active_at)
                    && rule.applies_to_tier(tier)
                    && filter.admits(&rule.scope)
            })
            .cloned()
            .collect();
        selected.sort_by(|a, b| b.priority.cmp(&a.priority));
        Ok(selected)
    }
}

/// Append-only audit log in process memory.
#[derive(Default)]
pub struct InMemoryAuditStore {
    entries: RwLock<Vec<PriceHistoryEntry>>,
}

impl InMemoryAuditStore {
    pub async fn entries(&self) -> Vec<PriceHistoryEntry> {
        self.entries.read().await.clone()
    }
}

#[async_trait::async_trait]
impl AuditStore for InMemoryAuditStore {
    async fn insert(&self, entry: PriceHistoryEntry) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        entries.push(entry);
        Ok(())
    }
}
