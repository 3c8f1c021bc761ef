//! Audit trail analysis: filter history entries, compute aggregate
//! savings, and surface the most frequently applied rules.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::customer::CustomerId;
use crate::domain::product::ProductId;
use crate::domain::rule::RuleId;
use crate::history::PriceHistoryEntry;

const TOP_RULES_LIMIT: usize = 10;

/// Conjunctive filters over a set of history entries. An unset field
/// matches everything.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrailFilters {
    pub product_id: Option<ProductId>,
    pub customer_id: Option<CustomerId>,
    pub market: Option<String>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
}

impl TrailFilters {
    fn matches(&self, entry: &PriceHistoryEntry) -> bool {
        if let Some(product_id) = &self.product_id {
            if &entry.product_id != product_id {
                return false;
            }
        }
        if let Some(customer_id) = &self.customer_id {
            if entry.customer_id.as_ref() != Some(customer_id) {
                return false;
            }
        }
        if let Some(market) = &self.market {
            if &entry.context.market != market {
                return false;
            }
        }
        if let Some(from) = self.date_from {
            if entry.context.timestamp < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if entry.context.timestamp > to {
                return false;
            }
        }
        true
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleUsage {
    pub rule_id: RuleId,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrailSummary {
    pub total_savings: Decimal,
    pub average_discount_pct: Decimal,
    pub most_used_rules: Vec<RuleUsage>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceAuditTrail {
    pub entries: Vec<PriceHistoryEntry>,
    pub total_entries: usize,
    pub date_range: DateRange,
    pub summary: TrailSummary,
}

/// Filter the given entries and aggregate them into a trail. The average
/// discount percentage only counts entries with a positive original price;
/// an empty trail gets a degenerate date range stamped at the current time.
pub fn build_trail(entries: &[PriceHistoryEntry], filters: &TrailFilters) -> PriceAuditTrail {
    let selected: Vec<PriceHistoryEntry> = entries
        .iter()
        .filter(|entry| filters.matches(entry))
        .cloned()
        .collect();

    let date_range = match (
        selected.iter().map(|e| e.context.timestamp).min(),
        selected.iter().map(|e| e.context.timestamp).max(),
    ) {
        (Some(from), Some(to)) => DateRange { from, to },
        _ => {
            let now = Utc::now();
            DateRange { from: now, to: now }
        }
    };

    let total_savings: Decimal = selected.iter().map(|e| e.discount_amount).sum();

    let mut pct_sum = Decimal::ZERO;
    let mut pct_count = 0u32;
    for entry in &selected {
        if entry.original_price > Decimal::ZERO {
            pct_sum += entry.discount_amount / entry.original_price * Decimal::ONE_HUNDRED;
            pct_count += 1;
        }
    }
    let average_discount_pct = if pct_count > 0 {
        (pct_sum / Decimal::from(pct_count)).round_dp(2)
    } else {
        Decimal::ZERO
    };

    let mut usage: BTreeMap<RuleId, usize> = BTreeMap::new();
    for entry in &selected {
        for rule_id in &entry.applied_rules {
            *usage.entry(rule_id.clone()).or_insert(0) += 1;
        }
    }
    let mut most_used_rules: Vec<RuleUsage> = usage
        .into_iter()
        .map(|(rule_id, count)| RuleUsage { rule_id, count })
        .collect();
    // BTreeMap iteration gives ascending rule ids, so a stable sort on
    // count keeps id order as the tiebreak.
    most_used_rules.sort_by(|a, b| b.count.cmp(&a.count));
    most_used_rules.truncate(TOP_RULES_LIMIT);

    let total_entries = selected.len();
    PriceAuditTrail {
        entries: selected,
        total_entries,
        date_range,
        summary: TrailSummary {
            total_savings,
            average_discount_pct,
            most_used_rules,
        },
    }
}
