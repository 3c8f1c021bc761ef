//! Audit trail export in the formats the compliance tooling ingests.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::audit::PriceAuditTrail;
use crate::history::PriceHistoryEntry;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Csv,
    Json,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize audit trail: {0}")]
    Serialize(#[from] serde_json::Error),
}

const CSV_HEADERS: [&str; 11] = [
    "Entry ID",
    "Product ID",
    "Customer ID",
    "Original Price",
    "Final Price",
    "Discount Amount",
    "Applied Rules",
    "Market",
    "Order Quantity",
    "Customer Tier",
    "Timestamp",
];

/// Render a trail for download. CSV carries one row per entry with every
/// cell quoted; JSON is the full trail, summary included.
pub fn export_trail(trail: &PriceAuditTrail, format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Csv => Ok(to_csv(trail)),
        ExportFormat::Json => Ok(serde_json::to_string_pretty(trail)?),
    }
}

fn to_csv(trail: &PriceAuditTrail) -> String {
    let mut out = String::new();
    out.push_str(&csv_row(CSV_HEADERS.iter().map(|h| h.to_string())));
    for entry in &trail.entries {
        out.push_str(&csv_row(entry_cells(entry).into_iter()));
    }
    out
}

fn entry_cells(entry: &PriceHistoryEntry) -> Vec<String> {
    vec![
        entry.id.clone(),
        entry.product_id.0.clone(),
        entry
            .customer_id
            .as_ref()
            .map(|id| id.0.clone())
            .unwrap_or_default(),
        money(entry.original_price),
        money(entry.final_price),
        money(entry.discount_amount),
        entry
            .applied_rules
            .iter()
            .map(|rule_id| rule_id.0.clone())
            .collect::<Vec<_>>()
            .join("; "),
        entry.context.market.clone(),
        entry.context.order_quantity.to_string(),
        entry.context.customer_tier.clone(),
        entry.context.timestamp.to_rfc3339(),
    ]
}

// Always two decimal places, so "50" renders as "50.00".
fn money(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

fn csv_row(cells: impl Iterator<Item = String>) -> String {
    let quoted: Vec<String> = cells
        .map(|cell| format!("\"{}\"", cell.replace('"', "\"\"")))
        .collect();
    let mut row = quoted.join(",");
    row.push('\n');
    row
}
