pub mod fixtures;
pub mod memory;

pub use fixtures::{demo_products, demo_tiered_rules, demo_volume_rules, seed_rule_store};
pub use memory::{InMemoryAuditStore, InMemoryRuleStore};
