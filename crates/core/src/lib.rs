pub mod audit;
pub mod config;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod export;
pub mod history;
pub mod store;

pub use audit::{build_trail, DateRange, PriceAuditTrail, RuleUsage, TrailFilters, TrailSummary};
pub use config::{ConfigError, EngineConfig};
pub use domain::context::PricingContext;
pub use domain::customer::{CustomerId, CustomerTier};
pub use domain::product::{Product, ProductId};
pub use domain::result::{AppliedRule, DiscountBreakdown, PricingResult, RuleFamily};
pub use domain::rule::{
    Condition, ContextField, DiscountAction, DiscountKind, FieldRef, FieldValue, Predicate,
    PricingRule, ProductField, RuleId, RuleKind, RuleStatus,
};
pub use domain::scope::RuleScope;
pub use domain::tiered::TieredPricingRule;
pub use domain::volume::{VolumePricingRule, VolumeTier};
pub use engine::catalog::{ImportOutcome, RuleCatalog};
pub use engine::{calculate_best_price, PricingService, SavingsProjection};
pub use errors::DomainError;
pub use export::{export_trail, ExportError, ExportFormat};
pub use history::{record_price_history, ContextSnapshot, PriceHistoryEntry};
pub use store::{AuditStore, RuleStore, ScopeFilter, StoreError};
