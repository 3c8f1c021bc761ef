//! Seed data for demos and integration tests: a small dispensary catalog
//! plus the volume and tiered rules a typical market runs.

use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use canopy_core::domain::customer::CustomerTier;
use canopy_core::domain::product::{Product, ProductId};
use canopy_core::domain::rule::{DiscountAction, RuleId, RuleStatus};
use canopy_core::domain::scope::RuleScope;
use canopy_core::domain::tiered::TieredPricingRule;
use canopy_core::domain::volume::{VolumePricingRule, VolumeTier};
use canopy_core::errors::DomainError;

use crate::memory::InMemoryRuleStore;

pub fn demo_products() -> Vec<Product> {
    vec![
        Product {
            id: ProductId("flower-001".to_string()),
            name: "Indica Flower 3.5g".to_string(),
            base_price: Decimal::new(4500, 2),
            category: "Flower".to_string(),
            brand: "Greenhouse".to_string(),
            inventory_count: 120,
            thc_percentage: Decimal::new(2150, 2),
            expiration_date: Some(Utc::now() + Duration::days(45)),
        },
        Product {
            id: ProductId("edible-010".to_string()),
            name: "Fruit Gummies 100mg".to_string(),
            base_price: Decimal::new(2000, 2),
            category: "Edibles".to_string(),
            brand: "Sweetleaf".to_string(),
            inventory_count: 300,
            thc_percentage: Decimal::new(500, 2),
            expiration_date: Some(Utc::now() + Duration::days(180)),
        },
        Product {
            id: ProductId("preroll-007".to_string()),
            name: "Sativa Pre-Roll 1g".to_string(),
            base_price: Decimal::new(1200, 2),
            category: "Pre-Rolls".to_string(),
            brand: "Greenhouse".to_string(),
            inventory_count: 80,
            thc_percentage: Decimal::new(1900, 2),
            expiration_date: Some(Utc::now() + Duration::days(20)),
        },
    ]
}

pub fn demo_volume_rules() -> Vec<VolumePricingRule> {
    vec![
        VolumePricingRule {
            id: RuleId("vol-flower-case".to_string()),
            name: "Flower Case Break".to_string(),
            scope: RuleScope::Category("Flower".to_string()),
            status: RuleStatus::Active,
            tiers: vec![
                VolumeTier {
                    min_quantity: 5,
                    max_quantity: Some(9),
                    discount: DiscountAction::percentage(Decimal::from(5)),
                    label: Some("Half case".to_string()),
                },
                VolumeTier {
                    min_quantity: 10,
                    max_quantity: Some(24),
                    discount: DiscountAction::percentage(Decimal::from(10)),
                    label: Some("Full case".to_string()),
                },
                VolumeTier {
                    min_quantity: 25,
                    max_quantity: None,
                    discount: DiscountAction::percentage(Decimal::from(15)),
                    label: Some("Pallet".to_string()),
                },
            ],
            start_date: None,
            end_date: None,
        },
        VolumePricingRule {
            id: RuleId("vol-global-bulk".to_string()),
            name: "Bulk Order".to_string(),
            scope: RuleScope::Global,
            status: RuleStatus::Active,
            tiers: vec![VolumeTier {
                min_quantity: 50,
                max_quantity: None,
                discount: DiscountAction::percentage(Decimal::from(12)),
                label: None,
            }],
            start_date: None,
            end_date: None,
        },
    ]
}

pub fn demo_tiered_rules() -> Vec<TieredPricingRule> {
    vec![
        TieredPricingRule {
            id: RuleId("tier-a-partner".to_string()),
            name: "Tier A Partner Pricing".to_string(),
            scope: RuleScope::Global,
            customer_tiers: vec![CustomerTier::A],
            discount: DiscountAction::percentage(Decimal::from(20)),
            priority: 10,
            status: RuleStatus::Active,
            start_date: None,
            end_date: None,
        },
        TieredPricingRule {
            id: RuleId("tier-b-wholesale".to_string()),
            name: "Tier B Wholesale".to_string(),
            scope: RuleScope::Global,
            customer_tiers: vec![CustomerTier::B],
            discount: DiscountAction::percentage(Decimal::from(10)),
            priority: 5,
            status: RuleStatus::Active,
            start_date: None,
            end_date: None,
        },
    ]
}

/// Load every demo rule into the given store.
pub async fn seed_rule_store(store: &InMemoryRuleStore) -> Result<(), DomainError> {
    for rule in demo_volume_rules() {
        store.upsert_volume_rule(rule).await?;
    }
    for rule in demo_tiered_rules() {
        store.upsert_tiered_rule(rule).await;
    }
    Ok(())
}
