use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable catalog snapshot supplied per calculation. The external catalog
/// owns the record; the engine never mutates it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub base_price: Decimal,
    pub category: String,
    pub brand: String,
    pub inventory_count: u32,
    pub thc_percentage: Decimal,
    pub expiration_date: Option<DateTime<Utc>>,
}

impl Product {
    /// Whole days until expiration relative to `now`. Negative once the
    /// product has expired; `None` for products without an expiration date.
    pub fn days_until_expiration(&self, now: DateTime<Utc>) -> Option<i64> {
        self.expiration_date.map(|expires| (expires - now).num_days())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;

    use super::{Product, ProductId};

    #[test]
    fn days_until_expiration_counts_whole_days() {
        let now = Utc::now();
        let product = Product {
            id: ProductId("flower-001".to_string()),
            name: "Indica Flower 3.5g".to_string(),
            base_price: Decimal::new(4500, 2),
            category: "Flower".to_string(),
            brand: "Greenhouse".to_string(),
            inventory_count: 120,
            thc_percentage: Decimal::new(2150, 2),
            expiration_date: Some(now + Duration::days(14)),
        };

        assert_eq!(product.days_until_expiration(now), Some(14));
    }

    #[test]
    fn missing_expiration_date_yields_none() {
        let product = Product {
            id: ProductId("edible-001".to_string()),
            name: "Gummies 10pk".to_string(),
            base_price: Decimal::new(2000, 2),
            category: "Edibles".to_string(),
            brand: "Sweetleaf".to_string(),
            inventory_count: 40,
            thc_percentage: Decimal::new(500, 2),
            expiration_date: None,
        };

        assert_eq!(product.days_until_expiration(Utc::now()), None);
    }
}
