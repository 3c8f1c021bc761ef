use serde::{Deserialize, Serialize};

use crate::domain::product::{Product, ProductId};

/// Breadth at which a rule applies. `Global` matches every product; the
/// narrower scopes match only the corresponding product field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", content = "scope_value", rename_all = "snake_case")]
pub enum RuleScope {
    Global,
    Product(ProductId),
    Category(String),
    Brand(String),
}

impl Default for RuleScope {
    fn default() -> Self {
        Self::Global
    }
}

impl RuleScope {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::Global => true,
            Self::Product(id) => *id == product.id,
            Self::Category(category) => *category == product.category,
            Self::Brand(brand) => *brand == product.brand,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::domain::product::{Product, ProductId};

    use super::RuleScope;

    fn product() -> Product {
        Product {
            id: ProductId("flower-001".to_string()),
            name: "Indica Flower 3.5g".to_string(),
            base_price: Decimal::new(4500, 2),
            category: "Flower".to_string(),
            brand: "Greenhouse".to_string(),
            inventory_count: 12,
            thc_percentage: Decimal::new(1800, 2),
            expiration_date: None,
        }
    }

    #[test]
    fn global_scope_matches_everything() {
        assert!(RuleScope::Global.matches(&product()));
    }

    #[test]
    fn narrow_scopes_match_only_their_field() {
        let product = product();
        assert!(RuleScope::Product(ProductId("flower-001".to_string())).matches(&product));
        assert!(!RuleScope::Product(ProductId("flower-002".to_string())).matches(&product));
        assert!(RuleScope::Category("Flower".to_string()).matches(&product));
        assert!(!RuleScope::Category("Edibles".to_string()).matches(&product));
        assert!(RuleScope::Brand("Greenhouse".to_string()).matches(&product));
        assert!(!RuleScope::Brand("Sweetleaf".to_string()).matches(&product));
    }
}
