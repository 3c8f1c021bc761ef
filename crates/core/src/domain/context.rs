use serde::{Deserialize, Serialize};

use crate::domain::customer::{CustomerId, CustomerTier};
use crate::domain::product::ProductId;

/// Per-request calculation input. Created fresh for every pricing call and
/// never persisted directly; the history recorder embeds its own snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricingContext {
    pub product_id: ProductId,
    pub customer_id: Option<CustomerId>,
    pub customer_tier: Option<CustomerTier>,
    pub quantity: u32,
    pub market: String,
    pub is_internal_dispensary: bool,
    pub is_wholesale: bool,
}

impl PricingContext {
    pub fn new(product_id: ProductId, quantity: u32, market: impl Into<String>) -> Self {
        Self {
            product_id,
            customer_id: None,
            customer_tier: None,
            quantity,
            market: market.into(),
            is_internal_dispensary: false,
            is_wholesale: false,
        }
    }

    pub fn with_customer(mut self, id: CustomerId, tier: Option<CustomerTier>) -> Self {
        self.customer_id = Some(id);
        self.customer_tier = tier;
        self
    }

    pub fn internal(mut self) -> Self {
        self.is_internal_dispensary = true;
        self
    }

    pub fn wholesale(mut self) -> Self {
        self.is_wholesale = true;
        self
    }
}
