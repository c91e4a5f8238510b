use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::product::{Product, ProductId};

/// A product copy paired with a quantity. Quantity is always >= 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    pub fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    pub fn id(&self) -> ProductId {
        self.product.id
    }

    /// Builds a new line for the same product. Callers never pass zero.
    pub fn with_quantity(&self, quantity: u32) -> Self {
        debug_assert!(quantity > 0, "cart lines must hold at least one unit");
        Self {
            product: self.product.clone(),
            quantity,
        }
    }

    /// Saturates at `Decimal::MAX` instead of overflowing.
    pub fn line_total(&self) -> Decimal {
        self.product
            .price
            .checked_mul(Decimal::from(self.quantity))
            .unwrap_or(Decimal::MAX)
    }
}

/// Derived totals a presenter pulls after every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSummary {
    pub total_items: u64,
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub grand_total: Decimal,
}

impl CartSummary {
    pub fn is_free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}

/// Identity of one in-memory cart. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSession {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
}

impl CartSession {
    pub fn start() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
        }
    }
}

impl Default for CartSession {
    fn default() -> Self {
        Self::start()
    }
}
