use rust_decimal::Decimal;

use crate::models::cart::{CartLine, CartSession, CartSummary};
use crate::models::product::{Product, ProductId};
use crate::services::pricing::{round_currency, saturating_add, ShippingPolicy};

/// In-memory cart for one session.
///
/// Every operation is total: unknown ids are ignored and non-positive
/// quantities turn into removals. Lines keep insertion order and there is
/// never more than one line per product id.
#[derive(Debug, Clone)]
pub struct CartStore {
    session: CartSession,
    lines: Vec<CartLine>,
    shipping: ShippingPolicy,
    revision: u64,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    pub fn new() -> Self {
        Self::with_policy(ShippingPolicy::default())
    }

    pub fn with_policy(shipping: ShippingPolicy) -> Self {
        Self {
            session: CartSession::start(),
            lines: Vec::new(),
            shipping,
            revision: 0,
        }
    }

    pub fn session(&self) -> &CartSession {
        &self.session
    }

    pub fn shipping_policy(&self) -> &ShippingPolicy {
        &self.shipping
    }

    /// Bumped whenever the cart contents actually change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.lines.iter().position(|line| line.id() == product_id)
    }

    /// Adds one unit of `product`, appending a new line the first time.
    pub fn add_to_cart(&mut self, product: &Product) -> &CartLine {
        let index = match self.position(product.id) {
            Some(index) => {
                let quantity = self.lines[index].quantity.saturating_add(1);
                let updated = self.lines[index].with_quantity(quantity);
                self.lines[index] = updated;
                index
            }
            None => {
                self.lines.push(CartLine::new(product.clone()));
                self.lines.len() - 1
            }
        };
        self.revision += 1;
        &self.lines[index]
    }

    pub fn remove_from_cart(&mut self, product_id: ProductId) -> Option<CartLine> {
        let index = self.position(product_id)?;
        let removed = self.lines.remove(index);
        self.revision += 1;
        Some(removed)
    }

    /// Sets an absolute quantity. `new_quantity <= 0` removes the line.
    ///
    /// Returns the line as it stands afterwards, `None` if it no longer
    /// exists (or never did).
    pub fn update_quantity(&mut self, product_id: ProductId, new_quantity: i64) -> Option<&CartLine> {
        if new_quantity <= 0 {
            self.remove_from_cart(product_id);
            return None;
        }

        let index = self.position(product_id)?;
        let quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        if self.lines[index].quantity != quantity {
            let updated = self.lines[index].with_quantity(quantity);
            self.lines[index] = updated;
            self.revision += 1;
        }
        Some(&self.lines[index])
    }

    pub fn clear_cart(&mut self) {
        if !self.lines.is_empty() {
            self.lines.clear();
            self.revision += 1;
        }
    }

    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn total_price(&self) -> Decimal {
        let subtotal = self
            .lines
            .iter()
            .map(CartLine::line_total)
            .fold(Decimal::ZERO, saturating_add);
        round_currency(subtotal)
    }

    pub fn compute_shipping(&self, subtotal: Decimal) -> Decimal {
        self.shipping.shipping_for(subtotal)
    }

    pub fn compute_grand_total(&self) -> Decimal {
        let subtotal = self.total_price();
        round_currency(saturating_add(subtotal, self.compute_shipping(subtotal)))
    }

    pub fn summary(&self) -> CartSummary {
        let subtotal = self.total_price();
        let shipping = self.compute_shipping(subtotal);
        CartSummary {
            total_items: self.total_items(),
            subtotal,
            shipping,
            grand_total: round_currency(saturating_add(subtotal, shipping)),
        }
    }
}
