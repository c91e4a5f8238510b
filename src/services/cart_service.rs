use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    catalog::{CatalogError, CatalogRepository},
    models::{
        cart::{CartLine, CartSession, CartSummary},
        product::{Product, ProductId},
    },
    store::CartStore,
};

#[derive(Error, Debug)]
pub enum CartServiceError {
    #[error("Product {id} is not in the catalog")]
    ProductNotFound { id: ProductId },

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Everything a renderer needs, pulled fresh after each action.
#[derive(Debug, Clone)]
pub struct CartView<'a> {
    pub session: &'a CartSession,
    pub products: &'a [Product],
    pub lines: &'a [CartLine],
    pub summary: CartSummary,
    pub revision: u64,
}

impl CartView<'_> {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

pub struct CartService {
    catalog: Arc<dyn CatalogRepository>,
    store: CartStore,
}

impl CartService {
    pub fn new(catalog: Arc<dyn CatalogRepository>, store: CartStore) -> Self {
        info!(
            "Cart session {} opened with {} catalog products",
            store.session().id,
            catalog.len()
        );
        Self { catalog, store }
    }

    pub fn products(&self) -> &[Product] {
        self.catalog.all()
    }

    pub fn store(&self) -> &CartStore {
        &self.store
    }

    /// Resolve a catalog id and add one unit of it.
    pub fn add_product(&mut self, product_id: ProductId) -> Result<&CartLine, CartServiceError> {
        let product = self.catalog.find_by_id(product_id).ok_or_else(|| {
            warn!("Rejected add of unknown product {}", product_id);
            CartServiceError::ProductNotFound { id: product_id }
        })?;

        let line = self.store.add_to_cart(product);
        info!(
            "Added '{}' to cart (quantity now {})",
            line.product.name, line.quantity
        );
        Ok(line)
    }

    pub fn remove_product(&mut self, product_id: ProductId) -> Option<CartLine> {
        let removed = self.store.remove_from_cart(product_id);
        match &removed {
            Some(line) => info!("Removed '{}' from cart", line.product.name),
            None => debug!("Remove ignored, product {} not in cart", product_id),
        }
        removed
    }

    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) -> Option<&CartLine> {
        debug!("Setting quantity of product {} to {}", product_id, quantity);
        let line = self.store.update_quantity(product_id, quantity);
        if line.is_none() {
            debug!("Product {} is not in the cart after update", product_id);
        }
        line
    }

    /// The "+" control: one more unit of a line already in the cart.
    pub fn increment(&mut self, product_id: ProductId) -> Option<&CartLine> {
        let current = self.store.line(product_id)?.quantity;
        self.set_quantity(product_id, i64::from(current) + 1)
    }

    /// The "-" control: dropping below one unit removes the line.
    pub fn decrement(&mut self, product_id: ProductId) -> Option<&CartLine> {
        let current = self.store.line(product_id)?.quantity;
        self.set_quantity(product_id, i64::from(current) - 1)
    }

    pub fn clear(&mut self) {
        let items = self.store.total_items();
        self.store.clear_cart();
        info!("Cleared cart ({} items dropped)", items);
    }

    pub fn summary(&self) -> CartSummary {
        self.store.summary()
    }

    pub fn view(&self) -> CartView<'_> {
        CartView {
            session: self.store.session(),
            products: self.catalog.all(),
            lines: self.store.lines(),
            summary: self.store.summary(),
            revision: self.store.revision(),
        }
    }
}
