use std::collections::HashSet;
use std::path::PathBuf;

use rust_decimal::Decimal;
use thiserror::Error;
use validator::Validate;

use crate::models::product::{Product, ProductId};
use crate::services::pricing::round_currency;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid product {id}: {source}")]
    Validation {
        id: ProductId,
        #[source]
        source: validator::ValidationErrors,
    },
    #[error("Duplicate product id: {0}")]
    DuplicateId(ProductId),
    #[error("Catalog contains no products")]
    Empty,
}

/// Read-only source of products. Order is the display order.
pub trait CatalogRepository {
    fn all(&self) -> &[Product];

    fn find_by_id(&self, id: ProductId) -> Option<&Product> {
        self.all().iter().find(|product| product.id == id)
    }

    fn len(&self) -> usize {
        self.all().len()
    }

    fn is_empty(&self) -> bool {
        self.all().is_empty()
    }
}

lazy_static::lazy_static! {
    static ref DEFAULT_PRODUCTS: Vec<Product> = vec![
        Product::new(
            1,
            "Wireless Headphones",
            Decimal::new(9999, 2),
            "Premium noise-cancelling headphones",
            "🎧",
        ),
        Product::new(
            2,
            "Smart Watch",
            Decimal::new(24999, 2),
            "Fitness tracking and notifications",
            "⌚",
        ),
        Product::new(
            3,
            "Laptop Stand",
            Decimal::new(4999, 2),
            "Ergonomic adjustable stand",
            "💻",
        ),
        Product::new(
            4,
            "Mechanical Keyboard",
            Decimal::new(12999, 2),
            "RGB backlit mechanical switches",
            "⌨️",
        ),
    ];
}

/// Fixed product list held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryCatalogRepository {
    products: Vec<Product>,
}

impl InMemoryCatalogRepository {
    /// Validates the list and stores every price at cent precision.
    pub fn with_products(mut products: Vec<Product>) -> Result<Self, CatalogError> {
        if products.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            product.validate().map_err(|source| CatalogError::Validation {
                id: product.id,
                source,
            })?;
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
        }

        for product in &mut products {
            product.price = round_currency(product.price);
        }

        Ok(Self { products })
    }

    /// The four demo products the storefront ships with.
    pub fn default_catalog() -> Self {
        Self {
            products: DEFAULT_PRODUCTS.clone(),
        }
    }
}

impl Default for InMemoryCatalogRepository {
    fn default() -> Self {
        Self::default_catalog()
    }
}

impl CatalogRepository for InMemoryCatalogRepository {
    fn all(&self) -> &[Product] {
        &self.products
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_contents() {
        let catalog = InMemoryCatalogRepository::default_catalog();
        assert_eq!(catalog.len(), 4);
        let ids: Vec<ProductId> = catalog.all().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(catalog.find_by_id(2).unwrap().price, Decimal::new(24999, 2));
        assert!(catalog.find_by_id(5).is_none());
    }

    #[test]
    fn test_default_catalog_is_valid() {
        let products = InMemoryCatalogRepository::default_catalog().all().to_vec();
        assert!(InMemoryCatalogRepository::with_products(products).is_ok());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let product = Product::new(1, "Mug", Decimal::new(800, 2), "Coffee mug", "☕");
        let result = InMemoryCatalogRepository::with_products(vec![product.clone(), product]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(1))));
    }

    #[test]
    fn test_prices_stored_in_cents() {
        let product = Product::new(10, "USB-C Hub", Decimal::new(395, 1), "Seven ports", "🔌");
        let catalog = InMemoryCatalogRepository::with_products(vec![product]).unwrap();
        assert_eq!(catalog.all()[0].price.to_string(), "39.50");
    }

    #[test]
    fn test_single_threaded_catalogs_implement_trait() {
        use std::rc::Rc;

        struct SharedCatalog {
            products: Rc<Vec<Product>>,
        }

        impl CatalogRepository for SharedCatalog {
            fn all(&self) -> &[Product] {
                &self.products
            }
        }

        let catalog = SharedCatalog {
            products: Rc::new(InMemoryCatalogRepository::default_catalog().all().to_vec()),
        };
        let repository: &dyn CatalogRepository = &catalog;
        assert_eq!(repository.len(), 4);
        assert_eq!(repository.find_by_id(3).unwrap().name, "Laptop Stand");
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let result = InMemoryCatalogRepository::with_products(Vec::new());
        assert!(matches!(result, Err(CatalogError::Empty)));
    }

    #[test]
    fn test_invalid_product_rejected() {
        let product = Product::new(9, "Broken", Decimal::new(-100, 2), "Negative price", "");
        let result = InMemoryCatalogRepository::with_products(vec![product]);
        assert!(matches!(result, Err(CatalogError::Validation { id: 9, .. })));
    }
}
