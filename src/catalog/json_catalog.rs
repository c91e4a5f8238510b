use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::catalog::repository::{CatalogError, CatalogRepository, InMemoryCatalogRepository};
use crate::models::product::Product;

/// Catalog loaded once from a JSON array of products.
#[derive(Debug, Clone)]
pub struct JsonCatalogRepository {
    path: PathBuf,
    inner: InMemoryCatalogRepository,
}

impl JsonCatalogRepository {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref().to_path_buf();
        debug!("Reading catalog from {}", path.display());

        let raw = std::fs::read_to_string(&path).map_err(|source| CatalogError::Io {
            path: path.clone(),
            source,
        })?;

        let inner = Self::parse(&raw)?;
        info!("Loaded {} products from {}", inner.len(), path.display());
        Ok(Self { path, inner })
    }

    pub fn parse(raw: &str) -> Result<InMemoryCatalogRepository, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(raw)?;
        InMemoryCatalogRepository::with_products(products)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogRepository for JsonCatalogRepository {
    fn all(&self) -> &[Product] {
        self.inner.all()
    }
}
