use std::io::Write;
use std::sync::Arc;

use rust_decimal::Decimal;
use tempfile::NamedTempFile;

use shopping_cart::catalog::{CatalogError, CatalogRepository, JsonCatalogRepository};
use shopping_cart::services::{CartService, CartServiceError};
use shopping_cart::store::CartStore;

fn write_catalog(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write catalog");
    file
}

const CATALOG: &str = r#"[
    {"id": 10, "name": "USB-C Hub", "price": 39.50, "description": "Seven ports", "image": "🔌"},
    {"id": 11, "name": "Webcam", "price": "74.99", "description": "1080p camera", "image": "📷"}
]"#;

#[test]
fn test_load_json_catalog() {
    let file = write_catalog(CATALOG);
    let catalog = JsonCatalogRepository::load(file.path()).unwrap();

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.path(), file.path());
    assert_eq!(catalog.all()[0].name, "USB-C Hub");
    assert_eq!(catalog.find_by_id(11).unwrap().price, Decimal::new(7499, 2));
}

#[test]
fn test_json_prices_keep_cents() {
    let file = write_catalog(CATALOG);
    let catalog = Arc::new(JsonCatalogRepository::load(file.path()).unwrap());
    assert_eq!(catalog.find_by_id(10).unwrap().price.to_string(), "39.50");

    let mut service = CartService::new(catalog, CartStore::new());
    service.add_product(10).unwrap();
    let json = serde_json::to_value(service.store().lines()).unwrap();
    assert_eq!(json[0]["price"], "39.50");
    assert_eq!(json[0]["quantity"], 1);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = JsonCatalogRepository::load(dir.path().join("missing.json"));
    assert!(matches!(result, Err(CatalogError::Io { .. })));
}

#[test]
fn test_malformed_json() {
    let file = write_catalog("[{\"id\": 1,");
    let result = JsonCatalogRepository::load(file.path());
    assert!(matches!(result, Err(CatalogError::Parse(_))));
}

#[test]
fn test_duplicate_ids_in_file() {
    let file = write_catalog(
        r#"[
        {"id": 1, "name": "A", "price": 1, "description": "first"},
        {"id": 1, "name": "B", "price": 2, "description": "second"}
    ]"#,
    );
    let result = JsonCatalogRepository::load(file.path());
    assert!(matches!(result, Err(CatalogError::DuplicateId(1))));
}

#[test]
fn test_negative_price_in_file() {
    let file = write_catalog(r#"[{"id": 5, "name": "Refund", "price": -5, "description": "nope"}]"#);
    let result = JsonCatalogRepository::load(file.path());
    assert!(matches!(result, Err(CatalogError::Validation { id: 5, .. })));
}

#[test]
fn test_service_over_json_catalog() {
    let file = write_catalog(CATALOG);
    let catalog = Arc::new(JsonCatalogRepository::load(file.path()).unwrap());
    let mut service = CartService::new(catalog, CartStore::new());

    service.add_product(10).unwrap();
    service.add_product(11).unwrap();
    service.add_product(10).unwrap();
    assert!(matches!(
        service.add_product(1),
        Err(CartServiceError::ProductNotFound { id: 1 })
    ));

    let summary = service.summary();
    assert_eq!(summary.total_items, 3);
    assert_eq!(summary.subtotal, Decimal::new(15399, 2));
    assert!(summary.is_free_shipping());
    assert_eq!(summary.grand_total.to_string(), "153.99");
}
