//! Smoke tests against a real platform deployment.
//!
//! These tests require:
//! - `LUXE_PLATFORM_URL` and `LUXE_PLATFORM_ANON_KEY` in the environment
//! - A reachable deployment with the `products` and `categories` tables
//!
//! Run with: cargo test -p luxe-integration-tests -- --ignored

use luxe_platform::{PlatformClient, PlatformConfig};
use luxe_storefront::{Catalog, ProductFilter};

fn live_client() -> PlatformClient {
    let config = PlatformConfig::from_env().expect("platform environment not configured");
    PlatformClient::new(&config)
}

#[tokio::test]
#[ignore = "Requires a reachable platform deployment and credentials"]
async fn catalog_lists_products() {
    let catalog = Catalog::new(live_client());
    let products = catalog
        .list(&ProductFilter::default())
        .await
        .expect("product list failed");

    for product in products.iter() {
        assert!(!product.name.is_empty());
        assert!(product.price >= rust_decimal::Decimal::ZERO);
    }
}

#[tokio::test]
#[ignore = "Requires a reachable platform deployment and credentials"]
async fn catalog_lists_categories() {
    let catalog = Catalog::new(live_client());
    let categories = catalog.categories().await.expect("category list failed");

    for category in &categories {
        assert!(!category.name.is_empty());
    }
}

#[tokio::test]
#[ignore = "Requires a reachable platform deployment and credentials"]
async fn sign_in_rejects_unknown_account() {
    let client = live_client();
    let result = client
        .sign_in_with_password("nobody@invalid.example", "not-a-password")
        .await;
    assert!(result.is_err());
}
