//! Cart store wired to the HTTP catalog and file storage.

#![allow(clippy::unwrap_used)]

mod common;

use common::spawn_catalog_server;
use rocketshoes_cart::{
    CartError, CartStorage, CartStore, CatalogConfig, DEFAULT_STORAGE_KEY, ErrorKind, FileStorage,
    HttpCatalog, UpdateProductAmount,
};
use rocketshoes_core::{Cart, ProductId};

fn http_catalog(url: &str) -> HttpCatalog {
    HttpCatalog::new(&CatalogConfig::with_base_url(url).unwrap()).unwrap()
}

fn amounts(cart: &Cart) -> Vec<(i32, u32)> {
    cart.iter().map(|l| (l.id.as_i32(), l.amount)).collect()
}

#[tokio::test]
async fn test_cart_survives_restart() {
    let (url, _server) = spawn_catalog_server().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    {
        let mut store = CartStore::load(
            http_catalog(&url),
            FileStorage::new(&path),
            DEFAULT_STORAGE_KEY,
        )
        .unwrap();
        store.add_product(ProductId::new(1)).await.unwrap();
        store.add_product(ProductId::new(2)).await.unwrap();
        store
            .update_product_amount(UpdateProductAmount {
                product_id: ProductId::new(2),
                amount: 4,
            })
            .await
            .unwrap();
    }

    let store = CartStore::load(
        http_catalog(&url),
        FileStorage::new(&path),
        DEFAULT_STORAGE_KEY,
    )
    .unwrap();
    assert_eq!(amounts(store.cart()), vec![(1, 1), (2, 4)]);
    assert_eq!(store.cart().total().display(), "R$ 699,50");
}

#[tokio::test]
async fn test_persisted_snapshot_matches_cart() {
    let (url, _server) = spawn_catalog_server().await;
    let dir = tempfile::tempdir().unwrap();
    let mut store = CartStore::load(
        http_catalog(&url),
        FileStorage::new(dir.path().join("storage.json")),
        DEFAULT_STORAGE_KEY,
    )
    .unwrap();

    store.add_product(ProductId::new(1)).await.unwrap();
    store.add_product(ProductId::new(1)).await.unwrap();

    let raw = store.storage().get_item(DEFAULT_STORAGE_KEY).unwrap().unwrap();
    let persisted: Cart = serde_json::from_str(&raw).unwrap();
    assert_eq!(&persisted, store.cart());

    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{
            "id": 1,
            "title": "Tênis 1",
            "price": 139.9,
            "image": "https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis1.jpg",
            "amount": 2
        }])
    );
}

#[tokio::test]
async fn test_stock_limits_against_live_catalog() {
    let (url, server) = spawn_catalog_server().await;
    let dir = tempfile::tempdir().unwrap();
    let mut store = CartStore::load(
        http_catalog(&url),
        FileStorage::new(dir.path().join("storage.json")),
        DEFAULT_STORAGE_KEY,
    )
    .unwrap();

    // Product 3 has no stock at all.
    let err = store.add_product(ProductId::new(3)).await.unwrap_err();
    assert!(matches!(err, CartError::SoldOut(_)));

    // Product 1 has three units.
    for _ in 0..3 {
        store.add_product(ProductId::new(1)).await.unwrap();
    }
    let err = store.add_product(ProductId::new(1)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfStock);

    // Restocking is seen immediately.
    server.set_stock(1, 4);
    store.add_product(ProductId::new(1)).await.unwrap();
    assert_eq!(amounts(store.cart()), vec![(1, 4)]);

    // Product details came from the cache after the first add.
    assert_eq!(server.product_hits(), 2);
}

#[tokio::test]
async fn test_subscriber_follows_operations() {
    let (url, _server) = spawn_catalog_server().await;
    let dir = tempfile::tempdir().unwrap();
    let mut store = CartStore::load(
        http_catalog(&url),
        FileStorage::new(dir.path().join("storage.json")),
        DEFAULT_STORAGE_KEY,
    )
    .unwrap();
    let mut updates = store.subscribe();

    let watcher = tokio::spawn(async move {
        let mut seen = Vec::new();
        while updates.changed().await.is_ok() {
            seen.push(updates.borrow_and_update().len());
        }
        seen
    });

    store.add_product(ProductId::new(1)).await.unwrap();
    tokio::task::yield_now().await;
    store.add_product(ProductId::new(2)).await.unwrap();
    tokio::task::yield_now().await;
    store.remove_product(ProductId::new(1)).unwrap();
    drop(store);

    let seen = watcher.await.unwrap();
    assert_eq!(seen.last(), Some(&1));
    assert!(!seen.is_empty());
}

#[tokio::test]
async fn test_corrupt_storage_file_is_replaced_on_first_change() {
    let (url, _server) = spawn_catalog_server().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "{broken").unwrap();

    let mut store = CartStore::load(
        http_catalog(&url),
        FileStorage::new(&path),
        DEFAULT_STORAGE_KEY,
    )
    .unwrap();
    assert!(store.cart().is_empty());

    store.add_product(ProductId::new(1)).await.unwrap();
    store.add_product(ProductId::new(1)).await.unwrap();

    let reloaded = CartStore::load(
        http_catalog(&url),
        FileStorage::new(&path),
        DEFAULT_STORAGE_KEY,
    )
    .unwrap();
    assert_eq!(amounts(reloaded.cart()), vec![(1, 2)]);
}
