//! In-process catalog server shared by the integration tests.
//!
//! Serves the same routes as the storefront's JSON API:
//! `GET /products/{id}` and `GET /stock/{id}`.

#![allow(dead_code, clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;

/// Product id whose details endpoint returns a body that is not JSON.
pub const GARBLED_PRODUCT: i32 = 13;
/// Product id whose stock endpoint fails with a server error.
pub const BROKEN_STOCK: i32 = 500;

#[derive(Clone, Default)]
pub struct CatalogServer {
    stock: Arc<Mutex<HashMap<i32, i64>>>,
    product_hits: Arc<AtomicUsize>,
    stock_hits: Arc<AtomicUsize>,
    last_authorization: Arc<Mutex<Option<String>>>,
}

impl CatalogServer {
    pub fn set_stock(&self, id: i32, amount: i64) {
        self.stock.lock().unwrap().insert(id, amount);
    }

    pub fn product_hits(&self) -> usize {
        self.product_hits.load(Ordering::SeqCst)
    }

    pub fn stock_hits(&self) -> usize {
        self.stock_hits.load(Ordering::SeqCst)
    }

    pub fn last_authorization(&self) -> Option<String> {
        self.last_authorization.lock().unwrap().clone()
    }
}

/// Start a catalog with products 1, 2 and 3 in stock (3, 5 and 0 units).
pub async fn spawn_catalog_server() -> (String, CatalogServer) {
    let server = CatalogServer::default();
    server.set_stock(1, 3);
    server.set_stock(2, 5);
    server.set_stock(3, 0);
    server.set_stock(GARBLED_PRODUCT, 1);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new()
        .route("/products/{id}", get(product))
        .route("/stock/{id}", get(stock))
        .with_state(server.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (format!("http://{addr}"), server)
}

async fn product(
    State(server): State<CatalogServer>,
    Path(id): Path<i32>,
    headers: HeaderMap,
) -> Response {
    server.product_hits.fetch_add(1, Ordering::SeqCst);
    *server.last_authorization.lock().unwrap() = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    if id == GARBLED_PRODUCT {
        return (StatusCode::OK, "<html>maintenance</html>").into_response();
    }
    if !server.stock.lock().unwrap().contains_key(&id) {
        return (StatusCode::NOT_FOUND, Json(json!({}))).into_response();
    }

    Json(json!({
        "id": id,
        "title": format!("Tênis {id}"),
        "price": 139.9,
        "image": format!("https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis{id}.jpg")
    }))
    .into_response()
}

async fn stock(State(server): State<CatalogServer>, Path(id): Path<i32>) -> Response {
    server.stock_hits.fetch_add(1, Ordering::SeqCst);

    if id == BROKEN_STOCK {
        return (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable").into_response();
    }

    let amount = server.stock.lock().unwrap().get(&id).copied();
    amount.map_or_else(
        || (StatusCode::NOT_FOUND, Json(json!({}))).into_response(),
        |amount| Json(json!({ "id": id, "amount": amount })).into_response(),
    )
}
