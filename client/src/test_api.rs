//! In-process fake of the product API for client tests.
//!
//! Served by axum on an ephemeral port. Counts every request it receives so
//! tests can assert that precondition failures never reach the network, and
//! can be told to answer every call with a canned status/body.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use serde_json::{Value, json};

use crate::net::config::ApiConfig;
use crate::net::types::Product;

pub(crate) const VALID_TOKEN: &str = "test-token";
pub(crate) const VALID_EMAIL: &str = "ana@example.com";
pub(crate) const VALID_PASSWORD: &str = "secret";

#[derive(Default)]
pub(crate) struct FakeApi {
    hits: AtomicUsize,
    products: Mutex<BTreeMap<i64, Product>>,
    next_id: Mutex<i64>,
    canned: Mutex<Option<(u16, String)>>,
    envelope: Mutex<bool>,
    last_query: Mutex<HashMap<String, String>>,
    last_auth: Mutex<Option<String>>,
}

impl FakeApi {
    pub(crate) fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Answer every subsequent call with `status` and raw `body`.
    pub(crate) fn respond_with(&self, status: u16, body: &str) {
        *self.canned.lock().unwrap() = Some((status, body.to_owned()));
    }

    /// Answer list calls with the paginated `{data, meta}` envelope.
    pub(crate) fn use_envelope(&self) {
        *self.envelope.lock().unwrap() = true;
    }

    pub(crate) fn last_query(&self) -> HashMap<String, String> {
        self.last_query.lock().unwrap().clone()
    }

    pub(crate) fn last_auth(&self) -> Option<String> {
        self.last_auth.lock().unwrap().clone()
    }

    pub(crate) fn seed(&self, count: usize) {
        for i in 0..count {
            self.insert(&json!({
                "name": format!("Product {i}"),
                "description": format!("Description {i}"),
                "price": 10.0 + f64::from(u32::try_from(i).unwrap()),
                "category": "General",
                "quantity": i,
            }));
        }
    }

    fn insert(&self, body: &Value) -> Product {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let product = Product {
            id: *next_id,
            name: body["name"].as_str().unwrap_or_default().to_owned(),
            description: body["description"].as_str().unwrap_or_default().to_owned(),
            price: body["price"].as_f64().unwrap_or_default(),
            category: body["category"].as_str().unwrap_or_default().to_owned(),
            quantity: u32::try_from(body["quantity"].as_u64().unwrap_or_default()).unwrap(),
            user_id: Some("1".to_owned()),
            deleted_at: None,
        };
        self.products.lock().unwrap().insert(product.id, product.clone());
        product
    }

    /// Count the request, apply canned responses, and check the bearer token.
    fn admit(&self, headers: &HeaderMap) -> Result<(), Response> {
        self.hits.fetch_add(1, Ordering::SeqCst);
        let auth = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        *self.last_auth.lock().unwrap() = auth.clone();

        if let Some((status, body)) = self.canned.lock().unwrap().clone() {
            return Err((StatusCode::from_u16(status).unwrap(), body).into_response());
        }
        let expected = format!("Bearer {VALID_TOKEN}");
        if auth.as_deref() != Some(expected.as_str()) {
            return Err((StatusCode::UNAUTHORIZED, Json(json!({ "message": "Unauthenticated." }))).into_response());
        }
        Ok(())
    }
}

fn name_required() -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({
            "message": "The name field is required.",
            "errors": { "name": ["The name field is required."] }
        })),
    )
        .into_response()
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Product not found" }))).into_response()
}

async fn login(State(api): State<Arc<FakeApi>>, Json(body): Json<Value>) -> Response {
    api.hits.fetch_add(1, Ordering::SeqCst);
    if let Some((status, body)) = api.canned.lock().unwrap().clone() {
        return (StatusCode::from_u16(status).unwrap(), body).into_response();
    }
    if body["email"] == VALID_EMAIL && body["password"] == VALID_PASSWORD {
        return Json(json!({
            "token": VALID_TOKEN,
            "user": { "id": 1, "name": "Ana", "email": VALID_EMAIL }
        }))
        .into_response();
    }
    (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Invalid credentials" }))).into_response()
}

async fn list_products(
    State(api): State<Arc<FakeApi>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    *api.last_query.lock().unwrap() = query.clone();
    if let Err(rejection) = api.admit(&headers) {
        return rejection;
    }
    let page: usize = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1).max(1);
    let limit: usize = query.get("limit").and_then(|l| l.parse().ok()).unwrap_or(10);
    let all: Vec<Product> = api.products.lock().unwrap().values().cloned().collect();
    let rows: Vec<Product> = all.iter().skip((page - 1) * limit).take(limit).cloned().collect();

    if *api.envelope.lock().unwrap() {
        let last_page = all.len().div_ceil(limit).max(1);
        return Json(json!({
            "data": rows,
            "meta": {
                "current_page": page,
                "per_page": limit,
                "total": all.len(),
                "last_page": last_page,
                "from": if rows.is_empty() { Value::Null } else { json!((page - 1) * limit + 1) },
                "to": if rows.is_empty() { Value::Null } else { json!((page - 1) * limit + rows.len()) },
            }
        }))
        .into_response();
    }
    Json(rows).into_response()
}

async fn create_product(State(api): State<Arc<FakeApi>>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Err(rejection) = api.admit(&headers) {
        return rejection;
    }
    if body["name"].as_str().is_none_or(str::is_empty) {
        return name_required();
    }
    (StatusCode::CREATED, Json(api.insert(&body))).into_response()
}

async fn get_product(State(api): State<Arc<FakeApi>>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if let Err(rejection) = api.admit(&headers) {
        return rejection;
    }
    match api.products.lock().unwrap().get(&id) {
        Some(product) => Json(product.clone()).into_response(),
        None => not_found(),
    }
}

async fn update_product(
    State(api): State<Arc<FakeApi>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(rejection) = api.admit(&headers) {
        return rejection;
    }
    if body.get("name").is_some_and(|n| n.as_str().is_none_or(str::is_empty)) {
        return name_required();
    }
    let mut products = api.products.lock().unwrap();
    let Some(product) = products.get_mut(&id) else {
        return not_found();
    };
    if let Some(name) = body["name"].as_str() {
        name.clone_into(&mut product.name);
    }
    if let Some(description) = body["description"].as_str() {
        description.clone_into(&mut product.description);
    }
    if let Some(category) = body["category"].as_str() {
        category.clone_into(&mut product.category);
    }
    if let Some(price) = body["price"].as_f64() {
        product.price = price;
    }
    if let Some(quantity) = body["quantity"].as_u64() {
        product.quantity = u32::try_from(quantity).unwrap();
    }
    Json(product.clone()).into_response()
}

async fn delete_product(State(api): State<Arc<FakeApi>>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if let Err(rejection) = api.admit(&headers) {
        return rejection;
    }
    match api.products.lock().unwrap().remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(),
    }
}

/// Start the fake API and return it with a config pointing at it.
pub(crate) async fn spawn() -> (Arc<FakeApi>, ApiConfig) {
    let api = Arc::new(FakeApi::default());
    let app = Router::new()
        .route("/api/login", post(login))
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(api.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (api, ApiConfig::new(&format!("http://{addr}/api")))
}

/// Config pointing at a port nothing listens on.
pub(crate) fn unreachable_config() -> ApiConfig {
    ApiConfig::new("http://127.0.0.1:9/api")
}
