//! Product HTTP Routes
//!
//! CRUD over `/products`, delegating to the record store after validation.
//!
//! - `GET    /products`       list (`?category=` exact, `?q=` name substring)
//! - `GET    /products/:id`   fetch one
//! - `POST   /products`       create
//! - `PATCH  /products/:id`   partial update
//! - `DELETE /products/:id`   delete

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;

use super::errors::{ApiError, ApiResult};
use super::response::{DataResponse, MessageResponse};
use crate::product::{validate_new, validate_patch, Product, ProductId, ValidationErrors};
use crate::store::{DbResult, JsonFileStore};

// ==================
// Shared State
// ==================

/// State shared across product handlers
pub struct ProductsState {
    pub store: Arc<JsonFileStore>,
}

impl ProductsState {
    pub fn new(store: Arc<JsonFileStore>) -> Self {
        Self { store }
    }

    fn rejected(&self, errors: ValidationErrors) -> ApiError {
        self.store.metrics().increment_validation_rejections();
        ApiError::Validation(errors)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive exact category match
    pub category: Option<String>,
    /// Case-insensitive name substring
    pub q: Option<String>,
}

// ==================
// Product Routes
// ==================

pub fn product_routes(state: Arc<ProductsState>) -> Router {
    Router::new()
        .route(
            "/products",
            get(list_products_handler).post(create_product_handler),
        )
        .route(
            "/products/:id",
            get(get_product_handler)
                .patch(update_product_handler)
                .delete(delete_product_handler),
        )
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

fn parse_id(raw: &str) -> ApiResult<ProductId> {
    match raw.parse::<ProductId>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::InvalidId(raw.to_string())),
    }
}

fn json_body(body: Result<Json<Value>, JsonRejection>) -> ApiResult<Value> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))
}

fn unwrap_envelope<T>(result: DbResult<T>) -> ApiResult<(T, String)> {
    result
        .into_result()
        .map_err(|(error, message)| ApiError::from_store(error, message))
}

// ==================
// Handlers
// ==================

async fn list_products_handler(
    State(state): State<Arc<ProductsState>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<DataResponse<Vec<Product>>>> {
    let result = match (query.category.as_deref(), query.q.as_deref()) {
        (Some(category), _) => state.store.find_by_category(category).await,
        (None, Some(q)) => state.store.find_by_name_contains(q).await,
        (None, None) => state.store.read_all().await,
    };

    let (products, message) = unwrap_envelope(result)?;
    Ok(Json(DataResponse::new(products, message)))
}

async fn get_product_handler(
    State(state): State<Arc<ProductsState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<DataResponse<Product>>> {
    let id = parse_id(&id)?;

    let (product, message) = unwrap_envelope(state.store.get_by_id(id).await)?;
    Ok(Json(DataResponse::new(product, message)))
}

async fn create_product_handler(
    State(state): State<Arc<ProductsState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<DataResponse<Product>>)> {
    let body = json_body(body)?;
    let new = validate_new(&body).map_err(|e| state.rejected(e))?;

    let (product, message) = unwrap_envelope(state.store.create(new).await)?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(product, message))))
}

async fn update_product_handler(
    State(state): State<Arc<ProductsState>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<DataResponse<Product>>> {
    let id = parse_id(&id)?;
    let body = json_body(body)?;
    let patch = validate_patch(&body).map_err(|e| state.rejected(e))?;

    let (product, message) = unwrap_envelope(state.store.update(id, patch).await)?;
    Ok(Json(DataResponse::new(product, message)))
}

async fn delete_product_handler(
    State(state): State<Arc<ProductsState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;

    let ((), message) = unwrap_envelope(state.store.delete(id).await)?;
    Ok(Json(MessageResponse::new(message)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(matches!(parse_id("0"), Err(ApiError::InvalidId(_))));
        assert!(matches!(parse_id("-3"), Err(ApiError::InvalidId(_))));
        assert!(matches!(parse_id("abc"), Err(ApiError::InvalidId(_))));
        assert!(matches!(parse_id("1.5"), Err(ApiError::InvalidId(_))));
    }
}
