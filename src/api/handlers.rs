//! API Handlers
//!
//! HTTP request handlers for the catalog endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::cache::MemoryCache;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::{CatalogError, Result};
use crate::models::{
    Category, CategoryId, CategoryNameResponse, CreateCategoryRequest, CreateProductRequest,
    DeleteResponse, HealthResponse, Product, ProductId, ProductResponse, StatsResponse,
    UpdateCategoryRequest, UpdateProductRequest,
};
use crate::store::MemoryStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
    /// The catalog's cache, kept concrete for stats and cleanup
    pub cache: Arc<MemoryCache>,
}

impl AppState {
    pub fn new(catalog: Catalog, cache: Arc<MemoryCache>) -> Self {
        Self { catalog, cache }
    }

    /// Builds a migrated in-memory store and cache from configuration.
    pub async fn from_config(config: &Config) -> Self {
        let store = Arc::new(MemoryStore::migrated().await);
        let cache = Arc::new(MemoryCache::new(config.max_cache_entries));
        let catalog =
            Catalog::new(store, cache.clone()).with_name_ttl(config.category_name_ttl());
        Self::new(catalog, cache)
    }
}

fn check(validation: Option<String>) -> Result<()> {
    match validation {
        Some(msg) => Err(CatalogError::InvalidRequest(msg)),
        None => Ok(()),
    }
}

/// Handler for POST /categories
pub async fn create_category_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>)> {
    check(req.validate())?;
    let category = state.catalog.create_category(req.into_new()).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Handler for GET /categories/:id
pub async fn get_category_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Category>> {
    Ok(Json(state.catalog.find_category(CategoryId(id)).await?))
}

/// Handler for PATCH /categories/:id
///
/// Renaming drops the cached name so product reads pick up the new one.
pub async fn update_category_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<UpdateCategoryRequest>,
) -> Result<Json<Category>> {
    check(req.validate())?;
    let category = state
        .catalog
        .update_category(CategoryId(id), req.into_changes())
        .await?;
    Ok(Json(category))
}

/// Handler for DELETE /categories/:id
pub async fn delete_category_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<DeleteResponse>> {
    let id = CategoryId(id);
    state.catalog.delete_category(id).await?;
    Ok(Json(DeleteResponse::new(format!("Category {}", id))))
}

/// Handler for GET /categories/:id/products
pub async fn category_products_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Vec<Product>>> {
    Ok(Json(state.catalog.products_in_category(CategoryId(id)).await?))
}

/// Handler for POST /products
pub async fn create_product_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>)> {
    check(req.validate())?;
    let product = state.catalog.create_product(req.into_new()).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Handler for GET /products/:id
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ProductResponse>> {
    let response = state
        .catalog
        .product_with_category_name(ProductId(id))
        .await?;
    Ok(Json(response))
}

/// Handler for PATCH /products/:id
pub async fn update_product_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<Json<Product>> {
    check(req.validate())?;
    let product = state
        .catalog
        .update_product(ProductId(id), req.into_changes())
        .await?;
    Ok(Json(product))
}

/// Handler for DELETE /products/:id
pub async fn delete_product_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<DeleteResponse>> {
    let id = ProductId(id);
    state.catalog.delete_product(id).await?;
    Ok(Json(DeleteResponse::new(format!("Product {}", id))))
}

/// Handler for GET /products/:id/category_name
pub async fn category_name_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<CategoryNameResponse>> {
    let product = state.catalog.find_product(ProductId(id)).await?;
    let category_name = state.catalog.category_name(&product).await?;
    let category_id = product.category_id.ok_or_else(|| {
        CatalogError::Internal(format!("product {} lost its category", product.id))
    })?;
    Ok(Json(CategoryNameResponse {
        category_id,
        category_name,
    }))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache.stats().await.into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
