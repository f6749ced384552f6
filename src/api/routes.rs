//! API Routes
//!
//! Configures the Axum router with all catalog endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    category_name_handler, category_products_handler, create_category_handler,
    create_product_handler, delete_category_handler, delete_product_handler,
    get_category_handler, get_product_handler, health_handler, stats_handler,
    update_category_handler, update_product_handler, AppState,
};

/// Creates the main router.
///
/// # Endpoints
/// - `POST /categories`, `GET|PATCH|DELETE /categories/:id`
/// - `GET /categories/:id/products`
/// - `POST /products`, `GET|PATCH|DELETE /products/:id`
/// - `GET /products/:id/category_name`
/// - `GET /stats`, `GET /health`
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/categories", post(create_category_handler))
        .route(
            "/categories/:id",
            get(get_category_handler)
                .patch(update_category_handler)
                .delete(delete_category_handler),
        )
        .route("/categories/:id/products", get(category_products_handler))
        .route("/products", post(create_product_handler))
        .route(
            "/products/:id",
            get(get_product_handler)
                .patch(update_product_handler)
                .delete(delete_product_handler),
        )
        .route("/products/:id/category_name", get(category_name_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
