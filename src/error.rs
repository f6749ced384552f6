//! Error types for the catalog
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Catalog Error Enum ==
/// Unified error type for the catalog, its store and its cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Row not found in the store
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Foreign key does not reference an existing row
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// Relational store failure (write rejected, table missing, ...)
    #[error("Store error: {0}")]
    Store(String),

    /// Cache backend failure; never used for a plain miss
    #[error("Cache error: {0}")]
    Cache(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    /// Shorthand for a missing category row.
    pub fn category_not_found(id: impl std::fmt::Display) -> Self {
        CatalogError::NotFound(format!("category {}", id))
    }

    /// Shorthand for a missing product row.
    pub fn product_not_found(id: impl std::fmt::Display) -> Self {
        CatalogError::NotFound(format!("product {}", id))
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = match &self {
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CatalogError::InvalidReference(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CatalogError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CatalogError::Cache(_) => StatusCode::SERVICE_UNAVAILABLE,
            CatalogError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the catalog.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        let response = CatalogError::category_not_found(7).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_reference_status() {
        let response = CatalogError::InvalidReference("category 9".into()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            CatalogError::product_not_found(3).to_string(),
            "Not found: product 3"
        );
    }
}
