//! Domain entities and HTTP DTOs
//!
//! `Category` and `Product` mirror the `categories` and `products` tables;
//! the request/response types are what the HTTP API serializes.

pub mod category;
pub mod price;
pub mod product;
pub mod requests;
pub mod responses;

pub use category::{Category, CategoryChanges, CategoryId, NewCategory};
pub use price::Price;
pub use product::{NewProduct, Product, ProductChanges, ProductId};
pub use requests::{
    CreateCategoryRequest, CreateProductRequest, UpdateCategoryRequest, UpdateProductRequest,
};
pub use responses::{
    CategoryNameResponse, DeleteResponse, ErrorResponse, HealthResponse, ProductResponse,
    StatsResponse,
};
