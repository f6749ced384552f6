//! Relational store
//!
//! `CatalogStore` is the persistence seam for categories and products;
//! `MemoryStore` implements it in-process on top of the schema migrations.

mod memory;
pub mod schema;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    Category, CategoryChanges, CategoryId, NewCategory, NewProduct, Product, ProductChanges,
    ProductId,
};

pub use memory::MemoryStore;

/// A row as it was immediately before a write and as the write left it.
///
/// Both images come from the same atomic write, so comparing them tells
/// exactly what that write changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Updated<T> {
    pub before: T,
    pub after: T,
}

/// Durable storage for the `categories` and `products` tables.
///
/// Every write either applies completely or not at all. `update_*` and
/// `delete_*` on a missing row fail with `NotFound`; writes whose
/// `category_id` does not reference a category fail with `InvalidReference`.
#[async_trait]
pub trait CatalogStore: Send + Sync + std::fmt::Debug {
    async fn insert_category(&self, new: NewCategory) -> Result<Category>;

    async fn find_category(&self, id: CategoryId) -> Result<Option<Category>>;

    /// Applies `changes` and returns the row before and after the write.
    async fn update_category(
        &self,
        id: CategoryId,
        changes: CategoryChanges,
    ) -> Result<Updated<Category>>;

    /// Deletes the row only; products keep their (now dangling) `category_id`.
    async fn delete_category(&self, id: CategoryId) -> Result<()>;

    async fn insert_product(&self, new: NewProduct) -> Result<Product>;

    async fn find_product(&self, id: ProductId) -> Result<Option<Product>>;

    async fn update_product(&self, id: ProductId, changes: ProductChanges) -> Result<Product>;

    async fn delete_product(&self, id: ProductId) -> Result<()>;

    /// Products whose `category_id` is `id`, ordered by product id.
    async fn products_in_category(&self, id: CategoryId) -> Result<Vec<Product>>;
}
