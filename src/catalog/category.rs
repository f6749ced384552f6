//! Category operations

use tracing::{debug, info};

use super::Catalog;
use crate::cache::CacheKey;
use crate::error::{CatalogError, Result};
use crate::models::{Category, CategoryChanges, CategoryId, NewCategory, Product};
use crate::store::Updated;

impl Catalog {
    pub async fn create_category(&self, new: NewCategory) -> Result<Category> {
        let category = self.store.insert_category(new).await?;
        info!(id = %category.id, name = %category.name, "category created");
        Ok(category)
    }

    pub async fn find_category(&self, id: CategoryId) -> Result<Category> {
        self.store
            .find_category(id)
            .await?
            .ok_or_else(|| CatalogError::category_not_found(id))
    }

    /// Applies `changes` to the category and, when the write replaced a row
    /// with a different name, drops its cached name.
    ///
    /// The comparison uses the row the store actually overwrote, so a rename
    /// racing with this one cannot hide the change. A failed store write
    /// leaves the cache untouched. A failed cache delete is logged and does
    /// not fail the update.
    pub async fn update_category(&self, id: CategoryId, changes: CategoryChanges) -> Result<Category> {
        let Updated { before, after } = self.store.update_category(id, changes).await?;

        if before.name != after.name {
            let key = CacheKey::category_name(id);
            self.invalidate(&key).await;
            debug!(key = %key, "category name changed, cache entry invalidated");
        }
        Ok(after)
    }

    /// Deletes the category row and its cached name. Products keep their
    /// `category_id`, so their name lookups report NotFound from now on.
    pub async fn delete_category(&self, id: CategoryId) -> Result<()> {
        self.store.delete_category(id).await?;
        self.invalidate(&CacheKey::category_name(id)).await;
        info!(id = %id, "category deleted");
        Ok(())
    }

    pub async fn products_in_category(&self, id: CategoryId) -> Result<Vec<Product>> {
        self.find_category(id).await?;
        self.store.products_in_category(id).await
    }
}
