//! Product operations and the cached category name lookup

use tracing::{debug, info, warn};

use super::Catalog;
use crate::cache::CacheKey;
use crate::error::{CatalogError, Result};
use crate::models::{NewProduct, Product, ProductChanges, ProductId, ProductResponse};

impl Catalog {
    pub async fn create_product(&self, new: NewProduct) -> Result<Product> {
        let product = self.store.insert_product(new).await?;
        info!(id = %product.id, "product created");
        Ok(product)
    }

    pub async fn find_product(&self, id: ProductId) -> Result<Product> {
        self.store
            .find_product(id)
            .await?
            .ok_or_else(|| CatalogError::product_not_found(id))
    }

    pub async fn update_product(&self, id: ProductId, changes: ProductChanges) -> Result<Product> {
        self.store.update_product(id, changes).await
    }

    pub async fn delete_product(&self, id: ProductId) -> Result<()> {
        self.store.delete_product(id).await?;
        info!(id = %id, "product deleted");
        Ok(())
    }

    /// Name of the product's category, read through the cache.
    ///
    /// On a miss the category is loaded from the store and its name cached
    /// under `category:<id>:name` for the catalog's TTL. A product without a
    /// category, or whose category row is gone, yields `NotFound`; nothing is
    /// cached for it.
    pub async fn category_name(&self, product: &Product) -> Result<String> {
        let category_id = product.category_id.ok_or_else(|| {
            CatalogError::NotFound(format!("product {} has no category", product.id))
        })?;
        let key = CacheKey::category_name(category_id);

        match self.cache.get(&key).await {
            Ok(Some(name)) => {
                debug!(key = %key, "category name cache hit");
                return Ok(name);
            }
            Ok(None) => debug!(key = %key, "category name cache miss"),
            Err(err) => warn!(key = %key, error = %err, "cache read failed, using store"),
        }

        let category = self.find_category(category_id).await?;

        if let Err(err) = self
            .cache
            .set(&key, category.name.clone(), self.name_ttl)
            .await
        {
            warn!(key = %key, error = %err, "cache populate failed");
        }
        Ok(category.name)
    }

    /// Loads a product together with its category name.
    ///
    /// `category_name` is `None` when the product has no category or its
    /// category row has been deleted; only a missing product is `NotFound`.
    pub async fn product_with_category_name(&self, id: ProductId) -> Result<ProductResponse> {
        let product = self.find_product(id).await?;
        let category_name = match product.category_id {
            Some(_) => match self.category_name(&product).await {
                Ok(name) => Some(name),
                Err(CatalogError::NotFound(_)) => None,
                Err(err) => return Err(err),
            },
            None => None,
        };
        Ok(ProductResponse {
            product,
            category_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::setup;
    use super::*;
    use std::time::Duration;

    use crate::cache::KvCache;
    use crate::models::{CategoryChanges, NewCategory};
    use crate::store::CatalogStore;

    #[tokio::test]
    async fn test_miss_populates_cache() {
        let (catalog, _store, cache) = setup().await;
        let books = catalog.create_category(NewCategory::new("Books")).await.unwrap();
        let dune = catalog
            .create_product(NewProduct::new("Dune").in_category(books.id))
            .await
            .unwrap();

        assert_eq!(catalog.category_name(&dune).await.unwrap(), "Books");

        let key = CacheKey::category_name(books.id);
        assert_eq!(cache.inner.get(&key).await.unwrap().as_deref(), Some("Books"));
        let ttl = cache.inner.ttl_remaining(&key).await.unwrap();
        assert!(ttl > Duration::from_secs(295) && ttl <= Duration::from_secs(300));
    }

    #[tokio::test]
    async fn test_hit_does_not_touch_store() {
        let (catalog, store, _cache) = setup().await;
        let books = catalog.create_category(NewCategory::new("Books")).await.unwrap();
        let dune = catalog
            .create_product(NewProduct::new("Dune").in_category(books.id))
            .await
            .unwrap();
        catalog.category_name(&dune).await.unwrap();

        // Rename behind the catalog's back: the cached value keeps being served
        store
            .update_category(books.id, CategoryChanges::new().with_name("Novels"))
            .await
            .unwrap();

        assert_eq!(catalog.category_name(&dune).await.unwrap(), "Books");
    }

    #[tokio::test]
    async fn test_missing_category_is_not_cached() {
        let (catalog, store, cache) = setup().await;
        let books = catalog.create_category(NewCategory::new("Books")).await.unwrap();
        let dune = catalog
            .create_product(NewProduct::new("Dune").in_category(books.id))
            .await
            .unwrap();
        store.delete_category(books.id).await.unwrap();

        let result = catalog.category_name(&dune).await;

        assert!(matches!(result, Err(CatalogError::NotFound(_))));
        assert_eq!(cache.calls().1, 0, "nothing may be cached for a missing category");
        assert!(cache.inner.is_empty().await);
    }

    #[tokio::test]
    async fn test_product_without_category() {
        let (catalog, _store, cache) = setup().await;
        let loose = catalog.create_product(NewProduct::new("Loose")).await.unwrap();

        assert!(matches!(
            catalog.category_name(&loose).await,
            Err(CatalogError::NotFound(_))
        ));
        assert_eq!(cache.calls(), (0, 0, 0));

        let response = catalog.product_with_category_name(loose.id).await.unwrap();
        assert_eq!(response.category_name, None);
    }

    #[tokio::test]
    async fn test_product_with_deleted_category() {
        let (catalog, _store, cache) = setup().await;
        let books = catalog.create_category(NewCategory::new("Books")).await.unwrap();
        let dune = catalog
            .create_product(NewProduct::new("Dune").in_category(books.id))
            .await
            .unwrap();
        catalog.delete_category(books.id).await.unwrap();

        let response = catalog.product_with_category_name(dune.id).await.unwrap();

        assert_eq!(response.product.id, dune.id);
        assert_eq!(response.product.category_id, Some(books.id));
        assert_eq!(response.category_name, None);
        assert!(cache.inner.is_empty().await);
    }

    #[tokio::test]
    async fn test_cache_outage_falls_back_to_store() {
        let (catalog, _store, cache) = setup().await;
        let books = catalog.create_category(NewCategory::new("Books")).await.unwrap();
        let dune = catalog
            .create_product(NewProduct::new("Dune").in_category(books.id))
            .await
            .unwrap();
        cache.fail(true);

        assert_eq!(catalog.category_name(&dune).await.unwrap(), "Books");
        assert_eq!(catalog.category_name(&dune).await.unwrap(), "Books");
        assert_eq!(cache.calls(), (2, 2, 0));
    }

    #[tokio::test]
    async fn test_custom_ttl_expires() {
        let (catalog, _store, _cache) = setup().await;
        let catalog = catalog.with_name_ttl(Duration::from_secs(1));
        let books = catalog.create_category(NewCategory::new("Books")).await.unwrap();
        let dune = catalog
            .create_product(NewProduct::new("Dune").in_category(books.id))
            .await
            .unwrap();
        catalog.category_name(&dune).await.unwrap();

        catalog
            .store()
            .update_category(books.id, CategoryChanges::new().with_name("Novels"))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(1100)).await;

        assert_eq!(catalog.category_name(&dune).await.unwrap(), "Novels");
    }

    #[tokio::test]
    async fn test_product_with_category_name() {
        let (catalog, _store, _cache) = setup().await;
        let books = catalog.create_category(NewCategory::new("Books")).await.unwrap();
        let dune = catalog
            .create_product(NewProduct::new("Dune").in_category(books.id))
            .await
            .unwrap();

        let response = catalog.product_with_category_name(dune.id).await.unwrap();
        assert_eq!(response.product, dune);
        assert_eq!(response.category_name.as_deref(), Some("Books"));

        assert!(matches!(
            catalog.product_with_category_name(ProductId(99)).await,
            Err(CatalogError::NotFound(_))
        ));
    }
}
