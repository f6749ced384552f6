//! Property-based tests for the category name cache
//!
//! Uses proptest to drive random sequences of renames and reads.

use std::sync::Arc;

use proptest::prelude::*;

use crate::cache::{CacheKey, KvCache, MemoryCache};
use crate::catalog::Catalog;
use crate::models::{CategoryChanges, NewCategory, NewProduct};
use crate::store::{CatalogStore, MemoryStore};

const CATEGORIES: usize = 3;

#[derive(Debug, Clone)]
enum Op {
    /// Rename through the catalog
    Rename { category: usize, name: String },
    /// Read a product's category name
    Read { category: usize },
}

fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z]{1,12}"
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..CATEGORIES, name_strategy()).prop_map(|(category, name)| Op::Rename { category, name }),
        (0..CATEGORIES).prop_map(|category| Op::Read { category }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // When every rename goes through the catalog, a read always agrees with
    // the store and leaves the cache holding that same name.
    #[test]
    fn prop_reads_match_store(ops in prop::collection::vec(op_strategy(), 1..40)) {
        tokio_test::block_on(async {
            let store = Arc::new(MemoryStore::migrated().await);
            let cache = Arc::new(MemoryCache::new(16));
            let catalog = Catalog::new(store.clone(), cache.clone());

            let mut products = Vec::new();
            for i in 0..CATEGORIES {
                let category = catalog
                    .create_category(NewCategory::new(format!("Category{}", i)))
                    .await
                    .unwrap();
                let product = catalog
                    .create_product(NewProduct::new(format!("Product{}", i)).in_category(category.id))
                    .await
                    .unwrap();
                products.push(product);
            }

            for op in ops {
                match op {
                    Op::Rename { category, name } => {
                        let id = products[category].category_id.unwrap();
                        catalog
                            .update_category(id, CategoryChanges::new().with_name(name))
                            .await
                            .unwrap();
                    }
                    Op::Read { category } => {
                        let product = &products[category];
                        let id = product.category_id.unwrap();
                        let read = catalog.category_name(product).await.unwrap();
                        let stored = store.find_category(id).await.unwrap().unwrap();
                        prop_assert_eq!(&read, &stored.name);

                        let cached = cache.get(&CacheKey::category_name(id)).await.unwrap();
                        prop_assert_eq!(cached, Some(read));
                    }
                }
            }
            Ok(())
        })?;
    }

    // A rename to the current name never removes the cached entry.
    #[test]
    fn prop_same_name_keeps_entry(name in name_strategy()) {
        tokio_test::block_on(async {
            let store = Arc::new(MemoryStore::migrated().await);
            let cache = Arc::new(MemoryCache::new(16));
            let catalog = Catalog::new(store, cache.clone());

            let category = catalog.create_category(NewCategory::new(name.clone())).await.unwrap();
            let product = catalog
                .create_product(NewProduct::new("p").in_category(category.id))
                .await
                .unwrap();
            catalog.category_name(&product).await.unwrap();

            catalog
                .update_category(category.id, CategoryChanges::new().with_name(name.clone()))
                .await
                .unwrap();

            prop_assert_eq!(cache.stats().await.invalidations, 0);
            prop_assert_eq!(cache.len().await, 1);
            Ok(())
        })?;
    }
}
