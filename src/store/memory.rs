//! In-process `CatalogStore`.
//!
//! All tables live behind one `RwLock`, so every write is applied
//! atomically with respect to other operations.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::schema::{Migration, Table, MIGRATIONS, PRODUCTS_CATEGORY_ID_INDEX};
use super::{CatalogStore, Updated};
use crate::error::{CatalogError, Result};
use crate::models::{
    Category, CategoryChanges, CategoryId, NewCategory, NewProduct, Product, ProductChanges,
    ProductId,
};

#[derive(Debug)]
struct Rows<T> {
    rows: BTreeMap<u64, T>,
    next_id: u64,
}

impl<T> Default for Rows<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T> Rows<T> {
    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[derive(Debug, Default)]
struct Tables {
    applied: BTreeSet<&'static str>,
    categories: Option<Rows<Category>>,
    products: Option<Rows<Product>>,
    /// `products.category_id` index, present once its migration ran
    category_index: Option<HashMap<CategoryId, BTreeSet<ProductId>>>,
}

fn missing_table(table: Table) -> CatalogError {
    CatalogError::Store(format!("table {} does not exist", table.name()))
}

impl Tables {
    fn categories(&self) -> Result<&Rows<Category>> {
        self.categories
            .as_ref()
            .ok_or_else(|| missing_table(Table::Categories))
    }

    fn categories_mut(&mut self) -> Result<&mut Rows<Category>> {
        self.categories
            .as_mut()
            .ok_or_else(|| missing_table(Table::Categories))
    }

    fn products(&self) -> Result<&Rows<Product>> {
        self.products
            .as_ref()
            .ok_or_else(|| missing_table(Table::Products))
    }

    fn products_mut(&mut self) -> Result<&mut Rows<Product>> {
        self.products
            .as_mut()
            .ok_or_else(|| missing_table(Table::Products))
    }

    fn check_reference(&self, category_id: Option<CategoryId>) -> Result<()> {
        let Some(id) = category_id else {
            return Ok(());
        };
        if self.categories()?.rows.contains_key(&id.0) {
            Ok(())
        } else {
            Err(CatalogError::InvalidReference(format!(
                "category {} does not exist",
                id
            )))
        }
    }

    fn index_product(&mut self, product: &Product) {
        if let (Some(index), Some(category_id)) = (self.category_index.as_mut(), product.category_id)
        {
            index.entry(category_id).or_default().insert(product.id);
        }
    }

    fn unindex_product(&mut self, product: &Product) {
        if let (Some(index), Some(category_id)) = (self.category_index.as_mut(), product.category_id)
        {
            if let Some(ids) = index.get_mut(&category_id) {
                ids.remove(&product.id);
                if ids.is_empty() {
                    index.remove(&category_id);
                }
            }
        }
    }

    fn apply(&mut self, migration: &Migration) {
        for def in migration.creates {
            match def.table {
                Table::Categories => {
                    self.categories.get_or_insert_with(Rows::default);
                }
                Table::Products => {
                    self.products.get_or_insert_with(Rows::default);
                }
            }
        }
        for index in migration.indexes {
            if *index == PRODUCTS_CATEGORY_ID_INDEX {
                let mut built: HashMap<CategoryId, BTreeSet<ProductId>> = HashMap::new();
                for product in self.products.iter().flat_map(|t| t.rows.values()) {
                    if let Some(category_id) = product.category_id {
                        built.entry(category_id).or_default().insert(product.id);
                    }
                }
                self.category_index = Some(built);
            }
        }
        self.applied.insert(migration.version);
    }
}

/// Catalog tables held in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates a store with no tables; call `migrate` before use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with every migration applied.
    pub async fn migrated() -> Self {
        let store = Self::new();
        store.migrate().await;
        store
    }

    /// Applies pending migrations in version order and returns the versions applied.
    pub async fn migrate(&self) -> Vec<&'static str> {
        self.migrate_with(MIGRATIONS).await
    }

    async fn migrate_with(&self, migrations: &[Migration]) -> Vec<&'static str> {
        let mut tables = self.tables.write().await;
        let mut pending: Vec<&Migration> = migrations
            .iter()
            .filter(|m| !tables.applied.contains(m.version))
            .collect();
        pending.sort_by_key(|m| m.version);

        pending
            .into_iter()
            .map(|migration| {
                tables.apply(migration);
                info!(version = migration.version, name = migration.name, "migration applied");
                migration.version
            })
            .collect()
    }

    /// Versions of every migration applied so far, ascending.
    pub async fn applied_migrations(&self) -> Vec<&'static str> {
        self.tables.read().await.applied.iter().copied().collect()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn insert_category(&self, new: NewCategory) -> Result<Category> {
        let mut tables = self.tables.write().await;
        let categories = tables.categories_mut()?;
        let now = Utc::now();
        let category = Category {
            id: CategoryId(categories.allocate_id()),
            name: new.name,
            created_at: now,
            updated_at: now,
        };
        categories.rows.insert(category.id.0, category.clone());
        debug!(id = %category.id, "category inserted");
        Ok(category)
    }

    async fn find_category(&self, id: CategoryId) -> Result<Option<Category>> {
        let tables = self.tables.read().await;
        Ok(tables.categories()?.rows.get(&id.0).cloned())
    }

    async fn update_category(
        &self,
        id: CategoryId,
        changes: CategoryChanges,
    ) -> Result<Updated<Category>> {
        let mut tables = self.tables.write().await;
        let row = tables
            .categories_mut()?
            .rows
            .get_mut(&id.0)
            .ok_or_else(|| CatalogError::category_not_found(id))?;

        let mut updated = changes.apply(row);
        updated.updated_at = Utc::now();
        let before = std::mem::replace(row, updated.clone());
        Ok(Updated {
            before,
            after: updated,
        })
    }

    async fn delete_category(&self, id: CategoryId) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables
            .categories_mut()?
            .rows
            .remove(&id.0)
            .map(|_| ())
            .ok_or_else(|| CatalogError::category_not_found(id))
    }

    async fn insert_product(&self, new: NewProduct) -> Result<Product> {
        let mut tables = self.tables.write().await;
        tables.check_reference(new.category_id)?;

        let products = tables.products_mut()?;
        let now = Utc::now();
        let product = Product {
            id: ProductId(products.allocate_id()),
            name: new.name,
            price: new.price,
            released_on: new.released_on,
            category_id: new.category_id,
            created_at: now,
            updated_at: now,
        };
        products.rows.insert(product.id.0, product.clone());
        tables.index_product(&product);
        debug!(id = %product.id, "product inserted");
        Ok(product)
    }

    async fn find_product(&self, id: ProductId) -> Result<Option<Product>> {
        let tables = self.tables.read().await;
        Ok(tables.products()?.rows.get(&id.0).cloned())
    }

    async fn update_product(&self, id: ProductId, changes: ProductChanges) -> Result<Product> {
        let mut tables = self.tables.write().await;
        let current = tables
            .products()?
            .rows
            .get(&id.0)
            .cloned()
            .ok_or_else(|| CatalogError::product_not_found(id))?;

        let mut updated = changes.apply(&current);
        if updated.category_id != current.category_id {
            tables.check_reference(updated.category_id)?;
        }
        updated.updated_at = Utc::now();

        tables.unindex_product(&current);
        tables.products_mut()?.rows.insert(id.0, updated.clone());
        tables.index_product(&updated);
        Ok(updated)
    }

    async fn delete_product(&self, id: ProductId) -> Result<()> {
        let mut tables = self.tables.write().await;
        let removed = tables
            .products_mut()?
            .rows
            .remove(&id.0)
            .ok_or_else(|| CatalogError::product_not_found(id))?;
        tables.unindex_product(&removed);
        Ok(())
    }

    async fn products_in_category(&self, id: CategoryId) -> Result<Vec<Product>> {
        let tables = self.tables.read().await;
        let products = tables.products()?;
        let found = match &tables.category_index {
            Some(index) => index
                .get(&id)
                .into_iter()
                .flatten()
                .filter_map(|pid| products.rows.get(&pid.0).cloned())
                .collect(),
            None => products
                .rows
                .values()
                .filter(|p| p.category_id == Some(id))
                .cloned()
                .collect(),
        };
        Ok(found)
    }
}
