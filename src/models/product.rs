//! Product entity

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{CategoryId, Price};

/// Store-assigned product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted product.
///
/// `category_id` identifies the owning category by id only; deleting the
/// category does not touch the product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Option<Price>,
    pub released_on: Option<NaiveDate>,
    pub category_id: Option<CategoryId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Attributes for inserting a product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub price: Option<Price>,
    pub released_on: Option<NaiveDate>,
    pub category_id: Option<CategoryId>,
}

impl NewProduct {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_price(mut self, price: Price) -> Self {
        self.price = Some(price);
        self
    }

    pub fn released_on(mut self, date: NaiveDate) -> Self {
        self.released_on = Some(date);
        self
    }

    pub fn in_category(mut self, id: CategoryId) -> Self {
        self.category_id = Some(id);
        self
    }
}

/// Partial attribute set for a product update.
///
/// The outer `Option` means "leave as is"; for nullable columns the inner
/// `Option` is the new value, so `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub price: Option<Option<Price>>,
    pub released_on: Option<Option<NaiveDate>>,
    pub category_id: Option<Option<CategoryId>>,
}

impl ProductChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_price(mut self, price: Option<Price>) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_category(mut self, id: Option<CategoryId>) -> Self {
        self.category_id = Some(id);
        self
    }

    /// Applies the changes to a copy of `current`, leaving timestamps to the store.
    pub fn apply(&self, current: &Product) -> Product {
        let mut updated = current.clone();
        if let Some(name) = &self.name {
            updated.name = name.clone();
        }
        if let Some(price) = self.price {
            updated.price = price;
        }
        if let Some(released_on) = self.released_on {
            updated.released_on = released_on;
        }
        if let Some(category_id) = self.category_id {
            updated.category_id = category_id;
        }
        updated
    }
}
