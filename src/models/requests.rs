//! Request DTOs for the catalog API
//!
//! Defines the structure of incoming HTTP request bodies.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use super::{CategoryChanges, CategoryId, NewCategory, NewProduct, Price, ProductChanges};

/// Maximum length of a category or product name in bytes
pub const MAX_NAME_LENGTH: usize = 255;

fn validate_name(name: &str) -> Option<String> {
    if name.trim().is_empty() {
        return Some("Name cannot be empty".to_string());
    }
    if name.len() > MAX_NAME_LENGTH {
        return Some(format!(
            "Name exceeds maximum length of {} bytes",
            MAX_NAME_LENGTH
        ));
    }
    None
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Request body for POST /categories
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
}

impl CreateCategoryRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_name(&self.name)
    }

    pub fn into_new(self) -> NewCategory {
        NewCategory::new(self.name)
    }
}

/// Request body for PATCH /categories/:id
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCategoryRequest {
    #[serde(default)]
    pub name: Option<String>,
}

impl UpdateCategoryRequest {
    pub fn validate(&self) -> Option<String> {
        self.name.as_deref().and_then(validate_name)
    }

    pub fn into_changes(self) -> CategoryChanges {
        CategoryChanges { name: self.name }
    }
}

/// Request body for POST /products
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub released_on: Option<NaiveDate>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
}

impl CreateProductRequest {
    pub fn validate(&self) -> Option<String> {
        validate_name(&self.name)
    }

    pub fn into_new(self) -> NewProduct {
        NewProduct {
            name: self.name,
            price: self.price,
            released_on: self.released_on,
            category_id: self.category_id,
        }
    }
}

/// Request body for PATCH /products/:id
///
/// Nullable fields accept `null` to clear the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProductRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub price: Option<Option<Price>>,
    #[serde(default, deserialize_with = "nullable")]
    pub released_on: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "nullable")]
    pub category_id: Option<Option<CategoryId>>,
}

impl UpdateProductRequest {
    pub fn validate(&self) -> Option<String> {
        self.name.as_deref().and_then(validate_name)
    }

    pub fn into_changes(self) -> ProductChanges {
        ProductChanges {
            name: self.name,
            price: self.price,
            released_on: self.released_on,
            category_id: self.category_id,
        }
    }
}
