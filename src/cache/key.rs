//! Cache keys
//!
//! A key is a `(namespace, id, field)` triple rendered as
//! `namespace:id:field`, e.g. `category:7:name`.

use std::fmt;

use crate::models::CategoryId;

const CATEGORY_NAMESPACE: &str = "category";
const NAME_FIELD: &str = "name";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    namespace: &'static str,
    id: u64,
    field: &'static str,
}

impl CacheKey {
    pub const fn new(namespace: &'static str, id: u64, field: &'static str) -> Self {
        Self {
            namespace,
            id,
            field,
        }
    }

    /// Key holding a category's name.
    pub const fn category_name(id: CategoryId) -> Self {
        Self::new(CATEGORY_NAMESPACE, id.0, NAME_FIELD)
    }

    pub fn namespace(&self) -> &'static str {
        self.namespace
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn field(&self) -> &'static str {
        self.field
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.namespace, self.id, self.field)
    }
}
