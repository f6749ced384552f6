//! Schema migrations
//!
//! Each migration names the tables it creates and the indexes it adds.
//! `MemoryStore::migrate` applies the pending ones in version order.

/// Tables known to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Table {
    Categories,
    Products,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::Categories => "categories",
            Table::Products => "products",
        }
    }
}

/// Column types used by the catalog tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    PrimaryKey,
    String,
    Decimal,
    Date,
    Integer,
    Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnType,
}

const fn column(name: &'static str, kind: ColumnType) -> Column {
    Column { name, kind }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDef {
    pub table: Table,
    pub columns: &'static [Column],
}

impl TableDef {
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }
}

/// Secondary index on a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexDef {
    pub table: Table,
    pub column: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Migration {
    /// Timestamp-style version; migrations apply in ascending order
    pub version: &'static str,
    pub name: &'static str,
    pub creates: &'static [TableDef],
    pub indexes: &'static [IndexDef],
}

pub const CATEGORIES: TableDef = TableDef {
    table: Table::Categories,
    columns: &[
        column("id", ColumnType::PrimaryKey),
        column("name", ColumnType::String),
        column("created_at", ColumnType::Timestamp),
        column("updated_at", ColumnType::Timestamp),
    ],
};

pub const PRODUCTS: TableDef = TableDef {
    table: Table::Products,
    columns: &[
        column("id", ColumnType::PrimaryKey),
        column("name", ColumnType::String),
        column("price", ColumnType::Decimal),
        column("released_on", ColumnType::Date),
        column("category_id", ColumnType::Integer),
        column("created_at", ColumnType::Timestamp),
        column("updated_at", ColumnType::Timestamp),
    ],
};

pub const PRODUCTS_CATEGORY_ID_INDEX: IndexDef = IndexDef {
    table: Table::Products,
    column: "category_id",
};

/// All migrations, in version order.
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20120902185100",
        name: "create_categories",
        creates: &[CATEGORIES],
        indexes: &[],
    },
    Migration {
        version: "20120902185114",
        name: "create_products",
        creates: &[PRODUCTS],
        indexes: &[PRODUCTS_CATEGORY_ID_INDEX],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_ordered() {
        let versions: Vec<_> = MIGRATIONS.iter().map(|m| m.version).collect();
        let mut sorted = versions.clone();
        sorted.sort();
        assert_eq!(versions, sorted);
    }

    #[test]
    fn test_products_table_shape() {
        for col in ["id", "name", "price", "released_on", "category_id", "created_at", "updated_at"] {
            assert!(PRODUCTS.has_column(col), "products.{} missing", col);
        }
        assert_eq!(Table::Products.name(), "products");
    }

    #[test]
    fn test_category_id_is_indexed() {
        let products = MIGRATIONS
            .iter()
            .find(|m| m.name == "create_products")
            .unwrap();
        assert!(products.indexes.contains(&PRODUCTS_CATEGORY_ID_INDEX));
        assert!(PRODUCTS.has_column(PRODUCTS_CATEGORY_ID_INDEX.column));
    }
}
