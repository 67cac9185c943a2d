//! Introspected live-database schema and the trait that produces it.
//!
//! Catalog readers live outside this crate. They implement [`Introspect`]
//! and hand back a [`DatabaseSchema`]; the core stays driver-agnostic.

use serde::{Deserialize, Serialize};

/// A column as reported by the database catalog.
///
/// Fields missing from a catalog document take their [`Default`] values; a
/// column without `nullable` accepts NULL, as in SQL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveColumn {
    /// Column name.
    pub name: String,
    /// Reported data type.
    #[serde(alias = "type")]
    pub data_type: String,
    /// User-defined type name, reported by PostgreSQL for enum columns.
    pub udt_name: Option<String>,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Whether the column is (part of) the primary key.
    pub primary: bool,
    /// Whether the column carries a single-column UNIQUE constraint.
    pub unique: bool,
    /// Reported default expression.
    pub default: Option<String>,
    /// Whether the column auto-increments.
    pub auto_increment: bool,
}

impl Default for LiveColumn {
    fn default() -> Self {
        Self {
            name: String::new(),
            data_type: String::new(),
            udt_name: None,
            nullable: true,
            primary: false,
            unique: false,
            default: None,
            auto_increment: false,
        }
    }
}

impl LiveColumn {
    /// Creates a nullable column.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            ..Self::default()
        }
    }

    /// The type to compare: the user-defined type name when the catalog
    /// reports `USER-DEFINED`, otherwise the data type.
    #[must_use]
    pub fn effective_type(&self) -> &str {
        match &self.udt_name {
            Some(udt) if self.data_type.eq_ignore_ascii_case("USER-DEFINED") => udt,
            _ => &self.data_type,
        }
    }
}

/// A table as reported by the database catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveTable {
    /// Table name.
    pub name: String,
    /// Columns in catalog order.
    pub columns: Vec<LiveColumn>,
}

impl LiveTable {
    /// Looks up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&LiveColumn> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// An index as reported by the database catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveIndex {
    /// Index name.
    pub name: String,
    /// Indexed table.
    pub table: String,
    /// Indexed columns, in order.
    pub columns: Vec<String>,
    /// Whether the index backs the primary key.
    pub primary: bool,
    /// Whether the index is UNIQUE.
    pub unique: bool,
}

/// An enum type as reported by the database catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveEnum {
    /// Type name.
    pub name: String,
    /// Values in catalog order.
    pub values: Vec<String>,
}

/// Everything a catalog read returns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSchema {
    /// Tables.
    pub tables: Vec<LiveTable>,
    /// Indexes across all tables.
    pub indexes: Vec<LiveIndex>,
    /// Enum types; empty for the MySQL family.
    pub enums: Vec<LiveEnum>,
}

impl DatabaseSchema {
    /// Looks up a table by name.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&LiveTable> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Looks up an enum by name.
    #[must_use]
    pub fn enum_named(&self, name: &str) -> Option<&LiveEnum> {
        self.enums.iter().find(|e| e.name == name)
    }
}

/// Reads the current schema from a live database.
///
/// Implementations live in driver crates.
pub trait Introspect {
    /// Error type for introspection failures.
    type Error: std::error::Error;

    /// Reads the current database schema.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn introspect_schema(&self) -> Result<DatabaseSchema, Self::Error>;
}
