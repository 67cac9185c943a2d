//! # ddlforge-core
//!
//! Declarative schema metadata in, dialect-specific DDL and migration SQL
//! out.
//!
//! This crate provides:
//! - An AST of DDL statements with a [`Visitor`](ast::Visitor) for rendering
//! - Fluent builders and a metadata-to-AST conversion
//! - PostgreSQL, MySQL and MariaDB renderers
//! - A schema differ that compares desired and live schemas and plans
//!   migration SQL that never drops data on its own
//!
//! ## Rendering
//!
//! ```rust
//! use ddlforge_core::{render_metadata, Dialect, GlobalEnum, SchemaField, SchemaMetadata, TableDirective};
//!
//! let meta = SchemaMetadata {
//!     fields: vec![
//!         SchemaField::new("Post", "id", "INTEGER").primary().auto_increment(),
//!         SchemaField::new("Post", "status", "status_enum"),
//!     ],
//!     tables: vec![TableDirective::new("Post", "posts")],
//!     enums: vec![GlobalEnum::new("status_enum", &["draft", "published"])],
//!     ..SchemaMetadata::default()
//! };
//!
//! let pg = render_metadata(&meta, Dialect::Postgres).unwrap();
//! assert!(pg.contains("CREATE TYPE status_enum AS ENUM ('draft', 'published');"));
//! assert!(pg.contains("id SERIAL PRIMARY KEY NOT NULL"));
//!
//! let mysql = render_metadata(&meta, Dialect::Mysql).unwrap();
//! assert!(mysql.contains("status ENUM('draft', 'published')"));
//! assert!(mysql.contains("AUTO_INCREMENT"));
//! ```
//!
//! ## Diffing
//!
//! ```rust
//! use ddlforge_core::{diff_schema, migration_sql, DatabaseSchema, Dialect, GeneratedSchema,
//!     MigrationOptions, SchemaField, SchemaMetadata, TableDirective};
//!
//! let meta = SchemaMetadata {
//!     fields: vec![SchemaField::new("Tag", "name", "TEXT").not_null()],
//!     tables: vec![TableDirective::new("Tag", "tags")],
//!     ..SchemaMetadata::default()
//! };
//! let generated = GeneratedSchema::from_metadata(&meta);
//! let diff = diff_schema(&generated, &DatabaseSchema::default(), Dialect::Postgres);
//! assert_eq!(diff.tables_added, ["tags"]);
//!
//! let sql = migration_sql(&diff, &generated, Dialect::Postgres, MigrationOptions::default()).unwrap();
//! assert!(sql[0].contains("CREATE TABLE tags ("));
//! ```

pub mod ast;
pub mod builder;
pub mod dialect;
pub mod diff;
pub mod error;
pub mod expand;
pub mod metadata;
pub mod render;

pub use builder::{SchemaBuilder, TableBuilder};
pub use dialect::Dialect;
pub use diff::{diff_schema, migration_sql, DatabaseSchema, Introspect, MigrationOptions, SchemaDiff};
pub use error::{Error, Result};
pub use expand::GeneratedSchema;
pub use metadata::{
    EmbeddedField, EmbeddedMode, FieldDefault, ForeignKeyAction, GlobalEnum, SchemaField,
    SchemaIndex, SchemaMetadata, TableDirective,
};
pub use render::{render_schema, DialectRenderer, Renderer};

/// Expands `meta` and renders the full DDL for `dialect`.
///
/// # Errors
///
/// Propagates rendering failures.
pub fn render_metadata(meta: &SchemaMetadata, dialect: Dialect) -> Result<String> {
    render_schema(&GeneratedSchema::from_metadata(meta), dialect)
}
