//! PostgreSQL DDL rendering.

use crate::ast::{ColumnNode, CreateTableNode, EnumNode};
use crate::dialect::Dialect;
use crate::error::Result;

use super::{quote_literal, DialectRenderer, IndexMethodPlacement};

/// Maps an auto-incrementing integer type to its SERIAL form.
///
/// Returns `None` for types with no SERIAL counterpart, including types
/// that already are SERIAL.
#[must_use]
pub fn serial_type(data_type: &str) -> Option<&'static str> {
    match data_type.trim().to_ascii_uppercase().as_str() {
        "INT" | "INTEGER" | "INT4" => Some("SERIAL"),
        "BIGINT" | "INT8" => Some("BIGSERIAL"),
        "SMALLINT" | "INT2" => Some("SMALLSERIAL"),
        _ => None,
    }
}

/// The plain integer type behind a SERIAL type.
fn serial_base_type(data_type: &str) -> Option<&'static str> {
    match data_type.trim().to_ascii_uppercase().as_str() {
        "SERIAL" | "SERIAL4" => Some("INTEGER"),
        "BIGSERIAL" | "SERIAL8" => Some("BIGINT"),
        "SMALLSERIAL" | "SERIAL2" => Some("SMALLINT"),
        _ => None,
    }
}

/// PostgreSQL dialect.
///
/// Enums are standalone types, auto-increment is expressed through SERIAL
/// types, and comments are separate `COMMENT ON` statements.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresDialect;

impl PostgresDialect {
    /// Creates the dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DialectRenderer for PostgresDialect {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    fn table_header_label(&self) -> &'static str {
        "POSTGRES TABLE"
    }

    fn map_type(&self, column: &ColumnNode) -> String {
        if column.is_auto_increment() {
            if let Some(serial) = serial_type(column.data_type()) {
                return serial.to_string();
            }
        }
        column.data_type().to_string()
    }

    fn primary_key_clause(&self) -> &'static str {
        " PRIMARY KEY NOT NULL"
    }

    fn auto_increment_clause(&self, _column: &ColumnNode) -> &'static str {
        ""
    }

    fn table_options(&self, _table: &CreateTableNode) -> String {
        String::new()
    }

    fn table_trailer(&self, table: &CreateTableNode) -> Vec<String> {
        let mut statements = Vec::new();
        if let Some(comment) = table.comment() {
            statements.push(format!(
                "COMMENT ON TABLE {} IS {};",
                table.name(),
                quote_literal(comment)
            ));
        }
        for column in table.columns() {
            if let Some(comment) = column.comment_text() {
                statements.push(format!(
                    "COMMENT ON COLUMN {}.{} IS {};",
                    table.name(),
                    column.name(),
                    quote_literal(comment)
                ));
            }
        }
        statements
    }

    fn index_method_placement(&self) -> IndexMethodPlacement {
        IndexMethodPlacement::BeforeColumns
    }

    fn create_enum(&self, node: &EnumNode) -> Option<String> {
        let values = node
            .values
            .iter()
            .map(|v| quote_literal(v))
            .collect::<Vec<_>>()
            .join(", ");
        Some(format!("CREATE TYPE {} AS ENUM ({values});", node.name))
    }

    fn add_enum_value(&self, enum_name: &str, value: &str) -> Option<String> {
        Some(format!(
            "ALTER TYPE {enum_name} ADD VALUE {};",
            quote_literal(value)
        ))
    }

    fn modify_column(&self, table: &str, column: &ColumnNode) -> Result<Vec<String>> {
        let name = column.name();
        let data_type = serial_base_type(column.data_type()).unwrap_or(column.data_type());

        let mut statements = vec![format!(
            "ALTER TABLE {table} ALTER COLUMN {name} TYPE {data_type};"
        )];
        if column.is_nullable() {
            statements.push(format!("ALTER TABLE {table} ALTER COLUMN {name} DROP NOT NULL;"));
        } else {
            statements.push(format!("ALTER TABLE {table} ALTER COLUMN {name} SET NOT NULL;"));
        }
        match column.default() {
            Some(default) => statements.push(format!(
                "ALTER TABLE {table} ALTER COLUMN {name} SET DEFAULT {};",
                self.render_default(default)
            )),
            None if !column.is_auto_increment() => {
                statements.push(format!("ALTER TABLE {table} ALTER COLUMN {name} DROP DEFAULT;"));
            }
            None => {}
        }
        Ok(statements)
    }

    fn enums_first(&self) -> bool {
        true
    }
}
