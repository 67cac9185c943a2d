//! MySQL DDL rendering.

use std::collections::BTreeMap;

use crate::ast::{ColumnNode, CreateTableNode, DefaultValue, EnumNode};
use crate::dialect::Dialect;
use crate::error::Result;

use super::{is_function_call, is_quoted, quote_literal, DialectRenderer, IndexMethodPlacement};

/// Maps a SERIAL type to the integer type MySQL stores it as.
#[must_use]
pub fn integer_for_serial(data_type: &str) -> Option<&'static str> {
    match data_type.trim().to_ascii_uppercase().as_str() {
        "SERIAL" | "SERIAL4" => Some("INT"),
        "BIGSERIAL" | "SERIAL8" => Some("BIGINT"),
        "SMALLSERIAL" | "SERIAL2" => Some("SMALLINT"),
        _ => None,
    }
}

/// MySQL dialect.
///
/// There are no standalone enum types: columns typed with a registered
/// enum name render as an inline `ENUM(...)`.
#[derive(Debug, Clone, Default)]
pub struct MySqlDialect {
    enums: BTreeMap<String, Vec<String>>,
}

impl MySqlDialect {
    /// Creates the dialect with no known enums.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Values of a registered enum.
    #[must_use]
    pub fn enum_values(&self, name: &str) -> Option<&[String]> {
        self.enums.get(name).map(Vec::as_slice)
    }
}

impl DialectRenderer for MySqlDialect {
    fn dialect(&self) -> Dialect {
        Dialect::Mysql
    }

    fn register_enum(&mut self, node: &EnumNode) {
        self.enums.insert(node.name.clone(), node.values.clone());
    }

    fn table_header_label(&self) -> &'static str {
        "MYSQL TABLE"
    }

    fn map_type(&self, column: &ColumnNode) -> String {
        let data_type = column.data_type();
        if let Some(values) = self.enum_values(data_type) {
            let values = values
                .iter()
                .map(|v| quote_literal(v))
                .collect::<Vec<_>>()
                .join(", ");
            return format!("ENUM({values})");
        }
        integer_for_serial(data_type)
            .unwrap_or(data_type)
            .to_string()
    }

    fn auto_increment_clause(&self, column: &ColumnNode) -> &'static str {
        if column.is_auto_increment() || integer_for_serial(column.data_type()).is_some() {
            " AUTO_INCREMENT"
        } else {
            ""
        }
    }

    fn render_default(&self, default: &DefaultValue) -> String {
        match default {
            DefaultValue::Function(function) => {
                let function = function.trim();
                match function.to_ascii_lowercase().as_str() {
                    "now()" | "current_timestamp" | "current_timestamp()" => {
                        String::from("CURRENT_TIMESTAMP")
                    }
                    _ => function.to_string(),
                }
            }
            DefaultValue::Literal(literal) => {
                let literal = literal.trim();
                let bare = literal.trim_matches('\'');
                match bare.to_ascii_lowercase().as_str() {
                    "true" => String::from("TRUE"),
                    "false" => String::from("FALSE"),
                    "null" if !is_quoted(literal) => String::from("NULL"),
                    _ if is_quoted(literal) || is_function_call(literal) => literal.to_string(),
                    _ => quote_literal(literal),
                }
            }
        }
    }

    fn inline_column_comment(&self, column: &ColumnNode) -> String {
        column
            .comment_text()
            .map(|c| format!(" COMMENT {}", quote_literal(c)))
            .unwrap_or_default()
    }

    fn table_options(&self, table: &CreateTableNode) -> String {
        let mut parts = Vec::new();
        if let Some(engine) = table.option("ENGINE") {
            parts.push(format!("ENGINE={engine}"));
        }
        for (key, value) in table.options() {
            if key.eq_ignore_ascii_case("ENGINE") {
                continue;
            }
            if key.eq_ignore_ascii_case("COMMENT") {
                parts.push(format!("COMMENT={}", quote_literal(value)));
            } else {
                parts.push(format!("{}={value}", key.to_ascii_uppercase()));
            }
        }
        if table.option("COMMENT").is_none() {
            if let Some(comment) = table.comment() {
                parts.push(format!("COMMENT={}", quote_literal(comment)));
            }
        }
        parts.join(" ")
    }

    fn index_method_placement(&self) -> IndexMethodPlacement {
        IndexMethodPlacement::AfterColumns
    }

    fn drop_index(&self, name: &str, table: &str) -> String {
        format!("DROP INDEX {name} ON {table};")
    }

    // MODIFY COLUMN would add a second PRIMARY KEY or UNIQUE index.
    fn modify_column(&self, table: &str, column: &ColumnNode) -> Result<Vec<String>> {
        Ok(vec![format!(
            "ALTER TABLE {table} MODIFY COLUMN {};",
            self.column_definition(&column.clone().without_keys())
        )])
    }
}
