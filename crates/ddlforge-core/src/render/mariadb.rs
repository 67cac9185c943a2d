//! MariaDB DDL rendering.
//!
//! MariaDB shares MySQL's syntax for everything this crate emits except
//! the comment header and `DROP INDEX`, which accepts `IF EXISTS`.

use crate::ast::{ColumnNode, CreateTableNode, DefaultValue, EnumNode};
use crate::dialect::Dialect;
use crate::error::Result;

use super::{DialectRenderer, IndexMethodPlacement, MySqlDialect};

/// MariaDB dialect, delegating to [`MySqlDialect`].
#[derive(Debug, Clone, Default)]
pub struct MariaDbDialect {
    mysql: MySqlDialect,
}

impl MariaDbDialect {
    /// Creates the dialect with no known enums.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DialectRenderer for MariaDbDialect {
    fn dialect(&self) -> Dialect {
        Dialect::Mariadb
    }

    fn register_enum(&mut self, node: &EnumNode) {
        self.mysql.register_enum(node);
    }

    fn table_header_label(&self) -> &'static str {
        "MARIADB TABLE"
    }

    fn map_type(&self, column: &ColumnNode) -> String {
        self.mysql.map_type(column)
    }

    fn auto_increment_clause(&self, column: &ColumnNode) -> &'static str {
        self.mysql.auto_increment_clause(column)
    }

    fn render_default(&self, default: &DefaultValue) -> String {
        self.mysql.render_default(default)
    }

    fn inline_column_comment(&self, column: &ColumnNode) -> String {
        self.mysql.inline_column_comment(column)
    }

    fn table_options(&self, table: &CreateTableNode) -> String {
        self.mysql.table_options(table)
    }

    fn index_method_placement(&self) -> IndexMethodPlacement {
        self.mysql.index_method_placement()
    }

    fn drop_index(&self, name: &str, table: &str) -> String {
        format!("DROP INDEX IF EXISTS {name} ON {table};")
    }

    fn modify_column(&self, table: &str, column: &ColumnNode) -> Result<Vec<String>> {
        self.mysql.modify_column(table, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_drop_index() {
        let d = MariaDbDialect::new();
        let mut table = CreateTableNode::new("t");
        table.add_column(ColumnNode::new("id", "INT").primary().auto_increment());
        let sql = d.create_table(&table).unwrap();
        assert!(sql.starts_with("-- MARIADB TABLE: t --\nCREATE TABLE t (\n"));
        assert_eq!(
            d.drop_index("idx_t_x", "t"),
            "DROP INDEX IF EXISTS idx_t_x ON t;"
        );
    }

    #[test]
    fn test_matches_mysql_column_rendering() {
        let mut maria = MariaDbDialect::new();
        let mut mysql = MySqlDialect::new();
        let status = EnumNode::new("status", &["on", "off"]);
        maria.register_enum(&status);
        mysql.register_enum(&status);

        let columns = [
            ColumnNode::new("id", "SERIAL").primary(),
            ColumnNode::new("status", "status").default_value("on"),
            ColumnNode::new("flag", "BOOLEAN").default_value("true").comment("toggle"),
            ColumnNode::new("seen_at", "DATETIME").default_function("now()"),
        ];
        for column in &columns {
            assert_eq!(maria.column_definition(column), mysql.column_definition(column));
        }
        assert_eq!(
            maria.column_definition(&columns[2]),
            "flag BOOLEAN DEFAULT TRUE COMMENT 'toggle'"
        );
        assert_eq!(
            maria.modify_column("t", &columns[0]).unwrap(),
            ["ALTER TABLE t MODIFY COLUMN id INT NOT NULL AUTO_INCREMENT;"]
        );
    }
}
