//! Dialect-specific SQL rendering.
//!
//! [`DialectRenderer`] holds the dialect-agnostic text assembly as default
//! methods; each dialect overrides only the hooks where its syntax differs.
//! [`Renderer`] owns the output buffer and walks the AST through the
//! [`Visitor`] trait.

mod mariadb;
mod mysql;
mod postgres;

pub use mariadb::MariaDbDialect;
pub use mysql::{integer_for_serial, MySqlDialect};
pub use postgres::{serial_type, PostgresDialect};

use tracing::trace;

use crate::ast::{
    AlterOperation, AlterTableNode, ColumnNode, CommentNode, ConstraintKind, ConstraintNode,
    CreateTableNode, DefaultValue, EnumNode, ForeignKeyRef, IndexNode, Node, StatementList,
    Visitor,
};
use crate::builder::convert::schema_statements;
use crate::dialect::Dialect;
use crate::error::{Error, Result};
use crate::expand::GeneratedSchema;
use crate::metadata::GlobalEnum;

/// Where a dialect writes an index method hint, if at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexMethodPlacement {
    /// The hint is dropped.
    Ignored,
    /// `CREATE INDEX name ON table USING method (cols)`.
    BeforeColumns,
    /// `CREATE INDEX name ON table (cols) USING method`.
    AfterColumns,
}

/// Trait for dialect-specific DDL generation.
///
/// The default methods form the base renderer.
pub trait DialectRenderer {
    /// The dialect this renderer targets.
    fn dialect(&self) -> Dialect;

    /// Records an enum so columns of that type can be rendered inline.
    fn register_enum(&mut self, _node: &EnumNode) {}

    /// Label used in the table comment header.
    fn table_header_label(&self) -> &'static str {
        "TABLE"
    }

    /// Generates the comment lines preceding a CREATE TABLE.
    fn comment_header(&self, table: &CreateTableNode) -> String {
        let mut sql = format!("-- {}: {} --\n", self.table_header_label(), table.name());
        if let Some(comment) = table.comment() {
            for line in comment.lines() {
                sql.push_str(&format!("-- {line}\n"));
            }
        }
        sql
    }

    /// Maps a column's declared type to the type written in DDL.
    fn map_type(&self, column: &ColumnNode) -> String {
        column.data_type().to_string()
    }

    /// Clause written for a primary key column.
    fn primary_key_clause(&self) -> &'static str {
        " PRIMARY KEY"
    }

    /// Clause written for an auto-incrementing column.
    fn auto_increment_clause(&self, column: &ColumnNode) -> &'static str {
        if column.is_auto_increment() {
            " AUTO_INCREMENT"
        } else {
            ""
        }
    }

    /// Renders a default value.
    fn render_default(&self, default: &DefaultValue) -> String {
        match default {
            DefaultValue::Function(function) => function.trim().to_string(),
            DefaultValue::Literal(literal) => render_literal(literal),
        }
    }

    /// Inline column comment clause.
    fn inline_column_comment(&self, _column: &ColumnNode) -> String {
        String::new()
    }

    /// Generates a column definition line.
    fn column_definition(&self, column: &ColumnNode) -> String {
        let mut sql = format!("{} {}", column.name(), self.map_type(column));

        if column.is_primary() {
            sql.push_str(self.primary_key_clause());
        } else if !column.is_nullable() {
            sql.push_str(" NOT NULL");
        }
        if column.is_unique() && !column.is_primary() {
            sql.push_str(" UNIQUE");
        }
        sql.push_str(self.auto_increment_clause(column));

        if let Some(default) = column.default() {
            sql.push_str(" DEFAULT ");
            sql.push_str(&self.render_default(default));
        }
        if let Some(check) = column.check_expression() {
            sql.push_str(&format!(" CHECK ({check})"));
        }
        sql.push_str(&self.inline_column_comment(column));
        sql
    }

    /// Generates the `FOREIGN KEY ... REFERENCES ...` clause.
    fn foreign_key_clause(&self, columns: &[String], reference: &ForeignKeyRef) -> String {
        let mut sql = format!(
            "FOREIGN KEY ({}) REFERENCES {}({})",
            columns.join(", "),
            reference.table,
            reference.column
        );
        if let Some(action) = reference.on_delete {
            sql.push_str(" ON DELETE ");
            sql.push_str(action.as_sql());
        }
        if let Some(action) = reference.on_update {
            sql.push_str(" ON UPDATE ");
            sql.push_str(action.as_sql());
        }
        sql
    }

    /// Generates a table constraint line.
    ///
    /// # Errors
    ///
    /// Fails when a key constraint has no columns, a FOREIGN KEY has no
    /// reference, or a CHECK has no expression.
    fn constraint_definition(&self, constraint: &ConstraintNode) -> Result<String> {
        let mut sql = String::new();
        if let Some(name) = &constraint.name {
            sql.push_str(&format!("CONSTRAINT {name} "));
        }

        if constraint.kind != ConstraintKind::Check && constraint.columns.is_empty() {
            return Err(Error::EmptyConstraintColumns {
                kind: constraint.kind.as_sql(),
            });
        }

        match constraint.kind {
            ConstraintKind::PrimaryKey | ConstraintKind::Unique => {
                sql.push_str(&format!(
                    "{} ({})",
                    constraint.kind.as_sql(),
                    constraint.columns.join(", ")
                ));
            }
            ConstraintKind::ForeignKey => {
                let reference = constraint.reference.as_ref().ok_or_else(|| {
                    Error::MissingForeignKeyReference {
                        constraint: constraint.display_name(),
                    }
                })?;
                sql.push_str(&self.foreign_key_clause(&constraint.columns, reference));
            }
            ConstraintKind::Check => {
                let expression = constraint.expression.as_deref().ok_or_else(|| {
                    Error::MissingCheckExpression {
                        constraint: constraint.display_name(),
                    }
                })?;
                sql.push_str(&format!("CHECK ({expression})"));
            }
        }
        Ok(sql)
    }

    /// Generates the options written between `)` and `;`.
    fn table_options(&self, table: &CreateTableNode) -> String {
        table
            .options()
            .iter()
            .map(|(key, value)| format!("{}={value}", key.to_ascii_uppercase()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Statements emitted right after a CREATE TABLE.
    fn table_trailer(&self, _table: &CreateTableNode) -> Vec<String> {
        Vec::new()
    }

    /// Generates a CREATE TABLE statement.
    ///
    /// Column-level foreign keys are written as table-level constraints
    /// after the declared ones.
    ///
    /// # Errors
    ///
    /// Propagates constraint rendering failures.
    fn create_table(&self, table: &CreateTableNode) -> Result<String> {
        let mut lines: Vec<String> = table
            .columns()
            .iter()
            .map(|c| format!("  {}", self.column_definition(c)))
            .collect();

        for constraint in table.constraints() {
            lines.push(format!("  {}", self.constraint_definition(constraint)?));
        }
        for column in table.columns() {
            if let Some(reference) = column.foreign_key_ref() {
                let promoted = ConstraintNode::foreign_key(&[column.name()], reference.clone());
                lines.push(format!("  {}", self.constraint_definition(&promoted)?));
            }
        }

        let mut sql = self.comment_header(table);
        sql.push_str(&format!("CREATE TABLE {} (\n", table.name()));
        sql.push_str(&lines.join(",\n"));
        sql.push_str("\n)");
        let options = self.table_options(table);
        if !options.is_empty() {
            sql.push(' ');
            sql.push_str(&options);
        }
        sql.push(';');
        for statement in self.table_trailer(table) {
            sql.push('\n');
            sql.push_str(&statement);
        }
        Ok(sql)
    }

    /// Where the index method hint goes.
    fn index_method_placement(&self) -> IndexMethodPlacement {
        IndexMethodPlacement::Ignored
    }

    /// Generates a CREATE INDEX statement.
    fn create_index(&self, index: &IndexNode) -> String {
        let mut sql = String::new();
        if let Some(comment) = &index.comment {
            sql.push_str(&format!("-- {comment}\n"));
        }
        let unique = if index.unique { "UNIQUE " } else { "" };
        sql.push_str(&format!("CREATE {unique}INDEX {} ON {}", index.name, index.table));

        let placement = self.index_method_placement();
        let method = index.method.as_deref();
        if let (Some(method), IndexMethodPlacement::BeforeColumns) = (method, placement) {
            sql.push_str(&format!(" USING {method}"));
        }
        sql.push_str(&format!(" ({})", index.columns.join(", ")));
        if let (Some(method), IndexMethodPlacement::AfterColumns) = (method, placement) {
            sql.push_str(&format!(" USING {}", method.to_ascii_uppercase()));
        }
        sql.push(';');
        sql
    }

    /// Generates the statement creating an enum type, if the dialect has one.
    fn create_enum(&self, _node: &EnumNode) -> Option<String> {
        None
    }

    /// Generates the statement adding a value to an existing enum type.
    fn add_enum_value(&self, _enum_name: &str, _value: &str) -> Option<String> {
        None
    }

    /// Generates a DROP INDEX statement.
    fn drop_index(&self, name: &str, _table: &str) -> String {
        format!("DROP INDEX IF EXISTS {name};")
    }

    /// Generates the statements redefining a column.
    ///
    /// # Errors
    ///
    /// The base renderer has no portable syntax for this and always fails.
    fn modify_column(&self, _table: &str, column: &ColumnNode) -> Result<Vec<String>> {
        Err(Error::UnsupportedAlterOperation {
            dialect: self.dialect().as_str(),
            operation: format!("modify column {}", column.name()),
        })
    }

    /// Generates the statements for an ALTER TABLE node.
    ///
    /// # Errors
    ///
    /// Propagates failures from [`DialectRenderer::modify_column`] and
    /// constraint rendering.
    fn alter_table(&self, node: &AlterTableNode) -> Result<Vec<String>> {
        let table = &node.table;
        let mut statements = Vec::new();
        for operation in &node.operations {
            match operation {
                AlterOperation::AddColumn(column) => {
                    statements.push(format!(
                        "ALTER TABLE {table} ADD COLUMN {};",
                        self.column_definition(column)
                    ));
                    if let Some(reference) = column.foreign_key_ref() {
                        let constraint =
                            ConstraintNode::foreign_key(&[column.name()], reference.clone());
                        statements.push(format!(
                            "ALTER TABLE {table} ADD {};",
                            self.constraint_definition(&constraint)?
                        ));
                    }
                }
                AlterOperation::DropColumn(name) => {
                    statements.push(format!("ALTER TABLE {table} DROP COLUMN {name};"));
                }
                AlterOperation::ModifyColumn(column) => {
                    statements.extend(self.modify_column(table, column)?);
                }
            }
        }
        Ok(statements)
    }

    /// Renders a comment, one `--` line per text line.
    fn comment(&self, text: &str) -> String {
        text.lines()
            .map(|line| format!("-- {line}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whether full-schema output puts every enum first, then a blank line.
    fn enums_first(&self) -> bool {
        false
    }
}

/// Quotes a string literal, doubling embedded quotes.
#[must_use]
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Returns `true` for `'...'` literals.
#[must_use]
pub fn is_quoted(value: &str) -> bool {
    value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'')
}

/// Returns `true` for text that looks like a function call, `name(...)`.
#[must_use]
pub fn is_function_call(value: &str) -> bool {
    match value.find('(') {
        Some(open) if open > 0 => {
            value.ends_with(')')
                && value[..open]
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        }
        _ => false,
    }
}

fn is_numeric(value: &str) -> bool {
    value.parse::<f64>().is_ok()
}

/// Base literal rendering: numbers, quoted strings, function calls and SQL
/// keywords pass through, booleans are upper-cased, anything else is quoted.
#[must_use]
pub fn render_literal(literal: &str) -> String {
    let literal = literal.trim();
    match literal.to_ascii_lowercase().as_str() {
        "true" => return String::from("TRUE"),
        "false" => return String::from("FALSE"),
        "null" => return String::from("NULL"),
        "current_timestamp" | "current_date" | "current_time" => return literal.to_string(),
        _ => {}
    }
    if is_quoted(literal) || is_numeric(literal) || is_function_call(literal) {
        literal.to_string()
    } else {
        quote_literal(literal)
    }
}

/// Renders AST nodes into one owned SQL buffer.
///
/// One renderer serves one unit of work; call [`Renderer::reset`] before
/// reusing it sequentially.
pub struct Renderer {
    dialect: Box<dyn DialectRenderer>,
    buf: String,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("dialect", &self.dialect.dialect())
            .field("buf_len", &self.buf.len())
            .finish()
    }
}

impl Renderer {
    /// Creates a renderer over the given dialect.
    #[must_use]
    pub fn new(dialect: impl DialectRenderer + 'static) -> Self {
        Self {
            dialect: Box::new(dialect),
            buf: String::new(),
        }
    }

    /// Creates a renderer for a dialect chosen at runtime.
    #[must_use]
    pub fn for_dialect(dialect: Dialect) -> Self {
        match dialect {
            Dialect::Postgres => Self::new(PostgresDialect::new()),
            Dialect::Mysql => Self::new(MySqlDialect::new()),
            Dialect::Mariadb => Self::new(MariaDbDialect::new()),
        }
    }

    /// Registers enum definitions used to render enum-typed columns.
    #[must_use]
    pub fn with_enums<'a>(mut self, enums: impl IntoIterator<Item = &'a GlobalEnum>) -> Self {
        for e in enums {
            self.dialect.register_enum(&EnumNode::new(e.name.clone(), &e.values));
        }
        self
    }

    /// The dialect hooks.
    #[must_use]
    pub fn dialect(&self) -> &dyn DialectRenderer {
        self.dialect.as_ref()
    }

    /// Text rendered so far.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.buf
    }

    /// Consumes the renderer, returning its buffer.
    #[must_use]
    pub fn into_output(self) -> String {
        self.buf
    }

    /// Clears the buffer.
    pub fn reset(&mut self) {
        self.buf.clear();
    }

    fn emit(&mut self, statement: &str) {
        trace!(dialect = %self.dialect.dialect(), %statement, "rendered");
        self.buf.push_str(statement);
        self.buf.push('\n');
    }

    fn register_enums(&mut self, statements: &StatementList) {
        for node in statements {
            if let Node::Enum(e) = node {
                self.dialect.register_enum(e);
            }
        }
    }

    /// Renders the statements in order into a fresh buffer.
    ///
    /// # Errors
    ///
    /// Stops at the first failing statement; the buffer then holds partial
    /// output and should be discarded.
    pub fn render(&mut self, statements: &StatementList) -> Result<String> {
        self.reset();
        self.register_enums(statements);
        statements.accept(self)?;
        Ok(self.buf.clone())
    }

    /// Renders a full schema into a fresh buffer.
    ///
    /// Dialects with standalone enum types get every enum first, a blank
    /// line, then all other statements in their original order.
    ///
    /// # Errors
    ///
    /// As [`Renderer::render`]; the error carries the statement's position
    /// in `statements`.
    pub fn render_schema(&mut self, statements: &StatementList) -> Result<String> {
        if !self.dialect.enums_first() {
            return self.render(statements);
        }

        self.reset();
        self.register_enums(statements);
        let indexed: Vec<(usize, &Node)> = statements.iter().enumerate().collect();
        let (enums, rest): (Vec<_>, Vec<_>) = indexed.into_iter().partition(|(_, n)| n.is_enum());

        for (index, node) in &enums {
            node.accept(self)
                .map_err(|source| Error::at_statement(*index, source))?;
        }
        if !enums.is_empty() && !rest.is_empty() {
            self.buf.push('\n');
        }
        for (index, node) in &rest {
            node.accept(self)
                .map_err(|source| Error::at_statement(*index, source))?;
        }
        Ok(self.buf.clone())
    }

    /// Renders a single node into a fresh buffer.
    ///
    /// # Errors
    ///
    /// Propagates the node's rendering failure.
    pub fn render_node(&mut self, node: &Node) -> Result<String> {
        self.reset();
        node.accept(self)?;
        Ok(self.buf.trim_end().to_string())
    }
}

impl Visitor for Renderer {
    fn visit_create_table(&mut self, node: &CreateTableNode) -> Result<()> {
        let sql = self.dialect.create_table(node)?;
        self.emit(&sql);
        Ok(())
    }

    fn visit_column(&mut self, node: &ColumnNode) -> Result<()> {
        let sql = self.dialect.column_definition(node);
        self.emit(&sql);
        Ok(())
    }

    fn visit_constraint(&mut self, node: &ConstraintNode) -> Result<()> {
        let sql = self.dialect.constraint_definition(node)?;
        self.emit(&sql);
        Ok(())
    }

    fn visit_index(&mut self, node: &IndexNode) -> Result<()> {
        let sql = self.dialect.create_index(node);
        self.emit(&sql);
        Ok(())
    }

    fn visit_enum(&mut self, node: &EnumNode) -> Result<()> {
        if let Some(sql) = self.dialect.create_enum(node) {
            self.emit(&sql);
        }
        Ok(())
    }

    fn visit_comment(&mut self, node: &CommentNode) -> Result<()> {
        let sql = self.dialect.comment(&node.text);
        self.emit(&sql);
        Ok(())
    }

    fn visit_alter_table(&mut self, node: &AlterTableNode) -> Result<()> {
        for sql in self.dialect.alter_table(node)? {
            self.emit(&sql);
        }
        Ok(())
    }
}

/// Renders the full DDL for an expanded schema.
///
/// # Errors
///
/// Propagates rendering failures.
pub fn render_schema(schema: &GeneratedSchema, dialect: Dialect) -> Result<String> {
    let statements = schema_statements(schema, dialect);
    Renderer::for_dialect(dialect).render_schema(&statements)
}
