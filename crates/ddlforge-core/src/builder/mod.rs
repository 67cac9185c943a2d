//! Fluent builders for AST nodes.
//!
//! Builders mirror SQL vocabulary and chain by value: a child builder owns
//! its parent and `end()` hands the parent back with the child attached.
//!
//! ```
//! use ddlforge_core::builder::SchemaBuilder;
//!
//! let statements = SchemaBuilder::new()
//!     .enumeration("status_enum", &["draft", "published"])
//!     .table("posts")
//!         .column("id", "INTEGER").primary().auto_increment().end()
//!         .column("status", "status_enum").not_null().default_value("draft").end()
//!         .column("author_id", "INTEGER").foreign_key("users(id)", "fk_posts_author").end()
//!     .end()
//!     .index("idx_posts_status", "posts", &["status"]).end()
//!     .build();
//!
//! assert_eq!(statements.len(), 3);
//! ```

pub mod convert;

use crate::ast::{
    ColumnNode, CommentNode, ConstraintKind, ConstraintNode, CreateTableNode, EnumNode,
    ForeignKeyRef, IndexNode, StatementList,
};
use crate::metadata::ForeignKeyAction;

/// Builds an ordered list of statements.
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    statements: StatementList,
}

impl SchemaBuilder {
    /// Creates an empty schema builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a CREATE TABLE.
    #[must_use]
    pub fn table(self, name: impl Into<String>) -> TableBuilder<Self> {
        TableBuilder {
            parent: self,
            node: CreateTableNode::new(name),
        }
    }

    /// Starts a CREATE INDEX.
    #[must_use]
    pub fn index<S: AsRef<str>>(
        self,
        name: impl Into<String>,
        table: impl Into<String>,
        columns: &[S],
    ) -> IndexBuilder {
        IndexBuilder {
            parent: self,
            node: IndexNode::new(name, table, columns),
        }
    }

    /// Adds an enum type.
    #[must_use]
    pub fn enumeration<S: AsRef<str>>(mut self, name: impl Into<String>, values: &[S]) -> Self {
        self.statements.push(EnumNode::new(name, values));
        self
    }

    /// Adds a free-standing comment.
    #[must_use]
    pub fn comment(mut self, text: impl Into<String>) -> Self {
        self.statements.push(CommentNode::new(text));
        self
    }

    /// Adds an already-built table.
    #[must_use]
    pub fn with_table(mut self, table: CreateTableNode) -> Self {
        self.statements.push(table);
        self
    }

    /// Finishes the schema.
    #[must_use]
    pub fn build(self) -> StatementList {
        self.statements
    }
}

/// Builds one CREATE TABLE, then returns to its parent.
///
/// The parent is `()` for a standalone table built with
/// [`TableBuilder::new`].
#[derive(Debug, Clone)]
pub struct TableBuilder<P = ()> {
    parent: P,
    node: CreateTableNode,
}

impl TableBuilder<()> {
    /// Creates a standalone table builder.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            parent: (),
            node: CreateTableNode::new(name),
        }
    }

    /// Finishes the table.
    #[must_use]
    pub fn build(self) -> CreateTableNode {
        self.node
    }
}

impl TableBuilder<SchemaBuilder> {
    /// Finishes the table and returns to the schema.
    #[must_use]
    pub fn end(self) -> SchemaBuilder {
        let Self { parent, node } = self;
        parent.with_table(node)
    }
}

impl<P> TableBuilder<P> {
    /// Starts a column definition.
    #[must_use]
    pub fn column(self, name: impl Into<String>, data_type: impl Into<String>) -> ColumnBuilder<P> {
        ColumnBuilder {
            parent: self,
            node: ColumnNode::new(name, data_type),
            reference: None,
        }
    }

    /// Adds an already-built column.
    #[must_use]
    pub fn with_column(mut self, column: ColumnNode) -> Self {
        self.node.add_column(column);
        self
    }

    /// Starts a PRIMARY KEY constraint. Replaces any earlier one.
    #[must_use]
    pub fn primary_key<S: AsRef<str>>(self, columns: &[S]) -> ConstraintBuilder<P> {
        self.constraint(ConstraintNode::new(ConstraintKind::PrimaryKey, columns))
    }

    /// Starts a UNIQUE constraint.
    #[must_use]
    pub fn unique<S: AsRef<str>>(self, columns: &[S]) -> ConstraintBuilder<P> {
        self.constraint(ConstraintNode::new(ConstraintKind::Unique, columns))
    }

    /// Starts a FOREIGN KEY constraint; set the target with
    /// [`ConstraintBuilder::references`].
    #[must_use]
    pub fn foreign_key<S: AsRef<str>>(self, columns: &[S]) -> ConstraintBuilder<P> {
        self.constraint(ConstraintNode::new(ConstraintKind::ForeignKey, columns))
    }

    /// Starts a CHECK constraint.
    #[must_use]
    pub fn check(self, expression: impl Into<String>) -> ConstraintBuilder<P> {
        self.constraint(ConstraintNode::check(expression))
    }

    fn constraint(self, node: ConstraintNode) -> ConstraintBuilder<P> {
        ConstraintBuilder { parent: self, node }
    }

    /// Sets the table comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.node.set_comment(comment);
        self
    }

    /// Sets a dialect option such as `CHARSET`.
    #[must_use]
    pub fn option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.node.set_option(key, value);
        self
    }

    /// Sets the storage engine. Only the MySQL family renders it.
    #[must_use]
    pub fn engine(self, engine: impl Into<String>) -> Self {
        self.option("ENGINE", engine)
    }
}

/// Builds one column, then returns to its table.
#[derive(Debug, Clone)]
pub struct ColumnBuilder<P = ()> {
    parent: TableBuilder<P>,
    node: ColumnNode,
    reference: Option<ForeignKeyRef>,
}

impl<P> ColumnBuilder<P> {
    /// Marks the column as the primary key. Implies NOT NULL.
    #[must_use]
    pub fn primary(mut self) -> Self {
        self.node = self.node.primary();
        self
    }

    /// Marks the column NOT NULL.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.node = self.node.not_null();
        self
    }

    /// Marks the column nullable. Ignored for primary key columns.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.node = self.node.nullable();
        self
    }

    /// Marks the column UNIQUE.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.node = self.node.unique();
        self
    }

    /// Marks the column auto-incrementing.
    #[must_use]
    pub fn auto_increment(mut self) -> Self {
        self.node = self.node.auto_increment();
        self
    }

    /// Sets a literal default.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.node = self.node.default_value(value);
        self
    }

    /// Sets a function default such as `now()`.
    #[must_use]
    pub fn default_function(mut self, function: impl Into<String>) -> Self {
        self.node = self.node.default_function(function);
        self
    }

    /// Sets a CHECK expression.
    #[must_use]
    pub fn check(mut self, expression: impl Into<String>) -> Self {
        self.node = self.node.check(expression);
        self
    }

    /// Sets the column comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.node = self.node.comment(comment);
        self
    }

    /// References another table, parsing `table(column)`, `table.column`
    /// or a bare `table`. An unparseable reference is ignored.
    #[must_use]
    pub fn foreign_key(mut self, reference: &str, name: impl Into<String>) -> Self {
        let name = name.into();
        self.reference = ForeignKeyRef::parse(reference).map(|r| {
            if name.is_empty() {
                r
            } else {
                r.named(name)
            }
        });
        self
    }

    /// References another table with an explicit target.
    #[must_use]
    pub fn references(mut self, reference: ForeignKeyRef) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Sets ON DELETE on the column's foreign key, if any.
    #[must_use]
    pub fn on_delete(mut self, action: ForeignKeyAction) -> Self {
        self.reference = self.reference.map(|r| r.on_delete(action));
        self
    }

    /// Sets ON UPDATE on the column's foreign key, if any.
    #[must_use]
    pub fn on_update(mut self, action: ForeignKeyAction) -> Self {
        self.reference = self.reference.map(|r| r.on_update(action));
        self
    }

    /// Finishes the column and returns to the table.
    #[must_use]
    pub fn end(self) -> TableBuilder<P> {
        let Self {
            parent,
            mut node,
            reference,
        } = self;
        if let Some(reference) = reference {
            node = node.foreign_key(reference);
        }
        parent.with_column(node)
    }
}

/// Builds one table constraint, then returns to its table.
#[derive(Debug, Clone)]
pub struct ConstraintBuilder<P = ()> {
    parent: TableBuilder<P>,
    node: ConstraintNode,
}

impl<P> ConstraintBuilder<P> {
    /// Names the constraint.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.node.name = Some(name.into());
        self
    }

    /// Sets the referenced table and column of a FOREIGN KEY.
    #[must_use]
    pub fn references(mut self, table: impl Into<String>, column: impl Into<String>) -> Self {
        self.node.reference = Some(ForeignKeyRef::new(table, column));
        self
    }

    /// Sets ON DELETE on the referenced key.
    #[must_use]
    pub fn on_delete(mut self, action: ForeignKeyAction) -> Self {
        self.node.reference = self.node.reference.map(|r| r.on_delete(action));
        self
    }

    /// Sets ON UPDATE on the referenced key.
    #[must_use]
    pub fn on_update(mut self, action: ForeignKeyAction) -> Self {
        self.node.reference = self.node.reference.map(|r| r.on_update(action));
        self
    }

    /// Finishes the constraint and returns to the table.
    #[must_use]
    pub fn end(self) -> TableBuilder<P> {
        let Self { mut parent, node } = self;
        parent.node.add_constraint(node);
        parent
    }
}

/// Builds one CREATE INDEX, then returns to the schema.
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    parent: SchemaBuilder,
    node: IndexNode,
}

impl IndexBuilder {
    /// Marks the index UNIQUE.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.node = self.node.unique();
        self
    }

    /// Sets the index method hint.
    #[must_use]
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.node = self.node.method(method);
        self
    }

    /// Sets the index comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.node = self.node.comment(comment);
        self
    }

    /// Finishes the index and returns to the schema.
    #[must_use]
    pub fn end(self) -> SchemaBuilder {
        let Self { mut parent, node } = self;
        parent.statements.push(node);
        parent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Node;

    #[test]
    fn test_standalone_table() {
        let table = TableBuilder::new("users")
            .column("id", "BIGINT")
            .primary()
            .auto_increment()
            .end()
            .column("email", "VARCHAR(255)")
            .not_null()
            .unique()
            .end()
            .comment("accounts")
            .engine("InnoDB")
            .build();

        assert_eq!(table.name(), "users");
        assert_eq!(table.columns().len(), 2);
        let id = table.column("id").unwrap();
        assert!(id.is_primary());
        assert!(!id.is_nullable());
        assert_eq!(table.option("engine"), Some("InnoDB"));
        assert_eq!(table.comment(), Some("accounts"));
    }

    #[test]
    fn test_primary_then_nullable_stays_not_null() {
        let table = TableBuilder::new("t")
            .column("id", "INTEGER")
            .primary()
            .nullable()
            .end()
            .build();
        assert!(!table.column("id").unwrap().is_nullable());
    }

    #[test]
    fn test_single_primary_key_constraint() {
        let table = TableBuilder::new("memberships")
            .column("user_id", "INTEGER")
            .end()
            .column("group_id", "INTEGER")
            .end()
            .primary_key(&["user_id"])
            .end()
            .primary_key(&["user_id", "group_id"])
            .name("pk_memberships")
            .end()
            .build();

        let pks: Vec<_> = table
            .constraints()
            .iter()
            .filter(|c| c.kind == ConstraintKind::PrimaryKey)
            .collect();
        assert_eq!(pks.len(), 1);
        assert_eq!(pks[0].columns, ["user_id", "group_id"]);
        assert_eq!(pks[0].name.as_deref(), Some("pk_memberships"));
    }

    #[test]
    fn test_column_foreign_key() {
        let table = TableBuilder::new("posts")
            .column("author_id", "INTEGER")
            .foreign_key("users(id)", "fk_posts_author")
            .on_delete(ForeignKeyAction::Cascade)
            .end()
            .column("bad_id", "INTEGER")
            .foreign_key("", "ignored")
            .end()
            .build();

        let fk = table.column("author_id").unwrap().foreign_key_ref().unwrap();
        assert_eq!(fk.table, "users");
        assert_eq!(fk.column, "id");
        assert_eq!(fk.name.as_deref(), Some("fk_posts_author"));
        assert_eq!(fk.on_delete, Some(ForeignKeyAction::Cascade));
        assert!(table.column("bad_id").unwrap().foreign_key_ref().is_none());
    }

    #[test]
    fn test_table_foreign_key_constraint() {
        let table = TableBuilder::new("orders")
            .column("customer_id", "INTEGER")
            .end()
            .foreign_key(&["customer_id"])
            .name("fk_orders_customer")
            .references("customers", "id")
            .on_delete(ForeignKeyAction::Restrict)
            .end()
            .build();

        let fk = &table.constraints()[0];
        assert_eq!(fk.kind, ConstraintKind::ForeignKey);
        let reference = fk.reference.as_ref().unwrap();
        assert_eq!(reference.table, "customers");
        assert_eq!(reference.on_delete, Some(ForeignKeyAction::Restrict));
    }

    #[test]
    fn test_schema_order() {
        let list = SchemaBuilder::new()
            .comment("generated")
            .enumeration("mood", &["happy", "sad"])
            .table("people")
            .column("mood", "mood")
            .end()
            .end()
            .index("idx_people_mood", "people", &["mood"])
            .unique()
            .method("btree")
            .end()
            .build();

        let kinds: Vec<&str> = list
            .iter()
            .map(|n| match n {
                Node::Comment(_) => "comment",
                Node::Enum(_) => "enum",
                Node::CreateTable(_) => "table",
                Node::Index(_) => "index",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, ["comment", "enum", "table", "index"]);

        let Node::Index(index) = &list.statements()[3] else {
            panic!("expected index");
        };
        assert!(index.unique);
        assert_eq!(index.method.as_deref(), Some("btree"));
    }
}
