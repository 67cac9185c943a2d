//! Table-level nodes: CREATE TABLE, constraints and ALTER TABLE.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

use super::column::{ColumnNode, ForeignKeyRef};

/// Kind of a table constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// PRIMARY KEY.
    PrimaryKey,
    /// UNIQUE.
    Unique,
    /// FOREIGN KEY.
    ForeignKey,
    /// CHECK.
    Check,
}

impl ConstraintKind {
    /// Returns the SQL keyword(s) for the kind.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::PrimaryKey => "PRIMARY KEY",
            Self::Unique => "UNIQUE",
            Self::ForeignKey => "FOREIGN KEY",
            Self::Check => "CHECK",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for ConstraintKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace(['_', '-'], " ").to_ascii_uppercase();
        match normalized.as_str() {
            "PRIMARY KEY" | "PRIMARY" | "PK" => Ok(Self::PrimaryKey),
            "UNIQUE" => Ok(Self::Unique),
            "FOREIGN KEY" | "FOREIGN" | "FK" => Ok(Self::ForeignKey),
            "CHECK" => Ok(Self::Check),
            _ => Err(Error::UnknownConstraintKind(s.to_string())),
        }
    }
}

/// A table constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintNode {
    /// Constraint kind.
    pub kind: ConstraintKind,
    /// Optional constraint name.
    pub name: Option<String>,
    /// Constrained columns.
    pub columns: Vec<String>,
    /// Referenced table/column (FOREIGN KEY only).
    pub reference: Option<ForeignKeyRef>,
    /// Expression (CHECK only).
    pub expression: Option<String>,
}

impl ConstraintNode {
    /// Creates a bare constraint of `kind` over `columns`.
    #[must_use]
    pub fn new<S: AsRef<str>>(kind: ConstraintKind, columns: &[S]) -> Self {
        Self {
            kind,
            name: None,
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            reference: None,
            expression: None,
        }
    }

    /// Creates a PRIMARY KEY constraint.
    #[must_use]
    pub fn primary_key<S: AsRef<str>>(columns: &[S]) -> Self {
        Self::new(ConstraintKind::PrimaryKey, columns)
    }

    /// Creates a UNIQUE constraint.
    #[must_use]
    pub fn unique<S: AsRef<str>>(columns: &[S]) -> Self {
        Self::new(ConstraintKind::Unique, columns)
    }

    /// Creates a FOREIGN KEY constraint. The reference's name, if set,
    /// becomes the constraint name.
    #[must_use]
    pub fn foreign_key<S: AsRef<str>>(columns: &[S], reference: ForeignKeyRef) -> Self {
        let mut node = Self::new(ConstraintKind::ForeignKey, columns);
        node.name.clone_from(&reference.name);
        node.reference = Some(reference);
        node
    }

    /// Creates a CHECK constraint.
    #[must_use]
    pub fn check(expression: impl Into<String>) -> Self {
        Self {
            kind: ConstraintKind::Check,
            name: None,
            columns: Vec::new(),
            reference: None,
            expression: Some(expression.into()),
        }
    }

    /// Sets the constraint name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Name used in error messages.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| {
            if self.columns.is_empty() {
                String::from("<unnamed>")
            } else {
                self.columns.join(", ")
            }
        })
    }
}

/// A CREATE TABLE statement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTableNode {
    name: String,
    columns: Vec<ColumnNode>,
    constraints: Vec<ConstraintNode>,
    options: Vec<(String, String)>,
    comment: Option<String>,
}

impl CreateTableNode {
    /// Creates an empty table.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Appends a column.
    pub fn add_column(&mut self, column: ColumnNode) {
        self.columns.push(column);
    }

    /// Appends a constraint. A PRIMARY KEY constraint replaces any
    /// previous one so the table never holds two.
    pub fn add_constraint(&mut self, constraint: ConstraintNode) {
        if constraint.kind == ConstraintKind::PrimaryKey {
            if let Some(existing) = self
                .constraints
                .iter_mut()
                .find(|c| c.kind == ConstraintKind::PrimaryKey)
            {
                *existing = constraint;
                return;
            }
        }
        self.constraints.push(constraint);
    }

    /// Sets a dialect option, keeping the position of an existing key.
    pub fn set_option(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self
            .options
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&key))
        {
            Some(slot) => slot.1 = value,
            None => self.options.push((key, value)),
        }
    }

    /// Sets the table comment.
    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = Some(comment.into());
    }

    /// Table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Columns in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnNode] {
        &self.columns
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnNode> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Constraints in declaration order.
    #[must_use]
    pub fn constraints(&self) -> &[ConstraintNode] {
        &self.constraints
    }

    /// Dialect options in insertion order.
    #[must_use]
    pub fn options(&self) -> &[(String, String)] {
        &self.options
    }

    /// Looks up an option value, ignoring key case.
    #[must_use]
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Table comment, if any.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
}

/// One change inside an ALTER TABLE statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlterOperation {
    /// ADD COLUMN.
    AddColumn(ColumnNode),
    /// DROP COLUMN.
    DropColumn(String),
    /// Change a column to the given definition.
    ModifyColumn(ColumnNode),
}

impl AlterOperation {
    /// Short description used in logs and errors.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::AddColumn(c) => format!("add column {}", c.name()),
            Self::DropColumn(name) => format!("drop column {name}"),
            Self::ModifyColumn(c) => format!("modify column {}", c.name()),
        }
    }
}

/// An ALTER TABLE statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlterTableNode {
    /// Table being altered.
    pub table: String,
    /// Operations, applied in order.
    pub operations: Vec<AlterOperation>,
}

impl AlterTableNode {
    /// Creates an ALTER TABLE with no operations.
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            operations: Vec::new(),
        }
    }

    /// Adds a column.
    #[must_use]
    pub fn add_column(mut self, column: ColumnNode) -> Self {
        self.operations.push(AlterOperation::AddColumn(column));
        self
    }

    /// Drops a column.
    #[must_use]
    pub fn drop_column(mut self, name: impl Into<String>) -> Self {
        self.operations.push(AlterOperation::DropColumn(name.into()));
        self
    }

    /// Redefines a column.
    #[must_use]
    pub fn modify_column(mut self, column: ColumnNode) -> Self {
        self.operations.push(AlterOperation::ModifyColumn(column));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_primary_key_constraint() {
        let mut table = CreateTableNode::new("memberships");
        table.add_constraint(ConstraintNode::primary_key(&["user_id"]));
        table.add_constraint(ConstraintNode::unique(&["slug"]));
        table.add_constraint(ConstraintNode::primary_key(&["user_id", "group_id"]));

        let pks: Vec<_> = table
            .constraints()
            .iter()
            .filter(|c| c.kind == ConstraintKind::PrimaryKey)
            .collect();
        assert_eq!(pks.len(), 1);
        assert_eq!(pks[0].columns, ["user_id", "group_id"]);
        assert_eq!(table.constraints()[0].kind, ConstraintKind::PrimaryKey);
    }

    #[test]
    fn test_set_option_keeps_position() {
        let mut table = CreateTableNode::new("t");
        table.set_option("ENGINE", "MyISAM");
        table.set_option("CHARSET", "utf8mb4");
        table.set_option("engine", "InnoDB");
        assert_eq!(
            table.options(),
            [
                ("ENGINE".to_string(), "InnoDB".to_string()),
                ("CHARSET".to_string(), "utf8mb4".to_string()),
            ]
        );
        assert_eq!(table.option("charset"), Some("utf8mb4"));
    }

    #[test]
    fn test_constraint_kind_parse() {
        assert_eq!(
            "primary_key".parse::<ConstraintKind>().unwrap(),
            ConstraintKind::PrimaryKey
        );
        assert_eq!(
            "foreign key".parse::<ConstraintKind>().unwrap(),
            ConstraintKind::ForeignKey
        );
        assert!(matches!(
            "exclude".parse::<ConstraintKind>(),
            Err(Error::UnknownConstraintKind(kind)) if kind == "exclude"
        ));
    }

    #[test]
    fn test_foreign_key_takes_reference_name() {
        let fk = ConstraintNode::foreign_key(
            &["owner_id"],
            ForeignKeyRef::new("users", "id").named("fk_items_owner"),
        );
        assert_eq!(fk.name.as_deref(), Some("fk_items_owner"));
        assert_eq!(fk.display_name(), "fk_items_owner");
        assert_eq!(ConstraintNode::unique(&["a", "b"]).display_name(), "a, b");
    }

    #[test]
    fn test_alter_operations_keep_order() {
        let alter = AlterTableNode::new("users")
            .add_column(ColumnNode::new("age", "INTEGER"))
            .drop_column("legacy")
            .modify_column(ColumnNode::new("email", "TEXT"));
        let described: Vec<String> = alter.operations.iter().map(AlterOperation::describe).collect();
        assert_eq!(
            described,
            ["add column age", "drop column legacy", "modify column email"]
        );
    }
}
