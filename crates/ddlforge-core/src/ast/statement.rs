//! Top-level statements and the statement list.

use crate::error::{Error, Result};

use super::column::ColumnNode;
use super::table::{AlterTableNode, ConstraintNode, CreateTableNode};
use super::visitor::Visitor;

/// A CREATE INDEX statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexNode {
    /// Index name.
    pub name: String,
    /// Indexed table.
    pub table: String,
    /// Indexed columns, in order.
    pub columns: Vec<String>,
    /// Whether the index is UNIQUE.
    pub unique: bool,
    /// Index method hint (`btree`, `gin`, ...).
    pub method: Option<String>,
    /// Index comment.
    pub comment: Option<String>,
}

impl IndexNode {
    /// Creates a non-unique index.
    #[must_use]
    pub fn new<S: AsRef<str>>(
        name: impl Into<String>,
        table: impl Into<String>,
        columns: &[S],
    ) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            unique: false,
            method: None,
            comment: None,
        }
    }

    /// Marks the index as UNIQUE.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Sets the index method hint.
    #[must_use]
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Sets the index comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// A named enumeration type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumNode {
    /// Type name.
    pub name: String,
    /// Values in declaration order.
    pub values: Vec<String>,
}

impl EnumNode {
    /// Creates an enum node.
    #[must_use]
    pub fn new<S: AsRef<str>>(name: impl Into<String>, values: &[S]) -> Self {
        Self {
            name: name.into(),
            values: values.iter().map(|v| v.as_ref().to_string()).collect(),
        }
    }
}

/// A free-standing SQL comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentNode {
    /// Comment text, without the `--` marker.
    pub text: String,
}

impl CommentNode {
    /// Creates a comment node.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Any visitable node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// CREATE TABLE.
    CreateTable(CreateTableNode),
    /// A column definition on its own.
    Column(ColumnNode),
    /// A table constraint on its own.
    Constraint(ConstraintNode),
    /// CREATE INDEX.
    Index(IndexNode),
    /// Enum type.
    Enum(EnumNode),
    /// Comment.
    Comment(CommentNode),
    /// ALTER TABLE.
    AlterTable(AlterTableNode),
}

impl Node {
    /// Dispatches to the visitor method matching this node's kind.
    ///
    /// # Errors
    ///
    /// Returns whatever the visitor returns.
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<()> {
        match self {
            Self::CreateTable(n) => visitor.visit_create_table(n),
            Self::Column(n) => visitor.visit_column(n),
            Self::Constraint(n) => visitor.visit_constraint(n),
            Self::Index(n) => visitor.visit_index(n),
            Self::Enum(n) => visitor.visit_enum(n),
            Self::Comment(n) => visitor.visit_comment(n),
            Self::AlterTable(n) => visitor.visit_alter_table(n),
        }
    }

    /// Returns `true` for enum nodes.
    #[must_use]
    pub const fn is_enum(&self) -> bool {
        matches!(self, Self::Enum(_))
    }
}

macro_rules! impl_from_node {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Node {
                fn from(node: $ty) -> Self {
                    Self::$variant(node)
                }
            }
        )*
    };
}

impl_from_node! {
    CreateTableNode => CreateTable,
    ColumnNode => Column,
    ConstraintNode => Constraint,
    IndexNode => Index,
    EnumNode => Enum,
    CommentNode => Comment,
    AlterTableNode => AlterTable,
}

/// An ordered sequence of statements.
///
/// Order is significant: enum types come before the tables that use them,
/// tables before their indexes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementList {
    statements: Vec<Node>,
}

impl StatementList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            statements: Vec::new(),
        }
    }

    /// Appends a statement.
    pub fn push(&mut self, node: impl Into<Node>) {
        self.statements.push(node.into());
    }

    /// Statements in order.
    #[must_use]
    pub fn statements(&self) -> &[Node] {
        &self.statements
    }

    /// Iterates over the statements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.statements.iter()
    }

    /// Number of statements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Returns `true` if the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Visits every statement in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Statement`] carrying the index of the statement
    /// that failed; statements after it are not visited.
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<()> {
        for (index, node) in self.statements.iter().enumerate() {
            node.accept(visitor)
                .map_err(|source| Error::at_statement(index, source))?;
        }
        Ok(())
    }
}

impl FromIterator<Node> for StatementList {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Self {
            statements: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a StatementList {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}
