//! Intermediate representation of DDL statements.
//!
//! Nodes are plain data built once per render call. Each node kind has a
//! matching [`Visitor`] method; dialect renderers implement the visitor,
//! so adding a dialect never touches the node definitions.

mod column;
mod statement;
mod table;
mod visitor;

pub use column::{ColumnNode, DefaultValue, ForeignKeyRef};
pub use statement::{CommentNode, EnumNode, IndexNode, Node, StatementList};
pub use table::{AlterOperation, AlterTableNode, ConstraintKind, ConstraintNode, CreateTableNode};
pub use visitor::Visitor;
