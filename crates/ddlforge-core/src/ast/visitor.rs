//! Double-dispatch visitor over the closed node set.

use crate::error::Result;

use super::column::ColumnNode;
use super::statement::{CommentNode, EnumNode, IndexNode};
use super::table::{AlterTableNode, ConstraintNode, CreateTableNode};

/// One method per node kind.
///
/// Renderers implement this trait; nodes call back into it through
/// `accept`. Alter operations are not nodes and are handled inside
/// [`Visitor::visit_alter_table`].
pub trait Visitor {
    /// Visits a CREATE TABLE statement.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn visit_create_table(&mut self, node: &CreateTableNode) -> Result<()>;

    /// Visits a column definition.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn visit_column(&mut self, node: &ColumnNode) -> Result<()>;

    /// Visits a table constraint.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn visit_constraint(&mut self, node: &ConstraintNode) -> Result<()>;

    /// Visits a CREATE INDEX statement.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn visit_index(&mut self, node: &IndexNode) -> Result<()>;

    /// Visits an enum type.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn visit_enum(&mut self, node: &EnumNode) -> Result<()>;

    /// Visits a comment.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn visit_comment(&mut self, node: &CommentNode) -> Result<()>;

    /// Visits an ALTER TABLE statement.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn visit_alter_table(&mut self, node: &AlterTableNode) -> Result<()>;
}

macro_rules! impl_accept {
    ($($ty:ident => $method:ident),* $(,)?) => {
        $(
            impl $ty {
                /// Calls the matching visitor method.
                ///
                /// # Errors
                ///
                /// Returns whatever the visitor returns.
                pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<()> {
                    visitor.$method(self)
                }
            }
        )*
    };
}

impl_accept! {
    CreateTableNode => visit_create_table,
    ColumnNode => visit_column,
    ConstraintNode => visit_constraint,
    IndexNode => visit_index,
    EnumNode => visit_enum,
    CommentNode => visit_comment,
    AlterTableNode => visit_alter_table,
}
