//! Conversion of expanded metadata into AST statements.

use tracing::debug;

use crate::ast::{
    ColumnNode, ConstraintNode, CreateTableNode, DefaultValue, EnumNode, ForeignKeyRef, IndexNode,
    StatementList,
};
use crate::dialect::Dialect;
use crate::expand::{GeneratedIndex, GeneratedSchema, GeneratedTable};
use crate::metadata::{SchemaField, SchemaMetadata};
use crate::render::{integer_for_serial, serial_type};

/// Resolves the column type for `dialect`, returning the type and whether
/// the column auto-increments.
///
/// A per-dialect override is used verbatim. Otherwise PostgreSQL turns
/// auto-incrementing integers into SERIAL types and the MySQL family turns
/// SERIAL types back into auto-incrementing integers.
#[must_use]
pub fn resolve_type(field: &SchemaField, dialect: Dialect) -> (String, bool) {
    if let Some(data_type) = field.overrides.get(&dialect) {
        return (data_type.clone(), field.auto_increment);
    }

    let declared = field.field_type.as_str();
    match dialect {
        Dialect::Postgres if field.auto_increment => (
            serial_type(declared).unwrap_or(declared).to_string(),
            true,
        ),
        Dialect::Mysql | Dialect::Mariadb => match integer_for_serial(declared) {
            Some(integer) => (integer.to_string(), true),
            None => (declared.to_string(), field.auto_increment),
        },
        Dialect::Postgres => (declared.to_string(), false),
    }
}

/// Builds the column node for one field of `table`.
#[must_use]
pub fn column_node(table: &GeneratedTable, field: &SchemaField, dialect: Dialect) -> ColumnNode {
    let (data_type, auto_increment) = resolve_type(field, dialect);
    let mut column = ColumnNode::new(&field.name, data_type);

    if table.is_primary(field) {
        column = if table.composite_primary_key().is_some() {
            column.not_null()
        } else {
            column.primary()
        };
    } else if !field.nullable {
        column = column.not_null();
    }
    if field.unique {
        column = column.unique();
    }
    if auto_increment {
        column = column.auto_increment();
    }
    column = column.with_default(field.default.as_ref().map(DefaultValue::from));
    if let Some(check) = &field.check {
        column = column.check(check);
    }
    if let Some(comment) = &field.comment {
        column = column.comment(comment);
    }

    if let Some(target) = field.foreign_key.as_deref() {
        match ForeignKeyRef::parse(target) {
            Some(mut reference) => {
                reference.name.clone_from(&field.foreign_key_name);
                reference.on_delete = field.on_delete;
                reference.on_update = field.on_update;
                column = column.foreign_key(reference);
            }
            None => {
                debug!(table = %table.name(), column = %field.name, %target, "unparseable foreign key, ignoring");
            }
        }
    }
    column
}

/// Builds the CREATE TABLE node for an expanded table.
#[must_use]
pub fn table_node(table: &GeneratedTable, dialect: Dialect) -> CreateTableNode {
    let mut node = CreateTableNode::new(table.name());
    for field in &table.fields {
        node.add_column(column_node(table, field, dialect));
    }
    if let Some(columns) = table.composite_primary_key() {
        node.add_constraint(ConstraintNode::primary_key(columns));
    }
    if dialect.is_mysql_family() {
        if let Some(engine) = &table.directive.engine {
            node.set_option("ENGINE", engine);
        }
    }
    if let Some(comment) = &table.directive.comment {
        node.set_comment(comment);
    }
    node
}

/// Builds the CREATE INDEX node for a resolved index.
#[must_use]
pub fn index_node(index: &GeneratedIndex) -> IndexNode {
    let declared = &index.index;
    let mut node = IndexNode::new(&declared.name, &index.table, &declared.fields);
    if declared.unique {
        node = node.unique();
    }
    if let Some(method) = &declared.method {
        node = node.method(method);
    }
    if let Some(comment) = &declared.comment {
        node = node.comment(comment);
    }
    node
}

/// Converts an expanded schema into statements: enums, then tables, then
/// indexes.
#[must_use]
pub fn schema_statements(schema: &GeneratedSchema, dialect: Dialect) -> StatementList {
    let mut statements = StatementList::new();
    for e in &schema.enums {
        statements.push(EnumNode::new(&e.name, &e.values));
    }
    for table in &schema.tables {
        statements.push(table_node(table, dialect));
    }
    for index in &schema.indexes {
        statements.push(index_node(index));
    }
    statements
}

/// Expands `meta` and converts it into statements.
#[must_use]
pub fn metadata_statements(meta: &SchemaMetadata, dialect: Dialect) -> StatementList {
    schema_statements(&GeneratedSchema::from_metadata(meta), dialect)
}
