//! Migration SQL from a schema diff.
//!
//! Output is ordered so that every statement's dependencies already exist:
//! enums, enum values, new tables, column changes, new indexes, index
//! drops, and finally the removals. Nothing that loses data is executable;
//! removed tables, enums, columns and enum values become `WARNING`
//! comments for a human to act on.

use tracing::{debug, warn};

use crate::ast::{AlterTableNode, EnumNode, Node};
use crate::builder::convert::{column_node, index_node, resolve_type, table_node};
use crate::dialect::Dialect;
use crate::error::Result;
use crate::expand::GeneratedSchema;
use crate::render::Renderer;

use super::{SchemaDiff, TableDiff};

/// Switches for [`migration_sql`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationOptions {
    /// Render real `ADD COLUMN`, modify-column and `CREATE INDEX`
    /// statements instead of TODO comments.
    pub emit_column_statements: bool,
}

impl MigrationOptions {
    /// Options that render column and index statements.
    #[must_use]
    pub const fn emit_statements() -> Self {
        Self {
            emit_column_statements: true,
        }
    }
}

/// Generates migration SQL for `diff`, one entry per statement or comment.
///
/// `generated` must be the schema the diff was computed from; it supplies
/// the definitions of new tables, columns and indexes.
///
/// # Errors
///
/// Propagates rendering failures for new tables and, with
/// [`MigrationOptions::emit_column_statements`], for column and index
/// statements.
pub fn migration_sql(
    diff: &SchemaDiff,
    generated: &GeneratedSchema,
    dialect: Dialect,
    options: MigrationOptions,
) -> Result<Vec<String>> {
    let mut renderer = Renderer::for_dialect(dialect).with_enums(&generated.enums);
    let mut out = Vec::new();

    for name in &diff.enums_added {
        let Some(e) = generated.enum_named(name) else {
            continue;
        };
        match renderer.dialect().create_enum(&EnumNode::new(&e.name, &e.values)) {
            Some(sql) => out.push(sql),
            None => out.push(format!(
                "-- enum {name} ({}) is declared inline on its columns",
                e.values.join(", ")
            )),
        }
    }

    for e in &diff.enums_modified {
        for value in &e.values_added {
            match renderer.dialect().add_enum_value(&e.name, value) {
                Some(sql) => out.push(sql),
                None => out.push(format!(
                    "-- TODO: add value '{value}' to enum {} by redefining the columns that use it",
                    e.name
                )),
            }
        }
        for value in &e.values_removed {
            warn!(enum_name = %e.name, %value, "enum value removed, emitting warning only");
            out.push(format!(
                "-- WARNING: enum {} no longer declares value '{value}'; enum values cannot be removed automatically",
                e.name
            ));
        }
    }

    for name in &diff.tables_added {
        let Some(table) = generated.table(name) else {
            continue;
        };
        let node = Node::CreateTable(table_node(table, dialect));
        out.push(renderer.render_node(&node)?);
    }

    for table_diff in &diff.tables_modified {
        modified_table(&mut renderer, table_diff, generated, dialect, options, &mut out)?;
    }

    for index in &diff.indexes_added {
        let declared = generated
            .indexes
            .iter()
            .find(|i| i.index.name == index.name && i.table == index.table);
        match declared {
            Some(declared) if options.emit_column_statements => {
                out.push(renderer.render_node(&Node::Index(index_node(declared)))?);
            }
            _ => out.push(format!(
                "-- TODO: create index {} on {}",
                index.name, index.table
            )),
        }
    }

    for index in &diff.indexes_removed {
        out.push(renderer.dialect().drop_index(&index.name, &index.table));
    }

    for name in &diff.tables_removed {
        warn!(table = %name, "table removed, emitting warning only");
        out.push(format!(
            "-- WARNING: table {name} is no longer declared; remove it manually after migrating its data"
        ));
    }
    for name in &diff.enums_removed {
        warn!(enum_name = %name, "enum removed, emitting warning only");
        out.push(format!(
            "-- WARNING: enum type {name} is no longer declared; remove it manually once unused"
        ));
    }

    debug!(dialect = %dialect, statements = out.len(), "migration generated");
    Ok(out)
}

fn modified_table(
    renderer: &mut Renderer,
    diff: &TableDiff,
    generated: &GeneratedSchema,
    dialect: Dialect,
    options: MigrationOptions,
    out: &mut Vec<String>,
) -> Result<()> {
    let table_name = &diff.table;
    let table = generated.table(table_name);

    for column in &diff.columns_added {
        let field = table.and_then(|t| t.field(column).map(|f| (t, f)));
        match field {
            Some((table, field)) if options.emit_column_statements => {
                let alter = AlterTableNode::new(table_name)
                    .add_column(column_node(table, field, dialect));
                out.push(renderer.render_node(&Node::AlterTable(alter))?);
            }
            Some((_, field)) => out.push(format!(
                "-- TODO: add column {table_name}.{column} {}",
                resolve_type(field, dialect).0
            )),
            None => out.push(format!("-- TODO: add column {table_name}.{column}")),
        }
    }

    for column in &diff.columns_modified {
        let field = table.and_then(|t| t.field(&column.column).map(|f| (t, f)));
        match field {
            Some((table, field)) if options.emit_column_statements => {
                let alter = AlterTableNode::new(table_name)
                    .modify_column(column_node(table, field, dialect));
                out.push(renderer.render_node(&Node::AlterTable(alter))?);
            }
            _ => {
                let changes = column
                    .changes
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                out.push(format!(
                    "-- TODO: modify column {table_name}.{} ({changes})",
                    column.column
                ));
            }
        }
    }

    for column in &diff.columns_removed {
        warn!(table = %table_name, %column, "column removed, emitting warning only");
        out.push(format!(
            "-- WARNING: column {table_name}.{column} is no longer declared; remove it manually after migrating its data"
        ));
    }
    Ok(())
}
