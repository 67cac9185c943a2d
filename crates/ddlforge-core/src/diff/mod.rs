//! Schema diff engine.
//!
//! Compares the desired schema ([`GeneratedSchema`]) against what a catalog
//! read reports ([`DatabaseSchema`]) and produces a [`SchemaDiff`]. The diff
//! is total over its inputs: incomplete data degrades to "no change", never
//! to an error. [`migration::migration_sql`] turns a diff into SQL.

pub mod introspect;
pub mod migration;
pub mod normalize;

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::builder::convert::resolve_type;
use crate::dialect::Dialect;
use crate::expand::{GeneratedSchema, GeneratedTable};
use crate::metadata::{FieldDefault, GlobalEnum, SchemaField};

pub use introspect::{DatabaseSchema, Introspect, LiveColumn, LiveEnum, LiveIndex, LiveTable};
pub use migration::{migration_sql, MigrationOptions};

use normalize::{enum_literal_values, is_serial_type, normalize_default, normalize_type, ENUM};

// ================================================================
// Diff types
// ================================================================

/// One attribute that differs between the desired and the live column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "attribute", rename_all = "snake_case")]
pub enum ColumnChange {
    /// Normalized type buckets differ.
    Type {
        /// Desired bucket.
        generated: String,
        /// Live bucket.
        live: String,
    },
    /// Nullability differs.
    Nullable {
        /// Desired nullability.
        generated: bool,
        /// Live nullability.
        live: bool,
    },
    /// Primary key membership differs.
    Primary {
        /// Desired flag.
        generated: bool,
        /// Live flag.
        live: bool,
    },
    /// UNIQUE flag differs.
    Unique {
        /// Desired flag.
        generated: bool,
        /// Live flag.
        live: bool,
    },
    /// Normalized defaults differ.
    Default {
        /// Desired default, normalized.
        generated: String,
        /// Live default, normalized.
        live: String,
    },
}

impl fmt::Display for ColumnChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type { generated, live } => write!(f, "type {live} -> {generated}"),
            Self::Nullable { generated, live } => write!(f, "nullable {live} -> {generated}"),
            Self::Primary { generated, live } => write!(f, "primary {live} -> {generated}"),
            Self::Unique { generated, live } => write!(f, "unique {live} -> {generated}"),
            Self::Default { generated, live } => {
                write!(f, "default '{live}' -> '{generated}'")
            }
        }
    }
}

/// A column present on both sides with differing attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDiff {
    /// Column name.
    pub column: String,
    /// Differing attributes.
    pub changes: Vec<ColumnChange>,
}

/// Column-level differences of a table present on both sides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableDiff {
    /// Table name.
    pub table: String,
    /// Columns only in the desired schema.
    pub columns_added: Vec<String>,
    /// Columns only in the live schema.
    pub columns_removed: Vec<String>,
    /// Columns on both sides that differ.
    pub columns_modified: Vec<ColumnDiff>,
}

impl TableDiff {
    /// Returns `true` if any column differs.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.columns_added.is_empty()
            || !self.columns_removed.is_empty()
            || !self.columns_modified.is_empty()
    }
}

/// Value-level differences of an enum the database already holds, either
/// as a named type or inline on MySQL-family columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnumDiff {
    /// Enum name.
    pub name: String,
    /// Values only in the desired schema.
    pub values_added: Vec<String>,
    /// Values only in the live schema.
    pub values_removed: Vec<String>,
}

/// An index, by name and table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexRef {
    /// Index name.
    pub name: String,
    /// Indexed table.
    pub table: String,
}

/// Result of comparing the desired schema to the live one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaDiff {
    /// Tables to create.
    pub tables_added: Vec<String>,
    /// Tables no longer declared.
    pub tables_removed: Vec<String>,
    /// Tables whose columns differ.
    pub tables_modified: Vec<TableDiff>,
    /// Enums to create.
    pub enums_added: Vec<String>,
    /// Enums no longer declared.
    pub enums_removed: Vec<String>,
    /// Enums whose values differ.
    pub enums_modified: Vec<EnumDiff>,
    /// Indexes to create.
    pub indexes_added: Vec<IndexRef>,
    /// Indexes no longer declared.
    pub indexes_removed: Vec<IndexRef>,
}

impl SchemaDiff {
    /// Returns `true` if any of the eight collections is non-empty.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.tables_added.is_empty()
            || !self.tables_removed.is_empty()
            || !self.tables_modified.is_empty()
            || !self.enums_added.is_empty()
            || !self.enums_removed.is_empty()
            || !self.enums_modified.is_empty()
            || !self.indexes_added.is_empty()
            || !self.indexes_removed.is_empty()
    }
}

impl fmt::Display for SchemaDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.has_changes() {
            return writeln!(f, "schema is up to date");
        }
        for name in &self.enums_added {
            writeln!(f, "+ enum {name}")?;
        }
        for e in &self.enums_modified {
            for v in &e.values_added {
                writeln!(f, "~ enum {}: + '{v}'", e.name)?;
            }
            for v in &e.values_removed {
                writeln!(f, "~ enum {}: - '{v}'", e.name)?;
            }
        }
        for name in &self.tables_added {
            writeln!(f, "+ table {name}")?;
        }
        for t in &self.tables_modified {
            for c in &t.columns_added {
                writeln!(f, "~ table {}: + column {c}", t.table)?;
            }
            for c in &t.columns_modified {
                let changes = c
                    .changes
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                writeln!(f, "~ table {}: ~ column {} ({changes})", t.table, c.column)?;
            }
            for c in &t.columns_removed {
                writeln!(f, "~ table {}: - column {c}", t.table)?;
            }
        }
        for i in &self.indexes_added {
            writeln!(f, "+ index {} on {}", i.name, i.table)?;
        }
        for i in &self.indexes_removed {
            writeln!(f, "- index {} on {}", i.name, i.table)?;
        }
        for name in &self.tables_removed {
            writeln!(f, "- table {name}")?;
        }
        for name in &self.enums_removed {
            writeln!(f, "- enum {name}")?;
        }
        Ok(())
    }
}

// ================================================================
// Column comparison
// ================================================================

/// Comparison bucket of a desired column's type.
fn generated_bucket(schema: &GeneratedSchema, field: &SchemaField, dialect: Dialect) -> String {
    if dialect.is_mysql_family() && schema.enum_named(&field.field_type).is_some() {
        return ENUM.to_string();
    }
    normalize_type(&resolve_type(field, dialect).0, dialect)
}

fn default_text(default: Option<&FieldDefault>) -> Option<&str> {
    default.map(|d| match d {
        FieldDefault::Value(v) | FieldDefault::Function(v) => v.as_str(),
    })
}

/// Whether the database derives the column's default from a sequence.
fn sequence_backed(field: &SchemaField, resolved_type: &str, live: &LiveColumn) -> bool {
    field.auto_increment
        || live.auto_increment
        || is_serial_type(resolved_type)
        || is_serial_type(live.effective_type())
        || live
            .default
            .as_deref()
            .is_some_and(|d| d.trim_start().to_ascii_lowercase().starts_with("nextval("))
}

fn diff_column(
    schema: &GeneratedSchema,
    table: &GeneratedTable,
    field: &SchemaField,
    live: &LiveColumn,
    dialect: Dialect,
) -> Vec<ColumnChange> {
    let mut changes = Vec::new();

    let generated_type = generated_bucket(schema, field, dialect);
    let live_type = normalize_type(live.effective_type(), dialect);
    if generated_type != live_type {
        changes.push(ColumnChange::Type {
            generated: generated_type.clone(),
            live: live_type.clone(),
        });
    }

    let primary = table.is_primary(field);
    let nullable = field.nullable && !primary;
    if nullable != live.nullable {
        changes.push(ColumnChange::Nullable {
            generated: nullable,
            live: live.nullable,
        });
    }
    if primary != live.primary {
        changes.push(ColumnChange::Primary {
            generated: primary,
            live: live.primary,
        });
    }
    if field.unique != live.unique {
        changes.push(ColumnChange::Unique {
            generated: field.unique,
            live: live.unique,
        });
    }

    let resolved = resolve_type(field, dialect).0;
    if sequence_backed(field, &resolved, live) {
        debug!(table = %table.name(), column = %field.name, "sequence-backed column, skipping default comparison");
    } else {
        let generated_default =
            normalize_default(default_text(field.default.as_ref()), &generated_type);
        let live_default = normalize_default(live.default.as_deref(), &live_type);
        if generated_default != live_default {
            changes.push(ColumnChange::Default {
                generated: generated_default,
                live: live_default,
            });
        }
    }
    changes
}

fn diff_table(
    schema: &GeneratedSchema,
    table: &GeneratedTable,
    live: &LiveTable,
    dialect: Dialect,
) -> TableDiff {
    let generated_names: BTreeSet<&str> = table.fields.iter().map(|f| f.name.as_str()).collect();

    let mut diff = TableDiff {
        table: table.name().to_string(),
        ..TableDiff::default()
    };
    for field in &table.fields {
        match live.column(&field.name) {
            None => diff.columns_added.push(field.name.clone()),
            Some(live_column) => {
                let changes = diff_column(schema, table, field, live_column, dialect);
                if !changes.is_empty() {
                    diff.columns_modified.push(ColumnDiff {
                        column: field.name.clone(),
                        changes,
                    });
                }
            }
        }
    }
    diff.columns_removed = live
        .columns
        .iter()
        .map(|c| c.name.as_str())
        .filter(|name| !generated_names.contains(name))
        .map(str::to_string)
        .collect();
    diff
}

// ================================================================
// Schema-level diff
// ================================================================

/// Whether a live index only backs a key flag on a desired column.
fn implied_index(schema: &GeneratedSchema, index: &LiveIndex) -> bool {
    if index.primary {
        return true;
    }
    if !index.unique || index.columns.len() != 1 {
        return false;
    }
    schema
        .table(&index.table)
        .and_then(|t| t.field(&index.columns[0]).map(|f| (t, f)))
        .is_some_and(|(t, f)| f.unique || t.is_primary(f))
}

/// Value differences between a declared enum and the value lists the
/// database holds for it, one list per enum type or inline column.
fn enum_value_diff(declared: &GlobalEnum, live_lists: &[Vec<String>]) -> Option<EnumDiff> {
    let mut values_added: Vec<String> = Vec::new();
    let mut values_removed: Vec<String> = Vec::new();
    for live_values in live_lists {
        for v in &declared.values {
            if !live_values.contains(v) && !values_added.contains(v) {
                values_added.push(v.clone());
            }
        }
        for v in live_values {
            if !declared.values.contains(v) && !values_removed.contains(v) {
                values_removed.push(v.clone());
            }
        }
    }
    if values_added.is_empty() && values_removed.is_empty() {
        return None;
    }
    Some(EnumDiff {
        name: declared.name.clone(),
        values_added,
        values_removed,
    })
}

/// Inline `enum(...)` value lists of the live columns declared with `enum_name`.
fn inline_enum_values(
    generated: &GeneratedSchema,
    live: &DatabaseSchema,
    enum_name: &str,
) -> Vec<Vec<String>> {
    generated
        .tables
        .iter()
        .filter_map(|table| live.table(table.name()).map(|live_table| (table, live_table)))
        .flat_map(|(table, live_table)| {
            table
                .fields
                .iter()
                .filter(move |field| field.field_type == enum_name)
                .filter_map(move |field| live_table.column(&field.name))
        })
        .filter_map(|column| enum_literal_values(&column.data_type))
        .collect()
}

fn diff_enums(
    generated: &GeneratedSchema,
    live: &DatabaseSchema,
    dialect: Dialect,
    diff: &mut SchemaDiff,
) {
    for e in &generated.enums {
        let changes = match live.enum_named(&e.name) {
            None if dialect.is_mysql_family() => {
                enum_value_diff(e, &inline_enum_values(generated, live, &e.name))
            }
            None => {
                diff.enums_added.push(e.name.clone());
                None
            }
            Some(live_enum) => enum_value_diff(e, std::slice::from_ref(&live_enum.values)),
        };
        diff.enums_modified.extend(changes);
    }
    diff.enums_removed = live
        .enums
        .iter()
        .filter(|e| generated.enum_named(&e.name).is_none())
        .map(|e| e.name.clone())
        .collect();
}

fn diff_indexes(generated: &GeneratedSchema, live: &DatabaseSchema, diff: &mut SchemaDiff) {
    let generated_names: BTreeSet<&str> = generated
        .indexes
        .iter()
        .map(|i| i.index.name.as_str())
        .collect();
    let live_names: BTreeSet<&str> = live.indexes.iter().map(|i| i.name.as_str()).collect();

    diff.indexes_added = generated
        .indexes
        .iter()
        .filter(|i| !live_names.contains(i.index.name.as_str()))
        .map(|i| IndexRef {
            name: i.index.name.clone(),
            table: i.table.clone(),
        })
        .collect();

    for index in &live.indexes {
        if generated_names.contains(index.name.as_str()) {
            continue;
        }
        if implied_index(generated, index) {
            debug!(index = %index.name, table = %index.table, "index backs a key column, not a removal");
            continue;
        }
        if diff.tables_removed.contains(&index.table) {
            debug!(index = %index.name, table = %index.table, "index belongs to a removed table");
            continue;
        }
        diff.indexes_removed.push(IndexRef {
            name: index.name.clone(),
            table: index.table.clone(),
        });
    }
}

/// Compares the desired schema against the live one.
///
/// Added tables keep declaration order; removed objects keep catalog order.
#[must_use]
pub fn diff_schema(generated: &GeneratedSchema, live: &DatabaseSchema, dialect: Dialect) -> SchemaDiff {
    let live_tables: BTreeSet<&str> = live.tables.iter().map(|t| t.name.as_str()).collect();
    let generated_tables: BTreeSet<&str> = generated.tables.iter().map(GeneratedTable::name).collect();

    let mut diff = SchemaDiff::default();
    for table in &generated.tables {
        if !live_tables.contains(table.name()) {
            diff.tables_added.push(table.name().to_string());
            continue;
        }
        if let Some(live_table) = live.table(table.name()) {
            let table_diff = diff_table(generated, table, live_table, dialect);
            if table_diff.has_changes() {
                diff.tables_modified.push(table_diff);
            }
        }
    }
    diff.tables_removed = live
        .tables
        .iter()
        .filter(|t| !generated_tables.contains(t.name.as_str()))
        .map(|t| t.name.clone())
        .collect();

    diff_enums(generated, live, dialect, &mut diff);
    diff_indexes(generated, live, &mut diff);

    debug!(dialect = %dialect, changed = diff.has_changes(), "schema diff computed");
    diff
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{SchemaIndex, SchemaMetadata, TableDirective};

    fn generated() -> GeneratedSchema {
        GeneratedSchema::from_metadata(&SchemaMetadata {
            fields: vec![
                SchemaField::new("User", "id", "INTEGER").primary().auto_increment(),
                SchemaField::new("User", "email", "VARCHAR(255)").not_null().unique(),
                SchemaField::new("User", "active", "BOOLEAN").default_value("true"),
                SchemaField::new("User", "status", "status_enum"),
            ],
            tables: vec![TableDirective::new("User", "users")],
            indexes: vec![SchemaIndex {
                struct_name: String::from("User"),
                name: String::from("idx_users_status"),
                fields: vec![String::from("status")],
                ..SchemaIndex::default()
            }],
            enums: vec![GlobalEnum::new("status_enum", &["draft", "published"])],
            embedded: Vec::new(),
        })
    }

    fn live_users(dialect: Dialect) -> LiveTable {
        let mysql = dialect.is_mysql_family();
        let mut id = LiveColumn::new("id", if mysql { "int(11)" } else { "integer" });
        id.nullable = false;
        id.primary = true;
        id.auto_increment = mysql;
        if !mysql {
            id.default = Some(String::from("nextval('users_id_seq'::regclass)"));
        }
        let mut email = LiveColumn::new("email", if mysql { "varchar(255)" } else { "character varying" });
        email.nullable = false;
        email.unique = true;
        let mut active = LiveColumn::new("active", if mysql { "tinyint(1)" } else { "boolean" });
        active.default = Some(String::from(if mysql { "1" } else { "true" }));
        let status = if mysql {
            LiveColumn::new("status", "enum('draft','published')")
        } else {
            LiveColumn {
                udt_name: Some(String::from("status_enum")),
                ..LiveColumn::new("status", "USER-DEFINED")
            }
        };
        LiveTable {
            name: String::from("users"),
            columns: vec![id, email, active, status],
        }
    }

    fn live(dialect: Dialect) -> DatabaseSchema {
        let mysql = dialect.is_mysql_family();
        DatabaseSchema {
            tables: vec![live_users(dialect)],
            indexes: vec![
                LiveIndex {
                    name: String::from(if mysql { "PRIMARY" } else { "users_pkey" }),
                    table: String::from("users"),
                    columns: vec![String::from("id")],
                    primary: true,
                    unique: true,
                },
                LiveIndex {
                    name: String::from("users_email_key"),
                    table: String::from("users"),
                    columns: vec![String::from("email")],
                    primary: false,
                    unique: true,
                },
                LiveIndex {
                    name: String::from("idx_users_status"),
                    table: String::from("users"),
                    columns: vec![String::from("status")],
                    primary: false,
                    unique: false,
                },
            ],
            enums: if mysql {
                Vec::new()
            } else {
                vec![LiveEnum {
                    name: String::from("status_enum"),
                    values: vec![String::from("draft"), String::from("published")],
                }]
            },
        }
    }

    #[test]
    fn test_in_sync_schema_has_no_changes() {
        for dialect in Dialect::ALL {
            let diff = diff_schema(&generated(), &live(dialect), dialect);
            assert!(!diff.has_changes(), "{dialect}: {diff:?}");
        }
    }

    #[test]
    fn test_mysql_boolean_default_one_matches_true() {
        let diff = diff_schema(&generated(), &live(Dialect::Mysql), Dialect::Mysql);
        assert!(diff.tables_modified.is_empty());
    }

    #[test]
    fn test_null_default_matches_missing_default() {
        let mut live = live(Dialect::Postgres);
        live.tables[0].columns[1].default = Some(String::from("NULL"));
        let diff = diff_schema(&generated(), &live, Dialect::Postgres);
        assert!(!diff.has_changes(), "{diff:?}");
    }

    #[test]
    fn test_table_add_and_remove() {
        let mut live = live(Dialect::Postgres);
        live.tables[0].name = String::from("accounts");
        for index in &mut live.indexes {
            index.table = String::from("accounts");
        }
        let diff = diff_schema(&generated(), &live, Dialect::Postgres);
        assert_eq!(diff.tables_added, ["users"]);
        assert_eq!(diff.tables_removed, ["accounts"]);
        assert!(diff.indexes_removed.is_empty());
        assert_eq!(diff.indexes_added.len(), 0);
    }

    #[test]
    fn test_column_changes_detected() {
        let mut live = live(Dialect::Postgres);
        let users = &mut live.tables[0];
        users.columns.retain(|c| c.name != "active");
        users.columns.push(LiveColumn::new("legacy", "text"));
        users.columns[1].data_type = String::from("text");
        users.columns[1].nullable = true;

        let diff = diff_schema(&generated(), &live, Dialect::Postgres);
        assert_eq!(diff.tables_modified.len(), 1);
        let users = &diff.tables_modified[0];
        assert_eq!(users.columns_added, ["active"]);
        assert_eq!(users.columns_removed, ["legacy"]);
        assert_eq!(users.columns_modified.len(), 1);
        assert_eq!(users.columns_modified[0].column, "email");
        assert_eq!(
            users.columns_modified[0].changes,
            [
                ColumnChange::Type {
                    generated: String::from("varchar"),
                    live: String::from("text"),
                },
                ColumnChange::Nullable {
                    generated: false,
                    live: true,
                },
            ]
        );
    }

    #[test]
    fn test_enum_value_changes() {
        let mut live = live(Dialect::Postgres);
        live.enums[0].values = vec![String::from("draft"), String::from("archived")];
        live.enums.push(LiveEnum {
            name: String::from("old_enum"),
            values: Vec::new(),
        });
        let diff = diff_schema(&generated(), &live, Dialect::Postgres);
        assert_eq!(diff.enums_modified.len(), 1);
        assert_eq!(diff.enums_modified[0].values_added, ["published"]);
        assert_eq!(diff.enums_modified[0].values_removed, ["archived"]);
        assert_eq!(diff.enums_removed, ["old_enum"]);
    }

    #[test]
    fn test_missing_enum_is_added_only_for_postgres() {
        let mut pg = live(Dialect::Postgres);
        pg.enums.clear();
        assert_eq!(
            diff_schema(&generated(), &pg, Dialect::Postgres).enums_added,
            ["status_enum"]
        );
        assert!(diff_schema(&generated(), &live(Dialect::Mysql), Dialect::Mysql)
            .enums_added
            .is_empty());
    }

    #[test]
    fn test_integer_widths_share_a_bucket() {
        let schema = GeneratedSchema::from_metadata(&SchemaMetadata {
            fields: vec![
                SchemaField::new("Counter", "hits", "BIGINT"),
                SchemaField::new("Counter", "rank", "SMALLINT"),
            ],
            tables: vec![TableDirective::new("Counter", "counters")],
            ..SchemaMetadata::default()
        });
        let live = DatabaseSchema {
            tables: vec![LiveTable {
                name: String::from("counters"),
                columns: vec![LiveColumn::new("hits", "integer"), LiveColumn::new("rank", "int4")],
            }],
            ..DatabaseSchema::default()
        };
        let diff = diff_schema(&schema, &live, Dialect::Postgres);
        assert!(!diff.has_changes(), "{diff:?}");
    }

    #[test]
    fn test_mysql_inline_enum_value_drift() {
        for dialect in [Dialect::Mysql, Dialect::Mariadb] {
            let mut live = live(dialect);
            live.tables[0].columns[3].data_type = String::from("enum('draft','archived')");
            let diff = diff_schema(&generated(), &live, dialect);
            assert!(diff.has_changes(), "{dialect}");
            assert!(diff.tables_modified.is_empty(), "{dialect}: {diff:?}");
            assert_eq!(
                diff.enums_modified,
                [EnumDiff {
                    name: String::from("status_enum"),
                    values_added: vec![String::from("published")],
                    values_removed: vec![String::from("archived")],
                }]
            );
        }
    }

    #[test]
    fn test_mysql_inline_enum_reordered_values_match() {
        let mut live = live(Dialect::Mysql);
        live.tables[0].columns[3].data_type = String::from("ENUM('published','draft')");
        let diff = diff_schema(&generated(), &live, Dialect::Mysql);
        assert!(!diff.has_changes(), "{diff:?}");
    }

    #[test]
    fn test_implied_and_stale_indexes() {
        let mut live = live(Dialect::Postgres);
        live.indexes.retain(|i| i.name != "idx_users_status");
        live.indexes.push(LiveIndex {
            name: String::from("idx_users_old"),
            table: String::from("users"),
            columns: vec![String::from("email"), String::from("id")],
            primary: false,
            unique: true,
        });
        let diff = diff_schema(&generated(), &live, Dialect::Postgres);
        assert_eq!(
            diff.indexes_added,
            [IndexRef {
                name: String::from("idx_users_status"),
                table: String::from("users"),
            }]
        );
        assert_eq!(diff.indexes_removed.len(), 1);
        assert_eq!(diff.indexes_removed[0].name, "idx_users_old");
    }

    #[test]
    fn test_diff_serializes_and_displays() {
        let mut live = live(Dialect::Postgres);
        live.tables.clear();
        live.indexes.clear();
        let diff = diff_schema(&generated(), &live, Dialect::Postgres);
        let json = serde_json::to_value(&diff).unwrap();
        assert_eq!(json["tables_added"][0], "users");
        assert!(diff.to_string().contains("+ table users"));
        assert_eq!(SchemaDiff::default().to_string(), "schema is up to date\n");
    }
}
