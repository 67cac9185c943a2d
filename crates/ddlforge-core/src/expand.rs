//! Embedded-field expansion and the expanded ("generated") schema.
//!
//! [`GeneratedSchema::from_metadata`] is the only place where embedded
//! directives are folded into their owners. Both the forward path
//! ([`crate::builder::convert`]) and the differ read the result, so what
//! gets rendered and what gets compared can never drift apart.

use heck::ToSnakeCase;
use tracing::debug;

use crate::dialect::Dialect;
use crate::metadata::{
    EmbeddedField, EmbeddedMode, GlobalEnum, SchemaField, SchemaIndex, SchemaMetadata,
    TableDirective,
};

/// Default type of a `json` embedded column.
const JSON_COLUMN_TYPE: &str = "JSONB";

/// JSON type for the MySQL family, which has no JSONB.
const MYSQL_JSON_COLUMN_TYPE: &str = "JSON";

/// Type of a `relation` column whose reference looks non-numeric.
const TEXT_KEY_TYPE: &str = "TEXT";

/// Type of a `relation` column whose reference looks numeric.
const INTEGER_KEY_TYPE: &str = "INTEGER";

/// Reference substrings that suggest a non-integer key.
const TEXT_KEY_HINTS: &[&str] = &["uuid", "char", "text", "string"];

/// Embedded types nested deeper than this are ignored (guards cycles).
const MAX_EMBED_DEPTH: usize = 8;

/// Expands one embedded directive into the fields it contributes to its owner.
///
/// Missing mode-specific attributes never error: a `relation` without a
/// target field or reference contributes nothing.
#[must_use]
pub fn expand_embedded(meta: &SchemaMetadata, embedded: &EmbeddedField) -> Vec<SchemaField> {
    expand_at_depth(meta, embedded, 0)
}

fn expand_at_depth(meta: &SchemaMetadata, embedded: &EmbeddedField, depth: usize) -> Vec<SchemaField> {
    match embedded.mode {
        EmbeddedMode::Inline => expand_inline(meta, embedded, depth),
        EmbeddedMode::Json => vec![expand_json(embedded)],
        EmbeddedMode::Relation => expand_relation(embedded).into_iter().collect(),
        EmbeddedMode::Skip => Vec::new(),
    }
}

fn expand_inline(meta: &SchemaMetadata, embedded: &EmbeddedField, depth: usize) -> Vec<SchemaField> {
    if depth >= MAX_EMBED_DEPTH {
        debug!(
            owner = %embedded.struct_name,
            embedded = %embedded.embedded_type,
            "embedding too deep, skipping"
        );
        return Vec::new();
    }

    let prefix = embedded.prefix.as_deref().unwrap_or_default();
    struct_fields(meta, &embedded.embedded_type, depth + 1)
        .into_iter()
        .map(|mut field| {
            field.struct_name.clone_from(&embedded.struct_name);
            field.name = format!("{prefix}{}", field.name);
            field
        })
        .collect()
}

fn expand_json(embedded: &EmbeddedField) -> SchemaField {
    let name = embedded
        .name
        .clone()
        .unwrap_or_else(|| format!("{}_data", embedded.embedded_type.to_snake_case()));

    let mut field = SchemaField::new(
        embedded.struct_name.clone(),
        name,
        embedded
            .field_type
            .clone()
            .unwrap_or_else(|| JSON_COLUMN_TYPE.to_string()),
    );
    field.nullable = embedded.nullable;
    field.comment.clone_from(&embedded.comment);
    field.overrides.clone_from(&embedded.overrides);

    if embedded.field_type.is_none() {
        for dialect in [Dialect::Mysql, Dialect::Mariadb] {
            field
                .overrides
                .entry(dialect)
                .or_insert_with(|| MYSQL_JSON_COLUMN_TYPE.to_string());
        }
    }
    field
}

fn expand_relation(embedded: &EmbeddedField) -> Option<SchemaField> {
    let column = embedded.field.as_deref().filter(|f| !f.is_empty());
    let reference = embedded.reference.as_deref().filter(|r| !r.is_empty());
    let (Some(column), Some(reference)) = (column, reference) else {
        debug!(
            owner = %embedded.struct_name,
            embedded = %embedded.embedded_type,
            "relation without field or reference, skipping"
        );
        return None;
    };

    let lowered = reference.to_ascii_lowercase();
    let key_type = if TEXT_KEY_HINTS.iter().any(|hint| lowered.contains(hint)) {
        TEXT_KEY_TYPE
    } else {
        INTEGER_KEY_TYPE
    };

    let mut field = SchemaField::new(embedded.struct_name.clone(), column, key_type);
    field.nullable = embedded.nullable;
    field.comment.clone_from(&embedded.comment);
    field.overrides.clone_from(&embedded.overrides);
    field.foreign_key = Some(reference.to_string());
    field.foreign_key_name = Some(format!(
        "fk_{}_{}",
        embedded.struct_name.to_snake_case(),
        column.to_snake_case()
    ));
    field.on_delete = embedded.on_delete;
    Some(field)
}

/// Returns every column field of `struct_name`: its own fields followed by
/// the expansion of each of its embedded directives, in declaration order.
#[must_use]
pub fn fields_for_struct(meta: &SchemaMetadata, struct_name: &str) -> Vec<SchemaField> {
    struct_fields(meta, struct_name, 0)
}

fn struct_fields(meta: &SchemaMetadata, struct_name: &str, depth: usize) -> Vec<SchemaField> {
    let mut fields: Vec<SchemaField> = meta.fields_of(struct_name).cloned().collect();
    for embedded in meta.embedded_of(struct_name) {
        fields.extend(expand_at_depth(meta, embedded, depth));
    }
    fields
}

/// One table after expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedTable {
    /// The table directive.
    pub directive: TableDirective,
    /// Fields with primary-key fields first, each group in declaration order.
    pub fields: Vec<SchemaField>,
}

impl GeneratedTable {
    /// Table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.directive.name
    }

    /// Looks up a field by column name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Whether `field` belongs to the primary key, either by its own flag
    /// or through the directive's key list.
    #[must_use]
    pub fn is_primary(&self, field: &SchemaField) -> bool {
        field.primary || self.directive.primary_key.iter().any(|c| *c == field.name)
    }

    /// The directive's key list when it spans more than one column.
    #[must_use]
    pub fn composite_primary_key(&self) -> Option<&[String]> {
        (self.directive.primary_key.len() > 1).then_some(self.directive.primary_key.as_slice())
    }
}

/// An index resolved to its table name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedIndex {
    /// Table the index belongs to.
    pub table: String,
    /// The index declaration.
    pub index: SchemaIndex,
}

/// The desired schema after embedded-field expansion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedSchema {
    /// Tables in directive order.
    pub tables: Vec<GeneratedTable>,
    /// Indexes whose owning struct has a table.
    pub indexes: Vec<GeneratedIndex>,
    /// Global enums in declaration order.
    pub enums: Vec<GlobalEnum>,
}

impl GeneratedSchema {
    /// Expands `meta` into per-table field lists.
    #[must_use]
    pub fn from_metadata(meta: &SchemaMetadata) -> Self {
        let tables = meta
            .tables
            .iter()
            .map(|directive| {
                let fields = fields_for_struct(meta, &directive.struct_name);
                let mut table = GeneratedTable {
                    directive: directive.clone(),
                    fields: Vec::new(),
                };
                let (primary, rest): (Vec<_>, Vec<_>) =
                    fields.into_iter().partition(|f| table.is_primary(f));
                table.fields = primary.into_iter().chain(rest).collect();
                table
            })
            .collect::<Vec<_>>();

        let indexes = meta
            .indexes
            .iter()
            .filter_map(|index| {
                let Some(directive) = meta.tables.iter().find(|t| t.struct_name == index.struct_name)
                else {
                    debug!(index = %index.name, owner = %index.struct_name, "index owner has no table, skipping");
                    return None;
                };
                Some(GeneratedIndex {
                    table: directive.name.clone(),
                    index: index.clone(),
                })
            })
            .collect();

        Self {
            tables,
            indexes,
            enums: meta.enums.clone(),
        }
    }

    /// Looks up a table by name.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&GeneratedTable> {
        self.tables.iter().find(|t| t.name() == name)
    }

    /// Looks up an enum by name.
    #[must_use]
    pub fn enum_named(&self, name: &str) -> Option<&GlobalEnum> {
        self.enums.iter().find(|e| e.name == name)
    }
}
