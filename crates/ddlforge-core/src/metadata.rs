//! Declarative schema metadata.
//!
//! These types describe what the entity definitions ask for: fields,
//! table directives, indexes, global enums and embedded-field directives.
//! They are produced elsewhere (annotation parsing) and consumed by both
//! the render path and the diff path, always through
//! [`GeneratedSchema`](crate::expand::GeneratedSchema) so that embedded
//! fields are expanded exactly once, the same way, for both.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dialect::Dialect;

/// Foreign key referential action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForeignKeyAction {
    /// No action.
    #[serde(rename = "NO ACTION", alias = "no_action")]
    NoAction,
    /// Restrict deletion/update.
    #[serde(rename = "RESTRICT", alias = "restrict")]
    Restrict,
    /// Cascade the operation.
    #[serde(rename = "CASCADE", alias = "cascade")]
    Cascade,
    /// Set to NULL.
    #[serde(rename = "SET NULL", alias = "set_null")]
    SetNull,
    /// Set to default value.
    #[serde(rename = "SET DEFAULT", alias = "set_default")]
    SetDefault,
}

impl ForeignKeyAction {
    /// Returns the SQL representation of the action.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::NoAction => "NO ACTION",
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
        }
    }
}

impl FromStr for ForeignKeyAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('_', " ").to_ascii_uppercase();
        match normalized.as_str() {
            "NO ACTION" => Ok(Self::NoAction),
            "RESTRICT" => Ok(Self::Restrict),
            "CASCADE" => Ok(Self::Cascade),
            "SET NULL" => Ok(Self::SetNull),
            "SET DEFAULT" => Ok(Self::SetDefault),
            _ => Err(format!("unknown referential action: {s}")),
        }
    }
}

/// A column default: either a literal value or a function expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldDefault {
    /// A literal such as `true`, `0` or `'draft'`.
    Value(String),
    /// A generator expression such as `now()`.
    Function(String),
}

/// One field of an entity, mapped to one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaField {
    /// Name of the owning struct.
    pub struct_name: String,
    /// Column name.
    pub name: String,
    /// SQL type as declared.
    #[serde(rename = "type")]
    pub field_type: String,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Whether the column is the primary key.
    pub primary: bool,
    /// Whether the column is UNIQUE.
    pub unique: bool,
    /// Whether the column auto-increments.
    pub auto_increment: bool,
    /// Default value or function.
    pub default: Option<FieldDefault>,
    /// CHECK expression.
    pub check: Option<String>,
    /// Column comment.
    pub comment: Option<String>,
    /// Foreign key target, `table(column)`.
    pub foreign_key: Option<String>,
    /// Foreign key constraint name.
    pub foreign_key_name: Option<String>,
    /// ON DELETE action for the foreign key.
    pub on_delete: Option<ForeignKeyAction>,
    /// ON UPDATE action for the foreign key.
    pub on_update: Option<ForeignKeyAction>,
    /// Per-dialect type overrides.
    pub overrides: BTreeMap<Dialect, String>,
}

impl Default for SchemaField {
    fn default() -> Self {
        Self {
            struct_name: String::new(),
            name: String::new(),
            field_type: String::new(),
            nullable: true,
            primary: false,
            unique: false,
            auto_increment: false,
            default: None,
            check: None,
            comment: None,
            foreign_key: None,
            foreign_key_name: None,
            on_delete: None,
            on_update: None,
            overrides: BTreeMap::new(),
        }
    }
}

impl SchemaField {
    /// Creates a nullable field with the given owner, column name and type.
    #[must_use]
    pub fn new(
        struct_name: impl Into<String>,
        name: impl Into<String>,
        field_type: impl Into<String>,
    ) -> Self {
        Self {
            struct_name: struct_name.into(),
            name: name.into(),
            field_type: field_type.into(),
            ..Self::default()
        }
    }

    /// Marks the field as primary key (and therefore NOT NULL).
    #[must_use]
    pub fn primary(mut self) -> Self {
        self.primary = true;
        self.nullable = false;
        self
    }

    /// Marks the field as NOT NULL.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Marks the field as UNIQUE.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Marks the field as auto-incrementing.
    #[must_use]
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Sets a literal default.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(FieldDefault::Value(value.into()));
        self
    }

    /// Sets a function default.
    #[must_use]
    pub fn default_function(mut self, function: impl Into<String>) -> Self {
        self.default = Some(FieldDefault::Function(function.into()));
        self
    }

    /// Sets the CHECK expression.
    #[must_use]
    pub fn check(mut self, expression: impl Into<String>) -> Self {
        self.check = Some(expression.into());
        self
    }

    /// Sets the column comment.
    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Sets a foreign key target and constraint name.
    #[must_use]
    pub fn foreign_key(mut self, reference: impl Into<String>, name: impl Into<String>) -> Self {
        self.foreign_key = Some(reference.into());
        self.foreign_key_name = Some(name.into());
        self
    }

    /// Sets the ON DELETE action.
    #[must_use]
    pub fn on_delete(mut self, action: ForeignKeyAction) -> Self {
        self.on_delete = Some(action);
        self
    }

    /// Overrides the type for one dialect.
    #[must_use]
    pub fn override_type(mut self, dialect: Dialect, field_type: impl Into<String>) -> Self {
        self.overrides.insert(dialect, field_type.into());
        self
    }

    /// Returns the type to use for `dialect`, honouring overrides.
    #[must_use]
    pub fn type_for(&self, dialect: Dialect) -> &str {
        self.overrides
            .get(&dialect)
            .map_or(self.field_type.as_str(), String::as_str)
    }
}

/// Table-level directive attached to a struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableDirective {
    /// Name of the owning struct.
    pub struct_name: String,
    /// Table name.
    pub name: String,
    /// Table comment.
    pub comment: Option<String>,
    /// Storage engine (MySQL family only).
    pub engine: Option<String>,
    /// Composite primary key columns.
    pub primary_key: Vec<String>,
}

impl TableDirective {
    /// Creates a directive mapping `struct_name` to table `name`.
    #[must_use]
    pub fn new(struct_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            struct_name: struct_name.into(),
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A declared index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaIndex {
    /// Name of the owning struct.
    pub struct_name: String,
    /// Index name.
    pub name: String,
    /// Indexed columns, in order.
    #[serde(alias = "columns")]
    pub fields: Vec<String>,
    /// Whether the index is UNIQUE.
    pub unique: bool,
    /// Index comment.
    pub comment: Option<String>,
    /// Index method hint (`btree`, `gin`, ...).
    pub method: Option<String>,
}

/// A named enumeration shared across tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalEnum {
    /// Enum (type) name.
    pub name: String,
    /// Values in declaration order.
    pub values: Vec<String>,
}

impl GlobalEnum {
    /// Creates an enum from a name and its values.
    #[must_use]
    pub fn new<S: AsRef<str>>(name: impl Into<String>, values: &[S]) -> Self {
        Self {
            name: name.into(),
            values: values.iter().map(|v| v.as_ref().to_string()).collect(),
        }
    }
}

/// How an embedded struct is folded into its owner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EmbeddedMode {
    /// Copy every field of the embedded type into the owner.
    #[default]
    Inline,
    /// Store the embedded value in one JSON column.
    Json,
    /// Store a foreign key to another table.
    Relation,
    /// Store nothing.
    Skip,
}

impl EmbeddedMode {
    /// Parses a mode, falling back to [`EmbeddedMode::Inline`] for unknown strings.
    #[must_use]
    pub fn parse(mode: &str) -> Self {
        match mode.trim().to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            "relation" => Self::Relation,
            "skip" => Self::Skip,
            _ => Self::Inline,
        }
    }

    /// Returns the mode keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::Json => "json",
            Self::Relation => "relation",
            Self::Skip => "skip",
        }
    }
}

impl From<String> for EmbeddedMode {
    fn from(mode: String) -> Self {
        Self::parse(&mode)
    }
}

impl From<EmbeddedMode> for String {
    fn from(mode: EmbeddedMode) -> Self {
        mode.as_str().to_string()
    }
}

impl fmt::Display for EmbeddedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An embedded struct directive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddedField {
    /// Name of the owning struct.
    pub struct_name: String,
    /// Name of the embedded struct type.
    pub embedded_type: String,
    /// Expansion mode.
    pub mode: EmbeddedMode,
    /// Column name prefix (`inline`).
    pub prefix: Option<String>,
    /// Column name (`json`).
    pub name: Option<String>,
    /// Column type (`json`).
    #[serde(rename = "type")]
    pub field_type: Option<String>,
    /// Whether the synthesized column is nullable (`json`, `relation`).
    pub nullable: bool,
    /// Column comment (`json`, `relation`).
    pub comment: Option<String>,
    /// Foreign key column name (`relation`).
    pub field: Option<String>,
    /// Foreign key target, `table(column)` (`relation`).
    pub reference: Option<String>,
    /// ON DELETE action (`relation`).
    pub on_delete: Option<ForeignKeyAction>,
    /// Per-dialect type overrides for the synthesized column.
    pub overrides: BTreeMap<Dialect, String>,
}

impl EmbeddedField {
    /// Creates a directive embedding `embedded_type` into `struct_name`.
    #[must_use]
    pub fn new(
        struct_name: impl Into<String>,
        embedded_type: impl Into<String>,
        mode: EmbeddedMode,
    ) -> Self {
        Self {
            struct_name: struct_name.into(),
            embedded_type: embedded_type.into(),
            mode,
            ..Self::default()
        }
    }
}

/// The full metadata document for one schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaMetadata {
    /// All fields of all structs, including embeddable ones.
    pub fields: Vec<SchemaField>,
    /// Table directives.
    pub tables: Vec<TableDirective>,
    /// Index declarations.
    pub indexes: Vec<SchemaIndex>,
    /// Global enums.
    pub enums: Vec<GlobalEnum>,
    /// Embedded-field directives.
    pub embedded: Vec<EmbeddedField>,
}

impl SchemaMetadata {
    /// Returns the fields declared directly on `struct_name`, in order.
    pub fn fields_of<'a>(&'a self, struct_name: &'a str) -> impl Iterator<Item = &'a SchemaField> {
        self.fields
            .iter()
            .filter(move |f| f.struct_name == struct_name)
    }

    /// Returns the embedded directives owned by `struct_name`, in order.
    pub fn embedded_of<'a>(
        &'a self,
        struct_name: &'a str,
    ) -> impl Iterator<Item = &'a EmbeddedField> {
        self.embedded
            .iter()
            .filter(move |e| e.struct_name == struct_name)
    }

    /// Looks up a global enum by name.
    #[must_use]
    pub fn enum_named(&self, name: &str) -> Option<&GlobalEnum> {
        self.enums.iter().find(|e| e.name == name)
    }
}
