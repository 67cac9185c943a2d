//! Column nodes.

use crate::metadata::{FieldDefault, ForeignKeyAction};

/// A column default: a literal value or a function call, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    /// Literal text as written in metadata (`true`, `0`, `'draft'`).
    Literal(String),
    /// Function expression (`now()`, `gen_random_uuid()`).
    Function(String),
}

impl From<&FieldDefault> for DefaultValue {
    fn from(default: &FieldDefault) -> Self {
        match default {
            FieldDefault::Value(v) => Self::Literal(v.clone()),
            FieldDefault::Function(f) => Self::Function(f.clone()),
        }
    }
}

/// A foreign key target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyRef {
    /// Referenced table.
    pub table: String,
    /// Referenced column.
    pub column: String,
    /// Constraint name.
    pub name: Option<String>,
    /// ON DELETE action.
    pub on_delete: Option<ForeignKeyAction>,
    /// ON UPDATE action.
    pub on_update: Option<ForeignKeyAction>,
}

impl ForeignKeyRef {
    /// Creates a reference to `table(column)`.
    #[must_use]
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            name: None,
            on_delete: None,
            on_update: None,
        }
    }

    /// Parses a reference string, best effort.
    ///
    /// Accepts `table(column)`, `table.column` and a bare `table`
    /// (meaning `table(id)`). Returns `None` only when no table name
    /// can be recovered.
    #[must_use]
    pub fn parse(reference: &str) -> Option<Self> {
        let reference = reference.trim();
        let (table, column) = if let Some((table, rest)) = reference.split_once('(') {
            let column = rest.split(')').next().unwrap_or_default();
            (table, column)
        } else if let Some((table, column)) = reference.split_once('.') {
            (table, column)
        } else {
            (reference, "")
        };

        let table = table.trim();
        if table.is_empty() {
            return None;
        }
        let column = match column.trim() {
            "" => "id",
            c => c,
        };
        Some(Self::new(table, column))
    }

    /// Sets the constraint name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the ON DELETE action.
    #[must_use]
    pub fn on_delete(mut self, action: ForeignKeyAction) -> Self {
        self.on_delete = Some(action);
        self
    }

    /// Sets the ON UPDATE action.
    #[must_use]
    pub fn on_update(mut self, action: ForeignKeyAction) -> Self {
        self.on_update = Some(action);
        self
    }
}

/// A column definition.
///
/// Flags are only reachable through the constructor methods, which keep
/// the node consistent: a primary column is always NOT NULL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNode {
    name: String,
    data_type: String,
    nullable: bool,
    primary: bool,
    unique: bool,
    auto_increment: bool,
    default: Option<DefaultValue>,
    check: Option<String>,
    comment: Option<String>,
    foreign_key: Option<ForeignKeyRef>,
}

impl ColumnNode {
    /// Creates a nullable column.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            nullable: true,
            primary: false,
            unique: false,
            auto_increment: false,
            default: None,
            check: None,
            comment: None,
            foreign_key: None,
        }
    }

    /// Marks the column as PRIMARY KEY, which also makes it NOT NULL.
    #[must_use]
    pub fn primary(mut self) -> Self {
        self.primary = true;
        self.nullable = false;
        self
    }

    /// Marks the column as NOT NULL.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Marks the column as nullable. Ignored for primary key columns.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        if !self.primary {
            self.nullable = true;
        }
        self
    }

    /// Marks the column as UNIQUE.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Marks the column as auto-incrementing.
    #[must_use]
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Sets a literal default, replacing any function default.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(DefaultValue::Literal(value.into()));
        self
    }

    /// Sets a function default, replacing any literal default.
    #[must_use]
    pub fn default_function(mut self, function: impl Into<String>) -> Self {
        self.default = Some(DefaultValue::Function(function.into()));
        self
    }

    /// Sets the default from an existing value.
    #[must_use]
    pub fn with_default(mut self, default: Option<DefaultValue>) -> Self {
        self.default = default;
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

    /// Sets a foreign key reference.
    #[must_use]
    pub fn foreign_key(mut self, reference: ForeignKeyRef) -> Self {
        self.foreign_key = Some(reference);
        self
    }

    /// Drops PRIMARY KEY and UNIQUE, keeping NOT NULL and every other
    /// attribute.
    #[must_use]
    pub fn without_keys(mut self) -> Self {
        self.primary = false;
        self.unique = false;
        self
    }

    /// Replaces the type, keeping every other attribute.
    #[must_use]
    pub fn with_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = data_type.into();
        self
    }

    /// Column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column type as it will be rendered.
    #[must_use]
    pub fn data_type(&self) -> &str {
        &self.data_type
    }

    /// Whether the column accepts NULL.
    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Whether the column is the primary key.
    #[must_use]
    pub const fn is_primary(&self) -> bool {
        self.primary
    }

    /// Whether the column is UNIQUE.
    #[must_use]
    pub const fn is_unique(&self) -> bool {
        self.unique
    }

    /// Whether the column auto-increments.
    #[must_use]
    pub const fn is_auto_increment(&self) -> bool {
        self.auto_increment
    }

    /// Default value, if any.
    #[must_use]
    pub const fn default(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    /// CHECK expression, if any.
    #[must_use]
    pub fn check_expression(&self) -> Option<&str> {
        self.check.as_deref()
    }

    /// Column comment, if any.
    #[must_use]
    pub fn comment_text(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Foreign key reference, if any.
    #[must_use]
    pub const fn foreign_key_ref(&self) -> Option<&ForeignKeyRef> {
        self.foreign_key.as_ref()
    }
}
