//! Type and default normalization for schema comparison.
//!
//! Both sides of a comparison are reduced to canonical buckets through the
//! rule tables below. Rules are tried in order and the first match wins;
//! new dialect quirks are one more row.

use crate::dialect::Dialect;

/// How a type rule matches the upper-cased type string.
#[derive(Debug, Clone, Copy)]
enum Match {
    /// The type starts with this text.
    Prefix(&'static str),
    /// The type's leading word, before any `(` or whitespace, is one of these.
    Word(&'static [&'static str]),
}

impl Match {
    fn matches(self, upper: &str) -> bool {
        match self {
            Self::Prefix(prefix) => upper.starts_with(prefix),
            Self::Word(words) => {
                let word = upper
                    .split(|c: char| c == '(' || c.is_whitespace())
                    .next()
                    .unwrap_or_default();
                words.contains(&word)
            }
        }
    }
}

struct TypeRule {
    matcher: Match,
    bucket: &'static str,
    mysql_family_only: bool,
}

const fn rule(matcher: Match, bucket: &'static str) -> TypeRule {
    TypeRule {
        matcher,
        bucket,
        mysql_family_only: false,
    }
}

const fn mysql_rule(matcher: Match, bucket: &'static str) -> TypeRule {
    TypeRule {
        matcher,
        bucket,
        mysql_family_only: true,
    }
}

/// Bucket for boolean-like types.
pub const BOOLEAN: &str = "boolean";

/// Bucket for enum types on the MySQL family.
pub const ENUM: &str = "enum";

const TYPE_RULES: &[TypeRule] = &[
    rule(Match::Prefix("VARCHAR"), "varchar"),
    rule(Match::Prefix("CHARACTER VARYING"), "varchar"),
    mysql_rule(Match::Word(&["TINYINT"]), BOOLEAN),
    rule(
        Match::Word(&[
            "INT",
            "INTEGER",
            "INT2",
            "INT4",
            "INT8",
            "SMALLINT",
            "MEDIUMINT",
            "BIGINT",
            "SERIAL",
            "SERIAL2",
            "SERIAL4",
            "SERIAL8",
            "SMALLSERIAL",
            "BIGSERIAL",
        ]),
        "integer",
    ),
    rule(Match::Word(&["BOOL", "BOOLEAN"]), BOOLEAN),
    rule(Match::Word(&["DECIMAL", "NUMERIC"]), "decimal"),
    mysql_rule(Match::Prefix("ENUM("), ENUM),
];

/// Reduces a type string to its comparison bucket.
#[must_use]
pub fn normalize_type(data_type: &str, dialect: Dialect) -> String {
    let trimmed = data_type.trim();
    let upper = trimmed.to_ascii_uppercase();
    TYPE_RULES
        .iter()
        .filter(|r| !r.mysql_family_only || dialect.is_mysql_family())
        .find(|r| r.matcher.matches(&upper))
        .map_or_else(|| trimmed.to_ascii_lowercase(), |r| r.bucket.to_string())
}

/// Values of an inline MySQL enum type such as `enum('a','it''s')`.
///
/// Returns `None` when `data_type` is not an `ENUM(...)` literal.
#[must_use]
pub fn enum_literal_values(data_type: &str) -> Option<Vec<String>> {
    let trimmed = data_type.trim();
    if !trimmed.to_ascii_uppercase().starts_with("ENUM(") || !trimmed.ends_with(')') {
        return None;
    }
    let inner = &trimmed["ENUM(".len()..trimmed.len() - 1];

    let mut values = Vec::new();
    let mut current: Option<String> = None;
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        match (&mut current, c) {
            (None, '\'') => current = Some(String::new()),
            (None, _) => {}
            (Some(value), '\'') if chars.peek() == Some(&'\'') => {
                chars.next();
                value.push('\'');
            }
            (Some(_), '\'') => values.extend(current.take()),
            (Some(value), c) => value.push(c),
        }
    }
    Some(values)
}

/// Whether a type auto-increments through a sequence.
#[must_use]
pub fn is_serial_type(data_type: &str) -> bool {
    data_type.trim().to_ascii_uppercase().contains("SERIAL")
}

/// Function-default aliases, matched case-insensitively.
const FUNCTION_ALIASES: &[(&str, &str)] = &[
    ("now()", "current_timestamp"),
    ("current_timestamp()", "current_timestamp"),
    ("current_timestamp", "current_timestamp"),
    ("localtimestamp", "current_timestamp"),
    ("current_date", "current_date"),
    ("curdate()", "current_date"),
];

/// Boolean spellings for boolean-bucket columns.
const BOOLEAN_VALUES: &[(&str, &str)] = &[
    ("1", "true"),
    ("true", "true"),
    ("t", "true"),
    ("b'1'", "true"),
    ("0", "false"),
    ("false", "false"),
    ("f", "false"),
    ("b'0'", "false"),
];

/// Removes a trailing `::type` cast that sits outside any quotes.
fn strip_cast(value: &str) -> &str {
    match value.rfind("::") {
        Some(pos) if !value[pos..].contains('\'') => value[..pos].trim_end(),
        _ => value,
    }
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['\'', '"'] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Reduces a default expression to its comparison form.
///
/// `bucket` is the column's normalized type; boolean buckets fold the
/// spellings of true and false together.
#[must_use]
pub fn normalize_default(value: Option<&str>, bucket: &str) -> String {
    let Some(value) = value else {
        return String::new();
    };
    let value = strip_cast(value.trim());
    let lower = value.to_ascii_lowercase();

    if bucket == BOOLEAN {
        if let Some((_, canonical)) = BOOLEAN_VALUES.iter().find(|(v, _)| *v == lower) {
            return (*canonical).to_string();
        }
    }

    let value = strip_quotes(value);
    let lower = value.to_ascii_lowercase();
    if lower == "null" {
        return String::new();
    }
    if let Some((_, canonical)) = FUNCTION_ALIASES.iter().find(|(alias, _)| *alias == lower) {
        return (*canonical).to_string();
    }
    if bucket == BOOLEAN {
        if let Some((_, canonical)) = BOOLEAN_VALUES.iter().find(|(v, _)| *v == lower) {
            return (*canonical).to_string();
        }
    }
    value.to_string()
}
