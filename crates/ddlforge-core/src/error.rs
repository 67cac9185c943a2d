//! Error types for schema construction and rendering.

/// Errors that can occur while building or rendering a schema.
///
/// Diffing never fails; only the render side and string parsing of
/// dialect/constraint names produce errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A constraint kind string did not name a known kind.
    #[error("Unknown constraint kind: {0}")]
    UnknownConstraintKind(String),

    /// A dialect string did not name a supported dialect.
    #[error("Unknown dialect: {0}")]
    UnknownDialect(String),

    /// A FOREIGN KEY constraint has no referenced table/column.
    #[error("Foreign key constraint '{constraint}' has no reference")]
    MissingForeignKeyReference {
        /// Constraint name, or the joined column list when unnamed.
        constraint: String,
    },

    /// A CHECK constraint has no expression.
    #[error("Check constraint '{constraint}' has no expression")]
    MissingCheckExpression {
        /// Constraint name, or `<unnamed>`.
        constraint: String,
    },

    /// A PRIMARY KEY, UNIQUE or FOREIGN KEY constraint lists no columns.
    #[error("{kind} constraint has no columns")]
    EmptyConstraintColumns {
        /// SQL keyword of the constraint kind.
        kind: &'static str,
    },

    /// The dialect cannot express an ALTER TABLE operation.
    #[error("{dialect} cannot render alter operation '{operation}'")]
    UnsupportedAlterOperation {
        /// Dialect name.
        dialect: &'static str,
        /// Operation description.
        operation: String,
    },

    /// A statement inside a statement list failed to render.
    #[error("Statement {index} failed: {source}")]
    Statement {
        /// Zero-based position of the failing statement.
        index: usize,
        /// The underlying failure.
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wraps an error with the position of the statement that produced it.
    #[must_use]
    pub fn at_statement(index: usize, source: Self) -> Self {
        Self::Statement {
            index,
            source: Box::new(source),
        }
    }

    /// Returns the innermost error, unwrapping statement positions.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::Statement { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, Error>;
