//! Error types for ytql

use crate::condition::Operator;
use crate::value::TypeTag;
use thiserror::Error;

/// Result type alias for ytql operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors raised while composing a query or a row modification.
///
/// Every variant is a construction-time contract violation: it is returned from the
/// builder call that introduced the problem, never deferred to `build()`.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A temporal value was supplied without a declared type
    #[error("Missing declared type for temporal value: {column} {operator}")]
    MissingDeclaredType { column: String, operator: Operator },

    /// A temporal value was declared with a type that has no integer encoding
    #[error("Unsupported declared type {declared} for temporal value on column '{column}'")]
    UnsupportedTemporalType { column: String, declared: TypeTag },

    /// IN with an empty collection
    #[error("Empty IN list for column '{column}'")]
    EmptyInList { column: String },

    /// Only one side of a disjunction carries a declared type
    #[error("Disjunction ({left} OR {right}) mixes typed and untyped temporal values")]
    DisjunctionTypeMismatch { left: String, right: String },

    /// The declared type does not agree with the value
    #[error("Type mismatch on column '{column}': {message}")]
    TypeMismatch { column: String, message: String },

    /// A table path with no renderable name
    #[error("Invalid table path: '{0}'")]
    InvalidTable(String),

    /// A column reference used where exactly one column is expected
    #[error("Column reference on '{table}' must name exactly one column, got [{columns}]")]
    AmbiguousColumn { table: String, columns: String },

    /// A column that is not declared in the table schema
    #[error("Unknown column '{column}' in table '{table}'")]
    UnknownColumn { table: String, column: String },

    /// A required (non-optional) column is absent or null in a row
    #[error("Column '{column}' of table '{table}' is required")]
    MissingRequiredColumn { table: String, column: String },

    /// Row mapping error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl QueryError {
    /// Create a type mismatch error for a specific column
    pub fn type_mismatch(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TypeMismatch {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Check if this error comes from a temporal value without a usable declared type
    pub fn is_missing_type(&self) -> bool {
        matches!(
            self,
            Self::MissingDeclaredType { .. } | Self::DisjunctionTypeMismatch { .. }
        )
    }

    /// Check if this is an empty IN list error
    pub fn is_empty_in_list(&self) -> bool {
        matches!(self, Self::EmptyInList { .. })
    }

    /// The column the error is about, when there is one.
    pub fn column(&self) -> Option<&str> {
        match self {
            Self::MissingDeclaredType { column, .. }
            | Self::UnsupportedTemporalType { column, .. }
            | Self::EmptyInList { column }
            | Self::TypeMismatch { column, .. }
            | Self::UnknownColumn { column, .. }
            | Self::MissingRequiredColumn { column, .. } => Some(column),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for QueryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
