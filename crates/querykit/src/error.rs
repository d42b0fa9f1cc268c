//! Error types for querykit

use thiserror::Error;

/// Result type alias for querykit operations
pub type QueryKitResult<T> = Result<T, QueryKitError>;

/// A structural invariant that a [`Statement`](crate::Statement) failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A SELECT clause is present but no FROM clause is.
    #[error("SELECT query requires a FROM clause")]
    SelectWithoutFrom,

    /// An UPDATE clause is present without any SET clause.
    #[error("UPDATE query requires a SET clause")]
    UpdateWithoutSet,

    /// A DELETE clause is present together with an explicit FROM clause.
    #[error("DELETE query should not have a FROM clause explicitly")]
    DeleteWithFrom,

    /// A sort direction other than ASC or DESC was supplied.
    #[error("invalid sort order '{0}', expected ASC or DESC")]
    InvalidSortOrder(String),
}

/// Error types for statement construction and execution
#[derive(Debug, Clone, Error)]
pub enum QueryKitError {
    /// Statement failed structural validation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// The database failed to run a rendered statement
    #[error("Execution error: {0}")]
    Execution(String),

    /// Invalid or incomplete configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl QueryKitError {
    /// Create a connection error
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create an execution error
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a connection error
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Check if this is an execution error
    pub fn is_execution(&self) -> bool {
        matches!(self, Self::Execution(_))
    }

    /// The violated invariant, if this is a validation error.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

/// Driver failures collapse into a single execution kind, keeping only the message.
impl From<tokio_postgres::Error> for QueryKitError {
    fn from(err: tokio_postgres::Error) -> Self {
        match err.as_db_error() {
            Some(db_err) => Self::Execution(format!("{}: {}", db_err.code().code(), db_err.message())),
            None => Self::Execution(err.to_string()),
        }
    }
}
