use thiserror::Error;

/// Core error type shared across querydb crates.
///
/// `Connection` and `Introspection` are fatal for a run. `Query` is the only
/// kind a preview recovers from.
#[derive(Debug, Error)]
pub enum Error {
    /// The database could not be reached or rejected the session.
    #[error("connection error: {0}")]
    Connection(String),
    /// Catalog queries failed.
    #[error("introspection error: {0}")]
    Introspection(String),
    /// A preview query against one table failed.
    #[error("Error querying table '{table}': {message}")]
    Query { table: String, message: String },
    /// Configuration could not be parsed or is inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a query error for `table` from any displayable cause.
    pub fn query(table: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Error::Query {
            table: table.into(),
            message: cause.to_string(),
        }
    }

    /// Whether a preview may report this error and carry on.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Query { .. })
    }
}

/// Convenience alias for results returned by querydb crates.
pub type Result<T> = std::result::Result<T, Error>;
