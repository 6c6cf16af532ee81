//! Error types for queries

use thiserror::Error;

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;

/// A query that could not be compiled or evaluated
#[derive(Debug, Error)]
pub enum QueryError {
    /// Syntax or runtime error reported by the JMESPath engine
    #[error(transparent)]
    Engine(#[from] jmespath::JmespathError),

    /// The query result has no YAML representation
    #[error("query result could not be converted to YAML: {0}")]
    Convert(#[from] serde_yaml::Error),
}
