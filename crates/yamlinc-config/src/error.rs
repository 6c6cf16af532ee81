//! Error types for configuration loading

use std::path::PathBuf;
use std::string::FromUtf8Error;
use thiserror::Error;
use yamlinc_query::QueryError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Root or included file is missing, unreadable, or not a regular file
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Failed to read a file that exists
    #[error("failed to read file {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File content is not valid UTF-8
    #[error("file {} is not valid UTF-8: {source}", path.display())]
    Encoding {
        path: PathBuf,
        #[source]
        source: FromUtf8Error,
    },

    /// Malformed YAML
    #[error("YAML syntax error in {}{}: {source}", path.display(), location_suffix(*line, *column))]
    Syntax {
        path: PathBuf,
        line: Option<usize>,
        column: Option<usize>,
        #[source]
        source: serde_yaml::Error,
    },

    /// Query in an include line failed to compile or evaluate
    #[error("query '{expression}' failed in {}: {source}", path.display())]
    Query {
        path: PathBuf,
        expression: String,
        #[source]
        source: QueryError,
    },

    /// Inclusion-tagged node does not carry a string
    #[error("invalid include directive in {}: {reason}", path.display())]
    InvalidDirective { path: PathBuf, reason: String },

    /// Invalid include path or glob pattern
    #[error("invalid include path '{path}': {reason}")]
    InvalidIncludePath { path: String, reason: String },

    /// Included values cannot be merged together
    #[error("cannot merge included values: expected {expected}, found {found} at position {index}")]
    MergeShape {
        expected: &'static str,
        found: &'static str,
        index: usize,
    },

    /// Circular include detected
    #[error("circular include detected: {}", path.display())]
    CircularInclude { path: PathBuf },

    /// Includes nested deeper than the configured limit
    #[error("include depth limit of {depth} exceeded at {}", path.display())]
    MaxDepthExceeded { depth: usize, path: PathBuf },

    /// Invalid configuration value
    #[error("invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

impl ConfigError {
    /// Path of the file the error refers to, when there is one
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            ConfigError::NotFound { path }
            | ConfigError::ReadFile { path, .. }
            | ConfigError::Encoding { path, .. }
            | ConfigError::Syntax { path, .. }
            | ConfigError::Query { path, .. }
            | ConfigError::InvalidDirective { path, .. }
            | ConfigError::CircularInclude { path }
            | ConfigError::MaxDepthExceeded { path, .. } => Some(path.as_path()),
            _ => None,
        }
    }
}

fn location_suffix(line: Option<usize>, column: Option<usize>) -> String {
    match (line, column) {
        (Some(line), Some(column)) => format!(" at line {} column {}", line, column),
        (Some(line), None) => format!(" at line {}", line),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = ConfigError::NotFound {
            path: PathBuf::from("/cfg/missing.yaml"),
        };
        assert_eq!(err.to_string(), "file not found: /cfg/missing.yaml");
        assert_eq!(err.path(), Some(std::path::Path::new("/cfg/missing.yaml")));
    }

    #[test]
    fn test_syntax_message_includes_line() {
        let source = serde_yaml::from_str::<serde_yaml::Value>("a: [1, 2").unwrap_err();
        let err = ConfigError::Syntax {
            path: PathBuf::from("main.yaml"),
            line: Some(1),
            column: Some(9),
            source,
        };
        assert!(err
            .to_string()
            .starts_with("YAML syntax error in main.yaml at line 1 column 9: "));
    }

    #[test]
    fn test_merge_shape_has_no_path() {
        let err = ConfigError::MergeShape {
            expected: "mapping",
            found: "sequence",
            index: 1,
        };
        assert!(err.path().is_none());
    }
}
