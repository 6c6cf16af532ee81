//! Glob expansion of include patterns

use glob::MatchOptions;
use std::path::PathBuf;
use tracing::trace;

use crate::error::{ConfigError, ConfigResult};

/// Turns an include pattern into the files it names
///
/// Order matters: included documents are merged in the order returned.
/// A pattern that matches nothing is an empty list, not an error.
pub trait PathExpander: Send + Sync {
    fn expand(&self, pattern: &str) -> ConfigResult<Vec<PathBuf>>;
}

/// File system globbing via the `glob` crate (matches come back sorted)
///
/// Wildcards never match a leading `.`, so hidden files are only included
/// when the pattern names the dot itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobExpander;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: true,
};

impl PathExpander for GlobExpander {
    fn expand(&self, pattern: &str) -> ConfigResult<Vec<PathBuf>> {
        let paths =
            glob::glob_with(pattern, MATCH_OPTIONS).map_err(|e| ConfigError::InvalidIncludePath {
                path: pattern.to_string(),
                reason: e.to_string(),
            })?;

        let mut files = Vec::new();
        for entry in paths {
            let path = entry.map_err(|e| ConfigError::InvalidIncludePath {
                path: pattern.to_string(),
                reason: e.to_string(),
            })?;
            files.push(path);
        }

        trace!("Pattern {} matched {} paths", pattern, files.len());
        Ok(files)
    }
}

impl<F> PathExpander for F
where
    F: Fn(&str) -> ConfigResult<Vec<PathBuf>> + Send + Sync,
{
    fn expand(&self, pattern: &str) -> ConfigResult<Vec<PathBuf>> {
        self(pattern)
    }
}
