//! Resolver options
//!
//! Everything that changes how a document is resolved lives here and is
//! passed to the resolver explicitly. Options can be embedded in an
//! application's own config (they deserialize with defaults for missing
//! fields) or read from `YAMLINC_*` environment variables.

use serde::{Deserialize, Serialize};
use serde_yaml::value::Tag;

use crate::error::{ConfigError, ConfigResult};

/// Tag marking a node as an include directive (`!inc/file` in YAML)
pub const DEFAULT_INCLUDE_TAG: &str = "inc/file";

/// Default limit on nested includes
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Environment variable overriding [`ResolverOptions::include_tag`]
pub const ENV_INCLUDE_TAG: &str = "YAMLINC_INCLUDE_TAG";

/// Environment variable overriding [`ResolverOptions::max_depth`]
pub const ENV_MAX_DEPTH: &str = "YAMLINC_MAX_DEPTH";

/// Options controlling include resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverOptions {
    /// Tag name that marks an include directive, with or without the leading `!`
    pub include_tag: String,

    /// Maximum include nesting below the root document
    pub max_depth: usize,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            include_tag: DEFAULT_INCLUDE_TAG.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ResolverOptions {
    /// Defaults overridden by `YAMLINC_INCLUDE_TAG` and `YAMLINC_MAX_DEPTH`
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the `YAMLINC_*` keys
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let mut options = Self::default();

        if let Some(tag) = lookup(ENV_INCLUDE_TAG) {
            options = options.with_include_tag(tag)?;
        }

        if let Some(depth) = lookup(ENV_MAX_DEPTH) {
            options.max_depth = depth
                .trim()
                .parse()
                .map_err(|e| ConfigError::InvalidValue {
                    key: ENV_MAX_DEPTH.to_string(),
                    reason: format!("'{}' is not a non-negative integer: {}", depth, e),
                })?;
        }

        Ok(options)
    }

    /// Replace the include tag
    pub fn with_include_tag(mut self, tag: impl Into<String>) -> ConfigResult<Self> {
        let tag = tag.into();
        if tag.trim_start_matches('!').is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "include_tag".to_string(),
                reason: "tag name must not be empty".to_string(),
            });
        }
        self.include_tag = tag;
        Ok(self)
    }

    /// Replace the nesting limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Whether a parsed tag is the include tag; the leading `!` is ignored
    pub fn is_include_tag(&self, tag: &Tag) -> bool {
        let wanted = self.include_tag.trim_start_matches('!');
        let actual = tag.to_string();
        actual.trim_start_matches('!') == wanted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let options = ResolverOptions::default();
        assert_eq!(options.include_tag, "inc/file");
        assert_eq!(options.max_depth, 32);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let options = ResolverOptions::from_lookup(lookup_from(&[
            (ENV_INCLUDE_TAG, "!include"),
            (ENV_MAX_DEPTH, " 4 "),
        ]))
        .unwrap();
        assert_eq!(options.include_tag, "!include");
        assert_eq!(options.max_depth, 4);
    }

    #[test]
    fn test_from_lookup_rejects_bad_depth() {
        let result = ResolverOptions::from_lookup(lookup_from(&[(ENV_MAX_DEPTH, "deep")]));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_empty_tag_rejected() {
        let result = ResolverOptions::default().with_include_tag("!");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_deserialize_with_missing_fields() {
        let options: ResolverOptions = serde_yaml::from_str("max_depth: 3\n").unwrap();
        assert_eq!(options.max_depth, 3);
        assert_eq!(options.include_tag, DEFAULT_INCLUDE_TAG);
    }

    #[test]
    fn test_tag_matching_ignores_bang() {
        let options = ResolverOptions::default();
        assert!(options.is_include_tag(&Tag::new("inc/file")));
        assert!(options.is_include_tag(&Tag::new("!inc/file")));
        assert!(!options.is_include_tag(&Tag::new("include")));
    }
}
