//! YAML configuration loading with file inclusion
//!
//! This crate assembles a configuration that is split across many YAML
//! files. Any node tagged `!inc/file` is replaced by the content of the
//! files its value names:
//!
//! - `!inc/file db.yaml` - Include another file, relative to the current one
//! - `!inc/file conf.d/*.yaml` - Include every match of a glob pattern
//! - `!inc/file base.yaml#servers[0]` - Include only part of a document
//! - a multi-line value includes several patterns, merged in order
//!
//! Included sequences are concatenated and included mappings are merged,
//! later files winning on duplicate keys. Other tags are left untouched.
//!
//! # Example
//!
//! ```ignore
//! use yamlinc_config::{resolve_file, IncludeResolver, ResolverOptions};
//!
//! // Resolve a configuration with default options
//! let config = resolve_file("/etc/app/config.yaml")?;
//!
//! // Or configure the resolver
//! let resolver = IncludeResolver::new(ResolverOptions::default().with_max_depth(8));
//! let config = resolver.resolve("/etc/app/config.yaml")?;
//! ```

mod directive;
mod document;
mod error;
mod expand;
mod merge;
mod options;
mod resolver;

pub use directive::{InclusionDirective, InclusionLine};
pub use document::{parse_document, parse_str, supports};
pub use error::{ConfigError, ConfigResult};
pub use expand::{GlobExpander, PathExpander};
pub use merge::merge_items;
pub use options::{
    ResolverOptions, DEFAULT_INCLUDE_TAG, DEFAULT_MAX_DEPTH, ENV_INCLUDE_TAG, ENV_MAX_DEPTH,
};
pub use resolver::{resolve_file, resolve_yaml_str, IncludeResolver};

// Re-export serde_yaml::Value for convenience
pub use serde_yaml::Value;
