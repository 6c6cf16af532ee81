//! Include resolution
//!
//! Walks a parsed document and replaces every node tagged with the include
//! tag (`!inc/file` by default) by the merged content of the files it
//! names. Included files are resolved the same way before they are merged,
//! so includes nest.
//!
//! ```yaml
//! database: !inc/file db.yaml
//! services: !inc/file |
//!   services/*.yaml
//!   legacy.yaml#services
//! ```

use serde_yaml::Value;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use yamlinc_query::Query;

use crate::directive::InclusionDirective;
use crate::document::{parse_document, parse_str};
use crate::error::{ConfigError, ConfigResult};
use crate::expand::{GlobExpander, PathExpander};
use crate::merge::{merge_items, shape_name};
use crate::options::ResolverOptions;

/// Stand-in file name for documents resolved from a string
const STRING_SOURCE: &str = "<string>";

/// Resolves include directives in YAML documents
///
/// The resolver itself holds no per-document state; every call to
/// [`resolve`](Self::resolve) tracks its own include chain, so one resolver
/// can be shared between threads.
pub struct IncludeResolver {
    options: ResolverOptions,
    expander: Box<dyn PathExpander>,
}

impl IncludeResolver {
    /// Create a resolver that expands patterns with the file system glob
    pub fn new(options: ResolverOptions) -> Self {
        Self {
            options,
            expander: Box::new(GlobExpander),
        }
    }

    /// Replace the pattern expander
    pub fn with_expander(mut self, expander: impl PathExpander + 'static) -> Self {
        self.expander = Box::new(expander);
        self
    }

    /// Load a YAML file and resolve all of its includes
    pub fn resolve(&self, path: impl AsRef<Path>) -> ConfigResult<Value> {
        let mut chain = Vec::new();
        self.resolve_path(path.as_ref(), &mut chain)
    }

    /// Resolve includes in YAML text; relative includes start at `base_dir`
    pub fn resolve_str(&self, content: &str, base_dir: impl AsRef<Path>) -> ConfigResult<Value> {
        let base_dir = base_dir.as_ref();
        let origin = base_dir.join(STRING_SOURCE);

        let mut tree = parse_str(content, &origin)?;
        let mut chain = vec![origin.clone()];
        self.resolve_tree(&mut tree, base_dir, &origin, &mut chain)?;
        Ok(tree)
    }

    /// Get the resolver options
    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    fn resolve_path(&self, path: &Path, chain: &mut Vec<PathBuf>) -> ConfigResult<Value> {
        let path = fs::canonicalize(path).map_err(|_| ConfigError::NotFound {
            path: path.to_path_buf(),
        })?;

        if chain.contains(&path) {
            return Err(ConfigError::CircularInclude { path });
        }

        if chain.len() > self.options.max_depth {
            return Err(ConfigError::MaxDepthExceeded {
                depth: self.options.max_depth,
                path,
            });
        }

        debug!("Loading YAML file: {:?}", path);
        let mut tree = parse_document(&path)?;

        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("/"));

        chain.push(path.clone());
        let result = self.resolve_tree(&mut tree, &base_dir, &path, chain);
        chain.pop();

        result.map(|()| tree)
    }

    /// Replace include nodes below `node` in place
    fn resolve_tree(
        &self,
        node: &mut Value,
        base_dir: &Path,
        source: &Path,
        chain: &mut Vec<PathBuf>,
    ) -> ConfigResult<()> {
        match node {
            Value::Tagged(tagged) if self.options.is_include_tag(&tagged.tag) => {
                let raw = std::mem::take(&mut tagged.value);
                *node = self.expand_directive(raw, base_dir, source, chain)?;
            }
            Value::Tagged(tagged) => {
                trace!("Leaving tag {} untouched in {:?}", tagged.tag, source);
            }
            Value::Sequence(seq) => {
                for item in seq.iter_mut() {
                    self.resolve_tree(item, base_dir, source, chain)?;
                }
            }
            Value::Mapping(map) => {
                for (_, value) in map.iter_mut() {
                    self.resolve_tree(value, base_dir, source, chain)?;
                }
            }
            _ => {}
        }

        Ok(())
    }

    /// Load, narrow and merge everything one directive names
    fn expand_directive(
        &self,
        raw: Value,
        base_dir: &Path,
        source: &Path,
        chain: &mut Vec<PathBuf>,
    ) -> ConfigResult<Value> {
        let raw = match raw {
            Value::String(s) => s,
            Value::Null => String::new(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => {
                return Err(ConfigError::InvalidDirective {
                    path: source.to_path_buf(),
                    reason: format!(
                        "expected a string of include lines, found {}",
                        shape_name(&other)
                    ),
                })
            }
        };

        let directive = InclusionDirective::parse(&raw);
        let mut items = Vec::new();

        for line in directive.lines() {
            let query = line
                .query
                .as_deref()
                .map(|expr| {
                    Query::parse(expr).map_err(|e| ConfigError::Query {
                        path: source.to_path_buf(),
                        expression: expr.to_string(),
                        source: e,
                    })
                })
                .transpose()?;

            let pattern = line.pattern(base_dir)?;
            let files = self.expander.expand(&pattern)?;
            debug!(
                "Include pattern {} in {:?} matched {} files",
                pattern,
                source,
                files.len()
            );

            for file in files {
                let included = self.resolve_path(&file, chain)?;
                let value = match &query {
                    Some(query) => {
                        trace!("Applying query '{}' to {:?}", query, file);
                        query.evaluate(&included).map_err(|e| ConfigError::Query {
                            path: source.to_path_buf(),
                            expression: query.to_string(),
                            source: e,
                        })?
                    }
                    None => included,
                };
                items.push(value);
            }
        }

        merge_items(items)
    }
}

impl Default for IncludeResolver {
    fn default() -> Self {
        Self::new(ResolverOptions::default())
    }
}

impl fmt::Debug for IncludeResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IncludeResolver")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Load a YAML file with include resolution and default options
pub fn resolve_file(path: impl AsRef<Path>) -> ConfigResult<Value> {
    IncludeResolver::default().resolve(path)
}

/// Resolve includes in YAML text with default options
pub fn resolve_yaml_str(content: &str, base_dir: impl AsRef<Path>) -> ConfigResult<Value> {
    IncludeResolver::default().resolve_str(content, base_dir)
}
