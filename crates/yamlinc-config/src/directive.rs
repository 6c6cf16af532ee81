//! Include directive decoding
//!
//! The raw string of an include-tagged node holds one include per line:
//!
//! ```text
//! <path-pattern>[#<query>]
//! ```
//!
//! Blank lines are ignored. A pattern that starts with `/` (optionally
//! after a `scheme:/` prefix) is used verbatim, anything else is relative
//! to the directory of the including file.

use regex::Regex;
use std::path::{Path, MAIN_SEPARATOR};
use std::sync::OnceLock;

use crate::error::{ConfigError, ConfigResult};

static ABSOLUTE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn absolute_pattern() -> &'static Regex {
    ABSOLUTE_PATTERN.get_or_init(|| Regex::new(r"^(?:\w+:/)?/").expect("static regex is valid"))
}

/// One `path[#query]` line of a directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InclusionLine {
    /// Glob pattern, relative or absolute
    pub path: String,
    /// Optional query narrowing each matched document
    pub query: Option<String>,
}

impl InclusionLine {
    /// Split a line on its first `#`; `None` when there is no path part
    pub fn parse(line: &str) -> Option<Self> {
        let (path, query) = match line.split_once('#') {
            Some((path, query)) => (path, Some(query)),
            None => (line, None),
        };

        if path.is_empty() {
            return None;
        }

        Some(Self {
            path: path.to_string(),
            query: query.filter(|q| !q.is_empty()).map(str::to_string),
        })
    }

    /// Whether the path is used verbatim instead of joined to the base dir
    pub fn is_absolute(&self) -> bool {
        absolute_pattern().is_match(&self.path)
    }

    /// The glob pattern to expand for this line
    ///
    /// The base directory is escaped so that only the directive's own
    /// wildcards are interpreted.
    pub fn pattern(&self, base_dir: &Path) -> ConfigResult<String> {
        if self.is_absolute() {
            return Ok(self.path.clone());
        }

        let base = base_dir
            .to_str()
            .ok_or_else(|| ConfigError::InvalidIncludePath {
                path: self.path.clone(),
                reason: format!("base directory {:?} is not valid UTF-8", base_dir),
            })?;

        let base = glob::Pattern::escape(base);
        if base.ends_with(MAIN_SEPARATOR) {
            Ok(format!("{}{}", base, self.path))
        } else {
            Ok(format!("{}{}{}", base, MAIN_SEPARATOR, self.path))
        }
    }
}

/// The decoded lines of one include-tagged node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InclusionDirective {
    lines: Vec<InclusionLine>,
}

impl InclusionDirective {
    /// Decode a directive's raw string
    pub fn parse(raw: &str) -> Self {
        let lines = raw
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .filter(|line| !line.is_empty())
            .filter_map(InclusionLine::parse)
            .collect();

        Self { lines }
    }

    /// Lines in directive order
    pub fn lines(&self) -> &[InclusionLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(path: &str, query: Option<&str>) -> InclusionLine {
        InclusionLine {
            path: path.to_string(),
            query: query.map(str::to_string),
        }
    }

    #[test]
    fn test_single_line() {
        let directive = InclusionDirective::parse("a.yaml");
        assert_eq!(directive.lines(), &[line("a.yaml", None)]);
    }

    #[test]
    fn test_multiple_lines_skip_blank() {
        let directive = InclusionDirective::parse("a.yaml\n\nb.yaml#items[0]\n");
        assert_eq!(
            directive.lines(),
            &[line("a.yaml", None), line("b.yaml", Some("items[0]"))]
        );
    }

    #[test]
    fn test_crlf_lines() {
        let directive = InclusionDirective::parse("a.yaml\r\nb.yaml\r\n");
        assert_eq!(directive.lines(), &[line("a.yaml", None), line("b.yaml", None)]);
    }

    #[test]
    fn test_splits_on_first_hash_only() {
        let directive = InclusionDirective::parse("a.yaml#\"odd#key\"");
        assert_eq!(directive.lines(), &[line("a.yaml", Some("\"odd#key\""))]);
    }

    #[test]
    fn test_empty_path_is_skipped() {
        let directive = InclusionDirective::parse("#items\n");
        assert!(directive.is_empty());
    }

    #[test]
    fn test_empty_query_is_absent() {
        let directive = InclusionDirective::parse("a.yaml#");
        assert_eq!(directive.lines(), &[line("a.yaml", None)]);
    }

    #[test]
    fn test_absolute_detection() {
        assert!(line("/etc/x.yaml", None).is_absolute());
        assert!(line("file:///etc/x.yaml", None).is_absolute());
        assert!(line("phar://archive/x.yaml", None).is_absolute());
        assert!(!line("sub/*.yaml", None).is_absolute());
        assert!(!line("./x.yaml", None).is_absolute());
    }

    #[test]
    fn test_relative_pattern_joins_base_dir() {
        let pattern = line("sub/*.yaml", None).pattern(Path::new("/cfg")).unwrap();
        assert_eq!(pattern, format!("/cfg{}sub/*.yaml", MAIN_SEPARATOR));
    }

    #[test]
    fn test_absolute_pattern_is_verbatim() {
        let pattern = line("/etc/x.yaml", None).pattern(Path::new("/cfg")).unwrap();
        assert_eq!(pattern, "/etc/x.yaml");
    }

    #[test]
    fn test_base_dir_wildcards_are_escaped() {
        let pattern = line("*.yaml", None).pattern(Path::new("/cfg[1]")).unwrap();
        assert_eq!(pattern, format!("/cfg[[]1[]]{}*.yaml", MAIN_SEPARATOR));
    }
}
