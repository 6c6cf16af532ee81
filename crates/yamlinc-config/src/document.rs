//! YAML document parsing
//!
//! Turns a file into a `serde_yaml::Value` with custom tags preserved as
//! `Value::Tagged`. No include handling happens here. Every call builds
//! a fresh parser, so nothing carries over from one document to the next.

use crate::error::{ConfigError, ConfigResult};
use serde_yaml::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

const UTF8_BOM: char = '\u{feff}';

/// Read and parse a YAML file
pub fn parse_document(path: &Path) -> ConfigResult<Value> {
    if !path.is_file() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        }
        _ => ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    debug!("Read {} bytes from {:?}", bytes.len(), path);

    let content = String::from_utf8(bytes).map_err(|e| ConfigError::Encoding {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_str(&content, path)
}

/// Parse YAML text; `origin` is only used for error reporting
pub fn parse_str(content: &str, origin: &Path) -> ConfigResult<Value> {
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);
    if content.trim().is_empty() {
        return Ok(Value::Null);
    }

    let value: Value = serde_yaml::from_str(content).map_err(|e| {
        let location = e.location();
        ConfigError::Syntax {
            path: origin.to_path_buf(),
            line: location.as_ref().map(|l| l.line()),
            column: location.as_ref().map(|l| l.column()),
            source: e,
        }
    })?;

    trace!("Parsed {:?}", origin);
    Ok(value)
}

/// Whether a path looks like a YAML document (`.yaml` or `.yml`)
pub fn supports(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "yaml" || ext == "yml")
        .unwrap_or(false)
}
