//! yamlinc command line tool
//!
//! Resolves each given YAML file with all of its includes and reports the
//! shape of the result. Exits non-zero on the first file that fails.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use yamlinc_config::{supports, IncludeResolver, ResolverOptions, Value};

/// Resolve `!inc/file` includes in YAML configuration files
#[derive(Parser, Debug)]
#[command(name = "yamlinc")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration files to resolve
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Tag marking include directives (overrides YAMLINC_INCLUDE_TAG)
    #[arg(long, value_name = "TAG")]
    tag: Option<String>,

    /// Maximum include nesting (overrides YAMLINC_MAX_DEPTH)
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    fn options(&self) -> Result<ResolverOptions> {
        let options = ResolverOptions::from_env().context("invalid YAMLINC_* environment")?;
        self.apply_overrides(options)
    }

    /// Apply command line flags on top of `options`
    fn apply_overrides(&self, mut options: ResolverOptions) -> Result<ResolverOptions> {
        if let Some(tag) = &self.tag {
            options = options.with_include_tag(tag.clone())?;
        }
        if let Some(depth) = self.max_depth {
            options = options.with_max_depth(depth);
        }
        Ok(options)
    }
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// One-line description of a resolved tree
fn describe(value: &Value) -> String {
    match value {
        Value::Mapping(map) => format!("mapping with {} keys", map.len()),
        Value::Sequence(seq) => format!("sequence with {} items", seq.len()),
        Value::Null => "empty document".to_string(),
        Value::Tagged(tagged) => format!("tagged value {}", tagged.tag),
        _ => "scalar".to_string(),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let options = cli.options()?;
    info!(
        "Resolving {} file(s) with tag '{}' and max depth {}",
        cli.files.len(),
        options.include_tag,
        options.max_depth
    );

    let resolver = IncludeResolver::new(options);
    for file in &cli.files {
        if !supports(file) {
            warn!("{} does not have a .yaml or .yml extension", file.display());
        }

        let value = resolver
            .resolve(file)
            .with_context(|| format!("failed to resolve {}", file.display()))?;
        info!("Resolved {}: {}", file.display(), describe(&value));
    }

    Ok(())
}
