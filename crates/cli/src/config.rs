use anyhow::{Context, Result};
use tracing::debug;

use manualqa_core::config::{load_dotenv, Config};

use crate::cli::CliArgs;

/// Resolve configuration for this run.
/// Priority: command-line flag > profiled env var > env var > default.
pub fn load(args: &CliArgs) -> Result<Config> {
    load_dotenv();
    let mut config = match args.profile.as_deref() {
        Some(profile) => Config::for_profile(profile),
        None => Config::from_env(),
    };
    apply_overrides(&mut config, args);
    config.validate().context("invalid configuration")?;
    config.log_summary();
    Ok(config)
}

fn apply_overrides(config: &mut Config, args: &CliArgs) {
    if let Some(dir) = &args.pdf_dir {
        debug!(pdf_dir = %dir.display(), "Overriding PDF directory");
        config.paths.pdf_dir = dir.clone();
    }
    if let Some(dir) = &args.index_dir {
        debug!(index_dir = %dir.display(), "Overriding index directory");
        config.paths.index_dir = dir.clone();
    }
}

/// k for a request: the flag when given, otherwise the configured default.
pub fn resolve_k(flag: Option<u8>, config: &Config) -> usize {
    flag.map(usize::from).unwrap_or(config.llm.default_k)
}
