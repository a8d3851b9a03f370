//! CLI command implementations.

pub(crate) mod draw;
pub(crate) mod menus;
pub(crate) mod urls;

use std::path::PathBuf;

use clap::Args;
use tm_config::{CliSettings, Config};

use crate::error::CliError;

pub(crate) use draw::DrawArgs;
pub(crate) use menus::MenusArgs;
pub(crate) use urls::UrlsArgs;

/// Options shared by every command.
#[derive(Args)]
pub(crate) struct ConfigArgs {
    /// Path to configuration file (default: auto-discover tm.toml).
    #[arg(short, long, env = "TM_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output (info-level logs).
    #[arg(short, long)]
    pub verbose: bool,

    /// Cache built menu trees (overrides config).
    #[arg(long)]
    cache: Option<bool>,

    /// Disable tree caching.
    #[arg(long, conflicts_with = "cache")]
    no_cache: bool,
}

impl ConfigArgs {
    /// Load configuration with CLI overrides applied.
    pub(crate) fn load(&self) -> Result<Config, CliError> {
        let settings = CliSettings {
            cache_enabled: self.resolve_cache_enabled(),
        };
        let config = Config::load(self.config.as_deref(), Some(&settings))?;
        tracing::info!(
            path = ?config.config_path,
            menus = config.menus.len(),
            cache = config.cache.enabled,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Resolve cache flag from --cache and --no-cache options.
    fn resolve_cache_enabled(&self) -> Option<bool> {
        if self.no_cache {
            Some(false)
        } else {
            self.cache
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(config: Option<PathBuf>, cache: Option<bool>, no_cache: bool) -> ConfigArgs {
        ConfigArgs {
            config,
            verbose: false,
            cache,
            no_cache,
        }
    }

    #[test]
    fn test_resolve_cache_enabled() {
        assert_eq!(args(None, None, false).resolve_cache_enabled(), None);
        assert_eq!(
            args(None, Some(true), false).resolve_cache_enabled(),
            Some(true)
        );
        assert_eq!(args(None, None, true).resolve_cache_enabled(), Some(false));
    }

    #[test]
    fn test_load_explicit_config_applies_cache_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tm.toml");
        std::fs::write(&path, "[[menus]]\nname = \"main\"\n").unwrap();

        let config = args(Some(path.clone()), Some(true), false).load().unwrap();

        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
        assert_eq!(config.menus.len(), 1);
        assert!(config.cache.enabled);
    }

    #[test]
    fn test_load_missing_config_is_error() {
        let dir = tempfile::tempdir().unwrap();

        let result = args(Some(dir.path().join("missing.toml")), None, false).load();

        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
