//! Configuration management for tree menus.
//!
//! Parses `tm.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories. Without a config
//! file, built-in demo routes and menus are used.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Layout
//!
//! ```toml
//! [cache]
//! enabled = true
//!
//! [[routes]]
//! namespace = "tree_menu"
//! prefix = ""
//! urls = [{ name = "pricing", path = "catalog/pricing/" }]
//!
//! [[menus]]
//! name = "main_menu"
//! items = [
//!     { key = "catalog", title = "Catalog", url = "/catalog/", order = 10 },
//!     { key = "pricing", title = "Pricing", named_url = "tree_menu:pricing", parent = "catalog" },
//! ]
//! ```
//!
//! ## Environment Variable Expansion
//!
//! Route prefixes, route paths and item URLs support environment variable
//! expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Bare `$VAR` is left as written.

mod expand;

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override cache enabled flag.
    pub cache_enabled: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "tm.toml";

/// Routes and menus used when no config file exists.
const DEMO_CONFIG: &str = include_str!("demo.toml");

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tree cache configuration.
    pub cache: CacheConfig,
    /// Named route groups.
    pub routes: Vec<RouteGroupConfig>,
    /// Menu definitions.
    pub menus: Vec<MenuConfig>,

    /// Path to the config file (set after loading, `None` for the demo config).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Tree cache configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Keep built menu trees between draws.
    pub enabled: bool,
}

/// Group of named routes mounted under a prefix and namespace.
#[derive(Debug, Deserialize)]
pub struct RouteGroupConfig {
    /// Namespace joined to route names with `:` (empty for none).
    #[serde(default)]
    pub namespace: String,
    /// Path prefix, relative, without a leading slash.
    #[serde(default)]
    pub prefix: String,
    /// Routes in this group.
    #[serde(default)]
    pub urls: Vec<RouteConfig>,
}

/// A named route.
#[derive(Debug, Deserialize)]
pub struct RouteConfig {
    /// Route name.
    pub name: String,
    /// Path pattern, relative, without a leading slash.
    pub path: String,
}

/// Menu definition.
#[derive(Debug, Deserialize)]
pub struct MenuConfig {
    /// System name used to draw the menu.
    pub name: String,
    /// Human-readable name.
    #[serde(default)]
    pub verbose_name: String,
    /// Wrap all items in a single dropdown.
    #[serde(default)]
    pub render_as_dropdown: bool,
    /// Dropdown title, used when `render_as_dropdown` is set.
    #[serde(default)]
    pub dropdown_title: String,
    /// Menu items in any order.
    #[serde(default)]
    pub items: Vec<MenuItemConfig>,
}

/// Menu item definition.
#[derive(Debug, Deserialize)]
pub struct MenuItemConfig {
    /// Key referenced by `parent` of other items in the same menu.
    pub key: String,
    /// Display title.
    pub title: String,
    /// Key of the parent item.
    #[serde(default)]
    pub parent: Option<String>,
    /// Route name; takes precedence over `url`.
    #[serde(default)]
    pub named_url: String,
    /// Explicit URL.
    #[serde(default)]
    pub url: String,
    /// Sort position among siblings.
    #[serde(default)]
    pub order: u32,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`menus.main_menu.items.home.url`").
        field: String,
        /// Error message (e.g., "${`DOCS_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a route path to be relative.
fn require_relative(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "{field} must not start with '/'"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `tm.toml` in current directory and parents,
    /// falling back to the built-in demo configuration.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or if parsing,
    /// expansion or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            tracing::info!("No {CONFIG_FILENAME} found, using demo menus");
            Self::demo()?
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Built-in demo configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the embedded configuration fails to parse or validate.
    pub fn demo() -> Result<Self, ConfigError> {
        Self::from_toml(DEMO_CONFIG)
    }

    /// Parse, expand and validate configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, expansion or validation fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.expand_env_vars()?;
        config.validate()?;
        Ok(config)
    }

    /// Look up a menu definition by name.
    #[must_use]
    pub fn menu(&self, name: &str) -> Option<&MenuConfig> {
        self.menus.iter().find(|menu| menu.name == name)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(cache_enabled) = settings.cache_enabled {
            self.cache.enabled = cache_enabled;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_config_from(current)
    }

    fn discover_config_from(mut current: PathBuf) -> Option<PathBuf> {
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;
        config.config_path = Some(path.to_path_buf());
        tracing::debug!(path = %path.display(), menus = config.menus.len(), "Loaded config");
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_routes()?;
        self.validate_menus()?;
        Ok(())
    }

    /// Validate route groups.
    fn validate_routes(&self) -> Result<(), ConfigError> {
        for group in &self.routes {
            require_relative(&group.prefix, "routes.prefix")?;
            for route in &group.urls {
                require_non_empty(&route.name, "routes.urls.name")?;
                if route.name.contains(':') {
                    return Err(ConfigError::Validation(format!(
                        "routes.urls.name '{}' must not contain ':'",
                        route.name
                    )));
                }
                require_relative(&route.path, &format!("routes.urls.{}.path", route.name))?;
            }
        }
        Ok(())
    }

    /// Validate menu definitions.
    fn validate_menus(&self) -> Result<(), ConfigError> {
        let mut names = HashSet::new();
        for menu in &self.menus {
            require_non_empty(&menu.name, "menus.name")?;
            if !names.insert(menu.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate menu name '{}'",
                    menu.name
                )));
            }
            menu.validate_items()?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        for group in &mut self.routes {
            group.prefix = expand::expand_env(&group.prefix, "routes.prefix")?;
            for route in &mut group.urls {
                let field = format!("routes.urls.{}.path", route.name);
                route.path = expand::expand_env(&route.path, &field)?;
            }
        }

        for menu in &mut self.menus {
            for item in &mut menu.items {
                let field = format!("menus.{}.items.{}.url", menu.name, item.key);
                item.url = expand::expand_env(&item.url, &field)?;
            }
        }

        Ok(())
    }
}

impl MenuConfig {
    /// Validate item keys and parent references.
    fn validate_items(&self) -> Result<(), ConfigError> {
        let mut keys = HashSet::new();
        for item in &self.items {
            require_non_empty(&item.key, &format!("menus.{}.items.key", self.name))?;
            require_non_empty(
                &item.title,
                &format!("menus.{}.items.{}.title", self.name, item.key),
            )?;
            if !keys.insert(item.key.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate item key '{}' in menu '{}'",
                    item.key, self.name
                )));
            }
        }

        for item in &self.items {
            let Some(parent) = &item.parent else {
                continue;
            };
            if parent == &item.key {
                return Err(ConfigError::Validation(format!(
                    "item '{}' in menu '{}' cannot be its own parent",
                    item.key, self.name
                )));
            }
            if !keys.contains(parent.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "item '{}' in menu '{}' has unknown parent '{parent}'",
                    item.key, self.name
                )));
            }
        }

        self.validate_parent_chains()
    }

    /// Reject parent references that loop back on themselves.
    fn validate_parent_chains(&self) -> Result<(), ConfigError> {
        let parents: HashMap<&str, &str> = self
            .items
            .iter()
            .filter_map(|item| Some((item.key.as_str(), item.parent.as_deref()?)))
            .collect();

        for item in &self.items {
            let mut visited = HashSet::from([item.key.as_str()]);
            let mut current = item.key.as_str();
            while let Some(&parent) = parents.get(current) {
                if !visited.insert(parent) {
                    return Err(ConfigError::Validation(format!(
                        "item '{}' in menu '{}' is part of a parent cycle",
                        item.key, self.name
                    )));
                }
                current = parent;
            }
        }

        Ok(())
    }
}
