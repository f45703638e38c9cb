//! Configuration management for subchat.
//!
//! Loads configuration from ${SUBCHAT_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::theme::Theme;

/// Env override for the GraphQL endpoint.
pub const GRAPHQL_URL_ENV: &str = "SUBCHAT_GRAPHQL_URL";

/// Env override for the auth service endpoint.
pub const AUTH_URL_ENV: &str = "SUBCHAT_AUTH_URL";

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Merges user config values into the default template.
///
/// This ensures new comments/sections from the template are always present,
/// while preserving user's customized values.
fn merge_with_template(user_config: &str) -> Result<String> {
    use toml_edit::DocumentMut;

    let mut doc: DocumentMut = default_config_template()
        .parse()
        .context("Failed to parse default config template")?;
    let user_doc: DocumentMut = user_config.parse().context("Failed to parse user config")?;

    merge_items(doc.as_table_mut(), user_doc.as_table());

    Ok(doc.to_string())
}

/// Recursively merges items from source table into target table.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source.iter() {
        match value {
            Item::Value(v) => {
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    target[key] = Item::Table(src_table.clone());
                }
            }
            Item::ArrayOfTables(src_arr) => {
                target[key] = Item::ArrayOfTables(src_arr.clone());
            }
            Item::None => {}
        }
    }
}

pub mod paths {
    //! Path resolution for subchat configuration and data directories.
    //!
    //! SUBCHAT_HOME resolution order:
    //! 1. SUBCHAT_HOME environment variable (if set)
    //! 2. ~/.config/subchat (default)

    use std::path::PathBuf;

    /// Returns the subchat home directory.
    pub fn subchat_home() -> PathBuf {
        if let Ok(home) = std::env::var("SUBCHAT_HOME")
            && !home.trim().is_empty()
        {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("subchat"))
            .unwrap_or_else(|| PathBuf::from(".subchat"))
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        subchat_home().join("config.toml")
    }

    /// Returns the path to the persisted auth session.
    pub fn session_path() -> PathBuf {
        subchat_home().join("session.json")
    }

    /// Returns the directory for log files.
    pub fn logs_dir() -> PathBuf {
        subchat_home().join("logs")
    }
}

/// Backend (Nhost project) location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub subdomain: String,
    pub region: String,
    /// Explicit GraphQL endpoint; wins over subdomain/region.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graphql_url: Option<String>,
    /// Explicit auth endpoint; wins over subdomain/region.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_url: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            subdomain: "local".to_string(),
            region: "local".to_string(),
            graphql_url: None,
            auth_url: None,
        }
    }
}

impl BackendConfig {
    /// Resolves the GraphQL endpoint.
    ///
    /// Resolution order:
    /// 1. `SUBCHAT_GRAPHQL_URL` env var (if set and non-empty)
    /// 2. `graphql_url` from config
    /// 3. `https://<subdomain>.graphql.<region>.nhost.run/v1`
    pub fn graphql_url(&self) -> Result<Url> {
        resolve_url(
            std::env::var(GRAPHQL_URL_ENV).ok().as_deref(),
            self.graphql_url.as_deref(),
            &self.service_url("graphql"),
            "GraphQL",
        )
    }

    /// Resolves the auth service endpoint (same order as `graphql_url`).
    pub fn auth_url(&self) -> Result<Url> {
        resolve_url(
            std::env::var(AUTH_URL_ENV).ok().as_deref(),
            self.auth_url.as_deref(),
            &self.service_url("auth"),
            "auth",
        )
    }

    fn service_url(&self, service: &str) -> String {
        format!(
            "https://{}.{service}.{}.nhost.run/v1",
            self.subdomain, self.region
        )
    }
}

/// Picks the first non-empty candidate and validates it as a URL.
pub fn resolve_url(
    env_value: Option<&str>,
    config_value: Option<&str>,
    default_url: &str,
    service_name: &str,
) -> Result<Url> {
    let chosen = [env_value, config_value]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|candidate| !candidate.is_empty())
        .unwrap_or(default_url);

    Url::parse(chosen).with_context(|| format!("Invalid {service_name} URL: {chosen}"))
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Saved theme preference (None = follow the terminal).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,

    /// Log filter directive (e.g. "info", "subchat_core=debug").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Backend endpoints.
    pub backend: BackendConfig,
}

impl Config {
    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Creates the config file from the commented template.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Saves only the theme field to the config file.
    pub fn save_theme(theme: Theme) -> Result<()> {
        Self::save_theme_to(&paths::config_path(), theme)
    }

    /// Saves only the theme field to a specific config file path.
    ///
    /// Creates the file with default template if it doesn't exist.
    /// If file exists, merges user values into the latest template.
    pub fn save_theme_to(path: &Path, theme: Theme) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        let contents = if path.exists() {
            let user_config = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            merge_with_template(&user_config)?
        } else {
            default_config_template().to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        doc["theme"] = value(theme.as_str());

        Self::write_config(path, &doc.to_string())
    }

    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}
