//! Configuration file support for repopulse.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (prefixed with `REPOPULSE_`, e.g., `REPOPULSE_DATABASE_URL`)
//! 3. Config file (~/.config/repopulse/config.toml or ./repopulse.toml)
//! 4. Built-in defaults
//!
//! Example config file:
//! ```toml
//! [database]
//! url = "postgres://localhost/activity"  # default target for --format sql
//! maxopenconns = 15
//! connmaxlifetime = 900                 # seconds
//!
//! [github]
//! token = "ghp_..."  # or REPOPULSE_GITHUB_TOKEN / GITHUB_TOKEN
//! endpoint = "https://api.github.com"
//! ```

use std::path::PathBuf;
use std::time::Duration;

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use directories::ProjectDirs;
use repopulse::PoolOptions;
use serde::Deserialize;

/// Public GitHub API root.
pub const DEFAULT_GITHUB_ENDPOINT: &str = "https://api.github.com";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// GitHub configuration.
    pub github: GitHubConfig,
}

/// Database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Connection string used by `--format sql` when `--output` is absent.
    /// Supports sqlite:// and postgres:// schemes.
    pub url: Option<String>,
    /// Maximum open connections in the pool.
    pub maxopenconns: u32,
    /// Maximum connection lifetime, in seconds.
    pub connmaxlifetime: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            maxopenconns: 15,
            connmaxlifetime: 900,
        }
    }
}

/// GitHub configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// GitHub API token.
    /// Can also be set via REPOPULSE_GITHUB_TOKEN or GITHUB_TOKEN.
    pub token: Option<String>,
    /// API root, for GitHub Enterprise.
    pub endpoint: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            endpoint: DEFAULT_GITHUB_ENDPOINT.to_string(),
        }
    }
}

impl Config {
    /// Load configuration using the config crate's layered approach.
    ///
    /// Sources are loaded in order (later sources override earlier):
    /// 1. Built-in defaults
    /// 2. XDG config file (~/.config/repopulse/config.toml)
    /// 3. Local config file (./repopulse.toml)
    /// 4. Environment variables with REPOPULSE_ prefix
    pub fn load() -> Self {
        let mut builder = ConfigBuilder::builder();

        if let Some(config_path) = Self::default_config_path()
            && config_path.exists()
        {
            tracing::debug!("Loading config from {:?}", config_path);
            builder = builder.add_source(
                File::from(config_path)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        let local_config = PathBuf::from("repopulse.toml");
        if local_config.exists() {
            tracing::debug!("Loading config from ./repopulse.toml");
            builder = builder.add_source(
                File::from(local_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        // e.g., REPOPULSE_DATABASE_MAXOPENCONNS -> database.maxopenconns
        builder = builder.add_source(
            Environment::with_prefix("REPOPULSE")
                .separator("_")
                .try_parsing(true),
        );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<Config>() {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to deserialize config: {}", e);
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to build config: {}", e);
                Config::default()
            }
        }
    }

    /// Get the GitHub token, falling back to the conventional `GITHUB_TOKEN`.
    pub fn github_token(&self) -> Option<String> {
        self.github
            .token
            .clone()
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
            .filter(|token| !token.is_empty())
    }

    /// Pool limits for the output database.
    pub fn pool_options(&self) -> PoolOptions {
        PoolOptions {
            max_connections: self.database.maxopenconns,
            max_lifetime: Duration::from_secs(self.database.connmaxlifetime),
        }
    }

    /// Get the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "repopulse").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
