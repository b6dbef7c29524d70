//! Configuration parsing and validation.
//!
//! The server is configured through a TOML file (default:
//! `./config/origin-ui.toml`). Every section is optional; a missing file
//! falls back to [`Config::minimal`].
//!
//! ```toml
//! [registry]
//! path = "./data/complete-registry.json"
//! search_paths = ["./src/complete-registry.json"]
//! reload_interval_secs = 3600
//!
//! [tools]
//! search_default_limit = 10
//! list_default_limit = 50
//! stats_top_categories = 10
//! install_command = "pnpm dlx shadcn@latest add"
//! site_url = "https://originui.com"
//!
//! [server]
//! bind = "127.0.0.1:7341"
//!
//! [logging]
//! filter = "info"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RegistryConfig {
    #[serde(default = "default_registry_path")]
    pub path: PathBuf,
    /// Tried in order when `path` does not exist.
    #[serde(default)]
    pub search_paths: Vec<PathBuf>,
    /// Re-read the registry on this period while serving.
    #[serde(default)]
    pub reload_interval_secs: Option<u64>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            path: default_registry_path(),
            search_paths: Vec::new(),
            reload_interval_secs: None,
        }
    }
}

impl RegistryConfig {
    /// `path` followed by every search path, then each relative entry
    /// resolved against the executable's directory and its parent.
    pub fn candidates(&self) -> Vec<PathBuf> {
        let configured: Vec<PathBuf> = std::iter::once(self.path.clone())
            .chain(self.search_paths.iter().cloned())
            .collect();
        let bases = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .map(install_bases)
            .unwrap_or_default();
        with_install_bases(configured, &bases)
    }
}

fn install_bases(exe_dir: PathBuf) -> Vec<PathBuf> {
    let parent = exe_dir.parent().map(Path::to_path_buf);
    std::iter::once(exe_dir).chain(parent).collect()
}

fn with_install_bases(configured: Vec<PathBuf>, bases: &[PathBuf]) -> Vec<PathBuf> {
    let mut out = configured.clone();
    for base in bases {
        for path in configured.iter().filter(|p| p.is_relative()) {
            let joined = base.join(path);
            if !out.contains(&joined) {
                out.push(joined);
            }
        }
    }
    out
}

fn default_registry_path() -> PathBuf {
    PathBuf::from("./data/complete-registry.json")
}

#[derive(Debug, Deserialize, Clone)]
pub struct ToolsConfig {
    #[serde(default = "default_search_limit")]
    pub search_default_limit: i64,
    #[serde(default = "default_list_limit")]
    pub list_default_limit: i64,
    #[serde(default = "default_top_categories")]
    pub stats_top_categories: usize,
    #[serde(default = "default_install_command")]
    pub install_command: String,
    #[serde(default = "default_site_url")]
    pub site_url: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            search_default_limit: default_search_limit(),
            list_default_limit: default_list_limit(),
            stats_top_categories: default_top_categories(),
            install_command: default_install_command(),
            site_url: default_site_url(),
        }
    }
}

fn default_search_limit() -> i64 {
    10
}
fn default_list_limit() -> i64 {
    50
}
fn default_top_categories() -> usize {
    10
}
fn default_install_command() -> String {
    "pnpm dlx shadcn@latest add".to_string()
}
fn default_site_url() -> String {
    "https://originui.com".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7341".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    "info".to_string()
}

impl Config {
    /// Built-in defaults, used when no config file is present.
    pub fn minimal() -> Self {
        Self::default()
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

pub fn validate(config: &Config) -> Result<()> {
    if config.tools.search_default_limit < 0 {
        anyhow::bail!("tools.search_default_limit must be >= 0");
    }
    if config.tools.list_default_limit < 0 {
        anyhow::bail!("tools.list_default_limit must be >= 0");
    }
    if config.tools.stats_top_categories == 0 {
        anyhow::bail!("tools.stats_top_categories must be >= 1");
    }
    if config.tools.install_command.trim().is_empty() {
        anyhow::bail!("tools.install_command must not be empty");
    }
    if config.registry.reload_interval_secs == Some(0) {
        anyhow::bail!("registry.reload_interval_secs must be > 0 when set");
    }
    Ok(())
}
