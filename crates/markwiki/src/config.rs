// File: src/config.rs
// Purpose: Configuration parsing from markwiki.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::wiki::GitIdentity;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,

    #[serde(default)]
    pub router: RouterConfig,

    #[serde(default)]
    pub notify: NotifyConfig,

    #[serde(default)]
    pub editor: EditorConfig,

    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub git: GitConfig,
}

/// Bootstrap settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Selector of the element the app mounts onto (default: "#app")
    #[serde(default = "default_mount_target")]
    pub mount_target: String,

    /// Fragment navigated to right after mounting (default: "/")
    #[serde(default = "default_start")]
    pub start: String,

    /// View activated when no route matches (default: "NotFoundView")
    #[serde(default = "default_fallback_view")]
    pub fallback_view: String,
}

/// Routing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Base URL the hash history lives under (default: "/")
    #[serde(default = "default_base")]
    pub base: String,

    /// Whether static segments match case-insensitively (default: true)
    #[serde(default = "default_true")]
    pub case_insensitive: bool,

    /// Whether a trailing slash is significant (default: false)
    #[serde(default = "default_false")]
    pub strict: bool,
}

/// Which notification backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotifyBackend {
    /// Blocking dialog, acknowledged by the user
    #[default]
    Dialog,
    /// Non-blocking queue drained by the host
    Toast,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NotifyConfig {
    #[serde(default)]
    pub backend: NotifyBackend,
}

/// Markdown editor plugin settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Global component name the editor registers under
    #[serde(default = "default_editor_component")]
    pub component: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Where wikis live on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one git repository per wiki (default: "wiki")
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,
}

/// Author recorded in newly created wikis
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GitConfig {
    pub username: Option<String>,
    pub email: Option<String>,
}

impl GitConfig {
    /// Identity for new wikis, when both fields are set
    pub fn identity(&self) -> Option<GitIdentity> {
        match (&self.username, &self.email) {
            (Some(name), Some(email)) => Some(GitIdentity::new(name, email)),
            _ => None,
        }
    }
}

// Default values
fn default_mount_target() -> String {
    "#app".to_string()
}

fn default_start() -> String {
    "/".to_string()
}

fn default_fallback_view() -> String {
    "NotFoundView".to_string()
}

fn default_base() -> String {
    "/".to_string()
}

fn default_editor_component() -> String {
    "mavon-editor".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from("wiki")
}

fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

// Default implementations
impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mount_target: default_mount_target(),
            start: default_start(),
            fallback_view: default_fallback_view(),
        }
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            base: default_base(),
            case_insensitive: true,
            strict: false,
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            component: default_editor_component(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
        }
    }
}

impl Config {
    /// Load configuration from a markwiki.toml
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./markwiki.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("markwiki.toml")
    }
}
