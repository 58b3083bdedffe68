//! Configuration loading
//!
//! Every setting is resolved in the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`SONGBOOK_*`)
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing or unreadable config file is not fatal: it is logged and the
//! remaining sources are used.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const ENV_HOST: &str = "SONGBOOK_HOST";
pub const ENV_PORT: &str = "SONGBOOK_PORT";
pub const ENV_DATABASE: &str = "SONGBOOK_DATABASE";
pub const ENV_CONFIG: &str = "SONGBOOK_CONFIG";

/// Longest accepted session lifetime (ten years)
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365 * 10;

/// Values used when nothing else is configured
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub session_ttl_hours: i64,
}

impl CompiledDefaults {
    pub fn for_current_platform() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5780,
            database_path: default_data_folder().join("songbook.db"),
            session_ttl_hours: 24 * 7,
        }
    }
}

/// Contents of `config.toml`; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database: Option<PathBuf>,
    pub session_ttl_hours: Option<i64>,
}

impl TomlConfig {
    /// Parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
}

/// Fully resolved server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub session_ttl_hours: i64,
}

impl ServerConfig {
    /// Resolve configuration from all sources
    pub fn resolve(overrides: &ConfigOverrides) -> Result<Self> {
        let file = match locate_config_file(overrides.config_file.as_deref()) {
            Some(path) => match TomlConfig::load(&path) {
                Ok(cfg) => {
                    debug!("Loaded config file {}", path.display());
                    cfg
                }
                Err(e) => {
                    warn!("Ignoring config file: {}", e);
                    TomlConfig::default()
                }
            },
            None => TomlConfig::default(),
        };

        Self::from_sources(overrides, &file, &CompiledDefaults::for_current_platform())
    }

    /// Merge the individual sources in priority order
    pub fn from_sources(
        overrides: &ConfigOverrides,
        file: &TomlConfig,
        defaults: &CompiledDefaults,
    ) -> Result<Self> {
        let host = overrides
            .host
            .clone()
            .or_else(|| std::env::var(ENV_HOST).ok())
            .or_else(|| file.host.clone())
            .unwrap_or_else(|| defaults.host.clone());

        let port = match overrides.port {
            Some(port) => port,
            None => match std::env::var(ENV_PORT) {
                Ok(raw) => raw
                    .parse::<u16>()
                    .map_err(|_| Error::Config(format!("{} is not a valid port: {}", ENV_PORT, raw)))?,
                Err(_) => file.port.unwrap_or(defaults.port),
            },
        };

        let database_path = overrides
            .database
            .clone()
            .or_else(|| std::env::var(ENV_DATABASE).ok().map(PathBuf::from))
            .or_else(|| file.database.clone())
            .unwrap_or_else(|| defaults.database_path.clone());

        let session_ttl_hours = file.session_ttl_hours.unwrap_or(defaults.session_ttl_hours);
        if !(1..=MAX_SESSION_TTL_HOURS).contains(&session_ttl_hours) {
            return Err(Error::Config(format!(
                "session_ttl_hours must be between 1 and {}, got {}",
                MAX_SESSION_TTL_HOURS, session_ttl_hours
            )));
        }

        Ok(Self {
            host,
            port,
            database_path,
            session_ttl_hours,
        })
    }

    /// `host:port` string for binding the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Find the config file to read, if any.
///
/// An explicit path (CLI or `SONGBOOK_CONFIG`) wins; otherwise the user
/// config directory is tried before `/etc/songbook/config.toml`.
fn locate_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Ok(path) = std::env::var(ENV_CONFIG) {
        return Some(PathBuf::from(path));
    }

    let user_config = dirs::config_dir().map(|d| d.join("songbook").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    let system_config = PathBuf::from("/etc/songbook/config.toml");
    if cfg!(unix) && system_config.exists() {
        return Some(system_config);
    }

    None
}

/// Get OS-dependent default data folder
fn default_data_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/songbook (or /var/lib/songbook for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join("songbook"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/songbook"))
    } else if cfg!(target_os = "macos") {
        // ~/Library/Application Support/songbook
        dirs::data_dir()
            .map(|d| d.join("songbook"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/songbook"))
    } else if cfg!(target_os = "windows") {
        // %LOCALAPPDATA%\songbook
        dirs::data_local_dir()
            .map(|d| d.join("songbook"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\songbook"))
    } else {
        PathBuf::from("./songbook_data")
    }
}
