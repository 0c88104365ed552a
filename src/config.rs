//! Application configuration
//!
//! Values are layered: built-in defaults, then a TOML file, then the
//! `HOST`/`PORT`/`APP_NAME`/`APP_VERSION` environment variables, then
//! command line flags. Invalid overrides are logged and ignored, and a
//! configuration that fails validation is replaced by the defaults.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::ConversionError;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 3367;
pub const DEFAULT_APP_NAME: &str = "NextMD";
pub const DEFAULT_APP_VERSION: &str = "1.0.0";

/// Default config file, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "nextmd.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub app_name: String,
    pub app_version: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            app_name: DEFAULT_APP_NAME.to_string(),
            app_version: DEFAULT_APP_VERSION.to_string(),
        }
    }
}

impl Config {
    /// Load config from a TOML file, or return defaults if not found.
    ///
    /// A file that exists but does not parse is reported and replaced by the
    /// defaults.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => {
                    debug!("loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("ignoring malformed config {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => Self::default(),
            Err(e) => {
                warn!("cannot read config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Apply `HOST`, `PORT`, `APP_NAME` and `APP_VERSION` from the environment
    pub fn apply_env(&mut self) {
        self.apply_vars(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any variable source
    ///
    /// Split from [`Config::apply_env`] so the layering can be exercised
    /// without touching the process environment.
    pub fn apply_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup("HOST")
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
        {
            self.host = host;
        }
        if let Some(port) = lookup("PORT") {
            match parse_port(&port) {
                Some(port) => self.port = port,
                None => warn!("invalid PORT={}, keeping port {}", port, self.port),
            }
        }
        if let Some(name) = lookup("APP_NAME").filter(|n| !n.is_empty()) {
            self.app_name = name;
        }
        if let Some(version) = lookup("APP_VERSION").filter(|v| !v.is_empty()) {
            self.app_version = version;
        }
    }

    /// Apply command line overrides
    ///
    /// The port arrives as text so that out-of-range values can be reported
    /// instead of rejected by the argument parser.
    pub fn apply_overrides(&mut self, host: Option<&str>, port: Option<&str>) {
        if let Some(host) = host.map(str::trim).filter(|h| !h.is_empty()) {
            self.host = host.to_string();
            info!("host set to {}", self.host);
        }
        if let Some(port) = port {
            match parse_port(port) {
                Some(port) => {
                    self.port = port;
                    info!("port set to {}", self.port);
                }
                None => warn!(
                    "port {} is not in range 0-65535, keeping {}",
                    port, self.port
                ),
            }
        }
    }

    /// Check the configuration is usable
    ///
    /// # Errors
    ///
    /// `ConversionError::InvalidInput` when the host is empty.
    pub fn validate(&self) -> Result<(), ConversionError> {
        if self.host.trim().is_empty() {
            return Err(ConversionError::InvalidInput(
                "host must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Return `self` when it validates, the defaults otherwise
    ///
    /// The failure is logged as a warning; it never stops a conversion.
    pub fn validated(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(e) => {
                warn!("{}, falling back to default configuration", e);
                Self::default()
            }
        }
    }

    pub fn deployment_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Write the configuration as TOML
    ///
    /// # Errors
    ///
    /// `ConversionError::Io` if the file cannot be written,
    /// `ConversionError::InternalError` if serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), ConversionError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConversionError::InternalError(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content).map_err(|e| {
            ConversionError::Io(format!("failed to save config {}: {}", path.display(), e))
        })?;
        info!("config saved to {}", path.display());
        Ok(())
    }
}

fn parse_port(value: &str) -> Option<u16> {
    value.trim().parse::<u16>().ok()
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Configuration:")?;
        writeln!(f, "  app name:    {}", self.app_name)?;
        writeln!(f, "  app version: {}", self.app_version)?;
        writeln!(f, "  host:        {}", self.host)?;
        writeln!(f, "  port:        {}", self.port)?;
        write!(f, "  url:         {}", self.deployment_url())
    }
}
