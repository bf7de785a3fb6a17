//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/escalog/escalog.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `ESCALOG_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::services::{LoggerOptions, StartupOptions, WriterOptions};
use crate::application::ApplicationError;

/// Startup routine settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StartupConfig {
    /// Warning logged when the program starts
    pub banner: String,
    /// Recipient of the "started" notification (invalid by default)
    pub recipient: String,
    /// Content of the "started" notification
    pub message: String,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            banner: "Some warning - program is starting up or whatever".into(),
            recipient: "some-invalid-email-address.com".into(),
            message: "Program has started.".into(),
        }
    }
}

/// Unified configuration for escalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory for escalated log files
    pub log_dir: PathBuf,
    /// Suffix appended to the level name, e.g. `Error-log-file.txt`
    pub log_file_suffix: String,
    /// Recipient of escalation and file-creation e-mails
    pub admin_recipient: String,
    /// Notify the admin when a log file had to be created
    pub notify_on_create: bool,
    /// Keep log files read-only between appends
    pub protect_files: bool,
    /// Startup routine settings
    pub startup: StartupConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            log_file_suffix: "-log-file.txt".into(),
            admin_recipient: "admin@example.com".into(),
            notify_on_create: true,
            protect_files: true,
            startup: StartupConfig::default(),
        }
    }
}

/// Default log directory (platform data dir, e.g. ~/.local/share/escalog/logs).
fn default_log_dir() -> PathBuf {
    ProjectDirs::from("", "", "escalog")
        .map(|dirs| dirs.data_local_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

/// Get the XDG config directory for escalog.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "escalog").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("escalog.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}`; unknown variables leave the input as is.
fn expand_env_vars(input: &str) -> String {
    shellexpand::full(input)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| input.to_string())
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; must exist when given
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path().filter(|p| p.exists());
        Self::load_from(global.as_deref(), config_file, true)
    }

    /// Load from explicit sources.
    ///
    /// `global` is optional even when given; `config_file` is required.
    /// `with_env` toggles the `ESCALOG_*` layer.
    pub fn load_from(
        global: Option<&Path>,
        config_file: Option<&Path>,
        with_env: bool,
    ) -> Result<Self, ApplicationError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("log_dir", defaults.log_dir.to_string_lossy().to_string())
            .map_err(config_err)?
            .set_default("log_file_suffix", defaults.log_file_suffix.clone())
            .map_err(config_err)?
            .set_default("admin_recipient", defaults.admin_recipient.clone())
            .map_err(config_err)?
            .set_default("notify_on_create", defaults.notify_on_create)
            .map_err(config_err)?
            .set_default("protect_files", defaults.protect_files)
            .map_err(config_err)?
            .set_default("startup.banner", defaults.startup.banner.clone())
            .map_err(config_err)?
            .set_default("startup.recipient", defaults.startup.recipient.clone())
            .map_err(config_err)?
            .set_default("startup.message", defaults.startup.message.clone())
            .map_err(config_err)?;

        if let Some(path) = global {
            builder = builder.add_source(File::from(path).required(false));
        }
        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(true));
        }
        if with_env {
            builder = builder.add_source(
                Environment::with_prefix("ESCALOG")
                    .prefix_separator("_")
                    .separator("__"),
            );
        }

        let config = builder.build().map_err(config_err)?;
        let mut settings: Self = config.try_deserialize().map_err(config_err)?;

        // Expand ~ and $VAR in path-like fields
        settings.expand_paths();

        Ok(settings)
    }

    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.log_dir.to_string_lossy().as_ref());
        self.log_dir = PathBuf::from(expanded);
    }

    pub fn writer_options(&self) -> WriterOptions {
        WriterOptions {
            admin_recipient: self.admin_recipient.clone(),
            notify_on_create: self.notify_on_create,
            protect_files: self.protect_files,
        }
    }

    pub fn logger_options(&self) -> LoggerOptions {
        LoggerOptions {
            log_dir: self.log_dir.clone(),
            log_file_suffix: self.log_file_suffix.clone(),
            admin_recipient: self.admin_recipient.clone(),
        }
    }

    pub fn startup_options(&self) -> StartupOptions {
        StartupOptions {
            banner: self.startup.banner.clone(),
            recipient: self.startup.recipient.clone(),
            message: self.startup.message.clone(),
        }
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# escalog configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/escalog/escalog.toml
#   Explicit: escalog --config <file>
#   Env:      ESCALOG_* environment variables (ESCALOG_STARTUP__RECIPIENT for nested keys)

# Directory for Warning/Error log files (~ and $VAR are expanded)
# log_dir = "~/.local/share/escalog/logs"

# File name is <Level><suffix>, e.g. Error-log-file.txt
# log_file_suffix = "-log-file.txt"

# Recipient of escalation and file-creation e-mails
# admin_recipient = "admin@example.com"

# Send an e-mail when a log file has to be created
# notify_on_create = true

# Keep log files read-only between appends
# protect_files = true

[startup]
# Warning logged on startup
# banner = "Some warning - program is starting up or whatever"

# Recipient of the "started" notification (must contain @ to succeed)
# recipient = "some-invalid-email-address.com"

# message = "Program has started."
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
