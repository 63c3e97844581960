//! Runtime settings for the record layer.
//!
//! [`RecordConfig`] is read from `config/activebase.toml` (optional) and from
//! `ACTIVEBASE__*` environment variables, e.g.
//!
//! ```text
//! ACTIVEBASE__PROTECTED_FIELDS=password_hash,api_token
//! ACTIVEBASE__COMMIT_TRACE=false
//! ```
//!
//! The settings are loaded once, on first use, unless the application installs
//! its own with [`install`] beforehand.

use config::{Config, ConfigError, Environment, File, FileFormat};
use once_cell::sync::OnceCell;
use serde::Deserialize;

const CONFIG_FILE: &str = "config/activebase.toml";
const ENV_PREFIX: &str = "ACTIVEBASE";

static GLOBAL: OnceCell<RecordConfig> = OnceCell::new();

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecordConfig {
    /// Field names the serializer drops from every entity, on top of `password`
    #[serde(default)]
    pub protected_fields: Vec<String>,
    /// Emit the `DB execution cycle complete` trace after every commit attempt
    #[serde(default = "default_commit_trace")]
    pub commit_trace: bool,
}

fn default_commit_trace() -> bool {
    true
}

impl Default for RecordConfig {
    fn default() -> Self {
        Self {
            protected_fields: Vec::new(),
            commit_trace: default_commit_trace(),
        }
    }
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("protected_fields")
}

impl RecordConfig {
    /// Load from `config/activebase.toml` (optional) overlaid with env vars.
    ///
    /// A config file that exists but cannot be read or parsed is reported and
    /// skipped; the environment alone is used then.
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(env_source());

        let settings = match builder.build() {
            Ok(settings) => settings,
            Err(err) => {
                if std::path::Path::new(CONFIG_FILE).exists() {
                    log::warn!(
                        "Failed to load {}, falling back to env. Error: {}",
                        CONFIG_FILE,
                        err
                    );
                }
                Config::builder().add_source(env_source()).build().map_err(|env_err| {
                    ConfigError::Message(format!(
                        "Failed to load configuration from file and env: {}, then env-only error: {}",
                        err, env_err
                    ))
                })?
            }
        };

        settings.try_deserialize()
    }

    /// Parse settings from TOML text.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

/// The process-wide settings, loaded on first call.
///
/// A configuration that fails to load is logged and replaced by the defaults.
pub fn global() -> &'static RecordConfig {
    GLOBAL.get_or_init(|| {
        RecordConfig::load().unwrap_or_else(|err| {
            log::warn!("Failed to load activebase configuration, using defaults: {}", err);
            RecordConfig::default()
        })
    })
}

/// Install `config` as the process-wide settings.
///
/// Returns the rejected value if settings were already installed or loaded.
pub fn install(config: RecordConfig) -> Result<(), RecordConfig> {
    GLOBAL.set(config)
}
