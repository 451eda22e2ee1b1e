//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables, `ORMFORGE__SECTION__KEY`
//! 3. Config file (`--config`, else the platform config directory)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use ormforge_adapters::{DEFAULT_RUNTIME_PACKAGE, TypeScriptBackend};
use ormforge_core::{
    application::ports::LanguageBackend,
    domain::{CompletionDefaults, Dialect},
};

use crate::error::{CliError, CliResult};

const ENV_PREFIX: &str = "ORMFORGE";
const ENV_SEPARATOR: &str = "__";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Values used when the workspace document does not say.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defaults {
    /// Dialect for a source that has none.
    pub dialect: String,
    /// Target language of the generated code.
    pub language: String,
    /// Package the generated code imports its ORM runtime from.
    pub runtime_package: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            defaults: Defaults {
                dialect: "sqljs".into(),
                language: "typescript".into(),
                runtime_package: DEFAULT_RUNTIME_PACKAGE.into(),
            },
            output: OutputConfig { no_color: false },
        }
    }
}

impl AppConfig {
    /// Layer defaults, the config file and the environment.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required)
    }

    fn load_from(path: &Path, required: bool) -> anyhow::Result<Self> {
        let config = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR))
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        config
            .try_deserialize()
            .context("Configuration has invalid values")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.ormforge.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "ormforge", "ormforge")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".ormforge.toml"))
    }

    /// Look up a single value by its dotted key.
    pub fn get(&self, key: &str) -> CliResult<String> {
        match key {
            "defaults.dialect" => Ok(self.defaults.dialect.clone()),
            "defaults.language" => Ok(self.defaults.language.clone()),
            "defaults.runtime_package" => Ok(self.defaults.runtime_package.clone()),
            "output.no_color" => Ok(self.output.no_color.to_string()),
            _ => Err(CliError::ConfigError {
                message: format!("Unknown config key: '{key}'"),
                source: None,
            }),
        }
    }

    pub fn completion_defaults(&self) -> CliResult<CompletionDefaults> {
        let dialect: Dialect = self.defaults.dialect.parse().map_err(|e| CliError::ConfigError {
            message: format!("defaults.dialect: {e}"),
            source: Some(Box::new(e)),
        })?;
        Ok(CompletionDefaults { dialect })
    }

    /// Backend for `defaults.language`.
    pub fn language_backend(&self) -> CliResult<Arc<dyn LanguageBackend>> {
        match self.defaults.language.to_ascii_lowercase().as_str() {
            "typescript" | "ts" => Ok(Arc::new(TypeScriptBackend::with_runtime_package(
                self.defaults.runtime_package.clone(),
            ))),
            other => Err(CliError::ConfigError {
                message: format!("defaults.language: unsupported language '{other}'"),
                source: None,
            }),
        }
    }
}
