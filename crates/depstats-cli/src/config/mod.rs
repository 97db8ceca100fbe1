//! Configuration for the depstats CLI with multi-source loading.
//!
//! Priority: CLI > Environment (`DEPSTATS_*`) > File (`depstats.config.json`) > Defaults

mod defaults;
mod loading;

use depstats::ResolveConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;

pub use defaults::*;
pub use loading::{CONFIG_FILE, ENV_PREFIX};

/// How `analyze` prints its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable package table
    #[default]
    Table,
    /// Pretty-printed JSON of the full result
    Json,
}

/// depstats configuration - loaded from depstats.config.json, the
/// environment, and CLI flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DepstatsConfig {
    /// Directory module paths are relative to; relative values are taken
    /// from the current directory
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    /// Output format for `analyze`
    #[serde(default)]
    pub format: OutputFormat,

    /// Extensions tried when resolving a module path without one
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// `exports` conditions used when resolving
    #[serde(default = "default_condition_names")]
    pub condition_names: Vec<String>,
}

impl Default for DepstatsConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            format: OutputFormat::default(),
            extensions: default_extensions(),
            condition_names: default_condition_names(),
        }
    }
}

impl DepstatsConfig {
    /// Resolver options for the native runtime.
    pub fn to_resolve_config(&self) -> ResolveConfig {
        ResolveConfig {
            extensions: self.extensions.clone(),
            condition_names: self.condition_names.clone(),
            ..ResolveConfig::default()
        }
    }

    /// Check values serde cannot reject on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ext) = self.extensions.iter().find(|ext| !ext.starts_with('.')) {
            return Err(ConfigError::InvalidValue {
                field: "extensions".to_string(),
                value: ext.clone(),
                hint: "Extensions need a leading dot, e.g. \".js\"".to_string(),
            });
        }

        if self.condition_names.iter().any(|name| name.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "conditionNames".to_string(),
                value: format!("{:?}", self.condition_names),
                hint: "Condition names cannot be empty strings".to_string(),
            });
        }

        Ok(())
    }
}

/// Values taken from command-line flags. Unset fields leave lower layers
/// untouched.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
}
