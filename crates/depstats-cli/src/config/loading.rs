use crate::config::{ConfigOverrides, DepstatsConfig};
use crate::error::{ConfigError, Result};
use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
};
use std::path::Path;

/// Config file picked up from the working directory when `--config` is absent.
pub const CONFIG_FILE: &str = "depstats.config.json";

/// Prefix of environment variables read into the configuration.
pub const ENV_PREFIX: &str = "DEPSTATS_";

const ENV_KEYS: &[&str] = &["base_dir", "format", "extensions", "condition_names"];

impl DepstatsConfig {
    /// Load configuration from multiple sources.
    /// Priority: CLI flags > environment variables > config file > defaults
    ///
    /// An explicit `config_path` must exist; the default file is optional.
    /// Relative paths, including the resulting `base_dir`, are taken from `cwd`.
    pub fn load(overrides: &ConfigOverrides, config_path: Option<&Path>, cwd: &Path) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let config_file = match config_path {
            Some(path) => {
                let path = cwd.join(path);
                if !path.is_file() {
                    return Err(ConfigError::NotFound(path).into());
                }
                Some(path)
            }
            None => {
                let default_path = cwd.join(CONFIG_FILE);
                default_path.is_file().then_some(default_path)
            }
        };

        if let Some(path) = config_file {
            tracing::debug!(path = %path.display(), "loading config file");
            figment = figment.merge(Json::file(path));
        }

        // DEPSTATS_BASE_DIR, DEPSTATS_FORMAT, ...
        figment = figment.merge(Env::prefixed(ENV_PREFIX).only(ENV_KEYS).map(|key| {
            match key.as_str() {
                "base_dir" => "baseDir".into(),
                "condition_names" => "conditionNames".into(),
                other => other.to_string().into(),
            }
        }));

        figment = figment.merge(Serialized::defaults(overrides));

        let mut config: Self = figment.extract().map_err(ConfigError::from)?;
        config.base_dir = cwd.join(&config.base_dir);
        config.validate()?;

        Ok(config)
    }
}
