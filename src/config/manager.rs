use super::{genome::GenomeConfig, mutation::MutationConfig, traits::ConfigSection};
use crate::error::GepError;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// Environment variables with this prefix override file settings, e.g.
/// `GEP_MUTATION__NUM_MUTATIONS=4`.
pub const DEFAULT_ENV_PREFIX: &str = "GEP";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub genome: GenomeConfig,
    pub mutation: MutationConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), GepError> {
        self.genome.validate()?;
        self.mutation.validate()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
    env_prefix: String,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_env_prefix(DEFAULT_ENV_PREFIX)
    }

    pub fn with_env_prefix(prefix: &str) -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
            env_prefix: prefix.to_string(),
        }
    }

    /// Load a TOML file layered under environment overrides, validate it and
    /// make it current.
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GepError> {
        let source = File::from(path.as_ref()).format(FileFormat::Toml).required(true);
        self.load(source)
    }

    /// Same as [`ConfigManager::load_from_file`] for in-memory TOML
    pub fn load_from_str(&self, contents: &str) -> Result<(), GepError> {
        self.load(File::from_str(contents, FileFormat::Toml))
    }

    fn load<S>(&self, source: S) -> Result<(), GepError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config: AppConfig = Config::builder()
            .add_source(source)
            .add_source(
                Environment::with_prefix(&self.env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        log::debug!("Loaded [{}] {:?}", GenomeConfig::section_name(), config.genome);
        log::debug!("Loaded [{}] {:?}", MutationConfig::section_name(), config.mutation);

        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Apply `f` to the current config; the change is kept only if the
    /// result validates.
    pub fn update<F>(&self, f: F) -> Result<(), GepError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.config.write().unwrap_or_else(PoisonError::into_inner);
        let mut candidate = config.clone();
        f(&mut candidate);
        candidate.validate()?;
        *config = candidate;
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
