use super::{
    evolution::EvolutionConfig, experiment::ExperimentConfig, mutation::MutationConfig,
    traits::ConfigSection,
};
use crate::error::GenesisError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// Prefix of environment overrides, e.g. `GENESIS__EVOLUTION__POPULATION_SIZE=80`.
pub const ENV_PREFIX: &str = "GENESIS";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub evolution: EvolutionConfig,
    pub mutation: MutationConfig,
    pub experiment: ExperimentConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), GenesisError> {
        self.evolution.validate()?;
        self.mutation.validate()?;
        self.experiment.validate()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GenesisError> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            GenesisError::Configuration(format!(
                "Failed to read config {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let config: AppConfig = toml::from_str(&contents)?;
        self.replace(config)
    }

    /// Load defaults, then the optional file, then `GENESIS__*` environment overrides.
    pub fn load_layered<P: AsRef<Path>>(&self, path: Option<P>) -> Result<(), GenesisError> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path.as_ref()).required(true));
        }
        let settings = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        self.replace(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), GenesisError> {
        let toml_str = toml::to_string_pretty(&self.get())?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Apply `f` to a copy and commit it only if the result validates.
    pub fn update<F>(&self, f: F) -> Result<(), GenesisError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.get();
        f(&mut candidate);
        self.replace(candidate)
    }

    fn replace(&self, config: AppConfig) -> Result<(), GenesisError> {
        config.validate()?;
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = config;
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejected_update_keeps_previous_config() {
        let manager = ConfigManager::new();
        let result = manager.update(|c| c.evolution.population_size = 0);
        assert!(result.is_err());
        assert_eq!(manager.get().evolution.population_size, 50);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("[mutation]\nmax_gates = 12\n").unwrap();
        assert_eq!(config.mutation.max_gates, 12);
        assert_eq!(config.mutation.min_gates, 3);
        assert_eq!(config.evolution, EvolutionConfig::default());
    }
}
