use super::traits::ConfigSection;
use crate::error::GenesisError;
use serde::{Deserialize, Serialize};

/// Settings of the experiment driver. Unset overrides fall back to the
/// task's own population size and generation cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub population_size: Option<usize>,
    pub max_generations: Option<usize>,
    pub target_fitness: f64,
    pub log_every: usize,
    pub self_discovery_cases: usize,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            population_size: None,
            max_generations: None,
            target_fitness: 1.0,
            log_every: 10,
            self_discovery_cases: 8,
        }
    }
}

impl ConfigSection for ExperimentConfig {
    fn section_name() -> &'static str {
        "experiment"
    }

    fn validate(&self) -> Result<(), GenesisError> {
        if self.population_size == Some(0) {
            return Err(GenesisError::Configuration(
                "Experiment population size must be positive".to_string(),
            ));
        }
        if self.log_every == 0 {
            return Err(GenesisError::Configuration(
                "log_every must be at least 1".to_string(),
            ));
        }
        if self.self_discovery_cases == 0 {
            return Err(GenesisError::Configuration(
                "Self-discovery needs at least one test case".to_string(),
            ));
        }
        if !self.target_fitness.is_finite() {
            return Err(GenesisError::Configuration(
                "Target fitness must be finite".to_string(),
            ));
        }
        Ok(())
    }
}
