use super::traits::{check_probability, ConfigSection};
use crate::error::GenesisError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    /// Elite slots per generation are `population_size / elite_divisor`.
    pub elite_divisor: usize,
    pub tournament_size: usize,
    pub min_initial_gates: usize,
    /// Exclusive upper bound.
    pub max_initial_gates: usize,
    /// Initial wiring attempts per gate.
    pub wiring_factor: usize,
    pub adaptive_gate_ratio: f64,
    pub complexity_penalty: f64,
    pub parallel_evaluation: bool,
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            elite_divisor: 10,
            tournament_size: 3,
            min_initial_gates: 3,
            max_initial_gates: 8,
            wiring_factor: 2,
            adaptive_gate_ratio: 0.5,
            complexity_penalty: 0.001,
            parallel_evaluation: false,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    pub fn elite_count(&self) -> usize {
        self.population_size / self.elite_divisor
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), GenesisError> {
        if self.population_size == 0 {
            return Err(GenesisError::Configuration(
                "Population size must be positive".to_string(),
            ));
        }
        if self.elite_divisor == 0 {
            return Err(GenesisError::Configuration(
                "Elite divisor must be positive".to_string(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(GenesisError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        if self.min_initial_gates == 0 || self.min_initial_gates >= self.max_initial_gates {
            return Err(GenesisError::Configuration(format!(
                "Initial gate range [{}, {}) is empty or starts at zero",
                self.min_initial_gates, self.max_initial_gates
            )));
        }
        check_probability(Self::section_name(), "adaptive_gate_ratio", self.adaptive_gate_ratio)?;
        if self.complexity_penalty < 0.0 {
            return Err(GenesisError::Configuration(
                "Complexity penalty must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = EvolutionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.elite_count(), 5);
    }

    #[test]
    fn test_elite_count_uses_integer_division() {
        let config = EvolutionConfig {
            population_size: 9,
            ..Default::default()
        };
        assert_eq!(config.elite_count(), 0);
    }

    #[test]
    fn test_zero_population_rejected() {
        let config = EvolutionConfig {
            population_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_gate_range_rejected() {
        let config = EvolutionConfig {
            min_initial_gates: 5,
            max_initial_gates: 5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
