use super::traits::{check_probability, ConfigSection};
use crate::engines::generation::gate::{MAX_MEMORY_SIZE, MIN_MEMORY_SIZE};
use crate::error::GenesisError;
use serde::{Deserialize, Serialize};

/// Rates and bounds of the structural mutation operators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationConfig {
    /// Fraction of cloned gates passed through gate-level mutation.
    pub gate_mutation_rate: f64,
    pub add_gate_probability: f64,
    /// No gate is added once a circuit holds this many.
    pub max_gates: usize,
    pub remove_gate_probability: f64,
    /// No gate is removed unless a circuit holds more than this many.
    pub min_gates: usize,
    /// Upper bound (inclusive) of random rewiring attempts per offspring.
    pub max_rewirings: usize,
    pub connect_probability: f64,
    pub input_drop_probability: f64,
    pub function_swap_probability: f64,
    pub memory_mutation_probability: f64,
    pub memory_step: usize,
    pub default_memory_size: usize,
    pub min_memory_size: usize,
    pub max_memory_size: usize,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            gate_mutation_rate: 0.2,
            add_gate_probability: 0.3,
            max_gates: 20,
            remove_gate_probability: 0.1,
            min_gates: 3,
            max_rewirings: 4,
            connect_probability: 0.5,
            input_drop_probability: 0.3,
            function_swap_probability: 0.2,
            memory_mutation_probability: 0.3,
            memory_step: 2,
            default_memory_size: 5,
            min_memory_size: 1,
            max_memory_size: 20,
        }
    }
}

impl MutationConfig {
    pub fn clamp_memory_size(&self, size: usize) -> usize {
        size.clamp(self.min_memory_size, self.max_memory_size)
    }
}

impl ConfigSection for MutationConfig {
    fn section_name() -> &'static str {
        "mutation"
    }

    fn validate(&self) -> Result<(), GenesisError> {
        let section = Self::section_name();
        check_probability(section, "gate_mutation_rate", self.gate_mutation_rate)?;
        check_probability(section, "add_gate_probability", self.add_gate_probability)?;
        check_probability(section, "remove_gate_probability", self.remove_gate_probability)?;
        check_probability(section, "connect_probability", self.connect_probability)?;
        check_probability(section, "input_drop_probability", self.input_drop_probability)?;
        check_probability(section, "function_swap_probability", self.function_swap_probability)?;
        check_probability(
            section,
            "memory_mutation_probability",
            self.memory_mutation_probability,
        )?;
        if self.min_gates == 0 {
            return Err(GenesisError::Configuration(
                "Circuits need at least one gate".to_string(),
            ));
        }
        if self.min_memory_size < MIN_MEMORY_SIZE
            || self.max_memory_size > MAX_MEMORY_SIZE
            || self.min_memory_size > self.max_memory_size
        {
            return Err(GenesisError::Configuration(format!(
                "Memory size bounds [{}, {}] are invalid",
                self.min_memory_size, self.max_memory_size
            )));
        }
        if !(self.min_memory_size..=self.max_memory_size).contains(&self.default_memory_size) {
            return Err(GenesisError::Configuration(format!(
                "Default memory size {} outside [{}, {}]",
                self.default_memory_size, self.min_memory_size, self.max_memory_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(MutationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_probability_out_of_range_rejected() {
        let config = MutationConfig {
            add_gate_probability: 1.5,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("add_gate_probability"));
    }

    #[test]
    fn test_memory_bounds_beyond_gate_limits_rejected() {
        let config = MutationConfig {
            max_memory_size: 40,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_clamp_memory_size() {
        let config = MutationConfig::default();
        assert_eq!(config.clamp_memory_size(0), 1);
        assert_eq!(config.clamp_memory_size(25), 20);
        assert_eq!(config.clamp_memory_size(7), 7);
    }
}
