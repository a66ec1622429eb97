use crate::error::GenesisError;
use crate::types::{TestCase, TestSuite};
use clap::ValueEnum;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Built-in circuit discovery benchmarks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Task {
    /// Two-input XOR
    Xor,
    /// Three-bit odd parity
    Parity,
    /// Three-input majority vote
    Majority,
    /// Hidden two-input XOR learned from random samples
    SelfDiscovery,
}

impl Task {
    pub const ALL: [Task; 4] = [Task::Xor, Task::Parity, Task::Majority, Task::SelfDiscovery];

    pub fn as_str(&self) -> &'static str {
        match self {
            Task::Xor => "xor",
            Task::Parity => "parity",
            Task::Majority => "majority",
            Task::SelfDiscovery => "self_discovery",
        }
    }

    pub fn population_size(&self) -> usize {
        match self {
            Task::Xor => 50,
            Task::Parity | Task::Majority => 100,
            Task::SelfDiscovery => 150,
        }
    }

    pub fn max_generations(&self) -> usize {
        match self {
            Task::Xor => 100,
            Task::Parity | Task::Majority => 200,
            Task::SelfDiscovery => 300,
        }
    }

    pub fn input_width(&self) -> usize {
        match self {
            Task::Xor | Task::SelfDiscovery => 2,
            Task::Parity | Task::Majority => 3,
        }
    }

    pub fn target(&self, inputs: &[bool]) -> bool {
        match self {
            Task::Xor | Task::SelfDiscovery => match inputs {
                [a, b, ..] => (*a || *b) && !(*a && *b),
                _ => false,
            },
            Task::Parity => inputs.iter().filter(|&&b| b).count() % 2 == 1,
            Task::Majority => inputs.iter().filter(|&&b| b).count() * 2 > inputs.len(),
        }
    }

    /// Training suite. Self-discovery draws `samples` random inputs, so it
    /// may miss some rows of the truth table; the others are exhaustive.
    pub fn test_suite<R: Rng>(&self, samples: usize, rng: &mut R) -> Result<TestSuite, GenesisError> {
        match self {
            Task::SelfDiscovery => {
                let cases = (0..samples)
                    .map(|_| {
                        let inputs: Vec<bool> =
                            (0..self.input_width()).map(|_| rng.gen_bool(0.5)).collect();
                        let expected = self.target(&inputs);
                        TestCase::new(inputs, expected)
                    })
                    .collect();
                TestSuite::new(cases)
            }
            _ => self.full_truth_table(),
        }
    }

    pub fn full_truth_table(&self) -> Result<TestSuite, GenesisError> {
        TestSuite::truth_table(self.input_width(), |inputs| self.target(inputs))
    }

    /// Whether a solved run should be re-checked against the full truth table.
    pub fn needs_verification(&self) -> bool {
        matches!(self, Task::SelfDiscovery)
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Signal;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn expected_outputs(task: Task) -> Vec<Signal> {
        task.full_truth_table()
            .unwrap()
            .iter()
            .map(|c| c.expected.clone())
            .collect()
    }

    #[test]
    fn test_majority_truth_table() {
        let expected: Vec<Signal> = [false, false, false, true, false, true, true, true]
            .into_iter()
            .map(Signal::Bool)
            .collect();
        assert_eq!(expected_outputs(Task::Majority), expected);
    }

    #[test]
    fn test_parity_truth_table() {
        let expected: Vec<Signal> = [false, true, true, false, true, false, false, true]
            .into_iter()
            .map(Signal::Bool)
            .collect();
        assert_eq!(expected_outputs(Task::Parity), expected);
    }

    #[test]
    fn test_self_discovery_samples_hidden_xor() {
        let mut rng = StdRng::seed_from_u64(12);
        let suite = Task::SelfDiscovery.test_suite(8, &mut rng).unwrap();
        assert_eq!(suite.len(), 8);
        for case in &suite {
            let inputs = match &case.input {
                Signal::Bits(bits) => bits.clone(),
                other => panic!("unexpected input {:?}", other),
            };
            assert_eq!(case.expected, Signal::Bool(inputs[0] != inputs[1]));
        }
    }

    #[test]
    fn test_self_discovery_with_no_samples_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(Task::SelfDiscovery.test_suite(0, &mut rng).is_err());
    }
}
