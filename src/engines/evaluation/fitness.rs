use crate::engines::generation::circuit::{write_circuit, Circuit, SharedCircuit, DEFAULT_COMPLEXITY_PENALTY};
use crate::types::TestSuite;

/// Fitness function bound to one test suite: accuracy minus a parsimony
/// penalty per unit of total circuit complexity.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator {
    suite: TestSuite,
    complexity_penalty: f64,
}

impl FitnessEvaluator {
    pub fn new(suite: TestSuite) -> Self {
        Self::with_penalty(suite, DEFAULT_COMPLEXITY_PENALTY)
    }

    pub fn with_penalty(suite: TestSuite, complexity_penalty: f64) -> Self {
        Self {
            suite,
            complexity_penalty,
        }
    }

    pub fn suite(&self) -> &TestSuite {
        &self.suite
    }

    pub fn complexity_penalty(&self) -> f64 {
        self.complexity_penalty
    }

    pub fn evaluate(&self, circuit: &mut Circuit) -> f64 {
        circuit.evaluate_with_penalty(&self.suite, self.complexity_penalty)
    }

    /// Evaluate under the circuit's write lock; evaluation updates adaptive
    /// memory and the cached fitness.
    pub fn score(&self, circuit: &SharedCircuit) -> f64 {
        self.evaluate(&mut write_circuit(circuit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::generation::circuit::share;
    use crate::engines::generation::gate::Gate;
    use crate::functions::FunctionRegistry;

    #[test]
    fn test_penalty_is_configurable() {
        let suite = TestSuite::truth_table(2, |b| b[0] != b[1]).unwrap();
        let registry = FunctionRegistry::new();
        let circuit = share(
            Circuit::from_gates(vec![Gate::combinational("g", registry.get("xor2").unwrap())])
                .unwrap(),
        );

        let free = FitnessEvaluator::with_penalty(suite.clone(), 0.0);
        assert_eq!(free.score(&circuit), 1.0);

        let strict = FitnessEvaluator::with_penalty(suite, 0.1);
        assert!((strict.score(&circuit) - 0.9).abs() < 1e-9);
    }
}
