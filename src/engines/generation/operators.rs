use crate::config::{EvolutionConfig, MutationConfig};
use crate::engines::evaluation::FitnessEvaluator;
use crate::engines::generation::circuit::{Circuit, SharedCircuit};
use crate::engines::generation::gate::Gate;
use crate::functions::FunctionRegistry;
use rand::Rng;
use std::sync::Arc;

/// Tournament selection: re-score K random candidates (drawn with
/// replacement) and return the best. Ties keep the earliest draw.
///
/// # Panics
///
/// Panics if `population` is empty.
pub fn tournament_selection<R: Rng>(
    population: &[SharedCircuit],
    tournament_size: usize,
    fitness: &FitnessEvaluator,
    rng: &mut R,
) -> SharedCircuit {
    assert!(!population.is_empty(), "tournament over an empty population");
    let mut best = &population[rng.gen_range(0..population.len())];
    let mut best_fitness = fitness.score(best);

    for _ in 1..tournament_size {
        let candidate = &population[rng.gen_range(0..population.len())];
        let candidate_fitness = fitness.score(candidate);
        if candidate_fitness > best_fitness {
            best = candidate;
            best_fitness = candidate_fitness;
        }
    }

    Arc::clone(best)
}

/// Generate a random circuit: gate count drawn from the configured initial
/// range, each gate adaptive with `adaptive_gate_ratio` probability, then
/// `wiring_factor * gates` random wiring attempts (self-edges skipped).
pub fn random_circuit<R: Rng>(
    evolution: &EvolutionConfig,
    mutation: &MutationConfig,
    registry: &FunctionRegistry,
    rng: &mut R,
) -> Circuit {
    let gate_count = rng.gen_range(evolution.min_initial_gates..evolution.max_initial_gates);

    let mut gates: Vec<Gate> = (0..gate_count)
        .map(|i| {
            let primitive = registry.random(rng);
            if rng.gen::<f64>() < evolution.adaptive_gate_ratio {
                Gate::adaptive(format!("adaptive_{}", i), primitive, mutation.default_memory_size)
            } else {
                Gate::combinational(format!("gate_{}", i), primitive)
            }
        })
        .collect();

    for _ in 0..gate_count * evolution.wiring_factor {
        let from = rng.gen_range(0..gate_count);
        let to = rng.gen_range(0..gate_count);
        if from != to {
            gates[to].connect(from);
        }
    }

    Circuit::from_wired(gates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::generation::circuit::share;
    use crate::types::TestSuite;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_circuit_respects_initial_range() {
        let evolution = EvolutionConfig::default();
        let mutation = MutationConfig::default();
        let registry = FunctionRegistry::new();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let circuit = random_circuit(&evolution, &mutation, &registry, &mut rng);
            assert!((3..8).contains(&circuit.len()));
            let edges: usize = circuit.gates().iter().map(|g| g.inputs().len()).sum();
            assert!(edges <= circuit.len() * 2);
            for (i, gate) in circuit.gates().iter().enumerate() {
                assert!(!gate.inputs().contains(&i));
                if gate.is_adaptive() {
                    assert_eq!(gate.memory_size(), Some(5));
                }
            }
        }
    }

    #[test]
    fn test_all_combinational_when_ratio_zero() {
        let evolution = EvolutionConfig {
            adaptive_gate_ratio: 0.0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let circuit = random_circuit(
            &evolution,
            &MutationConfig::default(),
            &FunctionRegistry::new(),
            &mut rng,
        );
        assert!(circuit.gates().iter().all(|g| !g.is_adaptive()));
    }

    #[test]
    fn test_tournament_prefers_fitter_circuit() {
        let registry = FunctionRegistry::new();
        let suite = TestSuite::truth_table(2, |b| b[0] != b[1]).unwrap();
        let fitness = FitnessEvaluator::new(suite);

        let good = share(
            Circuit::from_gates(vec![Gate::combinational("g", registry.get("xor2").unwrap())])
                .unwrap(),
        );
        let bad = share(
            Circuit::from_gates(vec![Gate::combinational("g", registry.get("and").unwrap())])
                .unwrap(),
        );
        let population = vec![Arc::clone(&good), bad];

        // A tournament larger than the population almost surely samples both.
        let mut rng = StdRng::seed_from_u64(9);
        let winner = tournament_selection(&population, 16, &fitness, &mut rng);
        assert!(Arc::ptr_eq(&winner, &good));
    }

    #[test]
    #[should_panic(expected = "empty population")]
    fn test_tournament_rejects_empty_population() {
        let suite = TestSuite::truth_table(1, |b| b[0]).unwrap();
        let fitness = FitnessEvaluator::new(suite);
        let mut rng = StdRng::seed_from_u64(0);
        tournament_selection(&[], 3, &fitness, &mut rng);
    }
}
