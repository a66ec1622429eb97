use crate::config::{EvolutionConfig, MutationConfig};
use crate::config::traits::ConfigSection;
use crate::engines::evaluation::FitnessEvaluator;
use crate::engines::generation::{
    circuit::{read_circuit, share, SharedCircuit},
    operators::{random_circuit, tournament_selection},
};
use crate::error::GenesisError;
use crate::functions::FunctionRegistry;
use crate::types::TestSuite;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::sync::Arc;

/// Fixed-size set of circuits evolved against one test suite.
///
/// Each [`run_generation`](Self::run_generation) scores every circuit,
/// promotes the best-ever circuit into the elite slots (shared, not copied)
/// and fills the rest with mutated tournament winners.
pub struct Population {
    circuits: Vec<SharedCircuit>,
    fitness: FitnessEvaluator,
    registry: Arc<FunctionRegistry>,
    evolution: EvolutionConfig,
    mutation: MutationConfig,
    best_circuit: Option<SharedCircuit>,
    best_fitness: f64,
    generation: usize,
    rng: StdRng,
}

impl Population {
    /// Population of `size` random circuits with default settings.
    pub fn new(size: usize, suite: TestSuite) -> Result<Self, GenesisError> {
        let evolution = EvolutionConfig {
            population_size: size,
            ..Default::default()
        };
        Self::with_config(
            evolution,
            MutationConfig::default(),
            Arc::new(FunctionRegistry::new()),
            suite,
        )
    }

    pub fn with_config(
        evolution: EvolutionConfig,
        mutation: MutationConfig,
        registry: Arc<FunctionRegistry>,
        suite: TestSuite,
    ) -> Result<Self, GenesisError> {
        if evolution.population_size == 0 {
            return Err(GenesisError::InvalidPopulation(
                "population size must be positive".to_string(),
            ));
        }
        evolution.validate()?;
        mutation.validate()?;

        let mut rng = match evolution.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let circuits = (0..evolution.population_size)
            .map(|_| share(random_circuit(&evolution, &mutation, &registry, &mut rng)))
            .collect();

        Ok(Self {
            circuits,
            fitness: FitnessEvaluator::with_penalty(suite, evolution.complexity_penalty),
            registry,
            evolution,
            mutation,
            best_circuit: None,
            best_fitness: f64::NEG_INFINITY,
            generation: 0,
            rng,
        })
    }

    /// Advance one generation in place.
    pub fn run_generation(&mut self) {
        let scores = self.score_all();
        for (circuit, &score) in self.circuits.iter().zip(&scores) {
            if score > self.best_fitness {
                self.best_fitness = score;
                self.best_circuit = Some(Arc::clone(circuit));
            }
        }

        let size = self.circuits.len();
        let mut next = Vec::with_capacity(size);

        if let Some(best) = &self.best_circuit {
            let elite_count = self.evolution.elite_count().min(size);
            next.extend((0..elite_count).map(|_| Arc::clone(best)));
        }

        while next.len() < size {
            let parent = tournament_selection(
                &self.circuits,
                self.evolution.tournament_size,
                &self.fitness,
                &mut self.rng,
            );
            let child = read_circuit(&parent).mutate(&self.registry, &self.mutation, &mut self.rng);
            next.push(share(child));
        }

        self.circuits = next;
        self.generation += 1;

        log::debug!(
            "Generation {} complete: best fitness = {:.4}, mean = {:.4}",
            self.generation,
            self.best_fitness,
            scores.iter().sum::<f64>() / scores.len() as f64
        );
    }

    fn score_all(&self) -> Vec<f64> {
        let fitness = &self.fitness;
        if self.evolution.parallel_evaluation {
            self.circuits.par_iter().map(|c| fitness.score(c)).collect()
        } else {
            self.circuits.iter().map(|c| fitness.score(c)).collect()
        }
    }

    /// Best fitness seen across all generations; never decreases.
    pub fn best_fitness(&self) -> f64 {
        self.best_fitness
    }

    pub fn best_circuit(&self) -> Option<SharedCircuit> {
        self.best_circuit.clone()
    }

    /// Gate count of the best circuit, 0 before the first generation.
    pub fn best_gate_count(&self) -> usize {
        self.best_circuit
            .as_ref()
            .map_or(0, |best| read_circuit(best).len())
    }

    pub fn circuits(&self) -> &[SharedCircuit] {
        &self.circuits
    }

    pub fn test_suite(&self) -> &TestSuite {
        self.fitness.suite()
    }

    pub fn fitness_evaluator(&self) -> &FitnessEvaluator {
        &self.fitness
    }

    /// Generations advanced so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.circuits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.circuits.is_empty()
    }
}
