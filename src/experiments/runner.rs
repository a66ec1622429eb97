use crate::config::{AppConfig, EvolutionConfig};
use crate::engines::evaluation::FitnessEvaluator;
use crate::engines::generation::{
    circuit::{read_circuit, Circuit},
    population::Population,
    progress::ProgressCallback,
    snapshot::CircuitSnapshot,
};
use crate::error::GenesisError;
use crate::experiments::tasks::Task;
use crate::functions::FunctionRegistry;
use crate::types::TestSuite;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::sync::Arc;

/// Outcome of one evolutionary run.
#[derive(Debug, Clone, Serialize)]
pub struct ExperimentReport {
    pub name: String,
    pub population_size: usize,
    pub generations_run: usize,
    pub best_fitness: f64,
    /// Training cases the best circuit gets right.
    pub correct: usize,
    pub total: usize,
    /// Generation at which `target_fitness` was reached.
    pub solved_at: Option<usize>,
    pub history: Vec<f64>,
    pub best: Option<CircuitSnapshot>,
    pub verification: Option<Verification>,
}

impl ExperimentReport {
    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.correct == self.total
    }
}

/// Re-score of the best circuit against a wider suite.
#[derive(Debug, Clone, Serialize)]
pub struct Verification {
    pub correct: usize,
    pub total: usize,
    pub fitness: f64,
}

/// Run a built-in task with the task's defaults unless the experiment
/// section overrides them.
pub fn run_experiment<C: ProgressCallback + ?Sized>(
    config: &AppConfig,
    task: Task,
    callback: &mut C,
) -> Result<ExperimentReport, GenesisError> {
    let mut rng = match config.evolution.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let suite = task.test_suite(config.experiment.self_discovery_cases, &mut rng)?;

    log::info!("=== {} discovery ({} cases) ===", task, suite.len());

    let population_size = config
        .experiment
        .population_size
        .unwrap_or_else(|| task.population_size());
    let max_generations = config
        .experiment
        .max_generations
        .unwrap_or_else(|| task.max_generations());

    let (mut report, best) = evolve(
        config,
        task.as_str(),
        suite,
        population_size,
        max_generations,
        Arc::new(FunctionRegistry::new()),
        callback,
    )?;

    if task.needs_verification() && report.is_perfect() {
        if let Some(best) = best {
            report.verification = Some(verify(best, config, &task.full_truth_table()?));
        }
    }

    Ok(report)
}

/// Evolve a population against `suite` until the target fitness or the
/// generation cap is reached.
pub fn run_suite<C: ProgressCallback + ?Sized>(
    config: &AppConfig,
    name: &str,
    suite: TestSuite,
    population_size: usize,
    max_generations: usize,
    registry: Arc<FunctionRegistry>,
    callback: &mut C,
) -> Result<ExperimentReport, GenesisError> {
    evolve(
        config,
        name,
        suite,
        population_size,
        max_generations,
        registry,
        callback,
    )
    .map(|(report, _)| report)
}

fn evolve<C: ProgressCallback + ?Sized>(
    config: &AppConfig,
    name: &str,
    suite: TestSuite,
    population_size: usize,
    max_generations: usize,
    registry: Arc<FunctionRegistry>,
    callback: &mut C,
) -> Result<(ExperimentReport, Option<Circuit>), GenesisError> {
    let evolution = EvolutionConfig {
        population_size,
        ..config.evolution.clone()
    };
    let mut population =
        Population::with_config(evolution, config.mutation.clone(), registry, suite.clone())?;

    let mut history = Vec::with_capacity(max_generations);
    let mut solved_at = None;

    for generation in 0..max_generations {
        callback.on_generation_start(generation);
        population.run_generation();
        history.push(population.best_fitness());
        callback.on_generation_complete(
            generation,
            population.best_fitness(),
            population.best_gate_count(),
        );

        if population.best_fitness() >= config.experiment.target_fitness {
            log::info!("{}: target fitness reached at generation {}", name, generation);
            solved_at = Some(generation);
            break;
        }
    }

    // Work on a copy so reporting does not disturb adaptive memory in the population.
    let best_shared = population.best_circuit();
    let best: Option<Circuit> = best_shared.as_ref().map(|b| read_circuit(b).clone());
    let (correct, snapshot) = match &best {
        Some(circuit) => (
            circuit.clone().correct_count(&suite),
            Some(CircuitSnapshot::from(circuit)),
        ),
        None => (0, None),
    };

    log::info!(
        "{}: best fitness {:.4} after {} generations, {}/{} correct",
        name,
        population.best_fitness(),
        history.len(),
        correct,
        suite.len()
    );

    let report = ExperimentReport {
        name: name.to_string(),
        population_size,
        generations_run: history.len(),
        best_fitness: population.best_fitness(),
        correct,
        total: suite.len(),
        solved_at,
        history,
        best: snapshot,
        verification: None,
    };
    Ok((report, best))
}

/// Score the best circuit against a wider suite.
fn verify(mut circuit: Circuit, config: &AppConfig, suite: &TestSuite) -> Verification {
    let evaluator = FitnessEvaluator::with_penalty(suite.clone(), config.evolution.complexity_penalty);

    let correct = circuit.clone().correct_count(suite);
    let fitness = evaluator.evaluate(&mut circuit);
    log::info!("Verification on full truth table: {}/{} correct", correct, suite.len());

    Verification {
        correct,
        total: suite.len(),
        fitness,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::generation::progress::LogProgressCallback;

    fn quick_config(seed: u64) -> AppConfig {
        let mut config = AppConfig::default();
        config.evolution.seed = Some(seed);
        config.experiment.population_size = Some(20);
        config.experiment.max_generations = Some(5);
        config
    }

    #[test]
    fn test_run_stops_at_generation_cap() {
        let config = quick_config(21);
        let mut callback = LogProgressCallback::new(1);
        let report = run_experiment(&config, Task::Majority, &mut callback).unwrap();

        assert_eq!(report.population_size, 20);
        assert_eq!(report.total, 8);
        assert!(report.generations_run <= 5);
        assert_eq!(callback.history(), report.history.as_slice());
        assert!(report.best.is_some());
    }

    #[test]
    fn test_low_target_stops_after_first_generation() {
        let mut config = quick_config(22);
        config.experiment.target_fitness = -10.0;
        let mut callback = LogProgressCallback::new(1);
        let report = run_experiment(&config, Task::Xor, &mut callback).unwrap();

        assert_eq!(report.solved_at, Some(0));
        assert_eq!(report.generations_run, 1);
    }

    #[test]
    fn test_history_is_non_decreasing() {
        let config = quick_config(23);
        let mut callback = LogProgressCallback::new(10);
        let report = run_experiment(&config, Task::Parity, &mut callback).unwrap();
        assert!(report.history.windows(2).all(|w| w[1] >= w[0]));
    }
}
