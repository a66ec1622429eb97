use anyhow::{Context, Result};
use clap::Parser;
use genesis::config::ConfigManager;
use genesis::engines::generation::LogProgressCallback;
use genesis::experiments::{run_experiment, run_suite, ExperimentReport, Task};
use genesis::functions::FunctionRegistry;
use genesis::types::TestSuite;
use std::path::PathBuf;
use std::sync::Arc;

/// Evolve logic circuits against truth-table benchmarks.
#[derive(Parser, Debug)]
#[command(name = "genesis", version)]
struct Cli {
    /// Tasks to run (all when omitted)
    #[arg(value_enum)]
    tasks: Vec<Task>,

    /// TOML configuration file; GENESIS__SECTION__KEY variables override it
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    population: Option<usize>,

    #[arg(long)]
    generations: Option<usize>,

    /// Stop once best fitness reaches this value
    #[arg(long)]
    target: Option<f64>,

    /// JSON test suite to evolve against instead of the built-in tasks
    #[arg(long)]
    suite: Option<PathBuf>,

    /// Print reports as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let manager = ConfigManager::new();
    manager
        .load_layered(cli.config.as_deref())
        .context("failed to load configuration")?;
    manager
        .update(|c| {
            if let Some(seed) = cli.seed {
                c.evolution.seed = Some(seed);
            }
            if cli.population.is_some() {
                c.experiment.population_size = cli.population;
            }
            if cli.generations.is_some() {
                c.experiment.max_generations = cli.generations;
            }
            if let Some(target) = cli.target {
                c.experiment.target_fitness = target;
            }
        })
        .context("invalid command line overrides")?;
    let config = manager.get();

    let mut callback = LogProgressCallback::new(config.experiment.log_every);
    let mut reports = Vec::new();

    if let Some(path) = &cli.suite {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read suite {}", path.display()))?;
        let suite: TestSuite = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse suite {}", path.display()))?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "custom".to_string());
        let population = config
            .experiment
            .population_size
            .unwrap_or(config.evolution.population_size);
        let generations = config.experiment.max_generations.unwrap_or(100);
        reports.push(run_suite(
            &config,
            &name,
            suite,
            population,
            generations,
            Arc::new(FunctionRegistry::new()),
            &mut callback,
        )?);
    } else {
        let tasks = if cli.tasks.is_empty() {
            Task::ALL.to_vec()
        } else {
            cli.tasks.clone()
        };
        for task in tasks {
            reports.push(run_experiment(&config, task, &mut callback)?);
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print_report(report);
        }
    }
    Ok(())
}

fn print_report(report: &ExperimentReport) {
    println!("=== {} ===", report.name);
    println!("  Population:    {}", report.population_size);
    println!("  Generations:   {}", report.generations_run);
    println!("  Best fitness:  {:.4}", report.best_fitness);
    println!("  Correct:       {}/{}", report.correct, report.total);
    if let Some(generation) = report.solved_at {
        println!("  Target reached at generation {}", generation);
    }
    if let Some(best) = &report.best {
        println!("  Best circuit ({} gates, complexity {}):", best.gates.len(), best.total_complexity);
        for gate in &best.gates {
            let kind = match gate.memory_size {
                Some(size) => format!("adaptive(mem:{})", size),
                None => gate.kind.clone(),
            };
            let inputs = if gate.inputs.is_empty() {
                "(no inputs)".to_string()
            } else {
                gate.inputs
                    .iter()
                    .map(|i| format!("g{}", i))
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            println!("    g{} [{} {}] <- {}", gate.index, kind, gate.function, inputs);
        }
        if let Some(output) = best.output {
            println!("    output: g{}", output);
        }
    }
    if let Some(verification) = &report.verification {
        println!(
            "  Full truth table: {}/{} correct",
            verification.correct, verification.total
        );
    }
    println!();
}
