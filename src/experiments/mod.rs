pub mod runner;
pub mod tasks;

pub use runner::{run_experiment, run_suite, ExperimentReport, Verification};
pub use tasks::Task;
