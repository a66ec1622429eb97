//! Evolution of small boolean logic circuits.
//!
//! Populations of gate graphs are scored against a truth-table test suite and
//! advanced by elitism, tournament selection and asexual structural mutation
//! until one reproduces the target function.

pub mod config;
pub mod engines;
pub mod error;
pub mod experiments;
pub mod functions;
pub mod types;

pub use engines::evaluation::FitnessEvaluator;
pub use engines::generation::{Circuit, Gate, GateKind, Population, SharedCircuit};
pub use error::{GenesisError, Result};
pub use types::{Signal, TestCase, TestSuite};
