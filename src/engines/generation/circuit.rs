//! Circuits: arena-backed, possibly cyclic gate graphs.
//!
//! Gates reference their inputs by index into the circuit's own gate list.
//! Cloning a circuit clones the whole arena, so an offspring never shares a
//! gate with its parent. The last gate is always the output.

use crate::config::MutationConfig;
use crate::engines::generation::gate::{Gate, GateIndex};
use crate::error::GenesisError;
use crate::functions::FunctionRegistry;
use crate::types::{Signal, TestSuite};
use rand::Rng;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Complexity weight used by [`Circuit::evaluate`].
pub const DEFAULT_COMPLEXITY_PENALTY: f64 = 0.001;

/// Circuit shared between population slots and observers.
pub type SharedCircuit = Arc<RwLock<Circuit>>;

pub fn share(circuit: Circuit) -> SharedCircuit {
    Arc::new(RwLock::new(circuit))
}

pub fn read_circuit(circuit: &SharedCircuit) -> RwLockReadGuard<'_, Circuit> {
    circuit.read().unwrap_or_else(PoisonError::into_inner)
}

pub fn write_circuit(circuit: &SharedCircuit) -> RwLockWriteGuard<'_, Circuit> {
    circuit.write().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Clone, Default)]
pub struct Circuit {
    gates: Vec<Gate>,
    fitness: f64,
    generation: usize,
}

impl Circuit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_gates(gates: Vec<Gate>) -> Result<Self, GenesisError> {
        let len = gates.len();
        for gate in &gates {
            if let Some(&index) = gate.inputs().iter().find(|&&i| i >= len) {
                return Err(GenesisError::UnknownGate { index, len });
            }
        }
        Ok(Self {
            gates,
            fitness: 0.0,
            generation: 0,
        })
    }

    /// Wrap gates whose inputs are already known to be in range.
    pub(crate) fn from_wired(gates: Vec<Gate>) -> Self {
        debug_assert!(gates
            .iter()
            .all(|g| g.inputs().iter().all(|&i| i < gates.len())));
        Self {
            gates,
            fitness: 0.0,
            generation: 0,
        }
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn gate(&self, index: GateIndex) -> Option<&Gate> {
        self.gates.get(index)
    }

    pub fn gate_mut(&mut self, index: GateIndex) -> Option<&mut Gate> {
        self.gates.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    pub fn output_index(&self) -> Option<GateIndex> {
        self.gates.len().checked_sub(1)
    }

    /// Fitness from the most recent [`evaluate`](Self::evaluate).
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Append a gate; it becomes the new output.
    pub fn push(&mut self, gate: Gate) -> Result<GateIndex, GenesisError> {
        let len = self.gates.len() + 1;
        if let Some(&index) = gate.inputs().iter().find(|&&i| i >= len) {
            return Err(GenesisError::UnknownGate { index, len });
        }
        self.gates.push(gate);
        Ok(len - 1)
    }

    /// Add the edge `to <- from`.
    pub fn connect(&mut self, to: GateIndex, from: GateIndex) -> Result<(), GenesisError> {
        self.check_index(from)?;
        self.check_index(to)?;
        self.gates[to].connect(from);
        Ok(())
    }

    /// Remove one edge `to <- from`, if present.
    pub fn disconnect(&mut self, to: GateIndex, from: GateIndex) -> Result<bool, GenesisError> {
        self.check_index(from)?;
        self.check_index(to)?;
        Ok(self.gates[to].disconnect(from))
    }

    fn check_index(&self, index: GateIndex) -> Result<(), GenesisError> {
        if index >= self.gates.len() {
            return Err(GenesisError::UnknownGate {
                index,
                len: self.gates.len(),
            });
        }
        Ok(())
    }

    /// Feed one external signal through the output gate.
    pub fn process(&mut self, signal: &Signal) -> Signal {
        match self.output_index() {
            Some(output) => self.process_gate(output, signal),
            None => Signal::default(),
        }
    }

    /// Feed one external signal through an arbitrary gate.
    ///
    /// Each call gets its own visited set: a gate reached a second time
    /// answers `false` instead of recursing, so cycles terminate.
    pub fn process_gate(&mut self, index: GateIndex, signal: &Signal) -> Signal {
        if index >= self.gates.len() {
            return Signal::default();
        }
        let mut visited = vec![false; self.gates.len()];
        self.pull(index, signal, &mut visited)
    }

    fn pull(&mut self, index: GateIndex, signal: &Signal, visited: &mut [bool]) -> Signal {
        if visited[index] {
            return Signal::default();
        }
        visited[index] = true;

        if self.gates[index].inputs.is_empty() {
            return self.gates[index].fire(std::slice::from_ref(signal));
        }

        let inputs = self.gates[index].inputs.clone();
        let signals: Vec<Signal> = inputs
            .into_iter()
            .map(|input| self.pull(input, signal, visited))
            .collect();
        self.gates[index].fire(&signals)
    }

    /// Number of distinct gates reachable from `index` (itself included),
    /// adaptive gates counting double.
    pub fn complexity(&self, index: GateIndex) -> usize {
        if index >= self.gates.len() {
            return 0;
        }
        let mut visited = vec![false; self.gates.len()];
        let mut stack = vec![index];
        let mut total = 0;
        while let Some(current) = stack.pop() {
            if visited[current] {
                continue;
            }
            visited[current] = true;
            let gate = &self.gates[current];
            total += if gate.is_adaptive() { 2 } else { 1 };
            stack.extend(gate.inputs.iter().copied().filter(|&i| !visited[i]));
        }
        total
    }

    /// Sum of [`complexity`](Self::complexity) over every gate, reachable from
    /// the output or not.
    pub fn total_complexity(&self) -> usize {
        (0..self.gates.len()).map(|i| self.complexity(i)).sum()
    }

    /// Number of cases whose output matches the expectation. Advances
    /// adaptive memory like any other evaluation.
    pub fn correct_count(&mut self, suite: &TestSuite) -> usize {
        suite
            .iter()
            .filter(|case| self.process(&case.input) == case.expected)
            .count()
    }

    /// Score against `suite` with the default complexity penalty and cache the result.
    pub fn evaluate(&mut self, suite: &TestSuite) -> f64 {
        self.evaluate_with_penalty(suite, DEFAULT_COMPLEXITY_PENALTY)
    }

    /// Accuracy minus `penalty` per unit of total complexity.
    pub fn evaluate_with_penalty(&mut self, suite: &TestSuite, penalty: f64) -> f64 {
        let correct = self.correct_count(suite);
        let accuracy = correct as f64 / suite.len() as f64;
        self.fitness = accuracy - penalty * self.total_complexity() as f64;
        self.fitness
    }

    /// Produce a mutated descendant; `self` is left untouched.
    pub fn mutate<R: Rng>(
        &self,
        registry: &FunctionRegistry,
        config: &MutationConfig,
        rng: &mut R,
    ) -> Circuit {
        let mut child = Circuit {
            gates: Vec::with_capacity(self.gates.len() + 1),
            fitness: 0.0,
            generation: self.generation + 1,
        };

        for gate in &self.gates {
            let mut clone = gate.offspring();
            if rng.gen::<f64>() < config.gate_mutation_rate {
                clone.mutate(registry, config, rng);
            }
            child.gates.push(clone);
        }

        if rng.gen::<f64>() < config.add_gate_probability && child.len() < config.max_gates {
            child.add_random_gate(registry, rng);
        }

        if rng.gen::<f64>() < config.remove_gate_probability && child.len() > config.min_gates {
            let idx = rng.gen_range(0..child.len());
            child.remove_gate(idx);
        }

        let rewirings = rng.gen_range(0..=config.max_rewirings);
        for _ in 0..rewirings {
            child.rewire(config.connect_probability, rng);
        }

        child
    }

    /// Append a fresh combinational gate and feed it into one to three of
    /// the pre-existing gates. Returns the new gate's index.
    pub fn add_random_gate<R: Rng>(&mut self, registry: &FunctionRegistry, rng: &mut R) -> GateIndex {
        let existing = self.gates.len();
        let new_index = existing;
        self.gates.push(Gate::combinational(
            format!("new_{}", self.generation),
            registry.random(rng),
        ));

        if existing > 0 {
            let edges = rng.gen_range(1..=3);
            for _ in 0..edges {
                let target = rng.gen_range(0..existing);
                self.gates[target].connect(new_index);
            }
        }
        log::trace!("added gate {} to generation {} circuit", new_index, self.generation);
        new_index
    }

    /// Remove a gate, dropping every edge into it and renumbering the rest.
    pub fn remove_gate(&mut self, index: GateIndex) -> Option<Gate> {
        if index >= self.gates.len() {
            return None;
        }
        let removed = self.gates.remove(index);
        for gate in &mut self.gates {
            gate.inputs.retain(|&i| i != index);
            for input in gate.inputs.iter_mut() {
                if *input > index {
                    *input -= 1;
                }
            }
        }
        log::trace!("removed gate {} from generation {} circuit", index, self.generation);
        Some(removed)
    }

    /// Pick two distinct gates and either connect or disconnect them.
    fn rewire<R: Rng>(&mut self, connect_probability: f64, rng: &mut R) {
        let len = self.gates.len();
        if len == 0 {
            return;
        }
        let from = rng.gen_range(0..len);
        let to = rng.gen_range(0..len);
        if from == to {
            return;
        }
        if rng.gen::<f64>() < connect_probability {
            self.gates[to].connect(from);
        } else {
            self.gates[to].disconnect(from);
        }
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Circuit generation {}", self.generation)?;
        writeln!(f, "Fitness: {:.4}", self.fitness)?;
        writeln!(f, "Gates: {}", self.gates.len())?;
        for (i, gate) in self.gates.iter().enumerate() {
            let kind = match gate.memory_size() {
                Some(size) => format!("adaptive(mem:{})", size),
                None => "combinational".to_string(),
            };
            let inputs = if gate.inputs().is_empty() {
                "(no inputs)".to_string()
            } else {
                gate.inputs()
                    .iter()
                    .map(|input| format!("g{}", input))
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            writeln!(f, "  g{} [{} {}] <- {}", i, kind, gate.function_name(), inputs)?;
        }
        if let Some(output) = self.output_index() {
            write!(f, "Output gate: g{}", output)?;
        }
        Ok(())
    }
}
