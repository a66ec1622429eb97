use crate::engines::generation::circuit::Circuit;
use serde::{Deserialize, Serialize};

/// Read-only, serializable view of a circuit for display and reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitSnapshot {
    pub generation: usize,
    pub fitness: f64,
    pub output: Option<usize>,
    pub total_complexity: usize,
    pub gates: Vec<GateSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateSnapshot {
    pub index: usize,
    pub name: String,
    pub kind: String,
    pub function: String,
    pub memory_size: Option<usize>,
    pub inputs: Vec<usize>,
}

impl From<&Circuit> for CircuitSnapshot {
    fn from(circuit: &Circuit) -> Self {
        let gates = circuit
            .gates()
            .iter()
            .enumerate()
            .map(|(index, gate)| GateSnapshot {
                index,
                name: gate.name().to_string(),
                kind: gate.kind_tag().to_string(),
                function: gate.function_name().to_string(),
                memory_size: gate.memory_size(),
                inputs: gate.inputs().to_vec(),
            })
            .collect();

        Self {
            generation: circuit.generation(),
            fitness: circuit.fitness(),
            output: circuit.output_index(),
            total_complexity: circuit.total_complexity(),
            gates,
        }
    }
}
