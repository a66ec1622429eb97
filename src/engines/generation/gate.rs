use crate::config::MutationConfig;
use crate::functions::{FunctionRegistry, Primitive};
use crate::types::Signal;
use rand::Rng;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

/// Index of a gate inside its circuit's arena.
pub type GateIndex = usize;

/// Fraction of remembered outputs that must be true for an adaptive gate to fire.
pub const ADAPTIVE_MAJORITY: f64 = 0.6;

/// Bounds of an adaptive gate's memory window.
pub const MIN_MEMORY_SIZE: usize = 1;
pub const MAX_MEMORY_SIZE: usize = 20;

fn bounded_memory_size(size: usize) -> usize {
    let bounded = size.clamp(MIN_MEMORY_SIZE, MAX_MEMORY_SIZE);
    if bounded != size {
        log::warn!(
            "memory size {} outside [{}, {}], clamped to {}",
            size,
            MIN_MEMORY_SIZE,
            MAX_MEMORY_SIZE,
            bounded
        );
    }
    bounded
}

#[derive(Debug, Clone, PartialEq)]
pub enum GateKind {
    Combinational,
    /// Remembers its last `memory_size` raw results and outputs their majority.
    Adaptive {
        memory: VecDeque<bool>,
        memory_size: usize,
    },
}

/// One node of a circuit.
///
/// `inputs` are indices into the owning circuit's gate list, so a gate is
/// only meaningful together with that circuit.
#[derive(Clone)]
pub struct Gate {
    name: String,
    kind: GateKind,
    primitive: Arc<dyn Primitive>,
    pub(crate) inputs: Vec<GateIndex>,
}

impl Gate {
    pub fn combinational(name: impl Into<String>, primitive: Arc<dyn Primitive>) -> Self {
        Self {
            name: name.into(),
            kind: GateKind::Combinational,
            primitive,
            inputs: Vec::new(),
        }
    }

    pub fn adaptive(
        name: impl Into<String>,
        primitive: Arc<dyn Primitive>,
        memory_size: usize,
    ) -> Self {
        let memory_size = bounded_memory_size(memory_size);
        Self {
            name: name.into(),
            kind: GateKind::Adaptive {
                memory: VecDeque::with_capacity(memory_size),
                memory_size,
            },
            primitive,
            inputs: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &GateKind {
        &self.kind
    }

    pub fn kind_tag(&self) -> &'static str {
        match self.kind {
            GateKind::Combinational => "combinational",
            GateKind::Adaptive { .. } => "adaptive",
        }
    }

    pub fn is_adaptive(&self) -> bool {
        matches!(self.kind, GateKind::Adaptive { .. })
    }

    pub fn memory_size(&self) -> Option<usize> {
        match self.kind {
            GateKind::Adaptive { memory_size, .. } => Some(memory_size),
            GateKind::Combinational => None,
        }
    }

    /// Resize an adaptive gate's memory window, dropping the oldest entries
    /// if it shrinks. No effect on combinational gates.
    pub fn set_memory_size(&mut self, size: usize) {
        if let GateKind::Adaptive { memory, memory_size } = &mut self.kind {
            *memory_size = bounded_memory_size(size);
            while memory.len() > *memory_size {
                memory.pop_front();
            }
        }
    }

    pub fn primitive(&self) -> &Arc<dyn Primitive> {
        &self.primitive
    }

    pub fn function_name(&self) -> &'static str {
        self.primitive.alias()
    }

    pub fn inputs(&self) -> &[GateIndex] {
        &self.inputs
    }

    pub fn connect(&mut self, input: GateIndex) {
        self.inputs.push(input);
    }

    /// Remove the first edge from `input`. Returns whether one existed.
    pub fn disconnect(&mut self, input: GateIndex) -> bool {
        match self.inputs.iter().position(|&i| i == input) {
            Some(pos) => {
                self.inputs.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Apply the gate to already-collected input signals.
    ///
    /// Adaptive gates record the raw result and answer with the majority of
    /// their memory instead.
    pub fn fire(&mut self, inputs: &[Signal]) -> Signal {
        let raw = self.primitive.execute(&Signal::flatten(inputs));
        match &mut self.kind {
            GateKind::Combinational => Signal::Bool(raw),
            GateKind::Adaptive { memory, memory_size } => {
                memory.push_back(raw);
                while memory.len() > *memory_size {
                    memory.pop_front();
                }
                let trues = memory.iter().filter(|&&b| b).count();
                Signal::Bool(trues as f64 > memory.len() as f64 * ADAPTIVE_MAJORITY)
            }
        }
    }

    /// Copy for a new circuit: same name, function, memory size and wiring,
    /// with an empty memory.
    pub fn offspring(&self) -> Self {
        let mut child = self.clone();
        if let GateKind::Adaptive { memory, .. } = &mut child.kind {
            memory.clear();
        }
        child
    }

    /// Gate-level point mutation: either drop one input or swap the function,
    /// plus a memory-size nudge for adaptive gates.
    pub fn mutate<R: Rng>(&mut self, registry: &FunctionRegistry, config: &MutationConfig, rng: &mut R) {
        if rng.gen_bool(0.5) {
            if !self.inputs.is_empty() && rng.gen::<f64>() < config.input_drop_probability {
                let idx = rng.gen_range(0..self.inputs.len());
                self.inputs.remove(idx);
            }
        } else if rng.gen::<f64>() < config.function_swap_probability {
            self.primitive = registry.random(rng);
        }

        if let Some(size) = self.memory_size() {
            if rng.gen::<f64>() < config.memory_mutation_probability {
                let step = config.memory_step as i64;
                let resized = (size as i64 + rng.gen_range(-step..=step)).max(0) as usize;
                self.set_memory_size(config.clamp_memory_size(resized));
            }
        }
    }
}

impl fmt::Debug for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gate")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("function", &self.primitive.alias())
            .field("inputs", &self.inputs)
            .finish()
    }
}
