//! Property-based tests for circuit evaluation and structural mutation.

use genesis::engines::generation::{Circuit, Gate};
use genesis::functions::FunctionRegistry;
use genesis::types::Signal;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

const ALIASES: [&str; 7] = ["or", "and", "not", "parity", "xor2", "and_not", "not_and"];

/// Build a circuit from (alias index, adaptive?) per gate plus raw edges.
/// Edges may form cycles and self-loops.
fn build(specs: &[(usize, bool)], edges: &[(usize, usize)]) -> Circuit {
    let registry = FunctionRegistry::new();
    let gates = specs
        .iter()
        .enumerate()
        .map(|(i, &(alias, adaptive))| {
            let primitive = registry.get(ALIASES[alias % ALIASES.len()]).unwrap();
            if adaptive {
                Gate::adaptive(format!("adaptive_{}", i), primitive, 3)
            } else {
                Gate::combinational(format!("gate_{}", i), primitive)
            }
        })
        .collect();
    let mut circuit = Circuit::from_gates(gates).unwrap();
    let len = circuit.len();
    for &(to, from) in edges {
        circuit.connect(to % len, from % len).unwrap();
    }
    circuit
}

fn gate_specs(adaptive: bool) -> impl Strategy<Value = Vec<(usize, bool)>> {
    let kind = if adaptive { any::<bool>().boxed() } else { Just(false).boxed() };
    prop::collection::vec((0usize..ALIASES.len(), kind), 1..12)
}

fn edge_list() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0usize..64, 0usize..64), 0..40)
}

fn input_bits() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), 1..5)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Any wiring, cycles included, evaluates to a boolean without hanging.
    #[test]
    fn prop_cyclic_wiring_terminates(
        specs in gate_specs(true),
        edges in edge_list(),
        bits in input_bits()
    ) {
        let mut circuit = build(&specs, &edges);
        let signal = Signal::from(bits);
        for index in 0..circuit.len() {
            prop_assert!(matches!(circuit.process_gate(index, &signal), Signal::Bool(_)));
        }
    }

    /// Without adaptive gates the same input always gives the same output.
    #[test]
    fn prop_combinational_is_deterministic(
        specs in gate_specs(false),
        edges in edge_list(),
        bits in input_bits()
    ) {
        let mut circuit = build(&specs, &edges);
        let signal = Signal::from(bits);
        let first = circuit.process(&signal);
        let second = circuit.process(&signal);
        prop_assert_eq!(first, second);
    }

    /// Once its memory is full, an adaptive gate fed a constant input
    /// answers the way a plain gate with the same function would.
    #[test]
    fn prop_adaptive_gate_stabilises(
        alias in 0usize..ALIASES.len(),
        memory_size in 1usize..10,
        bits in input_bits()
    ) {
        let registry = FunctionRegistry::new();
        let primitive = registry.get(ALIASES[alias]).unwrap();
        let raw = primitive.execute(&bits);
        let mut circuit = Circuit::from_gates(vec![Gate::adaptive("a", primitive, memory_size)]).unwrap();
        let signal = Signal::from(bits);

        for _ in 0..memory_size {
            circuit.process(&signal);
        }
        for _ in 0..3 {
            prop_assert_eq!(circuit.process(&signal), Signal::Bool(raw));
        }
    }

    /// Adding a gate never lowers total complexity.
    #[test]
    fn prop_add_gate_grows_complexity(
        specs in gate_specs(true),
        edges in edge_list(),
        seed in any::<u64>()
    ) {
        let registry = FunctionRegistry::new();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut circuit = build(&specs, &edges);
        let before = circuit.total_complexity();
        let len = circuit.len();

        let index = circuit.add_random_gate(&registry, &mut rng);
        prop_assert_eq!(index, len);
        prop_assert_eq!(circuit.len(), len + 1);
        prop_assert!(circuit.total_complexity() > before);
        prop_assert!(circuit.gate(index).unwrap().inputs().is_empty());
    }

    /// Removing a gate leaves every remaining edge in range.
    #[test]
    fn prop_remove_gate_keeps_indices_valid(
        specs in gate_specs(true),
        edges in edge_list(),
        victim in 0usize..64
    ) {
        let mut circuit = build(&specs, &edges);
        let len = circuit.len();
        let removed = circuit.remove_gate(victim % len);
        prop_assert!(removed.is_some());
        prop_assert_eq!(circuit.len(), len - 1);
        for gate in circuit.gates() {
            prop_assert!(gate.inputs().iter().all(|&i| i < circuit.len()));
        }
    }
}
