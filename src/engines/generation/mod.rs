pub mod circuit;
pub mod gate;
pub mod operators;
pub mod population;
pub mod progress;
pub mod snapshot;

pub use circuit::{read_circuit, share, write_circuit, Circuit, SharedCircuit};
pub use gate::{Gate, GateIndex, GateKind};
pub use population::Population;
pub use progress::{ChannelProgressCallback, LogProgressCallback, ProgressCallback, ProgressMessage};
pub use snapshot::{CircuitSnapshot, GateSnapshot};
