pub mod evolution;
pub mod experiment;
pub mod manager;
pub mod mutation;
pub mod traits;

pub use evolution::EvolutionConfig;
pub use experiment::ExperimentConfig;
pub use manager::{AppConfig, ConfigManager};
pub use mutation::MutationConfig;
pub use traits::ConfigSection;
