use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenesisError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Test suite must contain at least one case")]
    EmptyTestSuite,

    #[error("Invalid population: {0}")]
    InvalidPopulation(String),

    #[error("Gate index {index} out of range for circuit of {len} gates")]
    UnknownGate { index: usize, len: usize },

    #[error("Unknown primitive: {0}")]
    UnknownPrimitive(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Config error: {0}")]
    Config(#[from] ::config::ConfigError),
}

pub type Result<T> = std::result::Result<T, GenesisError>;
