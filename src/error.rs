use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("could not parse configuration: {0}")]
    Config(#[from] ron::Error),
}
