use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration value: {0}")]
    Invalid(String),

    #[error("Instrument '{0}' declares an invalid timeframe: {1}")]
    Timeframe(String, #[source] core_types::CoreError),

    #[error("Trading window time '{0}' is not in HH:MM format")]
    InvalidWindowTime(String),
}
