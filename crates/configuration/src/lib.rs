// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{
    Config, EngineSettings, InstrumentSettings, MIN_BAR_WINDOW, RiskSettings, StrategyConfig,
    StrategySettings,
};

/// Loads the application configuration from a TOML file.
///
/// This function is the primary entry point for this crate. It reads the
/// configuration file, overlays `KESTREL__`-prefixed environment variables,
/// and deserializes the result into our strongly-typed `Config` struct.
pub fn load_config(path: &str) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name(path))
        .add_source(config::Environment::with_prefix("KESTREL").separator("__"))
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}
