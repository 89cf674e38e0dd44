use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{AuthSettings, Config, OracleSettings, ServerSettings};

/// Loads the application configuration from the `config.toml` file.
///
/// This function is the primary entry point for this crate. It reads the
/// configuration file, layers environment overrides on top (prefix
/// `COINFOLIO`, `__` as the section separator), and deserializes the result
/// into our strongly-typed `Config` struct.
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        // Tells the builder to look for a file named `config.toml`
        .add_source(config::File::with_name("config.toml"))
        // Environment variables win over the file, e.g. COINFOLIO__AUTH__JWT_SECRET.
        .add_source(config::Environment::with_prefix("COINFOLIO").separator("__"))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;

    Ok(config)
}
