use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, Database, Server, Stats};

/// Loads the application configuration from `config.toml`, with built-in
/// defaults for anything the file leaves out. The file itself is optional.
///
/// This function is the primary entry point for this crate. It reads the
/// configuration sources and deserializes them into our strongly-typed
/// `Config`. Environment variables prefixed `CREASE__` override the file,
/// e.g. `CREASE__SERVER__PORT=8080`.
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("database.max_connections", 10)?
        .set_default("database.acquire_timeout_secs", 5)?
        .set_default("stats.leaderboard_limit", 10)?
        .set_default("stats.max_page_size", 100)?
        .add_source(config::File::with_name("config").required(false))
        .add_source(config::Environment::with_prefix("CREASE").separator("__"))
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    Ok(config)
}
