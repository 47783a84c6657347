// Configuration module entry point
// Manages application configuration and runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig, SessionConfig,
    StorageConfig,
};

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("WITCHER").separator("__"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "Witcher-Portal/1.0")?
            .set_default("http.enable_cors", false)?
            .set_default("http.max_body_size", 65_536)? // 64KB, form posts only
            .set_default("session.secret", "")?
            .set_default("session.cookie_name", "guild_session")?
            .set_default("session.kaer_morhen_school", "Wolf")?
            .set_default("session.master_rank", "Master")?
            .set_default("storage.data_dir", "data")?
            .build()?;

        settings.try_deserialize()
    }

    /// Ensure the cookie-signing secret has been externalized
    ///
    /// Called before serving; the secret must come from the config file
    /// or the `WITCHER_SESSION__SECRET` environment variable.
    pub fn require_session_secret(&self) -> Result<(), String> {
        if self.session.secret.is_empty() {
            return Err(
                "session.secret is not set; configure it in config.toml or WITCHER_SESSION__SECRET"
                    .to_string(),
            );
        }
        Ok(())
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
