// Configuration module entry point
// Layered loading: config.toml (optional), environment, built-in defaults

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{Config, FilesConfig, LoggingConfig, PerformanceConfig, ServerConfig};

impl Config {
    /// Load configuration from `config.toml` next to the binary's working
    /// directory, if present.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the specified file path (without extension).
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("RANGEHTTPD"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("files.root", ".")?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid listen address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_serve_cwd_on_port_8000() {
        let cfg = Config::load_from("no-such-config-file").expect("defaults load");
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.files.root, ".");
        assert_eq!(
            cfg.files.index_files,
            vec!["index.html".to_string(), "index.htm".to_string()]
        );
        assert!(cfg.files.auto_index);
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.logging.access_log_format, "common");
        assert!(cfg.server.workers.is_none());
        assert!(cfg.performance.max_connections.is_none());
    }

    #[test]
    fn socket_addr_combines_host_and_port() {
        let cfg = Config::load_from("no-such-config-file").expect("defaults load");
        let addr = cfg.socket_addr().expect("valid address");
        assert_eq!(addr.port(), 8000);
        assert!(addr.ip().is_unspecified());
    }
}
