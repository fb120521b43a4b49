// Shared application state
// The per-request handle: immutable configuration plus the resolved root

use std::io;
use std::path::PathBuf;

use super::types::Config;

/// State shared by every connection. Nothing in here mutates after
/// startup, so request handling needs no locks.
pub struct AppState {
    pub config: Config,
    /// Canonicalized document root; containment checks compare resolved
    /// request paths against this.
    pub doc_root: PathBuf,
}

impl AppState {
    /// Resolve the configured document root and build the shared state.
    /// Fails if the root does not exist or is not accessible.
    pub fn new(config: Config) -> io::Result<Self> {
        let doc_root = PathBuf::from(&config.files.root).canonicalize()?;
        Ok(Self { config, doc_root })
    }
}
