//! Server settings loaded via OrthoConfig and the resolved server
//! configuration.

use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DATA_DIR: &str = "data";

/// Configuration values controlling where the server listens and where the
/// collection files live.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "WAITLINE")]
pub struct ServerSettings {
    /// Socket address to bind, for example `127.0.0.1:8080`.
    #[ortho_config(default = DEFAULT_BIND_ADDR.to_owned())]
    pub bind_addr: String,
    /// Directory holding `users.json` and `line.json`.
    #[ortho_config(default = PathBuf::from(DEFAULT_DATA_DIR))]
    pub data_dir: PathBuf,
}

impl ServerSettings {
    /// Return the configured bind address.
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_str()
    }

    /// Return the configured data directory.
    pub fn data_dir(&self) -> &Path {
        self.data_dir.as_path()
    }

    /// Resolve the settings into a [`ServerConfig`].
    ///
    /// # Errors
    /// Returns [`io::ErrorKind::InvalidInput`] when the bind address does not
    /// parse as a socket address.
    pub fn resolve(&self) -> io::Result<ServerConfig> {
        let raw = self.bind_addr();
        let bind_addr = raw.parse::<SocketAddr>().map_err(|err| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid bind address {raw:?}: {err}"),
            )
        })?;
        Ok(ServerConfig::new(bind_addr, self.data_dir().to_path_buf()))
    }
}

/// Resolved configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) data_dir: PathBuf,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, data_dir: PathBuf) -> Self {
        Self {
            bind_addr,
            data_dir,
        }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Return the directory the JSON collections are stored in.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
