use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;

use serde::{Deserialize, Serialize};

use filestore_protocol::MAX_MESSAGE_SIZE;
use filestore_store::StoreConfig;

use crate::error::{ServerError, ServerResult};

/// Server configuration, loadable from TOML.
///
/// ```toml
/// bind_addr = "0.0.0.0:50051"
/// max_body_size = 67108864
///
/// [store]
/// root = "/var/lib/filestore"
/// atomic_writes = true
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Largest accepted request body in bytes.
    pub max_body_size: usize,
    pub store: StoreConfig,
}

impl ServerConfig {
    pub fn from_toml_str(s: &str) -> ServerResult<Self> {
        toml::from_str(s).map_err(|e| ServerError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> ServerResult<String> {
        toml::to_string_pretty(self).map_err(|e| ServerError::Config(e.to_string()))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::LOCALHOST, 50051)),
            max_body_size: MAX_MESSAGE_SIZE,
            store: StoreConfig::default(),
        }
    }
}
