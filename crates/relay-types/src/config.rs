//! Relay configuration types.
//!
//! `RelayConfig` represents the top-level `config.toml`. It is built once at
//! startup and handed to every component at construction; nothing reads
//! defaults from ambient state.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the relay.
///
/// Loaded from `~/.relay/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Channel a connection joins on connect and falls back to when its
    /// profile has no channel.
    #[serde(default = "default_channel")]
    pub default_channel: String,

    /// Display name used when a profile has no username.
    #[serde(default = "default_username")]
    pub default_username: String,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

fn default_channel() -> String {
    "general".to_string()
}

fn default_username() -> String {
    "anonymous".to_string()
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            default_channel: default_channel(),
            default_username: default_username(),
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

/// Listen address for the WebSocket gateway and control plane.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    7070
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Which record store backend to open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
}
