//! Application state wiring the relay together.
//!
//! The session controller is generic over store/hasher/gateway traits;
//! AppState pins it to the concrete infra implementations and the in-process
//! WebSocket gateway.

use std::path::PathBuf;
use std::sync::Arc;

use relay_core::session::SessionController;
use relay_infra::backend::RecordBackend;
use relay_infra::config::{load_config, resolve_data_dir};
use relay_infra::crypto::hash::Sha256ContentHasher;
use relay_types::config::{RelayConfig, StorageBackend};

use crate::gateway::WsGateway;

pub type ConcreteController = SessionController<RecordBackend, Sha256ContentHasher, WsGateway>;

/// Shared application state.
///
/// Used by both CLI commands and the HTTP/WebSocket handlers.
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<ConcreteController>,
    /// The store the controller runs over.
    pub store: Arc<RecordBackend>,
    pub gateway: Arc<WsGateway>,
    pub config: Arc<RelayConfig>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Resolve the data directory, load `config.toml` and open the store.
    ///
    /// `force_memory` overrides the configured backend.
    pub async fn init(force_memory: bool) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let mut config = load_config(&data_dir).await;
        if force_memory {
            config.storage.backend = StorageBackend::Memory;
        }

        Self::from_config(config, data_dir).await
    }

    /// Wire the controller over an explicit config and data directory.
    pub async fn from_config(config: RelayConfig, data_dir: PathBuf) -> anyhow::Result<Self> {
        let store = RecordBackend::open(config.storage.backend, &data_dir).await?;
        tracing::debug!(storage = ?store.kind(), data_dir = %data_dir.display(), "record store opened");

        let store = Arc::new(store);
        let config = Arc::new(config);
        let gateway = Arc::new(WsGateway::new());
        let controller = SessionController::new(
            Arc::clone(&store),
            Sha256ContentHasher::new(),
            Arc::clone(&gateway),
            Arc::clone(&config),
        );

        Ok(Self {
            controller: Arc::new(controller),
            store,
            gateway,
            config,
            data_dir,
        })
    }
}
