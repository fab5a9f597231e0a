//! The telemetry endpoint shared between the startup loader and the transports.
//!
//! The endpoint starts out as the configured default. [`load_endpoint_override`] replaces it
//! once with the `process-server` value from persistent storage. The load does not block
//! startup, so a record sent before it completes still goes to the default endpoint.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use tokio::runtime::Handle;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::storage::SettingsStore;
use wobserver_common::constants::PROCESS_SERVER_KEY;

#[derive(Clone, Debug)]
pub struct SharedEndpoint {
    inner: Arc<RwLock<String>>,
}

impl SharedEndpoint {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial.into())),
        }
    }

    pub async fn get(&self) -> String {
        self.inner.read().await.clone()
    }

    // only the startup loader writes
    pub(crate) async fn set(&self, url: String) {
        *self.inner.write().await = url;
    }
}

/// Picks the stored endpoint when present and non-empty, the default otherwise.
/// A failed read counts as absent.
pub fn resolve_endpoint(stored: Result<Option<String>>, default: &str) -> String {
    match stored {
        Ok(Some(url)) if !url.is_empty() => url,
        Ok(_) => default.to_string(),
        Err(e) => {
            debug!("Failed to read {}: {:?}", PROCESS_SERVER_KEY, e);
            default.to_string()
        }
    }
}

/// Reads `process-server` from `store` in the background and writes the result into
/// `endpoint`. The returned handle may be dropped.
///
/// Outside a tokio runtime nothing is read and `endpoint` keeps its current value.
pub fn load_endpoint_override(
    store: Arc<dyn SettingsStore>,
    endpoint: SharedEndpoint,
    default: String,
) -> Option<JoinHandle<()>> {
    let handle = match Handle::try_current() {
        Ok(handle) => handle,
        Err(_) => {
            warn!("No tokio runtime available, skipping {} lookup", PROCESS_SERVER_KEY);
            return None;
        }
    };

    let loader = handle.spawn(async move {
        let stored = tokio::task::spawn_blocking(move || store.get(PROCESS_SERVER_KEY))
            .await
            .unwrap_or_else(|e| Err(anyhow!("settings read task failed: {}", e)));

        let url = resolve_endpoint(stored, &default);
        info!("Telemetry endpoint: {}", url);
        endpoint.set(url).await;
    });

    Some(loader)
}
