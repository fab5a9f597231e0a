use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config_manager::Config;
use crate::endpoint::{load_endpoint_override, SharedEndpoint};
use crate::exporters::{HttpForward, Transport, TransportEnum};
use crate::storage::SettingsStore;
use wobserver_common::TelemetryRecord;

/// Sends logging events to the telemetry server.
///
/// Owns the shared endpoint and starts the stored-endpoint load on construction. Sends made
/// before that load finishes go to `Config::ajax_server`.
pub struct TelemetrySender {
    endpoint: SharedEndpoint,
    transport: TransportEnum,
    endpoint_loader: Option<JoinHandle<()>>,
}

impl TelemetrySender {
    /// Outside a tokio runtime the stored endpoint is not loaded and records are dropped.
    pub fn new(config: &Config, store: Arc<dyn SettingsStore>) -> Self {
        let endpoint = SharedEndpoint::new(config.ajax_server.clone());

        if config.experimental_websocket {
            warn!(
                "Websocket transport to {} is not available, using HTTP",
                config.wss_server
            );
        }

        let transport = TransportEnum::Http(
            HttpForward::new(endpoint.clone()).with_timeout(config.request_timeout()),
        );
        let endpoint_loader =
            load_endpoint_override(store, endpoint.clone(), config.ajax_server.clone());

        TelemetrySender {
            endpoint,
            transport,
            endpoint_loader,
        }
    }

    /// Skips the stored-endpoint load and sends through `transport` as-is.
    pub fn with_transport(endpoint: SharedEndpoint, transport: TransportEnum) -> Self {
        TelemetrySender {
            endpoint,
            transport,
            endpoint_loader: None,
        }
    }

    pub fn log_event(&self, record: &TelemetryRecord) {
        self.transport.send(record)
    }

    pub fn log<T: Serialize>(&self, data: &T) {
        match TelemetryRecord::new(data) {
            Ok(record) => self.log_event(&record),
            Err(e) => debug!("Dropping telemetry record: {:?}", e),
        }
    }

    pub fn endpoint(&self) -> &SharedEndpoint {
        &self.endpoint
    }

    pub fn transport(&self) -> &TransportEnum {
        &self.transport
    }

    /// Waits for the stored-endpoint load started by `new`, if it is still pending.
    pub async fn endpoint_loaded(&mut self) {
        if let Some(loader) = self.endpoint_loader.take() {
            if let Err(e) = loader.await {
                debug!("Endpoint load task failed: {:?}", e);
            }
        }
    }

    pub async fn close(&self) {
        self.transport.close().await
    }
}
