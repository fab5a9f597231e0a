use std::time::{Duration, Instant};

use reqwest::Client;
use tokio::runtime::Handle;
use tokio_util::task::TaskTracker;
use tracing::{debug, warn};

use crate::endpoint::SharedEndpoint;
use crate::exporters::transport::Transport;
use wobserver_common::http_client::send_http_text;
use wobserver_common::TelemetryRecord;

const CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

/// Fire-and-forget POST of each record to the shared endpoint.
///
/// Every `send` spawns exactly one request on the current tokio runtime. The endpoint is read
/// when the request task runs, not when `send` is called. The response and any failure are
/// only logged.
#[derive(Clone)]
pub struct HttpForward {
    endpoint: SharedEndpoint,
    client: Client,
    timeout: Option<Duration>,
    in_flight: TaskTracker,
}

impl HttpForward {
    pub fn new(endpoint: SharedEndpoint) -> Self {
        HttpForward {
            endpoint,
            client: Client::new(),
            timeout: None,
            in_flight: TaskTracker::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Waits for in-flight requests, up to a bounded time.
    pub async fn close(&self) {
        self.close_with_timeout(CLOSE_TIMEOUT).await
    }

    pub async fn close_with_timeout(&self, timeout: Duration) {
        self.in_flight.close();
        if tokio::time::timeout(timeout, self.in_flight.wait())
            .await
            .is_err()
        {
            warn!(
                "Gave up waiting for {} telemetry requests after {:?}",
                self.in_flight.len(),
                timeout
            );
        }
        self.in_flight.reopen();
    }
}

impl Transport for HttpForward {
    fn send(&self, record: &TelemetryRecord) {
        let body = match record.to_body() {
            Ok(body) => body,
            Err(e) => {
                debug!("Dropping telemetry record: {:?}", e);
                return;
            }
        };

        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                warn!("No tokio runtime available, dropping telemetry record");
                return;
            }
        };

        let endpoint = self.endpoint.clone();
        let client = self.client.clone();
        let timeout = self.timeout;

        self.in_flight.spawn_on(
            async move {
                let now = Instant::now();
                let url = endpoint.get().await;

                match send_http_text(&client, &url, body, timeout).await {
                    Ok(status) => debug!(
                        "Sent telemetry record to {}, status: {}, elapsed: {:?}",
                        url,
                        status,
                        now.elapsed()
                    ),
                    Err(e) => debug!("Telemetry request to {} failed: {:?}", url, e),
                }
            },
            &handle,
        );
    }
}
