use crate::exporters::http_forward::HttpForward;
use wobserver_common::TelemetryRecord;

/// Delivers one telemetry record. Delivery is one-way: nothing is reported back.
pub trait Transport {
    fn send(&self, record: &TelemetryRecord);
}

// a streaming socket transport would be added here as a second variant
pub enum TransportEnum {
    Http(HttpForward),
}

impl Transport for TransportEnum {
    fn send(&self, record: &TelemetryRecord) {
        match self {
            TransportEnum::Http(client) => client.send(record),
        }
    }
}

impl TransportEnum {
    pub async fn close(&self) {
        match self {
            TransportEnum::Http(client) => client.close().await,
        }
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            TransportEnum::Http(_) => "HttpForward",
        }
    }
}
