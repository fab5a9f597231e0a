use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A caller-supplied telemetry payload.
///
/// The record has no schema: whatever the caller hands over is kept as a JSON value and
/// serialized verbatim when it is sent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TelemetryRecord(Value);

impl TelemetryRecord {
    pub fn new<T: Serialize>(data: &T) -> Result<Self> {
        let value = serde_json::to_value(data).context("Failed to convert telemetry record")?;
        Ok(Self(value))
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let value = serde_json::from_str(raw).context("Failed to parse telemetry record")?;
        Ok(Self(value))
    }

    /// Text body sent over the wire.
    pub fn to_body(&self) -> Result<String> {
        serde_json::to_string(&self.0).context("Failed to serialize telemetry record")
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for TelemetryRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<serde_json::Map<String, Value>> for TelemetryRecord {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        Self(Value::Object(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Keystroke<'a> {
        event: &'a str,
        key_code: u32,
        doc_id: Option<&'a str>,
    }

    #[test]
    fn body_is_plain_json_of_the_record() {
        let record = TelemetryRecord::from(json!({"event": "keystroke", "keyCode": 65}));
        let body = record.to_body().unwrap();
        let parsed: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed, json!({"event": "keystroke", "keyCode": 65}));
    }

    #[test]
    fn typed_structs_are_accepted() {
        let record = TelemetryRecord::new(&Keystroke {
            event: "keystroke",
            key_code: 13,
            doc_id: None,
        })
        .unwrap();

        assert_eq!(record.as_value()["key_code"], json!(13));
        assert_eq!(record.as_value()["doc_id"], Value::Null);
    }

    #[test]
    fn non_object_payloads_are_kept_opaque() {
        let record = TelemetryRecord::from_json_str("[1, \"two\", null]").unwrap();
        assert_eq!(record.to_body().unwrap(), "[1,\"two\",null]");
    }

    #[test]
    fn invalid_json_is_rejected() {
        assert!(TelemetryRecord::from_json_str("{not json").is_err());
    }
}
