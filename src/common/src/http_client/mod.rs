use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;

/// POSTs `body` as-is to `url` and returns the status code; the response body is dropped.
///
/// No credentials and no content-type header are attached.
pub async fn send_http_text(
    client: &Client,
    url: &str,
    body: String,
    timeout_duration: Option<Duration>,
) -> Result<u16> {
    let mut request = client.post(url).body(body);

    if let Some(timeout_duration) = timeout_duration {
        request = request.timeout(timeout_duration)
    }

    let response = request.send().await.context("Failed to send http post")?;

    Ok(response.status().as_u16())
}
