use std::io::Read;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use url::Url;

use wobserver_client::config_manager::Config;
use wobserver_client::storage::{FileStore, SettingsStore};
use wobserver_client::TelemetrySender;
use wobserver_common::constants::PROCESS_SERVER_KEY;
use wobserver_common::{googledocs_id_from_url, TelemetryRecord};

fn read_record(data: Option<String>) -> Result<TelemetryRecord> {
    let raw = match data {
        Some(data) => data,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read record from stdin")?;
            buffer
        }
    };
    TelemetryRecord::from_json_str(&raw)
}

pub async fn send(config: &Config, data: Option<String>) -> Result<()> {
    let record = read_record(data)?;

    let store = Arc::new(FileStore::new(&config.storage_path));
    let mut sender = TelemetrySender::new(config, store);
    // single send, so resolve the stored endpoint first
    sender.endpoint_loaded().await;

    sender.log_event(&record);
    sender.close().await;

    println!("Record dispatched to {}", sender.endpoint().get().await);
    Ok(())
}

pub fn print_doc_id(url: &str) -> Result<()> {
    let id = googledocs_id_from_url(url)
        .ok_or_else(|| anyhow!("Not a Google Docs document URL: {}", url))?;
    println!("{}", id);
    Ok(())
}

#[derive(Serialize)]
struct InfoOutput<'a> {
    endpoint: String,
    stored_endpoint: Option<String>,
    config: &'a Config,
}

pub async fn info(config: &Config, json: bool) -> Result<()> {
    let store = FileStore::new(&config.storage_path);
    let stored_endpoint = store.get(PROCESS_SERVER_KEY).unwrap_or_else(|e| {
        tracing::debug!("Failed to read stored endpoint: {:?}", e);
        None
    });

    let mut sender = TelemetrySender::new(config, Arc::new(store));
    sender.endpoint_loaded().await;

    let output = InfoOutput {
        endpoint: sender.endpoint().get().await,
        stored_endpoint,
        config,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Endpoint:         {}", output.endpoint);
        println!(
            "Stored endpoint:  {}",
            output.stored_endpoint.as_deref().unwrap_or("<none>")
        );
        println!("Default endpoint: {}", config.ajax_server);
        println!("Websocket:        {}", config.experimental_websocket);
        println!("Storage file:     {:?}", config.storage_path);
        println!("Log directory:    {:?}", config.log_dir);
    }
    Ok(())
}

pub fn set_server(config: &Config, url: Option<&str>, clear: bool) -> Result<()> {
    let store = FileStore::new(&config.storage_path);

    if clear {
        if store.remove(PROCESS_SERVER_KEY)? {
            println!("Stored endpoint removed.");
        } else {
            println!("No stored endpoint to remove.");
        }
        return Ok(());
    }

    let url = url.ok_or_else(|| anyhow!("A server url is required"))?;
    Url::parse(url).with_context(|| format!("invalid server url: {}", url))?;

    store.set(PROCESS_SERVER_KEY, url)?;
    println!("Stored endpoint set to {}", url);
    Ok(())
}
