use std::future::Future;

use anyhow::{Context, Result};
use clap::Parser;

use crate::commands::{Cli, Commands};
use crate::handlers;
use wobserver_client::config_manager::ConfigLoader;
use wobserver_client::logging::setup_logging;

fn block_on(future: impl Future<Output = Result<()>>) -> Result<()> {
    tokio::runtime::Runtime::new()
        .context("Failed to start tokio runtime")?
        .block_on(future)
}

pub fn process_cli() -> Result<()> {
    let cli = Cli::parse();
    // Use the --config flag, if provided, when loading the configuration
    let config = ConfigLoader::load_config(cli.config.as_deref())?;

    if let Err(e) = setup_logging(&config.log_dir, cli.verbose) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    match cli.command {
        Commands::Send { data } => block_on(handlers::send(&config, data)),
        Commands::DocId { url } => handlers::print_doc_id(&url),
        Commands::Info { json } => block_on(handlers::info(&config, json)),
        Commands::SetServer { url, clear } => handlers::set_server(&config, url.as_deref(), clear),
    }
}
