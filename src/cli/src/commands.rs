use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Clone)]
#[clap(
    name = "wobserver",
    about = "Sends writing-process telemetry to the Writing Observer server",
    version
)]
pub struct Cli {
    /// TOML file overriding the built-in defaults
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,

    /// Also print logs to stderr
    #[clap(long, short, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Send one JSON telemetry record to the server
    Send {
        /// The record; read from stdin when omitted
        data: Option<String>,
    },

    /// Print the document id of a Google Docs URL
    DocId { url: String },

    /// Shows the current configuration and the resolved endpoint
    Info {
        /// Output information in JSON format
        #[clap(long)]
        json: bool,
    },

    /// Store the endpoint override used by later sends
    SetServer {
        #[clap(required_unless_present = "clear")]
        url: Option<String>,

        /// Remove the stored override instead
        #[clap(long, conflicts_with = "url")]
        clear: bool,
    },
}
