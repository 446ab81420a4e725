// sandtable/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sandtable")]
#[command(about = "Error classification & request validation for the Sandtable admin console", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to ./sandtable.yaml or ./sandtable.yml when present)
    #[arg(long, global = true, env = "SANDTABLE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Language for user-facing messages (en, zh, zh-CN, ...)
    #[arg(long, global = true)]
    pub lang: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ✅ Validates a request payload for an admin operation
    Validate {
        /// searchUsers | searchTeams | assignUser | transferUser | bulkAssign | export
        #[arg(long, short)]
        operation: String,

        /// JSON file holding the request
        #[arg(long, short, conflicts_with = "data", required_unless_present = "data")]
        input: Option<PathBuf>,

        /// Inline JSON request
        #[arg(long)]
        data: Option<String>,
    },

    /// 🏷️ Classifies a failed HTTP call into a domain error
    Classify {
        /// HTTP status of the response, if one came back
        #[arg(long)]
        status: Option<u16>,

        /// Backend business code carried in the response body
        #[arg(long, requires = "status")]
        business_code: Option<i64>,

        /// Raw JSON response body
        #[arg(long, requires = "status")]
        body: Option<String>,

        /// Endpoint that was called (recorded in details)
        #[arg(long)]
        endpoint: Option<String>,

        /// Transport error code (ECONNABORTED, ERR_NETWORK, ...)
        #[arg(long)]
        transport_code: Option<String>,

        /// Client-side error message
        #[arg(long)]
        message: Option<String>,

        /// The request never left the client
        #[arg(long, default_value = "false", conflicts_with = "status")]
        not_sent: bool,
    },

    /// 📖 Lists every error code with its kind and message
    Codes,
}
