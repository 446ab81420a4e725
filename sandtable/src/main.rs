// sandtable/src/main.rs

use clap::Parser;
use tracing::debug;

mod cli;
mod commands;

use cli::{Cli, Commands};
use sandtable_core::ErrorHandler;
use sandtable_core::infrastructure::config::{load_app_config, load_app_config_file};

fn main() -> anyhow::Result<()> {
    // 1. Setup Logging (Tracing) on stderr; stdout carries the command output.
    // RUST_LOG is not read: INFO and above.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // 2. Config: explicit file, else the current directory (defaults when absent)
    let mut config = match &cli.config {
        Some(path) => load_app_config_file(path)?,
        None => load_app_config(&std::env::current_dir()?)?,
    };
    if let Some(lang) = cli.lang {
        config = config.with_language(lang)?;
    }
    debug!(
        language = %config.language,
        environment = %config.environment,
        log_errors = config.log_errors,
        "Configuration ready"
    );
    let handler = ErrorHandler::install_global(config)?;

    match cli.command {
        Commands::Validate {
            operation,
            input,
            data,
        } => commands::validate::execute(&operation, input, data),

        Commands::Classify {
            status,
            business_code,
            body,
            endpoint,
            transport_code,
            message,
            not_sent,
        } => commands::classify::execute(
            handler,
            commands::classify::ClassifyArgs {
                status,
                business_code,
                body,
                endpoint,
                transport_code,
                message,
                not_sent,
            },
        ),

        Commands::Codes => commands::codes::execute(handler),
    }
}
