//! FileDesk — console for the file-exchange service
//!
//! Entry point: parses the command line, loads configuration, sets up
//! logging and dispatches to the CLI commands.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use filedesk_cli::Cli;
use filedesk_cli::output;
use filedesk_core::config::ConsoleConfig;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match cli.load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::debug!(
        server = %config.api.base_url,
        "Starting FileDesk v{}",
        env!("CARGO_PKG_VERSION")
    );

    if let Err(e) = cli.execute(config).await {
        tracing::debug!(kind = ?e.kind, status = ?e.status, "Command failed");
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Initialize tracing/logging. Logs go to stderr so command output stays
/// clean on stdout.
fn init_logging(config: &ConsoleConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
