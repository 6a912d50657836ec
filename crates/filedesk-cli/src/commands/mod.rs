//! CLI command definitions and dispatch.

pub mod admin;
pub mod config;
pub mod files;
pub mod logs;
pub mod session;
pub mod shell;

use clap::{Parser, Subcommand};

use filedesk_auth::Screen;
use filedesk_core::config::ConsoleConfig;
use filedesk_core::error::AppError;
use filedesk_service::{ConsoleContext, NavigationShell};

use crate::output::OutputFormat;

/// FileDesk — console for the file-exchange service
#[derive(Debug, Parser)]
#[command(name = "filedesk", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "FILEDESK_CONFIG", default_value = "config/default.toml")]
    pub config: String,

    /// Configuration overlay (`config/{env}.toml`)
    #[arg(long, env = "FILEDESK_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in and store the session
    Login(session::LoginArgs),
    /// End the stored session
    Logout {
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
    /// Show the logged-in user
    Whoami,
    /// List, upload, download and delete files
    Files(files::FilesArgs),
    /// Browse clients and their files (admin)
    Admin(admin::AdminArgs),
    /// Show the activity log (admin)
    Logs,
    /// Interactive menu
    Shell,
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Load the configuration named by `--config` and `--env`.
    pub fn load_config(&self) -> Result<ConsoleConfig, AppError> {
        ConsoleConfig::load(&self.config, &self.env)
    }

    /// Execute the CLI command
    pub async fn execute(&self, config: ConsoleConfig) -> Result<(), AppError> {
        if let Commands::Config(args) = &self.command {
            return config::execute(args, &self.config, &config, self.format).await;
        }

        let ctx = ConsoleContext::from_config(config).await?;
        match &self.command {
            Commands::Login(args) => session::login(&ctx, args, self.format).await,
            Commands::Logout { force } => session::logout(&ctx, *force).await,
            Commands::Whoami => session::whoami(&ctx, self.format).await,
            Commands::Files(args) => files::execute(&ctx, args, self.format).await,
            Commands::Admin(args) => admin::execute(&ctx, args, self.format).await,
            Commands::Logs => logs::execute(&ctx, self.format).await,
            Commands::Shell => shell::run(&ctx).await,
            Commands::Config(_) => Ok(()),
        }
    }
}

/// Helper: check the session may open `screen`, as the interactive menu would.
pub async fn open_screen(ctx: &ConsoleContext, screen: Screen) -> Result<NavigationShell, AppError> {
    ctx.session.require().await?;
    let mut shell = ctx.shell().await;
    shell.navigate(screen)?;
    Ok(shell)
}
