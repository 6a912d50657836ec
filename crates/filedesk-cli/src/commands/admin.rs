//! Admin commands: clients and their files.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use filedesk_auth::Screen;
use filedesk_core::error::AppError;
use filedesk_core::types::ClientId;
use filedesk_entity::client::ClientRecord;
use filedesk_service::{ConsoleContext, Loadable};

use super::files::file_rows;
use crate::output::{self, OutputFormat};

/// Arguments for admin commands
#[derive(Debug, Args)]
pub struct AdminArgs {
    /// Admin subcommand
    #[command(subcommand)]
    pub command: AdminCommand,
}

/// Admin subcommands
#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// List client organisations
    Clients,
    /// List a client's files (first client when omitted)
    Files {
        /// Client ID
        #[arg(long)]
        client: Option<i64>,
    },
}

/// Client display row
#[derive(Debug, Serialize, Tabled)]
struct ClientRow {
    /// ID
    id: i64,
    /// Name
    name: String,
}

impl From<&ClientRecord> for ClientRow {
    fn from(c: &ClientRecord) -> Self {
        Self {
            id: c.id.get(),
            name: c.name.clone(),
        }
    }
}

/// Execute admin commands
pub async fn execute(
    ctx: &ConsoleContext,
    args: &AdminArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    super::open_screen(ctx, Screen::AdminDashboard).await?;
    let browser = ctx.admin_browser();

    match &args.command {
        AdminCommand::Clients => {
            let clients = browser.list_clients().await?;
            let rows: Vec<ClientRow> = clients.iter().map(ClientRow::from).collect();
            output::print_list(&rows, format);
        }
        AdminCommand::Files { client } => {
            match client {
                Some(id) => {
                    browser.select_client(ClientId(*id)).await?;
                }
                None => {
                    browser.load_clients().await?;
                }
            }

            let state = browser.state().await;
            let Some(selected) = state.selected else {
                output::print_warning("No clients found.");
                return Ok(());
            };
            if format == OutputFormat::Table {
                let name = state
                    .clients
                    .iter()
                    .find(|c| c.id == selected)
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| format!("client {selected}"));
                println!("Files for {name}:");
            }
            match &state.files {
                Loadable::Ready(files) => output::print_list(&file_rows(files), format),
                Loadable::Failed(message) => return Err(AppError::transport(message.clone())),
                Loadable::Loading => {}
            }
        }
    }

    Ok(())
}
