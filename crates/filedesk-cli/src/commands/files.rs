//! File commands: list, upload, history, download, delete.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use filedesk_auth::{ConsolePermission, Screen};
use filedesk_core::error::AppError;
use filedesk_core::types::{ClientId, FileId, parse_date};
use filedesk_entity::file::{FileRecord, HistoryEntry, SelectedFile};
use filedesk_service::ConsoleContext;

use crate::output::{self, OutputFormat};
use crate::prompt;

/// Arguments for file commands
#[derive(Debug, Args)]
pub struct FilesArgs {
    /// File subcommand
    #[command(subcommand)]
    pub command: FilesCommand,
}

/// File subcommands
#[derive(Debug, Subcommand)]
pub enum FilesCommand {
    /// List files visible to you
    List,
    /// Upload an XLS/XLSX file
    Upload {
        /// Local file path
        path: PathBuf,
        /// First day covered (YYYY-MM-DD)
        #[arg(short, long)]
        start: Option<String>,
        /// Last day covered (YYYY-MM-DD)
        #[arg(short, long)]
        end: Option<String>,
        /// Target client ID (admin only)
        #[arg(long)]
        client: Option<i64>,
    },
    /// Show upload history
    History {
        /// Client ID (admin only)
        #[arg(long)]
        client: Option<i64>,
    },
    /// Download a file
    Download {
        /// File ID
        id: i64,
        /// Destination directory
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Save under this name instead of the server's
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Delete a file (admin only)
    Delete {
        /// File ID
        id: i64,
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
}

/// File display row
#[derive(Debug, Serialize, Tabled)]
pub(crate) struct FileRow {
    /// ID
    id: i64,
    /// Filename
    filename: String,
    /// Period
    period: String,
    /// Uploaded by
    uploaded_by: String,
    /// Uploaded at
    uploaded_at: String,
}

impl From<&FileRecord> for FileRow {
    fn from(f: &FileRecord) -> Self {
        Self {
            id: f.id.get(),
            filename: f.filename.clone(),
            period: f
                .date_range()
                .map(|r| r.to_string())
                .unwrap_or_else(|_| format!("{} - {}", f.start_date, f.end_date)),
            uploaded_by: f.uploaded_by.clone(),
            uploaded_at: f.uploaded_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// History display row
#[derive(Debug, Serialize, Tabled)]
pub(crate) struct HistoryRow {
    /// Name
    name: String,
    /// Size
    size: String,
    /// Type
    #[serde(rename = "type")]
    #[tabled(rename = "type")]
    mime_type: String,
    /// Date
    date: String,
    /// Status
    status: String,
}

impl From<&HistoryEntry> for HistoryRow {
    fn from(h: &HistoryEntry) -> Self {
        Self {
            name: output::or_dash(h.name.as_ref()),
            size: output::or_dash(h.size.map(output::format_file_size)),
            mime_type: output::or_dash(h.mime_type.as_ref()),
            date: output::or_dash(h.date.as_ref()),
            status: output::or_dash(h.status.as_ref()),
        }
    }
}

pub(crate) fn file_rows(files: &[FileRecord]) -> Vec<FileRow> {
    files.iter().map(FileRow::from).collect()
}

pub(crate) fn history_rows(history: &[HistoryEntry]) -> Vec<HistoryRow> {
    history.iter().map(HistoryRow::from).collect()
}

/// Parse an optional `YYYY-MM-DD` argument.
fn date_arg(value: &Option<String>) -> Result<Option<chrono::NaiveDate>, AppError> {
    value.as_deref().map(parse_date).transpose()
}

/// Execute file commands
pub async fn execute(
    ctx: &ConsoleContext,
    args: &FilesArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        FilesCommand::List => {
            super::open_screen(ctx, Screen::Dashboard).await?;
            let files = ctx.dashboard().load().await?;
            output::print_list(&file_rows(&files), format);
        }
        FilesCommand::Upload {
            path,
            start,
            end,
            client,
        } => {
            super::open_screen(ctx, Screen::Upload).await?;
            let mut workflow = ctx.upload_workflow();

            let file = SelectedFile::inspect(path)?;
            println!(
                "Uploading '{}' ({})...",
                file.name,
                output::format_file_size(file.size)
            );
            workflow.select_file(file)?;
            workflow.set_date_range(date_arg(start)?, date_arg(end)?);
            workflow.select_client(client.map(ClientId));

            let receipt = workflow.submit().await?;
            match format {
                OutputFormat::Table => {
                    output::print_success(&format!(
                        "{} (id: {})",
                        if receipt.msg.is_empty() { "File uploaded" } else { receipt.msg.as_str() },
                        output::or_dash(receipt.file_id)
                    ));
                    if !workflow.history().is_empty() {
                        println!("\nUpload history:");
                        output::print_list(&history_rows(workflow.history()), format);
                    }
                }
                OutputFormat::Json => output::print_item(&receipt, format),
            }
        }
        FilesCommand::History { client } => {
            super::open_screen(ctx, Screen::Upload).await?;
            let mut workflow = ctx.upload_workflow();
            workflow.select_client(client.map(ClientId));
            let history = workflow.refresh_history().await?;
            output::print_list(&history_rows(history), format);
        }
        FilesCommand::Download { id, output: dir, name } => {
            let role = super::open_screen(ctx, Screen::Dashboard)
                .await?
                .role()
                .ok_or_else(|| AppError::session("Not logged in"))?;
            ctx.rbac
                .require_permission(&role, &ConsolePermission::FileDownload)?;

            let dir = dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(&ctx.config.upload.download_dir));
            let saved = ctx
                .api
                .download_file(FileId(*id), &dir, name.as_deref())
                .await?;
            output::print_success(&format!("Saved to {}", saved.display()));
        }
        FilesCommand::Delete { id, force } => {
            super::open_screen(ctx, Screen::AdminDashboard).await?;
            let browser = ctx.admin_browser();
            let confirmer = prompt::confirmer(*force);

            if browser.delete(FileId(*id), confirmer.as_ref()).await? {
                output::print_success(&format!("File {} deleted", id));
            } else {
                println!("Cancelled.");
            }
        }
    }

    Ok(())
}
