//! Activity log command.

use serde::Serialize;
use tabled::Tabled;

use filedesk_auth::Screen;
use filedesk_core::error::AppError;
use filedesk_entity::activity::ActivityLogEntry;
use filedesk_service::ConsoleContext;

use crate::output::{self, OutputFormat};

/// Activity log display row
#[derive(Debug, Serialize, Tabled)]
pub(crate) struct LogRow {
    /// Time
    timestamp: String,
    /// User
    user: String,
    /// Action
    action: String,
    /// File ID
    file_id: String,
}

pub(crate) fn log_rows(entries: &[ActivityLogEntry]) -> Vec<LogRow> {
    entries
        .iter()
        .map(|e| LogRow {
            timestamp: e.timestamp.clone(),
            user: e.user.clone(),
            action: e.action.clone(),
            file_id: output::or_dash(e.file_id),
        })
        .collect()
}

/// Execute the logs command
pub async fn execute(ctx: &ConsoleContext, format: OutputFormat) -> Result<(), AppError> {
    super::open_screen(ctx, Screen::Analytics).await?;
    let entries = ctx.analytics().load().await?;

    match format {
        OutputFormat::Table => output::print_list(&log_rows(&entries), format),
        OutputFormat::Json => output::print_item(&entries, format),
    }
    Ok(())
}
