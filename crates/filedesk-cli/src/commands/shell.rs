//! Interactive menu mirroring the web console's screens.

use std::path::PathBuf;

use tracing::debug;

use filedesk_auth::Screen;
use filedesk_core::error::{AppError, ErrorKind};
use filedesk_core::types::{ClientId, FileId, parse_date};
use filedesk_entity::file::SelectedFile;
use filedesk_service::{ConsoleContext, Loadable, NavigationShell, ShellState};

use super::files::{file_rows, history_rows};
use super::logs::log_rows;
use crate::output::{self, OutputFormat};
use crate::prompt::{self, DialoguerConfirmer};

const LOG_OUT: &str = "Log out";
const QUIT: &str = "Quit";

/// Run the menu until the user quits.
pub async fn run(ctx: &ConsoleContext) -> Result<(), AppError> {
    let mut shell = ctx.shell().await;

    loop {
        if shell.state() == ShellState::Unauthenticated && !login(ctx, &mut shell).await? {
            return Ok(());
        }

        let screens = shell.visible_screens();
        let mut items: Vec<String> = screens.iter().map(|s| s.to_string()).collect();
        items.push(LOG_OUT.to_string());
        items.push(QUIT.to_string());

        let Some(choice) = prompt::select("Go to", &items)? else {
            return Ok(());
        };

        if let Some(screen) = screens.get(choice).copied() {
            shell.navigate(screen)?;
            if let Err(e) = show(ctx, screen).await {
                report(&e);
                if e.is_unauthorized() && !ctx.session.is_authenticated().await {
                    shell = NavigationShell::new(ctx.rbac.clone());
                }
            }
        } else if items[choice] == LOG_OUT {
            if shell.logout(&ctx.sessions(), &DialoguerConfirmer).await? {
                output::print_success("Logged out");
            }
        } else {
            return Ok(());
        }
    }
}

/// Prompt for credentials until login succeeds. `false` when the user gives up.
async fn login(ctx: &ConsoleContext, shell: &mut NavigationShell) -> Result<bool, AppError> {
    loop {
        let username = prompt::text("Username (empty to quit)", true)?;
        if username.trim().is_empty() {
            return Ok(false);
        }
        let password = prompt::password("Password")?;

        match ctx.sessions().login(&username, &password).await {
            Ok(session) => {
                shell.on_login(&session);
                output::print_success(&format!(
                    "Welcome, {} ({})",
                    session.username, session.role
                ));
                return Ok(true);
            }
            Err(e) => report(&e),
        }
    }
}

fn report(e: &AppError) {
    match e.kind {
        ErrorKind::Validation | ErrorKind::Authentication | ErrorKind::Transport => {
            output::print_error(&e.message)
        }
        _ => output::print_error(&e.to_string()),
    }
}

async fn show(ctx: &ConsoleContext, screen: Screen) -> Result<(), AppError> {
    debug!(%screen, "Opening screen");
    match screen {
        Screen::Dashboard => dashboard(ctx).await,
        Screen::Upload => upload(ctx).await,
        Screen::Analytics => {
            let entries = ctx.analytics().load().await?;
            output::print_list(&log_rows(&entries), OutputFormat::Table);
            Ok(())
        }
        Screen::AdminDashboard => admin_dashboard(ctx).await,
    }
}

async fn dashboard(ctx: &ConsoleContext) -> Result<(), AppError> {
    let files = ctx.dashboard().load().await?;
    output::print_list(&file_rows(&files), OutputFormat::Table);
    if files.is_empty() {
        return Ok(());
    }

    let mut items: Vec<String> = files
        .iter()
        .map(|f| format!("Download {} (#{})", f.filename, f.id))
        .collect();
    items.push("Back".to_string());

    if let Some(i) = prompt::select("Action", &items)? {
        if let Some(file) = files.get(i) {
            let dir = PathBuf::from(&ctx.config.upload.download_dir);
            let saved = ctx
                .api
                .download_file(file.id, &dir, Some(&file.filename))
                .await?;
            output::print_success(&format!("Saved to {}", saved.display()));
        }
    }
    Ok(())
}

async fn upload(ctx: &ConsoleContext) -> Result<(), AppError> {
    let mut workflow = ctx.upload_workflow();
    if let Err(e) = workflow.refresh_history().await {
        debug!(error = %e, "Could not load upload history");
    }

    let path = prompt::text("File to upload (empty to go back)", true)?;
    if path.trim().is_empty() {
        return Ok(());
    }
    workflow.select_file(SelectedFile::inspect(path.trim())?)?;

    let start = optional_date(&prompt::text("Start date (YYYY-MM-DD)", true)?)?;
    let end = optional_date(&prompt::text("End date (YYYY-MM-DD)", true)?)?;
    workflow.set_date_range(start, end);

    if ctx
        .session
        .role()
        .await
        .is_some_and(|role| role.is_admin())
    {
        let clients = ctx.api.list_clients().await?;
        let names: Vec<String> = clients.iter().map(|c| c.name.clone()).collect();
        let picked = prompt::select("Client", &names)?.and_then(|i| clients.get(i));
        workflow.select_client(picked.map(|c| c.id));
    }

    let receipt = workflow.submit().await?;
    output::print_success(&format!(
        "{} (id: {})",
        receipt.msg,
        output::or_dash(receipt.file_id)
    ));
    output::print_list(&history_rows(workflow.history()), OutputFormat::Table);
    Ok(())
}

fn optional_date(input: &str) -> Result<Option<chrono::NaiveDate>, AppError> {
    let input = input.trim();
    if input.is_empty() {
        Ok(None)
    } else {
        parse_date(input).map(Some)
    }
}

async fn admin_dashboard(ctx: &ConsoleContext) -> Result<(), AppError> {
    let browser = ctx.admin_browser();
    let clients = browser.load_clients().await?;
    if clients.is_empty() {
        output::print_warning("No clients found.");
        return Ok(());
    }

    loop {
        let state = browser.state().await;
        let Some(selected) = state.selected else {
            return Ok(());
        };
        match &state.files {
            Loadable::Ready(files) => {
                println!("Files for client {selected}:");
                output::print_list(&file_rows(files), OutputFormat::Table);
            }
            Loadable::Failed(message) => output::print_error(message),
            Loadable::Loading => {}
        }

        let actions = ["Download a file", "Delete a file", "Choose another client", "Back"];
        match prompt::select("Action", &actions)? {
            Some(0) => {
                if let Some(id) = pick_file(&state.files)? {
                    let dir = PathBuf::from(&ctx.config.upload.download_dir);
                    let saved = browser.download(id, &dir).await?;
                    output::print_success(&format!("Saved to {}", saved.display()));
                }
            }
            Some(1) => {
                if let Some(id) = pick_file(&state.files)? {
                    if browser.delete(id, &DialoguerConfirmer).await? {
                        output::print_success(&format!("File {id} deleted"));
                    }
                }
            }
            Some(2) => {
                let names: Vec<String> = clients
                    .iter()
                    .map(|c| format!("{} (#{})", c.name, c.id))
                    .collect();
                if let Some(i) = prompt::select("Client", &names)? {
                    let id: ClientId = clients[i].id;
                    // Other failures show up in the file list on the next pass.
                    if let Err(e) = browser.select_client(id).await {
                        if e.is_unauthorized() {
                            return Err(e);
                        }
                    }
                }
            }
            _ => return Ok(()),
        }
    }
}

fn pick_file(files: &Loadable<Vec<filedesk_entity::file::FileRecord>>) -> Result<Option<FileId>, AppError> {
    let Some(files) = files.ready().filter(|f| !f.is_empty()) else {
        output::print_warning("No files to choose from.");
        return Ok(None);
    };
    let names: Vec<String> = files
        .iter()
        .map(|f| format!("{} (#{})", f.filename, f.id))
        .collect();
    Ok(prompt::select("File", &names)?.map(|i| files[i].id))
}
