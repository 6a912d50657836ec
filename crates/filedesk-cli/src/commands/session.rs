//! Login, logout and whoami.

use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;

use filedesk_core::error::AppError;
use filedesk_core::types::ClientId;
use filedesk_entity::session::Session;
use filedesk_entity::user::Role;
use filedesk_service::ConsoleContext;

use crate::output::{self, OutputFormat};
use crate::prompt;

/// Arguments for login
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Username (will prompt if not provided)
    #[arg(short, long)]
    pub username: Option<String>,
    /// Password (will prompt if not provided)
    #[arg(short, long, env = "FILEDESK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Session summary safe to print; never includes the token.
#[derive(Debug, Serialize)]
struct SessionView {
    username: String,
    role: Role,
    client_id: Option<ClientId>,
    expires_at: Option<DateTime<Utc>>,
    logged_in_at: DateTime<Utc>,
}

impl From<&Session> for SessionView {
    fn from(s: &Session) -> Self {
        Self {
            username: s.username.clone(),
            role: s.role,
            client_id: s.client_id,
            expires_at: s.expires_at,
            logged_in_at: s.created_at,
        }
    }
}

pub async fn login(ctx: &ConsoleContext, args: &LoginArgs, format: OutputFormat) -> Result<(), AppError> {
    let username = match &args.username {
        Some(u) => u.clone(),
        None => prompt::text("Username", true)?,
    };
    let password = match &args.password {
        Some(p) => p.clone(),
        None => prompt::password("Password")?,
    };

    let session = ctx.sessions().login(&username, &password).await?;

    match format {
        OutputFormat::Table => {
            output::print_success(&format!(
                "Logged in as '{}' ({})",
                session.username, session.role
            ));
            let shell = ctx.shell().await;
            let screens: Vec<String> = shell.visible_screens().iter().map(|s| s.to_string()).collect();
            output::print_kv("Screens", &screens.join(", "));
        }
        OutputFormat::Json => output::print_item(&SessionView::from(&session), format),
    }
    Ok(())
}

pub async fn logout(ctx: &ConsoleContext, force: bool) -> Result<(), AppError> {
    if ctx.session.current().await.is_none() {
        output::print_warning("Not logged in.");
        return Ok(());
    }

    let sessions = ctx.sessions();
    let mut shell = ctx.shell().await;
    let confirmer = prompt::confirmer(force);
    if shell.logout(&sessions, confirmer.as_ref()).await? {
        output::print_success("Logged out");
    } else {
        println!("Cancelled.");
    }
    Ok(())
}

pub async fn whoami(ctx: &ConsoleContext, format: OutputFormat) -> Result<(), AppError> {
    let session = ctx.session.require().await?;
    let view = SessionView::from(&session);

    match format {
        OutputFormat::Table => {
            output::print_kv("Username", &view.username);
            output::print_kv("Role", view.role.as_str());
            output::print_kv("Client", &output::or_dash(view.client_id));
            output::print_kv(
                "Expires",
                &output::or_dash(view.expires_at.map(|t| t.format("%Y-%m-%d %H:%M UTC"))),
            );
            output::print_kv("Server", &ctx.config.api.base_url);
        }
        OutputFormat::Json => output::print_item(&view, format),
    }
    Ok(())
}
