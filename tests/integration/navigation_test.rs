//! Integration tests for role-gated screens and logout.

mod helpers;

use filedesk_auth::Screen;
use filedesk_core::ErrorKind;
use filedesk_core::traits::AutoConfirm;
use filedesk_service::ShellState;

#[tokio::test]
async fn test_client_menu() {
    let mut app = helpers::TestApp::new().await;
    let ctx = app.login_as("client1", "client", Some(1)).await;

    let shell = ctx.shell().await;
    assert_eq!(shell.current_screen(), Some(Screen::Dashboard));
    assert_eq!(shell.visible_screens(), vec![Screen::Dashboard, Screen::Upload]);
}

#[tokio::test]
async fn test_employee_menu() {
    let mut app = helpers::TestApp::new().await;
    let ctx = app.login_as("employee1", "employee", None).await;

    assert_eq!(ctx.shell().await.visible_screens(), vec![Screen::Dashboard]);
}

#[tokio::test]
async fn test_admin_menu() {
    let mut app = helpers::TestApp::new().await;
    let ctx = app.login_as("admin", "admin", None).await;

    assert_eq!(
        ctx.shell().await.visible_screens(),
        vec![
            Screen::Dashboard,
            Screen::Upload,
            Screen::Analytics,
            Screen::AdminDashboard
        ]
    );
}

#[tokio::test]
async fn test_hidden_screen_is_refused() {
    let mut app = helpers::TestApp::new().await;
    let ctx = app.login_as("client1", "client", Some(1)).await;
    let mut shell = ctx.shell().await;

    shell.navigate(Screen::Upload).unwrap();
    let err = shell.navigate(Screen::AdminDashboard).unwrap_err();

    assert_eq!(err.kind, ErrorKind::Authorization);
    assert_eq!(shell.current_screen(), Some(Screen::Upload));
}

#[tokio::test]
async fn test_logged_out_shell_has_no_screens() {
    let app = helpers::TestApp::new().await;
    let ctx = app.context().await;
    let mut shell = ctx.shell().await;

    assert_eq!(shell.state(), ShellState::Unauthenticated);
    assert!(shell.visible_screens().is_empty());
    assert_eq!(
        shell.navigate(Screen::Dashboard).unwrap_err().kind,
        ErrorKind::Session
    );
}

#[tokio::test]
async fn test_analytics_denied_without_request() {
    let mut app = helpers::TestApp::new().await;
    let ctx = app.login_as("employee1", "employee", None).await;
    let logs = app
        .server
        .mock("GET", "/analytics/logs")
        .expect(0)
        .create_async()
        .await;

    let err = ctx.analytics().load().await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Authorization);
    logs.assert_async().await;
}

#[tokio::test]
async fn test_admin_reads_activity_log() {
    let mut app = helpers::TestApp::new().await;
    let ctx = app.login_as("admin", "admin", None).await;
    let _logs = app
        .server
        .mock("GET", "/analytics/logs")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[{"user":"client1","action":"upload","file_id":4,"timestamp":"2024-04-02T09:15:00"},
                {"user":"admin","action":"delete","file_id":null,"timestamp":"2024-04-03T10:00:00"}]"#,
        )
        .create_async()
        .await;

    let entries = ctx.analytics().load().await.unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].action, "upload");
    assert_eq!(entries[1].file_id, None);
}

#[tokio::test]
async fn test_cancelled_logout_keeps_session() {
    let mut app = helpers::TestApp::new().await;
    let ctx = app.login_as("client1", "client", Some(1)).await;
    let mut shell = ctx.shell().await;

    let done = shell.logout(&ctx.sessions(), &AutoConfirm(false)).await.unwrap();

    assert!(!done);
    assert!(ctx.session.is_authenticated().await);
    assert!(app.session_file().exists());
    assert_eq!(shell.current_screen(), Some(Screen::Dashboard));
}

#[tokio::test]
async fn test_confirmed_logout_ends_session() {
    let mut app = helpers::TestApp::new().await;
    let ctx = app.login_as("client1", "client", Some(1)).await;
    let mut shell = ctx.shell().await;

    let done = shell.logout(&ctx.sessions(), &AutoConfirm(true)).await.unwrap();

    assert!(done);
    assert_eq!(shell.state(), ShellState::Unauthenticated);
    assert!(!app.session_file().exists());
}
