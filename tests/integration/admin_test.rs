//! Integration tests for the admin file browser.

mod helpers;

use filedesk_core::ErrorKind;
use filedesk_core::config::AdminPrefix;
use filedesk_core::traits::AutoConfirm;
use filedesk_core::types::{ClientId, FileId};
use filedesk_service::Loadable;

const CLIENTS: &str = r#"[{"id":1,"name":"Acme"},{"id":2,"name":"Globex"}]"#;

fn files_body(files: &[(i64, &str, i64)]) -> String {
    serde_json::Value::Array(
        files
            .iter()
            .map(|(id, name, client)| helpers::file_json(*id, name, *client))
            .collect(),
    )
    .to_string()
}

#[tokio::test]
async fn test_load_clients_opens_first_client() {
    let mut app = helpers::TestApp::new().await;
    let ctx = app.login_as("admin", "admin", None).await;
    let _clients = app
        .server
        .mock("GET", "/admin/clients")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(CLIENTS)
        .create_async()
        .await;
    let files = app
        .server
        .mock("GET", "/admin/files/client/1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(files_body(&[(10, "jan.xlsx", 1), (11, "feb.xlsx", 1)]))
        .expect(1)
        .create_async()
        .await;

    let browser = ctx.admin_browser();
    let clients = browser.load_clients().await.unwrap();

    assert_eq!(clients.len(), 2);
    let state = browser.state().await;
    assert_eq!(state.selected, Some(ClientId(1)));
    assert_eq!(state.files.ready().map(|f| f.len()), Some(2));
    files.assert_async().await;
}

#[tokio::test]
async fn test_api_prefix_for_legacy_backends() {
    let mut app = helpers::TestApp::new()
        .await
        .with_admin_prefix(AdminPrefix::Api);
    let ctx = app.login_as("admin", "admin", None).await;
    let clients = app
        .server
        .mock("GET", "/api/clients")
        .with_status(200)
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;

    let browser = ctx.admin_browser();
    assert!(browser.load_clients().await.unwrap().is_empty());

    let state = browser.state().await;
    assert_eq!(state.selected, None);
    assert_eq!(state.files, Loadable::Ready(Vec::new()));
    clients.assert_async().await;
}

#[tokio::test]
async fn test_reselecting_refetches_and_reports_failures() {
    let mut app = helpers::TestApp::new().await;
    let ctx = app.login_as("admin", "admin", None).await;
    let ok = app
        .server
        .mock("GET", "/admin/files/client/2")
        .with_status(200)
        .with_body(files_body(&[(20, "q1.xls", 2)]))
        .expect(2)
        .create_async()
        .await;
    let _broken = app
        .server
        .mock("GET", "/admin/files/client/3")
        .with_status(500)
        .with_body(r#"{"detail":"Storage offline"}"#)
        .create_async()
        .await;

    let browser = ctx.admin_browser();
    assert!(browser.select_client(ClientId(2)).await.unwrap());
    assert!(browser.select_client(ClientId(2)).await.unwrap());
    ok.assert_async().await;

    let err = browser.select_client(ClientId(3)).await.unwrap_err();
    assert_eq!(err.message, "Storage offline");
    assert_eq!(
        browser.state().await.files,
        Loadable::Failed("Storage offline".to_string())
    );
}

#[tokio::test]
async fn test_delete_confirms_then_refetches() {
    let mut app = helpers::TestApp::new().await;
    let ctx = app.login_as("admin", "admin", None).await;
    let before = app
        .server
        .mock("GET", "/admin/files/client/1")
        .with_status(200)
        .with_body(files_body(&[(10, "jan.xlsx", 1), (11, "feb.xlsx", 1)]))
        .expect(1)
        .create_async()
        .await;

    let browser = ctx.admin_browser();
    browser.select_client(ClientId(1)).await.unwrap();

    let delete = app
        .server
        .mock("DELETE", "/files/delete/10")
        .match_header("authorization", mockito::Matcher::Regex("^Bearer ".into()))
        .with_status(200)
        .with_body(r#"{"msg":"File deleted successfully"}"#)
        .expect(1)
        .create_async()
        .await;

    // Cancelled: nothing sent.
    assert!(!browser.delete(FileId(10), &AutoConfirm(false)).await.unwrap());

    before.remove_async().await;
    let after = app
        .server
        .mock("GET", "/admin/files/client/1")
        .with_status(200)
        .with_body(files_body(&[(11, "feb.xlsx", 1)]))
        .expect(1)
        .create_async()
        .await;

    assert!(browser.delete(FileId(10), &AutoConfirm(true)).await.unwrap());

    let state = browser.state().await;
    let remaining = state.files.ready().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, FileId(11));
    delete.assert_async().await;
    after.assert_async().await;
}

#[tokio::test]
async fn test_download_saves_under_listed_name() {
    let mut app = helpers::TestApp::new().await;
    let ctx = app.login_as("admin", "admin", None).await;
    let _files = app
        .server
        .mock("GET", "/admin/files/client/1")
        .with_status(200)
        .with_body(files_body(&[(10, "jan.xlsx", 1)]))
        .create_async()
        .await;
    let download = app
        .server
        .mock("GET", "/files/download/10")
        .with_status(200)
        .with_header("content-type", "application/octet-stream")
        .with_body("xlsx-bytes")
        .expect(1)
        .create_async()
        .await;

    let browser = ctx.admin_browser();
    browser.select_client(ClientId(1)).await.unwrap();

    let dir = app.dir.path().join("downloads");
    let saved = browser.download(FileId(10), &dir).await.unwrap();

    assert_eq!(saved, dir.join("jan.xlsx"));
    assert_eq!(std::fs::read_to_string(&saved).unwrap(), "xlsx-bytes");
    download.assert_async().await;
}

#[tokio::test]
async fn test_client_role_cannot_browse() {
    let mut app = helpers::TestApp::new().await;
    let ctx = app.login_as("client1", "client", Some(1)).await;
    let clients = app
        .server
        .mock("GET", "/admin/clients")
        .expect(0)
        .create_async()
        .await;

    let err = ctx.admin_browser().load_clients().await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Authorization);
    clients.assert_async().await;
}
