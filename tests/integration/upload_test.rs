//! Integration tests for the upload form against a mock backend.

mod helpers;

use chrono::NaiveDate;
use mockito::Matcher;

use filedesk_core::ErrorKind;
use filedesk_core::types::{ClientId, FileId};
use filedesk_entity::file::SelectedFile;
use filedesk_service::UploadState;
use filedesk_service::file::upload::{NO_CLIENT_MESSAGE, NO_DATES_MESSAGE, WRONG_TYPE_MESSAGE};

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

const HISTORY: &str = r#"[{"name":"march.xlsx","size":11,"type":"application/vnd.openxmlformats-officedocument.spreadsheetml.sheet","date":"2024-04-02T09:15:00","status":"stored"}]"#;

#[tokio::test]
async fn test_client_upload_sends_form_and_refreshes_history() {
    let mut app = helpers::TestApp::new().await;
    let ctx = app.login_as("client1", "client", Some(1)).await;
    let path = app.spreadsheet("march.xlsx", b"spreadsheet");

    let upload = app
        .server
        .mock("POST", "/files/upload")
        .match_header("authorization", Matcher::Regex("^Bearer .+".into()))
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"filename="march.xlsx""#.into()),
            Matcher::Regex(r#"name="start_date"\r\n\r\n2024-03-01"#.into()),
            Matcher::Regex(r#"name="end_date"\r\n\r\n2024-03-31"#.into()),
            Matcher::Regex("spreadsheet".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"msg":"File uploaded successfully","file_id":5}"#)
        .expect(1)
        .create_async()
        .await;
    let history = app
        .server
        .mock("GET", "/files/history")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(HISTORY)
        .expect(1)
        .create_async()
        .await;

    let mut workflow = ctx.upload_workflow();
    workflow
        .select_file(SelectedFile::inspect(&path).unwrap())
        .unwrap();
    workflow.set_date_range(date(2024, 3, 1), date(2024, 3, 31));
    let receipt = workflow.submit().await.unwrap();

    assert_eq!(receipt.file_id, Some(FileId(5)));
    assert!(matches!(workflow.state(), UploadState::Success(_)));
    assert!(workflow.selected_file().is_none());
    assert_eq!(workflow.history().len(), 1);
    assert_eq!(workflow.history()[0].name.as_deref(), Some("march.xlsx"));
    upload.assert_async().await;
    history.assert_async().await;
}

#[tokio::test]
async fn test_wrong_type_rejected_locally() {
    let mut app = helpers::TestApp::new().await;
    let ctx = app.login_as("client1", "client", Some(1)).await;
    let path = app.spreadsheet("notes.csv", b"a,b,c");

    let mut workflow = ctx.upload_workflow();
    let err = workflow
        .select_file(SelectedFile::inspect(&path).unwrap())
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(err.message, WRONG_TYPE_MESSAGE);
    assert!(workflow.selected_file().is_none());
    assert!(matches!(workflow.state(), UploadState::Failed(_)));
}

#[tokio::test]
async fn test_oversized_file_rejected_locally() {
    let mut app = helpers::TestApp::new().await;
    app.config.upload.max_size_bytes = 4;
    let ctx = app.login_as("client1", "client", Some(1)).await;
    let path = app.spreadsheet("big.xlsx", b"more than four bytes");

    let err = ctx
        .upload_workflow()
        .select_file(SelectedFile::inspect(&path).unwrap())
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    assert!(err.message.starts_with("File size exceeds"));
}

#[tokio::test]
async fn test_incomplete_form_sends_nothing() {
    let mut app = helpers::TestApp::new().await;
    let ctx = app.login_as("client1", "client", Some(1)).await;
    let path = app.spreadsheet("march.xlsx", b"spreadsheet");
    let upload = app
        .server
        .mock("POST", "/files/upload")
        .expect(0)
        .create_async()
        .await;

    let mut workflow = ctx.upload_workflow();
    workflow
        .select_file(SelectedFile::inspect(&path).unwrap())
        .unwrap();

    workflow.set_date_range(date(2024, 3, 1), None);
    let err = workflow.submit().await.unwrap_err();
    assert_eq!(err.message, NO_DATES_MESSAGE);

    workflow.set_date_range(date(2024, 3, 31), date(2024, 3, 1));
    let err = workflow.submit().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    // The selection survives a rejected submit.
    assert!(workflow.selected_file().is_some());
    upload.assert_async().await;
}

#[tokio::test]
async fn test_admin_upload_requires_and_sends_client() {
    let mut app = helpers::TestApp::new().await;
    let ctx = app.login_as("admin", "admin", None).await;
    let path = app.spreadsheet("march.xlsx", b"spreadsheet");

    let upload = app
        .server
        .mock("POST", "/files/upload")
        .match_body(Matcher::Regex(r#"name="client_id"\r\n\r\n3"#.into()))
        .with_status(200)
        .with_body(r#"{"msg":"File uploaded successfully","file_id":8}"#)
        .expect(1)
        .create_async()
        .await;
    let history = app
        .server
        .mock("GET", "/files/history")
        .match_query(Matcher::UrlEncoded("client_id".into(), "3".into()))
        .with_status(200)
        .with_body(HISTORY)
        .expect(1)
        .create_async()
        .await;

    let mut workflow = ctx.upload_workflow();
    workflow
        .select_file(SelectedFile::inspect(&path).unwrap())
        .unwrap();
    workflow.set_date_range(date(2024, 3, 1), date(2024, 3, 31));

    let err = workflow.submit().await.unwrap_err();
    assert_eq!(err.message, NO_CLIENT_MESSAGE);

    workflow.select_client(Some(ClientId(3)));
    workflow.submit().await.unwrap();

    assert_eq!(workflow.selected_client(), None);
    upload.assert_async().await;
    history.assert_async().await;
}

#[tokio::test]
async fn test_server_rejection_keeps_form() {
    let mut app = helpers::TestApp::new().await;
    let ctx = app.login_as("client1", "client", Some(1)).await;
    let path = app.spreadsheet("march.xlsx", b"spreadsheet");
    let _upload = app
        .server
        .mock("POST", "/files/upload")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail":"Overlapping date range"}"#)
        .create_async()
        .await;

    let mut workflow = ctx.upload_workflow();
    workflow
        .select_file(SelectedFile::inspect(&path).unwrap())
        .unwrap();
    workflow.set_date_range(date(2024, 3, 1), date(2024, 3, 31));
    let err = workflow.submit().await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Transport);
    assert_eq!(err.message, "Overlapping date range");
    assert_eq!(err.status, Some(400));
    assert!(matches!(workflow.state(), UploadState::Failed(_)));
    assert!(workflow.selected_file().is_some());
}

#[tokio::test]
async fn test_employee_cannot_upload() {
    let mut app = helpers::TestApp::new().await;
    let ctx = app.login_as("employee1", "employee", None).await;
    let path = app.spreadsheet("march.xlsx", b"spreadsheet");
    let upload = app
        .server
        .mock("POST", "/files/upload")
        .expect(0)
        .create_async()
        .await;

    let mut workflow = ctx.upload_workflow();
    workflow
        .select_file(SelectedFile::inspect(&path).unwrap())
        .unwrap();
    workflow.set_date_range(date(2024, 3, 1), date(2024, 3, 31));
    let err = workflow.submit().await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Authorization);
    upload.assert_async().await;
}
