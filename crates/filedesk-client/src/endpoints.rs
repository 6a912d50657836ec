//! [`ExchangeApi`] over HTTP.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reqwest::Body;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tokio_util::io::ReaderStream;
use tracing::{debug, info};

use filedesk_core::AppResult;
use filedesk_core::error::{AppError, ErrorKind};
use filedesk_core::types::{ClientId, FileId};
use filedesk_entity::activity::ActivityLogEntry;
use filedesk_entity::client::ClientRecord;
use filedesk_entity::file::{FileRecord, HistoryEntry, UploadReceipt};
use filedesk_entity::session::AccessToken;

use crate::api::{ExchangeApi, UploadRequest};
use crate::client::{ApiClient, decode_json, read_detail, transport_error};
use crate::download::save_response;

/// Shown when login fails without a server explanation.
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please try again.";
/// Shown when an upload fails without a server explanation.
pub const UPLOAD_FAILED_MESSAGE: &str = "Upload failed. Please try again.";

/// Reply to `DELETE /files/delete/{id}`.
#[derive(Debug, Default, Deserialize)]
struct DeleteReply {
    #[serde(default, alias = "message")]
    msg: Option<String>,
}

#[async_trait]
impl ExchangeApi for ApiClient {
    async fn login(&self, username: &str, password: &str) -> AppResult<AccessToken> {
        debug!(method = "POST", path = "/auth/login", "Sending request");

        let response = self
            .http()
            .post(self.build_url("/auth/login"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Authentication, LOGIN_FAILED_MESSAGE, e))?;

        let status = response.status();
        if !status.is_success() {
            let detail = read_detail(response).await;
            return Err(AppError::authentication(
                detail.unwrap_or_else(|| LOGIN_FAILED_MESSAGE.to_string()),
            )
            .with_status(status.as_u16()));
        }

        decode_json::<AccessToken>(response).await.map_err(|e| {
            AppError::authentication(format!("{LOGIN_FAILED_MESSAGE} ({})", e.message))
        })
    }

    async fn list_files(&self) -> AppResult<Vec<FileRecord>> {
        self.get("/files/list", &[]).await
    }

    async fn upload_file(&self, request: &UploadRequest) -> AppResult<UploadReceipt> {
        let file = &request.file;
        let handle = tokio::fs::File::open(&file.path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to open {}", file.path.display()),
                e,
            )
        })?;

        let part = Part::stream_with_length(Body::wrap_stream(ReaderStream::new(handle)), file.size)
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Validation,
                    format!("Invalid MIME type '{}'", file.mime_type),
                    e,
                )
            })?;

        let (start, end) = request.range.to_wire();
        let mut form = Form::new()
            .part("file", part)
            .text("start_date", start)
            .text("end_date", end);
        if let Some(client) = request.client_id {
            form = form.text("client_id", client.to_string());
        }

        debug!(method = "POST", path = "/files/upload", name = %file.name, size = file.size, "Sending request");
        let response = self
            .send(
                self.http().post(self.build_url("/files/upload")).multipart(form),
                UPLOAD_FAILED_MESSAGE,
            )
            .await?;
        let receipt: UploadReceipt = decode_json(response).await?;

        info!(name = %file.name, file_id = ?receipt.file_id, range = %request.range, "File uploaded");
        Ok(receipt)
    }

    async fn upload_history(&self, client: Option<ClientId>) -> AppResult<Vec<HistoryEntry>> {
        let query: Vec<(&str, String)> = client
            .map(|c| vec![("client_id", c.to_string())])
            .unwrap_or_default();
        self.get("/files/history", &query).await
    }

    async fn download_file(
        &self,
        id: FileId,
        dest_dir: &Path,
        name: Option<&str>,
    ) -> AppResult<PathBuf> {
        let path = format!("/files/download/{id}");
        debug!(method = "GET", %path, "Sending request");

        let response = self
            .send(self.http().get(self.build_url(&path)), "Download failed. Please try again.")
            .await?;
        let saved = save_response(response, id, dest_dir, name).await?;

        info!(file_id = %id, path = %saved.display(), "File downloaded");
        Ok(saved)
    }

    async fn delete_file(&self, id: FileId) -> AppResult<String> {
        let path = format!("/files/delete/{id}");
        debug!(method = "DELETE", %path, "Sending request");

        let response = self
            .send(self.http().delete(self.build_url(&path)), "Delete failed. Please try again.")
            .await?;
        let body = response.text().await.map_err(transport_error)?;
        let reply: DeleteReply = serde_json::from_str(&body).unwrap_or_default();

        info!(file_id = %id, "File deleted");
        Ok(reply.msg.unwrap_or_else(|| format!("File {id} deleted")))
    }

    async fn list_clients(&self) -> AppResult<Vec<ClientRecord>> {
        self.get(&self.admin_path("/clients"), &[]).await
    }

    async fn client_files(&self, client: ClientId) -> AppResult<Vec<FileRecord>> {
        self.get(&self.admin_path(&format!("/files/client/{client}")), &[])
            .await
    }

    async fn activity_logs(&self) -> AppResult<Vec<ActivityLogEntry>> {
        self.get("/analytics/logs", &[]).await
    }
}
