//! In-process fake of the backend for workflow tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::NaiveDate;
use tokio::sync::oneshot;

use filedesk_client::{ExchangeApi, UploadRequest};
use filedesk_core::AppResult;
use filedesk_core::error::AppError;
use filedesk_core::types::{ClientId, FileId};
use filedesk_entity::activity::ActivityLogEntry;
use filedesk_entity::client::ClientRecord;
use filedesk_entity::file::{FileRecord, HistoryEntry, UploadReceipt};
use filedesk_entity::session::AccessToken;

/// Builds an unsigned JWT around `claims`.
pub(crate) fn token_with(claims: serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.c2ln")
}

pub(crate) fn record(id: i64, client: i64, filename: &str) -> FileRecord {
    FileRecord {
        id: FileId(id),
        filename: filename.to_string(),
        uploaded_by: "client1".to_string(),
        uploaded_at: NaiveDate::from_ymd_opt(2024, 4, 1)
            .and_then(|d| d.and_hms_opt(9, 0, 0))
            .unwrap(),
        start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        client_id: Some(ClientId(client)),
        path: None,
    }
}

#[derive(Default)]
struct FakeState {
    login_token: String,
    last_login: Option<String>,
    files: Vec<FileRecord>,
    history: Vec<HistoryEntry>,
    clients: Vec<ClientRecord>,
    client_files: HashMap<ClientId, Vec<FileRecord>>,
    logs: Vec<ActivityLogEntry>,
    uploads: Vec<UploadRequest>,
    failures: HashMap<&'static str, AppError>,
    gates: HashMap<ClientId, oneshot::Receiver<()>>,
    calls: HashMap<&'static str, usize>,
}

/// Scriptable [`ExchangeApi`] that records every call.
#[derive(Clone, Default)]
pub(crate) struct FakeApi {
    state: Arc<Mutex<FakeState>>,
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn enter(&self, op: &'static str) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        *state.calls.entry(op).or_default() += 1;
        match state.failures.get(op) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    pub(crate) fn calls(&self, op: &str) -> usize {
        self.state.lock().unwrap().calls.get(op).copied().unwrap_or(0)
    }

    pub(crate) fn fail(&self, op: &'static str, err: AppError) {
        self.state.lock().unwrap().failures.insert(op, err);
    }

    pub(crate) fn recover(&self, op: &str) {
        self.state.lock().unwrap().failures.remove(op);
    }

    pub(crate) fn set_login_token(&self, token: String) {
        self.state.lock().unwrap().login_token = token;
    }

    pub(crate) fn fail_login(&self, err: AppError) {
        self.fail("login", err);
    }

    pub(crate) fn last_login(&self) -> Option<String> {
        self.state.lock().unwrap().last_login.clone()
    }

    pub(crate) fn set_files(&self, files: Vec<FileRecord>) {
        self.state.lock().unwrap().files = files;
    }

    pub(crate) fn set_history(&self, history: Vec<HistoryEntry>) {
        self.state.lock().unwrap().history = history;
    }

    pub(crate) fn set_clients(&self, clients: Vec<(i64, &str)>) {
        self.state.lock().unwrap().clients = clients
            .into_iter()
            .map(|(id, name)| ClientRecord {
                id: ClientId(id),
                name: name.to_string(),
            })
            .collect();
    }

    pub(crate) fn set_client_files(&self, client: i64, files: Vec<FileRecord>) {
        self.state
            .lock()
            .unwrap()
            .client_files
            .insert(ClientId(client), files);
    }

    /// Holds the next `client_files(client)` response until the returned
    /// sender fires.
    pub(crate) fn gate_client_files(&self, client: i64) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.state.lock().unwrap().gates.insert(ClientId(client), rx);
        tx
    }

    pub(crate) fn set_logs(&self, logs: Vec<ActivityLogEntry>) {
        self.state.lock().unwrap().logs = logs;
    }

    pub(crate) fn uploads(&self) -> Vec<UploadRequest> {
        self.state.lock().unwrap().uploads.clone()
    }
}

#[async_trait]
impl ExchangeApi for FakeApi {
    async fn login(&self, username: &str, _password: &str) -> AppResult<AccessToken> {
        self.state.lock().unwrap().last_login = Some(username.to_string());
        self.enter("login")?;
        Ok(AccessToken {
            access_token: self.state.lock().unwrap().login_token.clone(),
            token_type: "bearer".into(),
        })
    }

    async fn list_files(&self) -> AppResult<Vec<FileRecord>> {
        self.enter("list_files")?;
        Ok(self.state.lock().unwrap().files.clone())
    }

    async fn upload_file(&self, request: &UploadRequest) -> AppResult<UploadReceipt> {
        self.enter("upload_file")?;
        let mut state = self.state.lock().unwrap();
        state.uploads.push(request.clone());
        Ok(UploadReceipt {
            msg: "File uploaded".into(),
            file_id: Some(FileId(100 + state.uploads.len() as i64)),
        })
    }

    async fn upload_history(&self, _client: Option<ClientId>) -> AppResult<Vec<HistoryEntry>> {
        self.enter("upload_history")?;
        Ok(self.state.lock().unwrap().history.clone())
    }

    async fn download_file(
        &self,
        id: FileId,
        dest_dir: &Path,
        name: Option<&str>,
    ) -> AppResult<PathBuf> {
        self.enter("download_file")?;
        Ok(dest_dir.join(name.map(str::to_string).unwrap_or_else(|| format!("file-{id}"))))
    }

    async fn delete_file(&self, id: FileId) -> AppResult<String> {
        self.enter("delete_file")?;
        let mut state = self.state.lock().unwrap();
        for files in state.client_files.values_mut() {
            files.retain(|f| f.id != id);
        }
        state.files.retain(|f| f.id != id);
        Ok(format!("File {id} deleted"))
    }

    async fn list_clients(&self) -> AppResult<Vec<ClientRecord>> {
        self.enter("list_clients")?;
        Ok(self.state.lock().unwrap().clients.clone())
    }

    async fn client_files(&self, client: ClientId) -> AppResult<Vec<FileRecord>> {
        self.enter("client_files")?;
        let gate = self.state.lock().unwrap().gates.remove(&client);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        Ok(self
            .state
            .lock()
            .unwrap()
            .client_files
            .get(&client)
            .cloned()
            .unwrap_or_default())
    }

    async fn activity_logs(&self) -> AppResult<Vec<ActivityLogEntry>> {
        self.enter("activity_logs")?;
        Ok(self.state.lock().unwrap().logs.clone())
    }
}
