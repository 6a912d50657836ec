//! Streaming file downloads.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use percent_encoding::percent_decode_str;
use reqwest::Response;
use reqwest::header::CONTENT_DISPOSITION;
use tokio::io::AsyncWriteExt;

use filedesk_core::AppResult;
use filedesk_core::error::{AppError, ErrorKind};
use filedesk_core::types::FileId;

use crate::client::transport_error;

/// Pick the local file name for a download.
///
/// The caller's override wins, then the server's `Content-Disposition`
/// name, then `file-{id}`. Only the final path component of any candidate
/// is used, so a hostile name cannot escape the destination directory.
pub fn resolve_file_name(id: FileId, requested: Option<&str>, disposition: Option<&str>) -> String {
    requested
        .and_then(sanitize)
        .or_else(|| disposition.and_then(disposition_file_name).and_then(|n| sanitize(&n)))
        .unwrap_or_else(|| format!("file-{id}"))
}

/// Strip directories and reject names that are empty or only dots.
fn sanitize(name: &str) -> Option<String> {
    let last = name.rsplit(['/', '\\']).next()?.trim();
    if last.is_empty() || last.chars().all(|c| c == '.') {
        None
    } else {
        Some(last.to_string())
    }
}

/// Read the file name out of a `Content-Disposition` header value.
///
/// Handles `filename="a b.xlsx"`, bare `filename=a.xlsx` and the RFC 5987
/// form `filename*=utf-8''a%20b.xlsx`, preferring the latter.
pub fn disposition_file_name(header: &str) -> Option<String> {
    let mut plain = None;
    let mut extended = None;

    for param in header.split(';').map(str::trim) {
        if let Some(value) = param.strip_prefix("filename*=") {
            let encoded = value.splitn(3, '\'').nth(2).unwrap_or(value);
            extended = Some(
                percent_decode_str(encoded.trim_matches('"'))
                    .decode_utf8_lossy()
                    .into_owned(),
            );
        } else if let Some(value) = param.strip_prefix("filename=") {
            plain = Some(value.trim_matches('"').to_string());
        }
    }

    extended.or(plain).filter(|n| !n.is_empty())
}

/// Write the body of `response` to `dest_dir`, chunk by chunk.
pub(crate) async fn save_response(
    response: Response,
    id: FileId,
    dest_dir: &Path,
    requested: Option<&str>,
) -> AppResult<PathBuf> {
    let disposition = response
        .headers()
        .get(CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let name = resolve_file_name(id, requested, disposition.as_deref());

    tokio::fs::create_dir_all(dest_dir).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Storage,
            format!("Failed to create {}", dest_dir.display()),
            e,
        )
    })?;

    let path = dest_dir.join(&name);

    // Body goes to a scratch file next to the target; it only replaces
    // `path` once the whole body is on disk.
    let partial = tempfile::Builder::new()
        .prefix(".filedesk-")
        .suffix(".part")
        .tempfile_in(dest_dir)
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create a file in {}", dest_dir.display()),
                e,
            )
        })?;
    let (std_file, partial_path) = partial.into_parts();
    let mut file = tokio::fs::File::from_std(std_file);

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(transport_error)?;
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    drop(file);

    partial_path.persist(&path).map_err(|e| {
        AppError::with_source(
            ErrorKind::Storage,
            format!("Failed to save {}", path.display()),
            e,
        )
    })?;

    Ok(path)
}
