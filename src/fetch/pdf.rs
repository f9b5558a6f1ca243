//! Streaming PDF download
//!
//! Downloads a response body into a freshly created temp file and hands
//! the path to the caller. The file is persisted before the first byte
//! is written: ownership (and deletion) belongs to the caller, and a
//! partially written file from a failed transfer is left on disk for the
//! caller or the OS to clean up rather than rolled back.

use crate::{FetchError, Result};
use reqwest::{Client, StatusCode};
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;

/// Prefix for downloaded menu PDF temp files
const TEMP_PREFIX: &str = "menu_pdf_";

/// Downloads `url` into a new temp file, returning its path on HTTP 200
pub async fn download_to_temp_file(client: &Client, url: &str) -> Result<PathBuf> {
    let mut response = client.get(url).send().await?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(FetchError::UnexpectedStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let (file, path) = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .tempfile()?
        .keep()
        .map_err(|e| e.error)?;

    let mut file = tokio::fs::File::from_std(file);
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
    }
    file.flush().await?;

    tracing::debug!("Downloaded PDF from {} to {}", url, path.display());
    Ok(path)
}
