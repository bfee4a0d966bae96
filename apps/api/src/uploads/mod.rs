//! Multipart upload handling.
//!
//! Uploaded files land in the upload directory as `<timestamp><ext>` and are
//! owned by a `StoredUpload`. Dropping the handle deletes the file, so every
//! exit path of a request cleans up; `keep` opts out for the plain upload route.

pub mod extract;

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use bytes::Bytes;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::errors::AppError;

/// Multipart field carrying the uploaded file.
pub const FILE_FIELD: &str = "file";

/// A file written to the upload directory for the lifetime of a request.
#[derive(Debug)]
pub struct StoredUpload {
    file: NamedTempFile,
    original_name: String,
}

impl StoredUpload {
    /// Writes `data` into `dir`, creating the directory on first use.
    /// Names are create-new, so a timestamp collision fails instead of overwriting.
    pub async fn create(dir: &Path, original_name: String, data: Bytes) -> Result<Self, AppError> {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("failed to create upload directory {}", dir.display()))?;

        let stamp = chrono::Utc::now().format("%Y%m%d%H%M%S%f").to_string();
        let suffix = extension_of(&original_name)
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default();
        let dir = dir.to_path_buf();

        let file = tokio::task::spawn_blocking(move || -> std::io::Result<NamedTempFile> {
            let mut file = tempfile::Builder::new()
                .prefix(&stamp)
                .suffix(&suffix)
                .rand_bytes(0)
                .tempfile_in(&dir)?;
            file.write_all(&data)?;
            file.flush()?;
            Ok(file)
        })
        .await
        .context("upload writer task failed")?
        .context("failed to write uploaded file")?;

        let upload = Self {
            file,
            original_name,
        };
        info!(
            "Stored upload '{}' as {}",
            upload.original_name,
            upload.path().display()
        );
        Ok(upload)
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    /// Lowercased extension of the client-supplied filename, without the dot.
    pub fn extension(&self) -> Option<String> {
        extension_of(&self.original_name)
    }

    pub fn stored_name(&self) -> String {
        self.path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Detaches the file from the request so it survives the handle.
    pub fn keep(self) -> Result<PathBuf, AppError> {
        let (_, path) = self
            .file
            .keep()
            .map_err(|e| anyhow::Error::from(e.error).context("failed to keep uploaded file"))?;
        debug!("Keeping upload {}", path.display());
        Ok(path)
    }
}

/// Parsed multipart form: at most one stored file plus plain text fields.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<StoredUpload>,
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn require_file(&mut self) -> Result<StoredUpload, AppError> {
        self.file
            .take()
            .ok_or_else(|| AppError::Validation("No file uploaded.".to_string()))
    }
}

/// Reads the whole multipart body. The `file` field is written to `upload_dir`;
/// other named fields are kept as text. File parts under any other name are ignored.
pub async fn read_upload_form(
    mut multipart: Multipart,
    upload_dir: &Path,
) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        let file_name = field.file_name().map(str::to_string);
        match file_name {
            Some(file_name) if name == FILE_FIELD => {
                if form.file.is_some() {
                    return Err(AppError::Validation(
                        "Only one file may be uploaded.".to_string(),
                    ));
                }
                let data = field
                    .bytes()
                    .await
                    .map_err(multipart_error)?;
                form.file = Some(StoredUpload::create(upload_dir, file_name, data).await?);
            }
            Some(file_name) => {
                debug!("Ignoring unexpected file field '{name}' ({file_name})");
            }
            None => {
                if name == FILE_FIELD {
                    debug!("Field '{name}' has no filename; treating it as text");
                }
                let value = field
                    .text()
                    .await
                    .map_err(multipart_error)?;
                form.fields.insert(name, value);
            }
        }
    }

    Ok(form)
}

/// Body-limit failures keep their 413; every other malformed body is a 400.
fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(e.body_text())
    }
}

/// Extensions made only of ASCII alphanumerics are kept; anything else counts as none.
fn extension_of(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| ext.to_ascii_lowercase())
}
