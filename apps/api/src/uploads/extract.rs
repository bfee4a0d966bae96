use tracing::debug;

use crate::errors::AppError;
use crate::uploads::StoredUpload;

/// How an upload is treated, decided by its original extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Word,
    Unsupported,
}

impl DocumentKind {
    pub fn from_extension(ext: Option<&str>) -> Self {
        match ext.map(str::to_ascii_lowercase).as_deref() {
            Some("pdf") => DocumentKind::Pdf,
            Some("doc") | Some("docx") => DocumentKind::Word,
            _ => DocumentKind::Unsupported,
        }
    }

    /// Rejects everything but PDFs with a client-facing message.
    pub fn ensure_supported(self) -> Result<(), AppError> {
        match self {
            DocumentKind::Pdf => Ok(()),
            DocumentKind::Word => Err(AppError::UnsupportedFileType(
                "DOC/DOCX files are not supported yet.".to_string(),
            )),
            DocumentKind::Unsupported => Err(AppError::UnsupportedFileType(
                "Unsupported file type. Please upload a PDF.".to_string(),
            )),
        }
    }
}

/// Extracts plain text from an uploaded PDF. The text may be empty.
///
/// Parsing runs on the blocking pool; a parser panic is reported as an
/// extraction failure rather than taking the worker down.
pub async fn extract_text(upload: &StoredUpload) -> Result<String, AppError> {
    DocumentKind::from_extension(upload.extension().as_deref()).ensure_supported()?;

    let path = upload.path().to_path_buf();
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text(&path))
        .await
        .map_err(|e| AppError::Extraction(format!("PDF parser task failed: {e}")))?
        .map_err(|e| {
            AppError::Extraction(format!(
                "failed to extract text from {}: {e}",
                upload.original_name()
            ))
        })?;

    debug!(
        "Extracted {} characters from '{}'",
        text.chars().count(),
        upload.original_name()
    );
    Ok(text)
}
