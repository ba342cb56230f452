//! Shared download path for every generated document: `.docx` for all of them,
//! plain-text `.pdf` for the statement of purpose.

use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use tracing::{debug, info, warn};

use crate::document::{
    assemble, render_text_pdf, render_to_bytes, DocumentKind, DOCX_MIME, PDF_MIME,
};
use crate::errors::AppError;
use crate::extraction::extract;

/// How the model text is turned into a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Try to extract a CV record; fall back to plain text.
    Structured,
    /// One paragraph per line.
    PlainText,
}

/// Assembles and packs `raw` off the async runtime and wraps the bytes as an
/// attachment response.
pub async fn docx_attachment(
    kind: DocumentKind,
    layout: Layout,
    raw: String,
) -> Result<Response, AppError> {
    let record = match layout {
        Layout::Structured => match extract(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("{kind:?} output not extractable, rendering as text: {e}");
                None
            }
        },
        Layout::PlainText => None,
    };

    let bytes = tokio::task::spawn_blocking(move || {
        let document = assemble(record.as_ref(), &raw);
        debug!(
            "Assembled {:?}: mode={:?}, sections={:?}, lines={}, links={}",
            kind,
            document.mode(),
            document.section_titles(),
            document.lines().len(),
            document.link_targets().len()
        );
        render_to_bytes(&document)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("render task failed: {e}")))??;

    info!("Rendered {:?}: {} bytes", kind, bytes.len());
    Ok(attachment(DOCX_MIME, kind.download_name(), bytes))
}

/// Writes `text` as a plain-text PDF off the async runtime.
pub async fn pdf_attachment(kind: DocumentKind, text: String) -> Result<Response, AppError> {
    let filename = kind.pdf_download_name();
    let title = filename.trim_end_matches(".pdf").to_string();

    let bytes = tokio::task::spawn_blocking(move || render_text_pdf(&title, &text))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("render task failed: {e}")))??;

    info!("Rendered {:?} as PDF: {} bytes", kind, bytes.len());
    Ok(attachment(PDF_MIME, &filename, bytes))
}

fn attachment(mime: &str, filename: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, mime.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        Bytes::from(bytes),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_attachment_headers_and_zip_body() {
        let response = docx_attachment(
            DocumentKind::StatementOfPurpose,
            Layout::PlainText,
            "Line one\nLine two".to_string(),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], DOCX_MIME);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"SOP.docx\""
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.starts_with(b"PK"));
    }

    #[tokio::test]
    async fn test_pdf_attachment_headers_and_body() {
        let response = pdf_attachment(
            DocumentKind::StatementOfPurpose,
            "I have long wanted to study.\n\nThank you.".to_string(),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], PDF_MIME);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"SOP.pdf\""
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_unparseable_structured_output_still_renders() {
        let response = docx_attachment(
            DocumentKind::Cv,
            Layout::Structured,
            "Sorry, here is your CV:\nAnn Lee".to_string(),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
