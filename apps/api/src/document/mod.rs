//! Document assembly: record or raw text in, `.docx` or `.pdf` bytes out.

pub mod assembler;
pub mod docx;
pub mod model;
pub mod pdf;
pub mod record;
pub mod style;

use thiserror::Error;

pub use assembler::assemble;
pub use docx::{render_to_bytes, DOCX_MIME};
pub use pdf::{render_text_pdf, PDF_MIME};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to pack docx: {0}")]
    Pack(String),

    #[error("failed to write pdf: {0}")]
    Pdf(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The downloadable documents the service produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Cv,
    CoverLetter,
    StatementOfPurpose,
}

impl DocumentKind {
    pub fn download_name(&self) -> &'static str {
        match self {
            DocumentKind::Cv => "Generated_CV.docx",
            DocumentKind::CoverLetter => "Generated_Cover_Letter.docx",
            DocumentKind::StatementOfPurpose => "SOP.docx",
        }
    }

    pub fn pdf_download_name(&self) -> String {
        let name = self.download_name();
        format!("{}.pdf", name.strip_suffix(".docx").unwrap_or(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_name_shares_docx_stem() {
        assert_eq!(DocumentKind::StatementOfPurpose.pdf_download_name(), "SOP.pdf");
        assert_eq!(DocumentKind::Cv.pdf_download_name(), "Generated_CV.pdf");
    }
}
