//! The rendered export, ready for preview, saving and transmission.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::document::StatementDocument;
use super::pdf::PdfWriter;

/// MIME type of the artifact.
pub const PDF_MIME: &str = "application/pdf";

/// A rendered statement document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementArtifact {
    bytes: Vec<u8>,
    page_count: usize,
    file_name: String,
}

impl StatementArtifact {
    /// Renders a laid-out document.
    #[must_use]
    pub fn from_document(document: &StatementDocument, member_name: &str) -> Self {
        Self {
            bytes: PdfWriter::render(document),
            page_count: document.pages.len(),
            file_name: format!("statement_{}.pdf", sanitize_filename(member_name)),
        }
    }

    /// Raw PDF bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of pages.
    #[must_use]
    pub const fn page_count(&self) -> usize {
        self.page_count
    }

    /// Suggested file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Standard base64 of the bytes, as sent to the delivery endpoint.
    #[must_use]
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// Inline data URI for previewing.
    #[must_use]
    pub fn preview_uri(&self) -> String {
        format!("data:{PDF_MIME};base64,{}", self.to_base64())
    }
}

/// Keeps ASCII alphanumerics, dots, hyphens and underscores; replaces the rest.
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "member".to_string()
    } else {
        cleaned
    }
}
