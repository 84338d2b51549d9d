//! Export adapters for generated documents.

pub mod pdf;

pub use pdf::{paginate, render_pdf, write_pdf, PdfExporter};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF rendering failed: {0}")]
    Pdf(String),
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
}
