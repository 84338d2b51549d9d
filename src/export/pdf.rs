//! Plain-text to PDF conversion via `printpdf`.

use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::ExportError;
use crate::documents::common::wrap_text;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const LINE_HEIGHT_MM: f32 = 5.0;
const FONT_SIZE: f32 = 10.0;
const WRAP_COLUMNS: usize = 90;
const DEFAULT_FILENAME: &str = "document.pdf";
/// Longest stem, in bytes, kept in an export file name before the random suffix.
const MAX_STEM_BYTES: usize = 200;

fn lines_per_page() -> usize {
    ((PAGE_HEIGHT_MM - 2.0 * MARGIN_MM) / LINE_HEIGHT_MM) as usize
}

/// Split content into pages of wrapped lines. Blank lines are kept; there is always one page.
pub fn paginate(content: &str) -> Vec<Vec<String>> {
    let per_page = lines_per_page();
    let mut pages = Vec::new();
    let mut current = Vec::new();

    for line in content.lines() {
        for wrapped in wrap_text(line, WRAP_COLUMNS) {
            if current.len() == per_page {
                pages.push(std::mem::take(&mut current));
            }
            current.push(wrapped);
        }
    }

    if !current.is_empty() || pages.is_empty() {
        pages.push(current);
    }
    pages
}

fn title_for(content: &str) -> &str {
    content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("Document")
}

/// Render content into PDF bytes.
pub fn render_pdf(content: &str) -> Result<Vec<u8>, ExportError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        title_for(content),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(format!("font error: {e}")))?;

    for (index, lines) in paginate(content).iter().enumerate() {
        let (page, layer) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1")
        };
        let layer = doc.get_page(page).get_layer(layer);

        let mut y = PAGE_HEIGHT_MM - MARGIN_MM;
        for line in lines {
            if !line.is_empty() {
                layer.use_text(line.as_str(), FONT_SIZE, Mm(MARGIN_MM), Mm(y), &font);
            }
            y -= LINE_HEIGHT_MM;
        }
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ExportError::Pdf(format!("save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| ExportError::Pdf(format!("buffer error: {e}")))
}

/// Render content and write it to `path`.
pub fn write_pdf(content: &str, path: &Path) -> Result<(), ExportError> {
    let bytes = render_pdf(content)?;
    fs::write(path, bytes)?;
    Ok(())
}

/// Sanitized download name with a `.pdf` extension.
pub fn export_filename(filename: &str) -> String {
    let sanitized = sanitize_filename::sanitize(filename.trim());
    let sanitized = sanitized.trim_matches('.');
    if sanitized.is_empty() {
        return DEFAULT_FILENAME.to_string();
    }
    if sanitized.to_ascii_lowercase().ends_with(".pdf") {
        sanitized.to_string()
    } else {
        format!("{sanitized}.pdf")
    }
}

fn truncate_on_char_boundary(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Writes PDFs into a dedicated export directory.
#[derive(Debug, Clone)]
pub struct PdfExporter {
    export_dir: PathBuf,
}

impl PdfExporter {
    pub fn new(export_dir: impl Into<PathBuf>) -> Self {
        Self {
            export_dir: export_dir.into(),
        }
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// Convert `content` to a PDF file and return its path.
    ///
    /// Every call produces a distinct file so concurrent exports with the same
    /// `filename` never overwrite each other.
    pub fn create_pdf(&self, content: &str, filename: &str) -> Result<PathBuf, ExportError> {
        let bytes = render_pdf(content)?;

        fs::create_dir_all(&self.export_dir)?;
        let name = export_filename(filename);
        let stem = truncate_on_char_boundary(&name[..name.len() - ".pdf".len()], MAX_STEM_BYTES);

        let mut file = tempfile::Builder::new()
            .prefix(&format!("{stem}-"))
            .suffix(".pdf")
            .tempfile_in(&self.export_dir)?;
        file.write_all(&bytes)?;
        let (_, path) = file.keep().map_err(|e| ExportError::Io(e.error))?;

        log::info!("Exported PDF '{}' to {}", name, path.display());
        Ok(path)
    }
}
