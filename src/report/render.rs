//! Plain-text rendering and report delivery.

use std::path::{Path, PathBuf};

use super::types::{Document, Page, ReportError};

/// Points per character column in the text rendering.
const POINTS_PER_COLUMN: f64 = 1.6;

/// Page separator in the text rendering.
pub const PAGE_BREAK: char = '\u{000C}';

/// Render a document as plain text.
///
/// Lines sharing a vertical position become one text row, with each run
/// starting at the column matching its horizontal position. Pages are
/// separated by a form feed.
pub fn render_text(document: &Document) -> String {
    let left = document
        .pages
        .iter()
        .flat_map(|p| p.lines.iter().map(|l| l.x))
        .fold(f64::INFINITY, f64::min);

    document
        .pages
        .iter()
        .map(|page| render_page(page, left))
        .collect::<Vec<_>>()
        .join(&PAGE_BREAK.to_string())
}

fn render_page(page: &Page, left: f64) -> String {
    let mut lines: Vec<_> = page.lines.iter().collect();
    lines.sort_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));

    let mut rows: Vec<(f64, String)> = Vec::new();
    for line in lines {
        let column = ((line.x - left) / POINTS_PER_COLUMN).round().max(0.0) as usize;

        if rows.last().map_or(true, |(y, _)| *y != line.y) {
            rows.push((line.y, String::new()));
        }
        let Some((_, row)) = rows.last_mut() else {
            continue;
        };

        let width = row.chars().count();
        if width < column {
            row.extend(std::iter::repeat(' ').take(column - width));
        } else if width > 0 {
            row.push(' ');
        }
        row.push_str(&line.text);
    }

    let mut text = String::new();
    for (_, row) in rows {
        text.push_str(row.trim_end());
        text.push('\n');
    }
    text.push_str(&format!("\n-- Page {} --\n", page.number));
    text
}

/// Destination for finished reports.
pub trait ReportSink {
    /// Deliver `document` under `filename` (without extension).
    fn deliver(&mut self, filename: &str, document: &Document) -> Result<(), ReportError>;
}

/// Writes the text rendering into a directory.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a report with this filename is written to.
    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(format!("{}.txt", filename))
    }

    /// Paths written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Write arbitrary content, e.g. a CSV listing, into the directory.
    pub fn write_file(&mut self, name: &str, content: &str) -> Result<PathBuf, ReportError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(name);
        std::fs::write(&path, content)?;
        tracing::info!("Wrote {}", path.display());
        self.written.push(path.clone());
        Ok(path)
    }
}

impl ReportSink for FileSink {
    fn deliver(&mut self, filename: &str, document: &Document) -> Result<(), ReportError> {
        let name = format!("{}.txt", filename);
        self.write_file(&name, &render_text(document))?;
        Ok(())
    }
}

/// Keeps delivered reports in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    /// Filename and text rendering of each delivered report
    pub delivered: Vec<(String, String)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportSink for MemorySink {
    fn deliver(&mut self, filename: &str, document: &Document) -> Result<(), ReportError> {
        self.delivered
            .push((filename.to_string(), render_text(document)));
        Ok(())
    }
}

/// Deliver a document to a sink under its derived filename.
pub fn deliver<S: ReportSink + ?Sized>(sink: &mut S, document: &Document) -> Result<String, ReportError> {
    let filename = document.filename();
    sink.deliver(&filename, document)?;
    tracing::info!(
        "Exported {} ({} pages) as {}",
        document.kind,
        document.page_count(),
        filename
    );
    Ok(filename)
}
