//! Fixed-width tables that continue across pages.

use super::layout::{PageBuilder, TABLE_SIZE};
use super::types::TextStyle;

/// Height of one table row.
pub const ROW_HEIGHT: f64 = 6.0;

/// Approximate glyph width at table size, used to clip cell text.
const CHAR_WIDTH: f64 = 1.6;

/// A table column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub header: &'static str,
    /// Width in points
    pub width: f64,
}

impl Column {
    pub const fn new(header: &'static str, width: f64) -> Self {
        Self { header, width }
    }

    /// Characters that fit in the column, leaving one for spacing.
    pub fn capacity(&self) -> usize {
        ((self.width / CHAR_WIDTH).floor() as usize).saturating_sub(1).max(1)
    }
}

/// Render a table at the builder's position and return the position
/// immediately below it.
///
/// The header row is repeated at the top of every page the table reaches. A
/// new page is started before the header when not even the header and one
/// row fit. The builder is left at the returned position, so content written
/// through the same builder afterwards starts below the table.
pub fn render_table(builder: &mut PageBuilder, columns: &[Column], rows: &[Vec<String>]) -> f64 {
    builder.ensure_space(ROW_HEIGHT * 2.0);
    render_header(builder, columns);

    for row in rows {
        if !builder.fits(ROW_HEIGHT) {
            builder.new_page();
            render_header(builder, columns);
        }
        render_row(builder, columns, row, TextStyle::Normal);
    }

    builder.y()
}

fn render_header(builder: &mut PageBuilder, columns: &[Column]) {
    let headers: Vec<String> = columns.iter().map(|c| c.header.to_string()).collect();
    render_row(builder, columns, &headers, TextStyle::Bold);
}

fn render_row(builder: &mut PageBuilder, columns: &[Column], cells: &[String], style: TextStyle) {
    let mut x = builder.layout().left_margin;
    for (column, cell) in columns.iter().zip(cells) {
        builder.place(x, TABLE_SIZE, style, clip(cell, column.capacity()));
        x += column.width;
    }
    builder.advance(ROW_HEIGHT);
}

fn clip(text: &str, capacity: usize) -> String {
    if text.chars().count() <= capacity {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(capacity.saturating_sub(1)).collect();
    clipped.push('~');
    clipped
}
