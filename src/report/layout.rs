//! Page geometry and a top-to-bottom cursor that starts new pages.

use super::types::{Page, PlacedLine, TextStyle};
use crate::storage::ReportSettings;

pub const TITLE_SIZE: f64 = 20.0;
pub const HEADING_SIZE: f64 = 14.0;
pub const BODY_SIZE: f64 = 10.0;
pub const TABLE_SIZE: f64 = 8.0;

/// Vertical advance after a heading.
pub const HEADING_ADVANCE: f64 = 8.0;
/// Vertical advance after a body line.
pub const LINE_ADVANCE: f64 = 5.0;
/// Space left after a section.
pub const SECTION_GAP: f64 = 5.0;

/// Page geometry in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub page_height: f64,
    pub top_margin: f64,
    pub bottom_margin: f64,
    pub left_margin: f64,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            page_height: 297.0,
            top_margin: 20.0,
            bottom_margin: 17.0,
            left_margin: 14.0,
        }
    }
}

impl PageLayout {
    /// Geometry from the configured report settings.
    pub fn from_settings(settings: &ReportSettings) -> Self {
        Self {
            page_height: f64::from(settings.page_height),
            top_margin: f64::from(settings.top_margin),
            bottom_margin: f64::from(settings.bottom_margin),
            ..Self::default()
        }
    }

    /// Lowest position content may reach.
    pub fn safe_bottom(&self) -> f64 {
        self.page_height - self.bottom_margin
    }
}

/// Places lines on pages, moving down and starting a new page when content
/// would pass the safe bottom bound.
#[derive(Debug)]
pub struct PageBuilder {
    layout: PageLayout,
    pages: Vec<Page>,
    y: f64,
}

impl PageBuilder {
    pub fn new(layout: PageLayout) -> Self {
        Self {
            layout,
            pages: vec![Page {
                number: 1,
                lines: Vec::new(),
            }],
            y: layout.top_margin,
        }
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// Current vertical position.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Number of the page being written.
    pub fn page_number(&self) -> usize {
        self.pages.len()
    }

    /// Whether `height` more content fits on the current page.
    pub fn fits(&self, height: f64) -> bool {
        self.y + height <= self.layout.safe_bottom()
    }

    /// Start a new page and reset the position to the top margin.
    pub fn new_page(&mut self) {
        let number = self.pages.len() + 1;
        self.pages.push(Page {
            number,
            lines: Vec::new(),
        });
        self.y = self.layout.top_margin;
    }

    /// Start a new page unless `height` fits. Returns whether a page was
    /// started.
    pub fn ensure_space(&mut self, height: f64) -> bool {
        // A fresh page never breaks again, even for oversized content
        if self.fits(height) || self.y <= self.layout.top_margin {
            return false;
        }
        self.new_page();
        true
    }

    /// Place text at the current position without moving.
    pub fn place(&mut self, x: f64, size: f64, style: TextStyle, text: impl Into<String>) {
        let line = PlacedLine {
            y: self.y,
            x,
            size,
            style,
            text: text.into(),
        };
        if let Some(page) = self.pages.last_mut() {
            page.lines.push(line);
        }
    }

    /// Move down by `dy`.
    pub fn advance(&mut self, dy: f64) {
        self.y += dy;
    }

    /// Left-aligned text followed by an advance.
    pub fn write(&mut self, size: f64, style: TextStyle, text: impl Into<String>, dy: f64) {
        let x = self.layout.left_margin;
        self.place(x, size, style, text);
        self.advance(dy);
    }

    /// Bold section heading.
    pub fn heading(&mut self, text: impl Into<String>) {
        self.write(HEADING_SIZE, TextStyle::Bold, text, HEADING_ADVANCE);
    }

    /// Normal body line.
    pub fn body(&mut self, text: impl Into<String>) {
        self.write(BODY_SIZE, TextStyle::Normal, text, LINE_ADVANCE);
    }

    /// A heading with body lines, moved to a new page first if it would not
    /// fit.
    ///
    /// A section taller than a whole page starts where it is and continues on
    /// following pages, with the heading repeated at the top of each.
    pub fn section<I, S>(&mut self, title: &str, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        let height = section_height(lines.len());
        if height <= self.usable_height() {
            self.ensure_space(height);
        } else {
            self.ensure_space(section_height(1));
        }

        self.heading(title);
        for line in lines {
            if self.ensure_space(LINE_ADVANCE) {
                self.heading(title);
            }
            self.body(line);
        }
        self.advance(SECTION_GAP);
    }

    /// Height between the top margin and the safe bottom of a page.
    pub fn usable_height(&self) -> f64 {
        self.layout.safe_bottom() - self.layout.top_margin
    }

    pub fn finish(self) -> Vec<Page> {
        self.pages
    }
}

/// Height of a heading followed by `lines` body lines.
pub fn section_height(lines: usize) -> f64 {
    HEADING_ADVANCE + lines as f64 * LINE_ADVANCE
}
