//! Report module: paginated text reports and CSV listings.

pub mod csv;
pub mod generator;
pub mod layout;
pub mod render;
pub mod table;
pub mod types;

pub use generator::ReportGenerator;
pub use layout::{PageBuilder, PageLayout};
pub use render::{deliver, render_text, FileSink, MemorySink, ReportSink, PAGE_BREAK};
pub use table::{render_table, Column};
pub use types::{
    Document, Page, PlacedLine, ReportError, ReportKind, ReportOptions, TextStyle,
};
