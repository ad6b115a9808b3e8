//! Reporting
//!
//! Presentation helpers over fetched records:
//!
//! - **counts**: Per-problem tallies behind the bar chart
//! - **chart**: SVG bar chart rendering
//! - **export**: CSV / JSON export of the record table

mod chart;
mod counts;
mod export;

pub use chart::{escape_html, render_bar_chart_svg, SERIES_COLORS};
pub use counts::{problem_counts, ProblemCount, BLANK_LABEL};
pub use export::{records_to_csv, ExportError, ExportFormat};
