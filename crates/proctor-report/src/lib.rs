//! proctor-report — HTML rendering of assessment reports.

pub mod html;

pub use html::{render_breakdown, render_report, write_html_report};
