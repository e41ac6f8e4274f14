//! Renders a finished quiz as an HTML page or Markdown.

pub mod html;
pub mod markdown;

pub use html::{format_text, generate_html, write_html_report};
pub use markdown::generate_markdown;
