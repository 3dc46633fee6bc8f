//! Per-page, per-size Markdown summaries cached as flat JSON files.

mod cache;
mod key;
mod service;

pub use cache::SummaryCache;
pub use key::{summary_file_name, validate_page_path};
pub use service::{clean_markdown, SummaryService};
