mod cache;
mod indexer;
mod provider;
mod rank;
mod scan;

pub use cache::{IndexCache, DEFAULT_INDEX_TTL};
pub use indexer::ContextIndexer;
pub use provider::ContextProvider;
pub use rank::{rank_files, EMPTY_CONTEXT_SUMMARY, MAX_RESULTS, PREVIEW_CHARS};
pub use scan::{build_index, extract_title, IndexError, IndexRoot, DEFAULT_ROOTS, MAX_CONTENT_CHARS};
