use crate::error::{Result, StudyError};
use pana_types::SummarySize;

const DOCS_PREFIX: &str = "docs/";
const SEPARATOR: &str = "__";

/// Reject page paths whose cache key could collide with another page's
pub fn validate_page_path(page_path: &str) -> Result<()> {
    let invalid = |reason: &str| -> Result<()> {
        Err(StudyError::Validation(format!(
            "Invalid pagePath '{page_path}': {reason}"
        )))
    };

    if page_path.contains('\\') {
        return invalid("backslashes are not allowed");
    }
    let Some(rest) = page_path.strip_prefix(DOCS_PREFIX) else {
        return invalid("must be a relative path starting with docs/");
    };
    if !(rest.ends_with(".md") || rest.ends_with(".mdx")) {
        return invalid("must end with .md or .mdx");
    }
    if rest.contains(SEPARATOR) {
        return invalid("must not contain '__'");
    }
    if let Some(stem) = rest.strip_suffix(".md") {
        if stem.ends_with(".mdx") {
            return invalid("ambiguous .mdx.md extension");
        }
    }

    for segment in rest.split('/') {
        if segment.is_empty() || segment == "." || segment == ".." {
            return invalid("empty or relative segments are not allowed");
        }
        if segment.starts_with('_') || segment.ends_with('_') {
            return invalid("segments must not start or end with '_'");
        }
    }
    Ok(())
}

/// Cache file name for a page: `docs/a/b.md` + short → `a__b__short.json`
pub fn summary_file_name(page_path: &str, size: SummarySize) -> Result<String> {
    validate_page_path(page_path)?;

    let rest = page_path.strip_prefix(DOCS_PREFIX).unwrap_or(page_path);
    let flattened = rest.replace('/', SEPARATOR);
    let stem = flattened.strip_suffix(".md").unwrap_or(&flattened);
    Ok(format!("{stem}{SEPARATOR}{size}.json"))
}
