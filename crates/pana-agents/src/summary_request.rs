use once_cell::sync::Lazy;
use regex::Regex;

/// Phrasings the front-end's "summarize selection" actions produce
const PATTERNS: &[&str] = &[
    r"(?i)Provide a concise.*summary",
    r"(?i)Provide a comprehensive.*summary",
    r"(?i)Provide a detailed summary",
    r"(?is)Context:.*Selected Text:",
    r"(?i)summarize the following",
    r"(?i)summary of.*text",
];

static TABLE: Lazy<Vec<Regex>> = Lazy::new(|| {
    PATTERNS
        .iter()
        .map(|p| Regex::new(p).expect("static regex"))
        .collect()
});

pub fn is_summary_request(message: &str) -> bool {
    TABLE.iter().any(|re| re.is_match(message))
}
