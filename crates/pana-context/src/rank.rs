use pana_types::{ContextFile, IndexedFile, ProjectContext, ProjectContextIndex};

pub const MAX_RESULTS: usize = 5;
pub const PREVIEW_CHARS: usize = 300;
pub const EMPTY_CONTEXT_SUMMARY: &str =
    "No specific context found. General project knowledge available.";

const CONTENT_HIT: u32 = 2;
const PATH_HIT: u32 = 3;

/// Score every indexed file against the query and keep the best matches
pub fn rank_files(index: &ProjectContextIndex, query: &str) -> ProjectContext {
    let query = query.to_lowercase();
    let words: Vec<&str> = query
        .split_whitespace()
        .filter(|w| w.chars().count() > 2)
        .collect();

    let mut scored: Vec<(&IndexedFile, u32)> = index
        .files
        .iter()
        .map(|file| (file, score(file, &words)))
        .filter(|(_, score)| *score > 0)
        .collect();

    // stable: equal scores keep index order
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.truncate(MAX_RESULTS);

    let summary = scored
        .iter()
        .map(|(file, _)| {
            let preview: String = file.content.chars().take(PREVIEW_CHARS).collect();
            format!("File: {}\nContent preview: {}...", file.path, preview)
        })
        .collect::<Vec<_>>()
        .join("\n\n---\n\n");

    let files = scored
        .iter()
        .map(|(file, score)| ContextFile {
            path: file.path.clone(),
            title: file.title.clone(),
            score: *score,
        })
        .collect();

    ProjectContext {
        summary: if summary.is_empty() {
            EMPTY_CONTEXT_SUMMARY.to_string()
        } else {
            summary.clone()
        },
        content: summary,
        files,
        total_files: index.len(),
    }
}

fn score(file: &IndexedFile, words: &[&str]) -> u32 {
    let content = file.content.to_lowercase();
    let path = file.path.to_lowercase();

    let mut total = 0;
    for &word in words {
        if content.contains(word) {
            total += CONTENT_HIT;
        }
        if path.contains(word) {
            total += PATH_HIT;
        }
    }
    total
}
