use once_cell::sync::Lazy;
use pana_types::{IndexedFile, ProjectContextIndex};
use regex::Regex;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Characters kept per indexed file
pub const MAX_CONTENT_CHARS: usize = 5000;

/// A directory to scan, relative to the project root, with the extensions it contributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexRoot {
    pub dir: &'static str,
    pub extensions: &'static [&'static str],
}

pub const DEFAULT_ROOTS: &[IndexRoot] = &[
    IndexRoot {
        dir: "docs",
        extensions: &[".md", ".mdx", ".tsx", ".ts", ".js"],
    },
    IndexRoot {
        dir: "src",
        extensions: &[".tsx", ".ts", ".js", ".css"],
    },
    IndexRoot {
        dir: "../context",
        extensions: &[".md", ".py", ".json"],
    },
    IndexRoot {
        dir: "../specs",
        extensions: &[".md", ".yml", ".yaml"],
    },
];

const IGNORED_DIRS: &[&str] = &["node_modules", "build", ".docusaurus"];

static FRONT_MATTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^---\s*\n([\s\S]*?)\n---").expect("static regex"));
static FRONT_MATTER_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"title:\s*(.+)").expect("static regex"));
static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#+\s+(.+)$").expect("static regex"));

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("project root {0} is not a readable directory")]
    ProjectRoot(PathBuf),

    #[error("index task failed: {0}")]
    Task(String),
}

/// Walk every root under `project_root` and collect the matching files
///
/// Missing roots are skipped. Unreadable entries are logged and skipped.
pub fn build_index(
    project_root: &Path,
    roots: &[IndexRoot],
) -> Result<ProjectContextIndex, IndexError> {
    if !project_root.is_dir() {
        return Err(IndexError::ProjectRoot(project_root.to_path_buf()));
    }

    let mut files = Vec::new();
    for root in roots {
        let base = project_root.join(root.dir);
        if !base.is_dir() {
            debug!(root = root.dir, "index root missing, skipping");
            continue;
        }
        scan_root(root, &base, &mut files);
    }

    Ok(ProjectContextIndex::new(files))
}

fn scan_root(root: &IndexRoot, base: &Path, files: &mut Vec<IndexedFile>) {
    let walker = WalkDir::new(base)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_ignored(e));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(root = root.dir, error = %err, "could not index entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let Some(extension) = dotted_extension(entry.path()) else {
            continue;
        };
        if !root.extensions.contains(&extension.as_str()) {
            continue;
        }

        match fs::read_to_string(entry.path()) {
            Ok(content) => files.push(IndexedFile {
                path: display_path(root, base, entry.path()),
                title: extract_title(&content, entry.path()),
                content: content.chars().take(MAX_CONTENT_CHARS).collect(),
                extension,
            }),
            Err(err) => {
                warn!(path = %entry.path().display(), error = %err, "could not read file");
            }
        }
    }
}

fn is_ignored(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || IGNORED_DIRS.contains(&&*name)
}

fn dotted_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|ext| format!(".{ext}"))
}

fn display_path(root: &IndexRoot, base: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path);
    let relative = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    format!("{}/{}", root.dir, relative)
}

/// Front-matter `title:`, else the first Markdown heading, else the file stem
pub fn extract_title(content: &str, path: &Path) -> String {
    if let Some(block) = FRONT_MATTER.captures(content).and_then(|c| c.get(1)) {
        if let Some(title) = FRONT_MATTER_TITLE
            .captures(block.as_str())
            .and_then(|c| c.get(1))
        {
            return title.as_str().trim().replace(['\'', '"'], "");
        }
    }

    if let Some(heading) = HEADING.captures(content).and_then(|c| c.get(1)) {
        return heading.as_str().trim().to_string();
    }

    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
