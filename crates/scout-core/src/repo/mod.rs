//! Repository analysis: source file discovery and import/export scraping.
//!
//! [`analyze_repo`] walks a root directory, keeps JavaScript/TypeScript
//! sources, and records each file's top-level import sources and named
//! exports as a [`FileInfo`]. Files that fail to parse are kept with empty
//! metadata and counted in [`RepoSummary::degraded`].

mod parse;
mod walker;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use parse::{ModuleOutline, SourceParser};
pub use walker::{EXCLUDED_DIRS, SOURCE_EXTENSIONS, analyze_repo};

/// Metadata for a single source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    /// Path relative to the analyzed root, `/`-separated.
    pub path: String,
    /// Extension tag including the leading dot (e.g. `.tsx`).
    pub lang: String,
    /// Module specifiers of top-level import declarations, in source order.
    pub imports: Vec<String>,
    /// Identifiers declared by top-level named exports, in source order.
    pub exports: Vec<String>,
}

/// Result of one repository walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoSummary {
    /// Files in traversal order.
    pub files: Vec<FileInfo>,
    /// Number of files whose parse failed and were recorded without
    /// imports or exports.
    pub degraded: usize,
}

impl RepoSummary {
    /// Iterate over the relative paths of all files, in traversal order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.path.as_str())
    }
}

/// Errors that abort a repository walk.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("failed to walk {path:?}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("repository root {path:?} is not a directory")]
    NotADirectory { path: PathBuf },

    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load source grammar: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),
}
