//! Directory walker for bulk document ingestion.
//!
//! Collects candidate documents under a directory using glob
//! include/exclude patterns. Hidden directories and oversized files
//! are skipped; walk errors are logged and do not abort the walk.

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::core::error::{AdvisorError, Result};

/// Pattern-filtered directory walker
pub struct DocumentWalker {
    /// Patterns to include (e.g., "*.txt", "*.md")
    include_patterns: Vec<Pattern>,

    /// Patterns to exclude (e.g., "**/drafts/**")
    exclude_patterns: Vec<Pattern>,

    /// Maximum file size in bytes (skip larger files)
    max_file_size_bytes: u64,
}

impl DocumentWalker {
    /// Create a new walker.
    ///
    /// Returns `ConfigError` if any pattern fails to parse.
    pub fn new(
        include_patterns: &[String],
        exclude_patterns: &[String],
        max_file_size_mb: usize,
    ) -> Result<Self> {
        Ok(Self {
            include_patterns: compile_patterns(include_patterns, "include")?,
            exclude_patterns: compile_patterns(exclude_patterns, "exclude")?,
            max_file_size_bytes: (max_file_size_mb as u64) * 1024 * 1024,
        })
    }

    /// Collect matching files under `root`, sorted by path.
    pub fn collect_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            return Err(AdvisorError::InvalidDocument(format!(
                "Not a directory: {}",
                root.display()
            )));
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| self.should_descend(e, root))
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Walk error: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if let Ok(metadata) = entry.metadata() {
                if metadata.len() > self.max_file_size_bytes {
                    tracing::debug!("Skipping large file: {:?} ({} bytes)", path, metadata.len());
                    continue;
                }
            }

            if self.matches_patterns(path) {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        Ok(files)
    }

    /// Skip hidden and excluded directories; never the root itself.
    fn should_descend(&self, entry: &DirEntry, root: &Path) -> bool {
        let path = entry.path();
        if path == root || !entry.file_type().is_dir() {
            return true;
        }

        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| name.starts_with('.'));
        if hidden {
            return false;
        }

        !self.exclude_patterns.iter().any(|p| p.matches_path(path))
    }

    fn matches_patterns(&self, path: &Path) -> bool {
        let Some(path_str) = path.to_str() else {
            return false;
        };
        let file_name = path.file_name().and_then(|f| f.to_str()).unwrap_or("");

        // No include patterns means everything is a candidate
        let included = self.include_patterns.is_empty()
            || self
                .include_patterns
                .iter()
                .any(|p| p.matches(path_str) || p.matches(file_name));

        included && !self.exclude_patterns.iter().any(|p| p.matches(path_str))
    }
}

fn compile_patterns(patterns: &[String], kind: &str) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p)
                .map_err(|e| AdvisorError::ConfigError(format!("Invalid {kind} pattern '{p}': {e}")))
        })
        .collect()
}
