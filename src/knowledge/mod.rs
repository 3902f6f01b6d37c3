//! Knowledge base loading and keyword retrieval

mod retrieval;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::Result;

/// Ordered, read-only collection of reference text lines
///
/// Built once at process startup and shared across requests; never
/// mutated afterwards, so concurrent reads need no locking.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    lines: Vec<String>,
}

impl KnowledgeBase {
    /// Load all CSV/TXT reference files from a directory
    ///
    /// A missing directory is a recognized degraded mode, not an error:
    /// the gateway runs without retrieval augmentation. Individual file
    /// failures are logged and skipped; a bad file never aborts the load.
    #[must_use]
    pub fn load(dir: &Path) -> Self {
        let mut lines = Vec::new();

        if !dir.is_dir() {
            tracing::warn!(
                path = %dir.display(),
                "knowledge directory not found, retrieval augmentation disabled"
            );
            return Self { lines };
        }

        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %dir.display(), error = %e, "failed to list knowledge directory");
                return Self { lines };
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let result = match path.extension().and_then(|e| e.to_str()) {
                Some("csv") => load_csv(&path, &mut lines),
                Some("txt") => load_txt(&path, &mut lines),
                _ => continue,
            };

            if let Err(e) = result {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable knowledge file");
            }
        }

        tracing::info!(lines = lines.len(), path = %dir.display(), "knowledge base loaded");
        Self { lines }
    }

    /// Build a knowledge base directly from lines (tests, fixtures)
    #[must_use]
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Number of knowledge lines
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the knowledge base holds no lines
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Stored lines in load order
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// Parse a CSV file: each row becomes one line, fields joined by a space
fn load_csv(path: &Path, lines: &mut Vec<String>) -> Result<()> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    for record in reader.records() {
        let record = record?;
        lines.push(record.iter().collect::<Vec<_>>().join(" "));
    }

    Ok(())
}

/// Read a text file: each non-blank trimmed line becomes one line
fn load_txt(path: &Path, lines: &mut Vec<String>) -> Result<()> {
    let reader = BufReader::new(File::open(path)?);

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    Ok(())
}
