//! Document discovery by filesystem walking.
//!
//! The Scanner only identifies markdown files. Reading them and building
//! [`Document`](docnav_site::Document)s is left to `FsSource`.

use std::fs;
use std::path::{Path, PathBuf};

use docnav_site::SourceError;

/// Extensions of files treated as documents.
const EXTENSIONS: [&str; 2] = ["md", "mdx"];

/// Markdown file found under the docs root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SourceFile {
    /// Absolute (or root-joined) path for reading.
    pub path: PathBuf,
    /// Path relative to the docs root, `/`-separated (e.g. `guides/setup.md`).
    pub rel_path: String,
}

impl SourceFile {
    /// Default document id: the relative path without its extension.
    pub fn default_id(&self) -> &str {
        self.rel_path
            .rsplit_once('.')
            .map_or(self.rel_path.as_str(), |(stem, _)| stem)
    }
}

pub(crate) struct Scanner {
    source_dir: PathBuf,
}

impl Scanner {
    pub fn new(source_dir: PathBuf) -> Self {
        Self { source_dir }
    }

    /// Scan the docs root and return markdown files sorted by relative path.
    ///
    /// Returns an empty Vec if the source directory doesn't exist.
    pub fn scan(&self) -> Result<Vec<SourceFile>, SourceError> {
        let mut files = Vec::new();
        if self.source_dir.is_dir() {
            scan_directory(&self.source_dir, "", &mut files)?;
        } else {
            tracing::debug!(path = %self.source_dir.display(), "Docs directory not found");
        }
        files.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
        Ok(files)
    }
}

fn scan_directory(dir: &Path, prefix: &str, files: &mut Vec<SourceFile>) -> Result<(), SourceError> {
    let entries = fs::read_dir(dir).map_err(|source| SourceError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries.filter_map(Result::ok) {
        let name = entry.file_name().to_string_lossy().into_owned();
        // Skip hidden files/dirs
        if name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        let rel_path = if prefix.is_empty() {
            name
        } else {
            format!("{prefix}/{name}")
        };

        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            scan_directory(&path, &rel_path, files)?;
        } else if is_markdown(&path) {
            files.push(SourceFile { path, rel_path });
        }
    }
    Ok(())
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| EXTENSIONS.iter().any(|e| ext == *e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rel_paths(files: &[SourceFile]) -> Vec<&str> {
        files.iter().map(|f| f.rel_path.as_str()).collect()
    }

    #[test]
    fn test_scan_finds_md_and_mdx() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("relay.md"), "# Relay").unwrap();
        fs::write(temp_dir.path().join("context.mdx"), "# Context").unwrap();
        fs::write(temp_dir.path().join("logo.png"), "").unwrap();

        let files = Scanner::new(temp_dir.path().to_path_buf()).scan().unwrap();

        assert_eq!(rel_paths(&files), vec!["context.mdx", "relay.md"]);
    }

    #[test]
    fn test_scan_nested_structure() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("introduction.md"), "").unwrap();
        let types = temp_dir.path().join("type-definitions");
        fs::create_dir(&types).unwrap();
        fs::write(types.join("object.md"), "").unwrap();
        fs::write(types.join("enum.md"), "").unwrap();

        let files = Scanner::new(temp_dir.path().to_path_buf()).scan().unwrap();

        assert_eq!(
            rel_paths(&files),
            vec![
                "introduction.md",
                "type-definitions/enum.md",
                "type-definitions/object.md",
            ]
        );
        assert!(files[1].path.ends_with("type-definitions/enum.md"));
    }

    #[test]
    fn test_scan_skips_hidden_entries() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join(".draft.md"), "").unwrap();
        fs::write(temp_dir.path().join("visible.md"), "").unwrap();
        let hidden = temp_dir.path().join(".docusaurus");
        fs::create_dir(&hidden).unwrap();
        fs::write(hidden.join("generated.md"), "").unwrap();

        let files = Scanner::new(temp_dir.path().to_path_buf()).scan().unwrap();

        assert_eq!(rel_paths(&files), vec!["visible.md"]);
    }

    #[test]
    fn test_scan_missing_dir() {
        let files = Scanner::new(PathBuf::from("/nonexistent")).scan().unwrap();

        assert!(files.is_empty());
    }

    #[test]
    fn test_default_id() {
        let file = SourceFile {
            path: PathBuf::from("/docs/type-definitions/object.md"),
            rel_path: "type-definitions/object.md".to_owned(),
        };

        assert_eq!(file.default_id(), "type-definitions/object");
    }
}
