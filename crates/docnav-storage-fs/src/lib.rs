//! Filesystem document source for docnav.
//!
//! [`FsSource`] implements [`DocumentSource`] over a docs directory:
//!
//! - Every `.md`/`.mdx` file is a document; hidden entries are skipped
//! - The id is the path relative to the root without extension
//!   (`type-definitions/object.md` becomes `type-definitions/object`)
//! - YAML front matter may set `id` (replacing the last path segment) and `title`
//! - Otherwise the title is the first H1 heading, then the title-cased file name
//! - Outgoing links are collected for cross-reference checking
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use docnav_site::DocumentRegistry;
//! use docnav_storage_fs::FsSource;
//!
//! let source = FsSource::new("website/docs");
//! let registry = DocumentRegistry::from_source(&source)?;
//! assert!(registry.exists("introduction"));
//! # Ok(())
//! # }
//! ```

mod front_matter;
mod markdown;
mod scanner;

use std::fs;
use std::path::{Path, PathBuf};

use docnav_site::{Document, DocumentSource, SourceError};

use markdown::{extract_links, extract_title, titlecase_from_slug};
use scanner::{Scanner, SourceFile};

/// Documents discovered from markdown files under a directory.
pub struct FsSource {
    source_dir: PathBuf,
    scanner: Scanner,
}

impl FsSource {
    #[must_use]
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        let source_dir = source_dir.into();
        Self {
            scanner: Scanner::new(source_dir.clone()),
            source_dir,
        }
    }

    /// Root directory being scanned.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    fn build_document(file: &SourceFile) -> Result<Document, SourceError> {
        let content = fs::read_to_string(&file.path).map_err(|source| SourceError::Io {
            path: file.path.clone(),
            source,
        })?;

        let (yaml, body) = front_matter::split(&content);
        let fm = yaml
            .map(front_matter::parse)
            .transpose()
            .map_err(|message| SourceError::FrontMatter {
                path: file.path.clone(),
                message,
            })?
            .unwrap_or_default();

        let default_id = file.default_id();
        let id = match fm.id {
            Some(id) if id.contains('/') => {
                return Err(SourceError::FrontMatter {
                    path: file.path.clone(),
                    message: format!("id '{id}' cannot contain '/'"),
                });
            }
            Some(id) if id.trim().is_empty() => {
                return Err(SourceError::FrontMatter {
                    path: file.path.clone(),
                    message: "id cannot be empty".to_owned(),
                });
            }
            Some(id) => match default_id.rsplit_once('/') {
                Some((dir, _)) => format!("{dir}/{id}"),
                None => id,
            },
            None => default_id.to_owned(),
        };

        let title = fm
            .title
            .or_else(|| extract_title(body))
            .unwrap_or_else(|| title_from_filename(&file.path));

        Ok(Document::new(id, title)
            .with_source(&file.rel_path)
            .with_links(extract_links(body)))
    }
}

impl DocumentSource for FsSource {
    fn documents(&self) -> Result<Vec<Document>, SourceError> {
        let documents = self
            .scanner
            .scan()?
            .iter()
            .map(Self::build_document)
            .collect::<Result<Vec<_>, _>>()?;
        tracing::info!(
            path = %self.source_dir.display(),
            count = documents.len(),
            "Discovered documents"
        );
        Ok(documents)
    }
}

fn title_from_filename(path: &Path) -> String {
    path.file_stem()
        .map(|s| titlecase_from_slug(&s.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use docnav_site::{DocumentRegistry, RegistryError};
    use pretty_assertions::assert_eq;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn scan(root: &Path) -> Vec<Document> {
        FsSource::new(root).documents().unwrap()
    }

    #[test]
    fn test_fs_source_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FsSource>();
    }

    #[test]
    fn test_scan_missing_dir() {
        assert!(scan(Path::new("/nonexistent/docs")).is_empty());
    }

    #[test]
    fn test_ids_from_relative_paths() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "introduction.md", "# Introduction");
        write(temp_dir.path(), "type-definitions/object.mdx", "# Object");

        let documents = scan(temp_dir.path());

        let ids: Vec<_> = documents.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["introduction", "type-definitions/object"]);
        assert_eq!(
            documents[1].source_path.as_deref(),
            Some(Path::new("type-definitions/object.mdx"))
        );
    }

    #[test]
    fn test_title_precedence() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(
            temp_dir.path(),
            "a.md",
            "---\ntitle: From Front Matter\n---\n# From Heading\n",
        );
        write(temp_dir.path(), "b.md", "Intro\n\n# From Heading\n");
        write(temp_dir.path(), "custom-types.md", "No heading here.");

        let documents = scan(temp_dir.path());

        let titles: Vec<_> = documents.iter().map(|d| d.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["From Front Matter", "From Heading", "Custom Types"]
        );
    }

    #[test]
    fn test_front_matter_id_replaces_last_segment() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(
            temp_dir.path(),
            "guides/getting-started.md",
            "---\nid: start\n---\n# Getting Started",
        );

        let documents = scan(temp_dir.path());

        assert_eq!(documents[0].id.as_str(), "guides/start");
        assert_eq!(
            documents[0].source_path.as_deref(),
            Some(Path::new("guides/getting-started.md"))
        );
    }

    #[test]
    fn test_front_matter_id_with_slash_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "a.md", "---\nid: x/y\n---\n");

        let err = FsSource::new(temp_dir.path()).documents().unwrap_err();

        assert!(matches!(err, SourceError::FrontMatter { .. }));
        assert!(err.to_string().contains("cannot contain '/'"));
    }

    #[test]
    fn test_invalid_front_matter() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "a.md", "---\ntitle: [unclosed\n---\n");

        let err = FsSource::new(temp_dir.path()).documents().unwrap_err();

        assert!(matches!(err, SourceError::FrontMatter { .. }));
    }

    #[test]
    fn test_links_collected() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(
            temp_dir.path(),
            "introduction.md",
            "# Intro\n\nNext: [Getting Started](getting-started.md)",
        );

        let documents = scan(temp_dir.path());

        assert_eq!(documents[0].links, vec!["getting-started.md"]);
    }

    #[test]
    fn test_registry_from_source() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "introduction.md", "# Introduction");
        write(temp_dir.path(), "relay.md", "# Relay");

        let registry = DocumentRegistry::from_source(&FsSource::new(temp_dir.path())).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("relay").unwrap().title, "Relay");
    }

    #[test]
    fn test_registry_rejects_colliding_ids() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "relay.md", "# Relay");
        write(temp_dir.path(), "relay.mdx", "# Relay");

        let err = DocumentRegistry::from_source(&FsSource::new(temp_dir.path())).unwrap_err();

        assert!(matches!(err, RegistryError::DuplicateId(ref id) if id.as_str() == "relay"));
    }
}
