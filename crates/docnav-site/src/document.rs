//! Document identifiers and metadata.

use std::borrow::Borrow;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Opaque key identifying one documentation unit.
///
/// By convention the id is the source path relative to the docs root,
/// without extension (e.g. `type-definitions/object`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Directory part of the id (`""` for top-level documents).
    #[must_use]
    pub fn dir(&self) -> &str {
        self.0.rsplit_once('/').map_or("", |(dir, _)| dir)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for DocumentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Document known to the registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Unique document id.
    pub id: DocumentId,
    /// Display title.
    pub title: String,
    /// Source file relative to the docs root. `None` for documents
    /// registered without a backing file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_path: Option<PathBuf>,
    /// Outgoing relative links as written in the document body.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<String>,
}

impl Document {
    #[must_use]
    pub fn new(id: impl Into<DocumentId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            source_path: None,
            links: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_source(mut self, source_path: impl Into<PathBuf>) -> Self {
        self.source_path = Some(source_path.into());
        self
    }

    #[must_use]
    pub fn with_links(mut self, links: Vec<String>) -> Self {
        self.links = links;
        self
    }

    /// True if the document is backed by a source file.
    #[must_use]
    pub fn has_source(&self) -> bool {
        self.source_path.is_some()
    }

    /// Directory links in this document are relative to.
    ///
    /// Uses the source file's directory when known, otherwise the id's.
    #[must_use]
    pub fn link_base(&self) -> String {
        match self.source_path.as_deref().and_then(Path::parent) {
            Some(dir) => dir.to_string_lossy().replace('\\', "/"),
            None => self.id.dir().to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id_dir() {
        assert_eq!(DocumentId::new("intro").dir(), "");
        assert_eq!(DocumentId::new("type-definitions/object").dir(), "type-definitions");
        assert_eq!(DocumentId::new("a/b/c").dir(), "a/b");
    }

    #[test]
    fn test_document_id_serializes_as_string() {
        let json = serde_json::to_value(DocumentId::new("intro")).unwrap();
        assert_eq!(json, "intro");
    }

    #[test]
    fn test_document_without_source() {
        let doc = Document::new("intro", "Introduction");

        assert!(!doc.has_source());
        assert_eq!(doc.link_base(), "");
    }

    #[test]
    fn test_link_base_prefers_source_dir() {
        let doc = Document::new("renamed", "Renamed").with_source("guides/original.md");

        assert_eq!(doc.link_base(), "guides");
    }

    #[test]
    fn test_link_base_falls_back_to_id_dir() {
        let doc = Document::new("guides/setup", "Setup");

        assert_eq!(doc.link_base(), "guides");
    }
}
