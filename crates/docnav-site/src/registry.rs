//! Registry of known documents.
//!
//! Populated once per pass from a [`DocumentSource`]. Lookups are by id
//! and, for cross-reference checking, by source path.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::document::{Document, DocumentId};

/// Error raised by a [`DocumentSource`] backend.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Reading a source file or directory failed.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// A document's front matter could not be used.
    #[error("Invalid front matter in {}: {message}", path.display())]
    FrontMatter {
        /// Source file path.
        path: PathBuf,
        /// What was wrong.
        message: String,
    },
}

/// Supplier of documents for the registry (file discovery, manifests, ...).
pub trait DocumentSource {
    /// Discover all documents.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the backend cannot be read.
    fn documents(&self) -> Result<Vec<Document>, SourceError>;
}

/// Error returned when populating the registry fails.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Two documents share one id.
    #[error("Duplicate document id: {0}")]
    DuplicateId(DocumentId),
    /// The document source failed.
    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Set of known documents keyed by [`DocumentId`].
#[derive(Debug, Default)]
pub struct DocumentRegistry {
    documents: BTreeMap<DocumentId, Document>,
    by_source: HashMap<PathBuf, DocumentId>,
}

impl DocumentRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from every document a source reports.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Source` if discovery fails and
    /// `RegistryError::DuplicateId` if two documents share an id.
    pub fn from_source(source: &dyn DocumentSource) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for document in source.documents()? {
            registry.register(document)?;
        }
        tracing::debug!(count = registry.len(), "Document registry populated");
        Ok(registry)
    }

    /// Register a document.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateId` if the id is already present.
    /// The registry is left unchanged in that case.
    pub fn register(&mut self, document: Document) -> Result<(), RegistryError> {
        if self.documents.contains_key(&document.id) {
            return Err(RegistryError::DuplicateId(document.id));
        }
        if let Some(source) = &document.source_path {
            self.by_source.insert(source.clone(), document.id.clone());
        }
        self.documents.insert(document.id.clone(), document);
        Ok(())
    }

    /// Check whether a document id is registered.
    #[must_use]
    pub fn exists(&self, id: &str) -> bool {
        self.documents.contains_key(id)
    }

    /// Get a document by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Document> {
        self.documents.get(id)
    }

    /// Get the id of the document backed by a source file.
    #[must_use]
    pub fn find_by_source(&self, source_path: &Path) -> Option<&DocumentId> {
        self.by_source.get(source_path)
    }

    /// All registered ids in sorted order.
    pub fn all(&self) -> impl Iterator<Item = &DocumentId> {
        self.documents.keys()
    }

    /// All registered documents in id order.
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
