//! Broken reference policy.
//!
//! Unresolved references are collected while parsing and checked here in
//! one step. Depending on [`BrokenLinkPolicy`] they are dropped, reported
//! through a [`DiagnosticSink`], or turned into a [`FatalError`].

use std::fmt;

use serde::Serialize;

pub use docnav_config::BrokenLinkPolicy;

use crate::document::DocumentId;

/// Where an unresolved reference was found.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ReferenceKind {
    /// Sidebar entry.
    Sidebar,
    /// Markdown link inside another document.
    MarkdownLink {
        /// Document containing the link.
        source: DocumentId,
    },
}

/// Reference to a document that is not in the registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolutionError {
    /// Offending document id.
    pub id: DocumentId,
    /// Labels of the enclosing sidebar and categories, outermost first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<String>,
    /// Origin of the reference.
    #[serde(flatten)]
    pub kind: ReferenceKind,
}

impl ResolutionError {
    /// Unresolved sidebar entry inside the given category trail.
    #[must_use]
    pub fn sidebar(id: DocumentId, path: Vec<String>) -> Self {
        Self {
            id,
            path,
            kind: ReferenceKind::Sidebar,
        }
    }

    /// Unresolved markdown link in `source`.
    #[must_use]
    pub fn markdown_link(id: DocumentId, source: DocumentId) -> Self {
        Self {
            id,
            path: Vec::new(),
            kind: ReferenceKind::MarkdownLink { source },
        }
    }

    /// Human-readable location of the reference.
    #[must_use]
    pub fn containing_path(&self) -> String {
        match &self.kind {
            ReferenceKind::MarkdownLink { source } => source.to_string(),
            ReferenceKind::Sidebar if self.path.is_empty() => "(root)".to_owned(),
            ReferenceKind::Sidebar => self.path.join(" > "),
        }
    }
}

impl fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ReferenceKind::Sidebar => write!(
                f,
                "Unknown document '{}' referenced in {}",
                self.id,
                self.containing_path()
            ),
            ReferenceKind::MarkdownLink { source } => {
                write!(f, "Broken link to '{}' in document '{source}'", self.id)
            }
        }
    }
}

impl std::error::Error for ResolutionError {}

/// Unresolved references under the `throw` policy.
#[derive(Debug, thiserror::Error)]
#[error("{} unresolved document reference(s): {}", .unresolved.len(), join_ids(.unresolved))]
pub struct FatalError {
    unresolved: Vec<ResolutionError>,
}

impl FatalError {
    /// Every unresolved reference, in discovery order.
    #[must_use]
    pub fn unresolved(&self) -> &[ResolutionError] {
        &self.unresolved
    }

    /// Offending ids, in discovery order.
    pub fn ids(&self) -> impl Iterator<Item = &DocumentId> {
        self.unresolved.iter().map(|e| &e.id)
    }
}

fn join_ids(errors: &[ResolutionError]) -> String {
    errors
        .iter()
        .map(|e| e.id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Receiver for non-fatal diagnostics.
pub trait DiagnosticSink {
    /// Report one unresolved reference.
    fn report(&mut self, error: &ResolutionError);
}

/// Sink that logs each diagnostic as a `tracing` warning.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, error: &ResolutionError) {
        tracing::warn!(id = %error.id, path = %error.containing_path(), "{error}");
    }
}

/// Collects diagnostics for later inspection.
impl DiagnosticSink for Vec<ResolutionError> {
    fn report(&mut self, error: &ResolutionError) {
        self.push(error.clone());
    }
}

/// Apply `policy` to collected resolution errors.
///
/// - `ignore`: errors are dropped.
/// - `warn`: each error goes to `sink`; always succeeds.
/// - `throw`: any error fails with a [`FatalError`] listing all of them.
///
/// # Errors
///
/// Returns [`FatalError`] under [`BrokenLinkPolicy::Throw`] when `errors`
/// is non-empty.
pub fn validate(
    errors: Vec<ResolutionError>,
    policy: BrokenLinkPolicy,
    sink: &mut dyn DiagnosticSink,
) -> Result<(), FatalError> {
    if errors.is_empty() {
        return Ok(());
    }

    match policy {
        BrokenLinkPolicy::Ignore => {
            tracing::debug!(count = errors.len(), "Ignoring unresolved document references");
            Ok(())
        }
        BrokenLinkPolicy::Warn => {
            for error in &errors {
                sink.report(error);
            }
            Ok(())
        }
        BrokenLinkPolicy::Throw => Err(FatalError { unresolved: errors }),
    }
}
