//! Cross-reference checking between documents.
//!
//! Only relative links to markdown files (`.md`, `.mdx`) are checked;
//! URLs, absolute site paths and in-page anchors belong to the rendered
//! site and are left alone.

use std::path::Path;

use percent_encoding::percent_decode_str;

use crate::document::{Document, DocumentId};
use crate::policy::ResolutionError;
use crate::registry::DocumentRegistry;

const MARKDOWN_EXTENSIONS: [&str; 2] = [".md", ".mdx"];

/// Find markdown links that point at unregistered documents.
///
/// Documents are visited in id order and links in declared order.
#[must_use]
pub fn check_links(registry: &DocumentRegistry) -> Vec<ResolutionError> {
    let mut errors = Vec::new();
    for document in registry.documents() {
        for link in &document.links {
            let Some(target) = link_target(document, link) else {
                continue;
            };
            if resolve_target(registry, &target).is_none() {
                errors.push(ResolutionError::markdown_link(
                    fallback_id(&target),
                    document.id.clone(),
                ));
            }
        }
    }
    errors
}

/// Normalized source path a link refers to, if it is a checkable link.
///
/// Links are URL-encoded, source paths are not: `my%20setup.md` names
/// `my setup.md`.
fn link_target(document: &Document, link: &str) -> Option<String> {
    let raw = link.split(['#', '?']).next().unwrap_or_default();
    let decoded = percent_decode_str(raw).decode_utf8_lossy();
    let path: &str = &decoded;
    if path.is_empty() || path.starts_with('/') || has_scheme(path) {
        return None;
    }
    if !MARKDOWN_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        return None;
    }
    Some(normalize(&document.link_base(), path))
}

fn resolve_target<'a>(registry: &'a DocumentRegistry, target: &str) -> Option<&'a DocumentId> {
    if let Some(id) = registry.find_by_source(Path::new(target)) {
        return Some(id);
    }
    let id = fallback_id(target);
    registry.get(id.as_str()).map(|doc| &doc.id)
}

/// Id a target path would have by naming convention.
fn fallback_id(target: &str) -> DocumentId {
    let stem = MARKDOWN_EXTENSIONS
        .iter()
        .find_map(|ext| target.strip_suffix(ext))
        .unwrap_or(target);
    DocumentId::new(stem)
}

/// `scheme:` prefix before any `/` (e.g. `https:`, `mailto:`).
fn has_scheme(link: &str) -> bool {
    link.split_once(':').is_some_and(|(scheme, _)| {
        !scheme.is_empty()
            && !scheme.contains('/')
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

/// Join `link` onto `base`, folding `.` and `..` segments.
///
/// `..` past the docs root is kept so the target stays unresolvable.
fn normalize(base: &str, link: &str) -> String {
    let mut segments: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();
    for segment in link.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_none_or(|last| *last == "..") {
                    segments.push("..");
                } else {
                    segments.pop();
                }
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}
