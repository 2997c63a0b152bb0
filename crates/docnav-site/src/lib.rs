//! Sidebar navigation resolution for docnav.
//!
//! This crate provides:
//! - [`DocumentRegistry`]: the set of known documents, filled from a [`DocumentSource`]
//! - [`parse_spec`]: declarative sidebar spec to [`NavItem`] tree
//! - [`validate`]: broken reference handling per [`BrokenLinkPolicy`]
//! - [`resolve`]: document order and previous/next links
//! - [`Sidebars`]: named sidebars file
//! - [`check_links`]: markdown cross-reference checking
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use docnav_site::{
//!     BrokenLinkPolicy, Document, DocumentRegistry, TracingSink, build_navigation,
//! };
//! use serde_json::json;
//!
//! let mut registry = DocumentRegistry::new();
//! registry.register(Document::new("introduction", "Introduction"))?;
//! registry.register(Document::new("type-definitions/object", "Object"))?;
//!
//! let spec = json!([
//!     "introduction",
//!     { "label": "Type Definitions", "items": ["type-definitions/object"] }
//! ]);
//! let nav = build_navigation(&spec, &registry, BrokenLinkPolicy::Warn, &mut TracingSink)?;
//!
//! assert_eq!(nav.next("introduction").map(|id| id.as_str()), Some("type-definitions/object"));
//! # Ok(())
//! # }
//! ```

mod document;
mod links;
mod policy;
mod registry;
mod resolve;
mod sidebars;
mod spec;

pub use document::{Document, DocumentId};
pub use links::check_links;
pub use policy::{
    BrokenLinkPolicy, DiagnosticSink, FatalError, ReferenceKind, ResolutionError, TracingSink,
    validate,
};
pub use registry::{DocumentRegistry, DocumentSource, RegistryError, SourceError};
pub use resolve::{DocLinks, ResolvedNavigation, resolve};
pub use sidebars::{DEFAULT_SIDEBAR, NavError, Sidebars, build_navigation};
pub use spec::{NavItem, ParsedSpec, SpecError, parse_spec};
