//! Navigation spec parsing.
//!
//! Turns the declarative sidebar value (as read from YAML or JSON) into an
//! ordered tree of [`NavItem`] nodes, checking every document reference
//! against the [`DocumentRegistry`].
//!
//! # Accepted shapes
//!
//! ```yaml
//! - introduction                  # document id
//! - type: doc                     # explicit document entry
//!   id: getting-started
//!   label: Start here             # optional sidebar label
//! - label: Type Definitions       # category (`type: category` optional)
//!   collapsed: false              # defaults to true
//!   items:
//!     - type-definitions/object
//! ```
//!
//! A single id or category object is accepted in place of the top-level
//! sequence.
//!
//! # Error handling
//!
//! Shape errors abort the whole parse with [`SpecError`]. References to
//! unknown documents are skipped and recorded as [`ResolutionError`]s for
//! the policy check.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::document::DocumentId;
use crate::policy::ResolutionError;
use crate::registry::DocumentRegistry;

/// Node of the navigation tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum NavItem {
    /// Leaf pointing to one document.
    #[serde(rename = "doc")]
    DocRef {
        /// Referenced document.
        id: DocumentId,
        /// Sidebar label overriding the document title.
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    /// Named, nestable group.
    #[serde(rename = "category")]
    Category {
        /// Display label.
        label: String,
        /// Whether the group starts collapsed.
        collapsed: bool,
        /// Child items in declared order.
        items: Vec<NavItem>,
    },
}

impl NavItem {
    /// Document leaf without a label override.
    #[must_use]
    pub fn doc(id: impl Into<DocumentId>) -> Self {
        Self::DocRef {
            id: id.into(),
            label: None,
        }
    }

    /// Collapsed category.
    #[must_use]
    pub fn category(label: impl Into<String>, items: Vec<NavItem>) -> Self {
        Self::Category {
            label: label.into(),
            collapsed: true,
            items,
        }
    }

    /// Number of document leaves in this subtree.
    #[must_use]
    pub fn doc_count(&self) -> usize {
        match self {
            Self::DocRef { .. } => 1,
            Self::Category { items, .. } => items.iter().map(Self::doc_count).sum(),
        }
    }
}

/// Malformed navigation spec.
#[derive(Debug, thiserror::Error)]
pub enum SpecError {
    /// A node does not match any accepted shape.
    #[error("Invalid navigation spec at {location}: {message}")]
    Invalid {
        /// Location of the node (e.g. `docs[3].items[0]`).
        location: String,
        /// What was wrong.
        message: String,
    },
    /// A document appears twice in one spec.
    #[error("Document '{id}' is referenced more than once (again at {location})")]
    DuplicateReference {
        /// Repeated document id.
        id: DocumentId,
        /// Location of the second reference.
        location: String,
    },
}

/// Output of [`parse_spec`].
#[derive(Debug, Default)]
pub struct ParsedSpec {
    /// Root items in declared order, unresolved leaves removed.
    pub items: Vec<NavItem>,
    /// Unresolved references, in declared order.
    pub errors: Vec<ResolutionError>,
    /// Categories declared with no items (e.g. `docs > Guides`).
    pub empty_categories: Vec<String>,
}

/// Parse a navigation spec against the registry.
///
/// # Errors
///
/// Returns [`SpecError`] if any node is malformed or a document is
/// referenced twice.
pub fn parse_spec(spec: &Value, registry: &DocumentRegistry) -> Result<ParsedSpec, SpecError> {
    SpecParser::new(registry, None).parse(spec)
}

/// Parse one named sidebar; its name prefixes diagnostics and locations.
pub(crate) fn parse_named(
    name: &str,
    spec: &Value,
    registry: &DocumentRegistry,
) -> Result<ParsedSpec, SpecError> {
    SpecParser::new(registry, Some(name)).parse(spec)
}

struct SpecParser<'a> {
    registry: &'a DocumentRegistry,
    root: String,
    trail: Vec<String>,
    seen: HashSet<DocumentId>,
    errors: Vec<ResolutionError>,
    empty_categories: Vec<String>,
}

impl<'a> SpecParser<'a> {
    fn new(registry: &'a DocumentRegistry, name: Option<&str>) -> Self {
        Self {
            registry,
            root: name.unwrap_or_default().to_owned(),
            trail: name.map(str::to_owned).into_iter().collect(),
            seen: HashSet::new(),
            errors: Vec::new(),
            empty_categories: Vec::new(),
        }
    }

    fn parse(mut self, spec: &Value) -> Result<ParsedSpec, SpecError> {
        let root = self.root.clone();
        let items = match spec {
            Value::Array(entries) => self.parse_items(entries, &root)?,
            Value::String(_) | Value::Object(_) => self.parse_item(spec, &root)?.into_iter().collect(),
            other => {
                return Err(invalid(
                    &root,
                    format!(
                        "expected a sequence of items, found {}",
                        value_kind(other)
                    ),
                ));
            }
        };

        Ok(ParsedSpec {
            items,
            errors: self.errors,
            empty_categories: self.empty_categories,
        })
    }

    fn parse_items(&mut self, entries: &[Value], location: &str) -> Result<Vec<NavItem>, SpecError> {
        let mut items = Vec::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            if let Some(item) = self.parse_item(entry, &format!("{location}[{i}]"))? {
                items.push(item);
            }
        }
        Ok(items)
    }

    /// Parse one entry; `None` means an unresolved reference was skipped.
    fn parse_item(&mut self, value: &Value, location: &str) -> Result<Option<NavItem>, SpecError> {
        match value {
            Value::String(id) => self.doc_ref(id, None, location),
            Value::Object(map) => self.parse_object(map, location),
            other => Err(invalid(
                location,
                format!(
                    "expected a document id or category object, found {}",
                    value_kind(other)
                ),
            )),
        }
    }

    fn parse_object(
        &mut self,
        map: &Map<String, Value>,
        location: &str,
    ) -> Result<Option<NavItem>, SpecError> {
        match map.get("type") {
            Some(Value::String(kind)) if kind == "doc" => {
                let id = match map.get("id") {
                    Some(Value::String(id)) => id,
                    Some(_) => return Err(invalid(location, "`id` must be a string")),
                    None => return Err(invalid(location, "doc item requires an `id`")),
                };
                let label = optional_string(map, "label", location)?;
                self.doc_ref(id, label, location)
            }
            Some(Value::String(kind)) if kind == "category" => {
                self.parse_category(map, location).map(Some)
            }
            Some(Value::String(kind)) => Err(invalid(
                location,
                format!("unsupported item type '{kind}' (expected doc or category)"),
            )),
            Some(_) => Err(invalid(location, "`type` must be a string")),
            None if map.contains_key("items") || map.contains_key("label") => {
                self.parse_category(map, location).map(Some)
            }
            None => Err(invalid(
                location,
                "object is neither a category (label, items) nor a typed item",
            )),
        }
    }

    fn parse_category(
        &mut self,
        map: &Map<String, Value>,
        location: &str,
    ) -> Result<NavItem, SpecError> {
        let label = match optional_string(map, "label", location)? {
            Some(label) if !label.trim().is_empty() => label,
            Some(_) => return Err(invalid(location, "category label cannot be empty")),
            None => return Err(invalid(location, "category requires a `label`")),
        };

        let collapsed = match map.get("collapsed") {
            None => true,
            Some(Value::Bool(collapsed)) => *collapsed,
            Some(_) => return Err(invalid(location, "`collapsed` must be a boolean")),
        };

        let entries = match map.get("items") {
            Some(Value::Array(entries)) => entries,
            Some(_) => return Err(invalid(location, "`items` must be a sequence")),
            None => {
                return Err(invalid(
                    location,
                    format!("category '{label}' requires `items`"),
                ));
            }
        };

        self.trail.push(label.clone());
        let items = self.parse_items(entries, &format!("{location}.items"));
        if entries.is_empty() {
            let path = self.trail.join(" > ");
            tracing::warn!(category = %path, "Category has no items");
            self.empty_categories.push(path);
        }
        self.trail.pop();

        Ok(NavItem::Category {
            label,
            collapsed,
            items: items?,
        })
    }

    fn doc_ref(
        &mut self,
        id: &str,
        label: Option<String>,
        location: &str,
    ) -> Result<Option<NavItem>, SpecError> {
        if id.trim().is_empty() {
            return Err(invalid(location, "document id cannot be empty"));
        }

        let id = DocumentId::new(id);
        // Every unresolved occurrence is recorded; only resolved ids can be duplicates
        if !self.registry.exists(id.as_str()) {
            tracing::debug!(%id, location, "Skipping unresolved document reference");
            self.errors
                .push(ResolutionError::sidebar(id, self.trail.clone()));
            return Ok(None);
        }

        if !self.seen.insert(id.clone()) {
            return Err(SpecError::DuplicateReference {
                id,
                location: display_location(location),
            });
        }

        Ok(Some(NavItem::DocRef { id, label }))
    }
}

fn optional_string(
    map: &Map<String, Value>,
    key: &str,
    location: &str,
) -> Result<Option<String>, SpecError> {
    match map.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(invalid(location, format!("`{key}` must be a string"))),
    }
}

fn invalid(location: &str, message: impl Into<String>) -> SpecError {
    SpecError::Invalid {
        location: display_location(location),
        message: message.into(),
    }
}

fn display_location(location: &str) -> String {
    if location.is_empty() {
        "(root)".to_owned()
    } else {
        location.to_owned()
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "an object",
    }
}
