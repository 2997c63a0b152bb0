//! Navigation resolution.
//!
//! Flattens a validated [`NavItem`] tree into document order and links each
//! document to its neighbors. Categories contribute only their leaves.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::document::DocumentId;
use crate::spec::NavItem;

/// Previous/next neighbors of one document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DocLinks {
    /// Document before this one, absent for the first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<DocumentId>,
    /// Document after this one, absent for the last.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<DocumentId>,
}

/// Final navigation handed to the renderer.
///
/// Immutable once built. Serialization is stable: `links` is ordered by id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedNavigation {
    items: Vec<NavItem>,
    order: Vec<DocumentId>,
    links: BTreeMap<DocumentId, DocLinks>,
    #[serde(skip)]
    positions: HashMap<DocumentId, usize>,
}

impl ResolvedNavigation {
    /// Validated tree, for rendering the sidebar itself.
    #[must_use]
    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    /// Documents in depth-first declared order.
    #[must_use]
    pub fn order(&self) -> &[DocumentId] {
        &self.order
    }

    /// Neighbors of a document.
    #[must_use]
    pub fn links(&self, id: &str) -> Option<&DocLinks> {
        self.links.get(id)
    }

    #[must_use]
    pub fn previous(&self, id: &str) -> Option<&DocumentId> {
        self.links(id).and_then(|l| l.previous.as_ref())
    }

    #[must_use]
    pub fn next(&self, id: &str) -> Option<&DocumentId> {
        self.links(id).and_then(|l| l.next.as_ref())
    }

    /// Zero-based position of a document in [`order`](Self::order).
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    /// Labels of the categories enclosing a document, outermost first.
    ///
    /// Empty for top-level documents and for unknown ids.
    #[must_use]
    pub fn breadcrumbs(&self, id: &str) -> Vec<&str> {
        let mut trail = Vec::new();
        if find_trail(&self.items, id, &mut trail) {
            trail
        } else {
            Vec::new()
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Resolve a validated tree into [`ResolvedNavigation`].
///
/// Each document is expected once; if a hand-built tree repeats one, its
/// first occurrence determines position and neighbors.
#[must_use]
pub fn resolve(items: Vec<NavItem>) -> ResolvedNavigation {
    let mut order = Vec::new();
    collect_docs(&items, &mut order);

    let mut links = BTreeMap::new();
    let mut positions = HashMap::with_capacity(order.len());
    for (i, id) in order.iter().enumerate() {
        if positions.contains_key(id) {
            continue;
        }
        positions.insert(id.clone(), i);
        links.insert(
            id.clone(),
            DocLinks {
                previous: i.checked_sub(1).map(|p| order[p].clone()),
                next: order.get(i + 1).cloned(),
            },
        );
    }

    ResolvedNavigation {
        items,
        order,
        links,
        positions,
    }
}

/// Pre-order walk collecting document leaves.
fn collect_docs(items: &[NavItem], order: &mut Vec<DocumentId>) {
    for item in items {
        match item {
            NavItem::DocRef { id, .. } => order.push(id.clone()),
            NavItem::Category { items, .. } => collect_docs(items, order),
        }
    }
}

fn find_trail<'a>(items: &'a [NavItem], id: &str, trail: &mut Vec<&'a str>) -> bool {
    for item in items {
        match item {
            NavItem::DocRef { id: doc, .. } if doc.as_str() == id => return true,
            NavItem::DocRef { .. } => {}
            NavItem::Category { label, items, .. } => {
                trail.push(label);
                if find_trail(items, id, trail) {
                    return true;
                }
                trail.pop();
            }
        }
    }
    false
}
