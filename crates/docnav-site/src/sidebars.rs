//! Named sidebars file.
//!
//! A sidebars file maps sidebar names to navigation specs:
//!
//! ```yaml
//! docs:
//!   - introduction
//!   - label: Type Definitions
//!     items: [type-definitions/object]
//! api:
//!   - reference
//! ```
//!
//! A file holding a bare spec (a sequence, or a single item) is read as one
//! sidebar named [`DEFAULT_SIDEBAR`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::policy::{self, BrokenLinkPolicy, DiagnosticSink, FatalError};
use crate::registry::DocumentRegistry;
use crate::resolve::{ResolvedNavigation, resolve};
use crate::spec::{ParsedSpec, SpecError, parse_named, parse_spec};

/// Name given to a sidebar read from a bare spec.
pub const DEFAULT_SIDEBAR: &str = "default";

/// Error returned by navigation building.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// Malformed spec.
    #[error(transparent)]
    Spec(#[from] SpecError),
    /// Unresolved references under the `throw` policy.
    #[error(transparent)]
    Fatal(#[from] FatalError),
    /// Requested sidebar is not defined.
    #[error("Unknown sidebar '{name}' (available: {available})")]
    UnknownSidebar {
        /// Requested name.
        name: String,
        /// Comma-separated defined sidebars.
        available: String,
    },
    /// Reading the sidebars file failed.
    #[error("Failed to read sidebars file {}: {source}", path.display())]
    Io {
        /// Sidebars file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The sidebars file is not valid YAML or JSON.
    #[error("Failed to parse sidebars file {}: {message}", path.display())]
    Parse {
        /// Sidebars file path.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
}

/// Run the full pass over one spec: parse, apply the policy, resolve.
///
/// # Errors
///
/// Returns `NavError::Spec` for a malformed spec and `NavError::Fatal`
/// when `policy` is `throw` and any reference is unresolved.
pub fn build_navigation(
    spec: &Value,
    registry: &DocumentRegistry,
    policy: BrokenLinkPolicy,
    sink: &mut dyn DiagnosticSink,
) -> Result<ResolvedNavigation, NavError> {
    finish(parse_spec(spec, registry)?, policy, sink)
}

fn finish(
    parsed: ParsedSpec,
    policy: BrokenLinkPolicy,
    sink: &mut dyn DiagnosticSink,
) -> Result<ResolvedNavigation, NavError> {
    let ParsedSpec { items, errors, .. } = parsed;
    policy::validate(errors, policy, sink)?;
    Ok(resolve(items))
}

/// Sidebar specs keyed by name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sidebars {
    specs: BTreeMap<String, Value>,
}

impl Sidebars {
    /// Interpret a parsed sidebars document.
    ///
    /// `null` (an empty file) yields no sidebars.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        let specs = match value {
            Value::Null => BTreeMap::new(),
            Value::Object(map) if !is_item_object(&map) => map.into_iter().collect(),
            spec => BTreeMap::from([(DEFAULT_SIDEBAR.to_owned(), spec)]),
        };
        Self { specs }
    }

    /// Load a sidebars file; `.yml`/`.yaml` are read as YAML, anything else as JSON.
    ///
    /// # Errors
    ///
    /// Returns `NavError::Io` if the file cannot be read and
    /// `NavError::Parse` if it is not valid for its format.
    pub fn load(path: &Path) -> Result<Self, NavError> {
        let content = std::fs::read_to_string(path).map_err(|source| NavError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_yaml = path
            .extension()
            .is_some_and(|ext| ext == "yaml" || ext == "yml");
        let value = if is_yaml {
            parse_yaml(&content)
        } else {
            serde_json::from_str(&content).map_err(|e| e.to_string())
        }
        .map_err(|message| NavError::Parse {
            path: path.to_path_buf(),
            message,
        })?;

        let sidebars = Self::from_value(value);
        tracing::debug!(path = %path.display(), count = sidebars.len(), "Loaded sidebars");
        Ok(sidebars)
    }

    /// Sidebar names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(String::as_str)
    }

    /// Raw spec of a sidebar.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.specs.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// The sidebar to use when none is named: the only one, if there is one.
    #[must_use]
    pub fn sole(&self) -> Option<&str> {
        match self.specs.len() {
            1 => self.names().next(),
            _ => None,
        }
    }

    /// Parse one sidebar without applying a policy.
    ///
    /// # Errors
    ///
    /// Returns `NavError::UnknownSidebar` for an undefined name and
    /// `NavError::Spec` for a malformed spec.
    pub fn parse(&self, name: &str, registry: &DocumentRegistry) -> Result<ParsedSpec, NavError> {
        let spec = self.specs.get(name).ok_or_else(|| self.unknown(name))?;
        Ok(parse_named(name, spec, registry)?)
    }

    /// Full pass over one sidebar.
    ///
    /// # Errors
    ///
    /// See [`Sidebars::parse`]; additionally `NavError::Fatal` under the
    /// `throw` policy.
    pub fn resolve(
        &self,
        name: &str,
        registry: &DocumentRegistry,
        policy: BrokenLinkPolicy,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<ResolvedNavigation, NavError> {
        finish(self.parse(name, registry)?, policy, sink)
    }

    fn unknown(&self, name: &str) -> NavError {
        let available = if self.specs.is_empty() {
            "none".to_owned()
        } else {
            self.names().collect::<Vec<_>>().join(", ")
        };
        NavError::UnknownSidebar {
            name: name.to_owned(),
            available,
        }
    }
}

/// True for objects shaped like a single nav item rather than a name map.
///
/// An item carries a string `type` or `label`; sidebar specs are sequences,
/// so a sidebar may itself be named `type`, `label` or `items`.
fn is_item_object(map: &serde_json::Map<String, Value>) -> bool {
    ["type", "label"]
        .iter()
        .any(|key| map.get(*key).is_some_and(Value::is_string))
}

fn parse_yaml(content: &str) -> Result<Value, String> {
    if content.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_yaml::from_str(content).map_err(|e| e.to_string())
}
