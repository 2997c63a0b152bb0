//! Site options and the base/profile merge.
//!
//! [`SiteOptions`] is the partial form found in `[site]` and in every
//! `[profiles.<name>]` table. [`merge`] folds one override onto the base and
//! produces the read-only [`EffectiveConfig`].
//!
//! # Defaults
//!
//! | Field                          | Required | Default |
//! |--------------------------------|----------|---------|
//! | `title`                        | yes      |         |
//! | `url`                          | yes      |         |
//! | `base_url`                     | yes      |         |
//! | `tagline`                      | no       | none    |
//! | `organization_name`            | no       | none    |
//! | `project_name`                 | no       | none    |
//! | `edit_url`                     | no       | none    |
//! | `on_broken_links`              | no       | `warn`  |
//! | `on_broken_markdown_links`     | no       | `warn`  |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, expand, require_http_url};

/// Strictness applied when a referenced document cannot be found.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrokenLinkPolicy {
    /// Drop unresolved references silently.
    Ignore,
    /// Report unresolved references and keep going.
    #[default]
    Warn,
    /// Fail the build when any reference is unresolved.
    Throw,
}

impl BrokenLinkPolicy {
    /// Policy name as written in configuration.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ignore => "ignore",
            Self::Warn => "warn",
            Self::Throw => "throw",
        }
    }
}

impl fmt::Display for BrokenLinkPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BrokenLinkPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ignore" => Ok(Self::Ignore),
            "warn" => Ok(Self::Warn),
            "throw" => Ok(Self::Throw),
            other => Err(ConfigError::Validation(format!(
                "unknown broken link policy '{other}' (expected ignore, warn or throw)"
            ))),
        }
    }
}

/// Partial site options.
///
/// Every field is optional; `None` means "not set at this layer".
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteOptions {
    /// Site title.
    pub title: Option<String>,
    /// Short site description shown next to the title.
    pub tagline: Option<String>,
    /// Public URL of the site (scheme and host).
    pub url: Option<String>,
    /// Path under `url` the site is served from.
    pub base_url: Option<String>,
    /// Organization owning the source repository.
    pub organization_name: Option<String>,
    /// Project (repository) name.
    pub project_name: Option<String>,
    /// Base URL for "edit this page" links; a document's source path is appended.
    pub edit_url: Option<String>,
    /// Policy for unresolved sidebar references.
    pub on_broken_links: Option<BrokenLinkPolicy>,
    /// Policy for unresolved cross-references between documents.
    pub on_broken_markdown_links: Option<BrokenLinkPolicy>,
}

impl SiteOptions {
    /// Expand `${VAR}` references in string fields.
    pub(crate) fn expand_env_vars(&mut self, table: &str) -> Result<(), ConfigError> {
        expand::expand_opt(&mut self.title, &format!("{table}.title"))?;
        expand::expand_opt(&mut self.url, &format!("{table}.url"))?;
        expand::expand_opt(&mut self.base_url, &format!("{table}.base_url"))?;
        expand::expand_opt(&mut self.edit_url, &format!("{table}.edit_url"))?;
        Ok(())
    }
}

/// Merged site configuration for one invocation.
///
/// Produced only by [`merge`]; fields are read-only for consumers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveConfig {
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tagline: Option<String>,
    url: String,
    base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    organization_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    edit_url: Option<String>,
    broken_link_policy: BrokenLinkPolicy,
    broken_markdown_link_policy: BrokenLinkPolicy,
}

impl EffectiveConfig {
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn tagline(&self) -> Option<&str> {
        self.tagline.as_deref()
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn organization_name(&self) -> Option<&str> {
        self.organization_name.as_deref()
    }

    #[must_use]
    pub fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref()
    }

    #[must_use]
    pub fn edit_url(&self) -> Option<&str> {
        self.edit_url.as_deref()
    }

    /// Policy for unresolved sidebar references.
    #[must_use]
    pub fn broken_link_policy(&self) -> BrokenLinkPolicy {
        self.broken_link_policy
    }

    /// Policy for unresolved markdown cross-references.
    #[must_use]
    pub fn broken_markdown_link_policy(&self) -> BrokenLinkPolicy {
        self.broken_markdown_link_policy
    }

    /// Return a copy with the sidebar link policy replaced.
    #[must_use]
    pub fn with_broken_link_policy(mut self, policy: BrokenLinkPolicy) -> Self {
        self.broken_link_policy = policy;
        self
    }

    /// Check field formats.
    ///
    /// Not part of [`merge`]: the merge only decides presence, while this
    /// runs when configuration is loaded from a file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if `url` is not http(s) or `base_url`
    /// does not start and end with `/`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_http_url(&self.url, "site.url")?;
        if !self.base_url.starts_with('/') || !self.base_url.ends_with('/') {
            return Err(ConfigError::Validation(format!(
                "site.base_url must start and end with '/', got '{}'",
                self.base_url
            )));
        }
        Ok(())
    }
}

/// Merge `overrides` onto `base`.
///
/// Any field set in `overrides` wins; unset fields fall through to `base`.
/// Missing required fields fail with [`ConfigError::MissingRequired`];
/// policies default to [`BrokenLinkPolicy::Warn`].
///
/// # Errors
///
/// Returns `ConfigError::MissingRequired` naming the first required field
/// absent from both layers.
pub fn merge(base: &SiteOptions, overrides: &SiteOptions) -> Result<EffectiveConfig, ConfigError> {
    fn pick<T: Clone>(over: Option<&T>, base: Option<&T>) -> Option<T> {
        over.or(base).cloned()
    }

    let required = |over: Option<&String>, base: Option<&String>, field: &'static str| {
        pick(over, base).ok_or(ConfigError::MissingRequired(field))
    };

    Ok(EffectiveConfig {
        title: required(overrides.title.as_ref(), base.title.as_ref(), "title")?,
        url: required(overrides.url.as_ref(), base.url.as_ref(), "url")?,
        base_url: required(
            overrides.base_url.as_ref(),
            base.base_url.as_ref(),
            "base_url",
        )?,
        tagline: pick(overrides.tagline.as_ref(), base.tagline.as_ref()),
        organization_name: pick(
            overrides.organization_name.as_ref(),
            base.organization_name.as_ref(),
        ),
        project_name: pick(overrides.project_name.as_ref(), base.project_name.as_ref()),
        edit_url: pick(overrides.edit_url.as_ref(), base.edit_url.as_ref()),
        broken_link_policy: overrides
            .on_broken_links
            .or(base.on_broken_links)
            .unwrap_or_default(),
        broken_markdown_link_policy: overrides
            .on_broken_markdown_links
            .or(base.on_broken_markdown_links)
            .unwrap_or_default(),
    })
}
