//! Configuration management for docnav.
//!
//! Parses `docnav.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! The `[site]` table holds the base [`SiteOptions`]. Each
//! `[profiles.<name>]` table holds an override for one deployment target
//! (for example `production` or `preview`). A profile is only applied when
//! selected explicitly through [`Config::effective`].
//!
//! ```toml
//! [site]
//! title = "Groot"
//! url = "https://groot.example.com"
//! base_url = "/"
//!
//! [docs]
//! source_dir = "docs"
//! sidebars = "sidebars.yaml"
//!
//! [profiles.production]
//! on_broken_links = "throw"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `title`, `url` and `base_url` support `${VAR}` and `${VAR:-default}`
//! in `[site]` and in every profile.

mod expand;
mod site;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

pub use site::{BrokenLinkPolicy, EffectiveConfig, SiteOptions, merge};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override sidebars file path.
    pub sidebars: Option<PathBuf>,
    /// Override the default sidebar name.
    pub sidebar: Option<String>,
    /// Override the sidebar link policy after the profile merge.
    pub on_broken_links: Option<BrokenLinkPolicy>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docnav.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base site options.
    pub site: SiteOptions,
    /// Documentation sources (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Named site option overrides.
    pub profiles: BTreeMap<String, SiteOptions>,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Link policy forced from the command line.
    #[serde(skip)]
    policy_override: Option<BrokenLinkPolicy>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    sidebars: Option<String>,
    sidebar: Option<String>,
}

/// Resolved documentation sources with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Directory scanned for documents.
    pub source_dir: PathBuf,
    /// Sidebars file (YAML or JSON).
    pub sidebars_path: PathBuf,
    /// Sidebar used when a command needs a single one.
    pub sidebar: Option<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Required site field absent from both base and override.
    #[error("Missing required site option: {0}")]
    MissingRequired(&'static str),
    /// Requested profile is not defined.
    #[error("Unknown profile '{name}' (available: {available})")]
    UnknownProfile {
        /// Requested profile name.
        name: String,
        /// Comma-separated defined profiles.
        available: String,
    },
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.url`").
        field: String,
        /// Error message (e.g., "${`DOCS_URL`} not set").
        message: String,
    },
}

/// Require a URL field to use http:// or https:// scheme.
pub(crate) fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docnav.toml` in current directory and parents.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Parse configuration from TOML text, resolving paths against `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns error on invalid TOML or failed environment expansion.
    pub fn from_toml_str(content: &str, base_dir: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.expand_env_vars()?;
        config.resolve_paths(base_dir);
        Ok(config)
    }

    /// Produce the effective site configuration for a profile.
    ///
    /// With `None`, the base options are merged with an empty override.
    /// A `--on-broken-links` CLI override is applied after the merge.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownProfile` for an undefined profile,
    /// `ConfigError::MissingRequired` if a required field is unset, and
    /// `ConfigError::Validation` if a merged field is malformed.
    pub fn effective(&self, profile: Option<&str>) -> Result<EffectiveConfig, ConfigError> {
        let empty = SiteOptions::default();
        let overrides = match profile {
            Some(name) => self
                .profiles
                .get(name)
                .ok_or_else(|| ConfigError::UnknownProfile {
                    name: name.to_owned(),
                    available: self.profile_names(),
                })?,
            None => &empty,
        };

        let mut effective = merge(&self.site, overrides)?;
        if let Some(policy) = self.policy_override {
            effective = effective.with_broken_link_policy(policy);
        }
        effective.validate()?;
        Ok(effective)
    }

    /// Comma-separated profile names, or `none`.
    fn profile_names(&self) -> String {
        if self.profiles.is_empty() {
            return "none".to_owned();
        }
        self.profiles
            .keys()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(sidebars) = &settings.sidebars {
            self.docs_resolved.sidebars_path.clone_from(sidebars);
        }
        if let Some(sidebar) = &settings.sidebar {
            self.docs_resolved.sidebar = Some(sidebar.clone());
        }
        if let Some(policy) = settings.on_broken_links {
            self.policy_override = Some(policy);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteOptions::default(),
            docs: DocsConfigRaw::default(),
            profiles: BTreeMap::new(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                sidebars_path: base.join("sidebars.yaml"),
                sidebar: None,
            },
            policy_override: None,
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::from_toml_str(&content, config_dir)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Expand environment variable references in site options.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.expand_env_vars("site")?;
        for (name, profile) in &mut self.profiles {
            profile.expand_env_vars(&format!("profiles.{name}"))?;
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = DocsConfig {
            source_dir: resolve(self.docs.source_dir.as_deref(), "docs"),
            sidebars_path: resolve(self.docs.sidebars.as_deref(), "sidebars.yaml"),
            sidebar: self.docs.sidebar.clone(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const GROOT: &str = r#"
[site]
title = "Groot"
tagline = "GraphQL in Go"
url = "https://groot.example.com"
base_url = "/"
organization_name = "shreyas44"
project_name = "groot"

[docs]
source_dir = "website/docs"
sidebars = "website/sidebars.yaml"
sidebar = "docs"

[profiles.production]
on_broken_links = "throw"

[profiles.preview]
url = "https://shreyas44.github.io"
base_url = "/groot/"
"#;

    fn groot() -> Config {
        Config::from_toml_str(GROOT, Path::new("/project")).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(
            config.docs_resolved.sidebars_path,
            PathBuf::from("/test/sidebars.yaml")
        );
        assert!(config.docs_resolved.sidebar.is_none());
        assert!(config.profiles.is_empty());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.site, SiteOptions::default());
    }

    #[test]
    fn test_resolve_paths() {
        let config = groot();

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/project/website/docs")
        );
        assert_eq!(
            config.docs_resolved.sidebars_path,
            PathBuf::from("/project/website/sidebars.yaml")
        );
        assert_eq!(config.docs_resolved.sidebar.as_deref(), Some("docs"));
    }

    #[test]
    fn test_effective_without_profile_uses_base() {
        let effective = groot().effective(None).unwrap();

        assert_eq!(effective.title(), "Groot");
        assert_eq!(effective.base_url(), "/");
        assert_eq!(effective.broken_link_policy(), BrokenLinkPolicy::Warn);
    }

    #[test]
    fn test_effective_production_profile_throws() {
        let effective = groot().effective(Some("production")).unwrap();

        assert_eq!(effective.broken_link_policy(), BrokenLinkPolicy::Throw);
        assert_eq!(effective.url(), "https://groot.example.com");
    }

    #[test]
    fn test_effective_preview_profile_overrides_base_path() {
        let effective = groot().effective(Some("preview")).unwrap();

        assert_eq!(effective.url(), "https://shreyas44.github.io");
        assert_eq!(effective.base_url(), "/groot/");
        assert_eq!(effective.project_name(), Some("groot"));
        assert_eq!(effective.broken_link_policy(), BrokenLinkPolicy::Warn);
    }

    #[test]
    fn test_effective_unknown_profile() {
        let err = groot().effective(Some("staging")).unwrap_err();

        assert!(
            matches!(err, ConfigError::UnknownProfile { .. }),
            "Expected UnknownProfile, got {err:?}"
        );
        let message = err.to_string();
        assert!(message.contains("staging"));
        assert!(message.contains("preview, production"));
    }

    #[test]
    fn test_effective_missing_required_field() {
        let toml = r#"
[site]
title = "Groot"
base_url = "/"
"#;
        let config = Config::from_toml_str(toml, Path::new("/project")).unwrap();

        let err = config.effective(None).unwrap_err();

        assert!(matches!(err, ConfigError::MissingRequired("url")));
    }

    #[test]
    fn test_effective_validates_merged_values() {
        let toml = r#"
[site]
title = "Groot"
url = "https://groot.example.com"
base_url = "/"

[profiles.broken]
base_url = "groot"
"#;
        let config = Config::from_toml_str(toml, Path::new("/project")).unwrap();

        assert!(config.effective(None).is_ok());
        let err = config.effective(Some("broken")).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_unknown_site_field_rejected() {
        let toml = r#"
[site]
titel = "Groot"
"#;
        let result = Config::from_toml_str(toml, Path::new("/project"));

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_invalid_policy_rejected() {
        let toml = r#"
[site]
on_broken_links = "explode"
"#;
        let result = Config::from_toml_str(toml, Path::new("/project"));

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_apply_cli_settings_paths() {
        let mut config = groot();
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/custom/docs")),
            sidebar: Some("api".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/custom/docs")
        );
        assert_eq!(config.docs_resolved.sidebar.as_deref(), Some("api"));
        assert_eq!(
            config.docs_resolved.sidebars_path,
            PathBuf::from("/project/website/sidebars.yaml")
        ); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_policy_wins_over_profile() {
        let mut config = groot();
        let overrides = CliSettings {
            on_broken_links: Some(BrokenLinkPolicy::Ignore),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);
        let effective = config.effective(Some("production")).unwrap();

        assert_eq!(effective.broken_link_policy(), BrokenLinkPolicy::Ignore);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = groot();

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/project/website/docs")
        );
        assert!(config.policy_override.is_none());
    }

    #[test]
    fn test_expand_env_vars_in_profile() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("DOCNAV_TEST_PREVIEW_URL", "https://preview.example.com");
        }

        let toml = r#"
[site]
title = "Groot"
url = "https://groot.example.com"
base_url = "/"

[profiles.preview]
url = "${DOCNAV_TEST_PREVIEW_URL}"
"#;
        let config = Config::from_toml_str(toml, Path::new("/project")).unwrap();
        let effective = config.effective(Some("preview")).unwrap();

        assert_eq!(effective.url(), "https://preview.example.com");

        unsafe {
            std::env::remove_var("DOCNAV_TEST_PREVIEW_URL");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_var_names_profile_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DOCNAV_TEST_UNSET_BASE");
        }

        let toml = r#"
[profiles.preview]
base_url = "${DOCNAV_TEST_UNSET_BASE}"
"#;
        let err = Config::from_toml_str(toml, Path::new("/project")).unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("profiles.preview.base_url"));
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/docnav.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_from_file_records_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, GROOT).unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
        assert_eq!(
            config.docs_resolved.source_dir,
            temp_dir.path().join("website/docs")
        );
    }
}
