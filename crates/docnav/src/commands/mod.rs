//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod config;
pub(crate) mod nav;

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use docnav_config::{BrokenLinkPolicy, CliSettings, Config, EffectiveConfig};
use docnav_site::{DocumentRegistry, Sidebars};
use docnav_storage_fs::FsSource;
use serde::Serialize;

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use config::ConfigArgs;
pub(crate) use nav::NavArgs;

/// Arguments shared by every command that loads a project.
#[derive(Args)]
pub(crate) struct ProjectArgs {
    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Deployment profile to apply (e.g. production, preview).
    #[arg(short, long, env = "DOCNAV_PROFILE")]
    profile: Option<String>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Sidebars file, YAML or JSON (overrides config).
    #[arg(long)]
    sidebars: Option<PathBuf>,

    /// Policy for unresolved sidebar entries: ignore, warn or throw (overrides config and profile).
    #[arg(long, value_name = "POLICY")]
    on_broken_links: Option<BrokenLinkPolicy>,
}

impl ProjectArgs {
    /// Load configuration and merge the selected profile.
    pub(crate) fn load(&self, sidebar: Option<String>) -> Result<Project, CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir.clone(),
            sidebars: self.sidebars.clone(),
            sidebar,
            on_broken_links: self.on_broken_links,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let site = config.effective(self.profile.as_deref())?;

        tracing::info!(
            profile = self.profile.as_deref().unwrap_or("(none)"),
            policy = %site.broken_link_policy(),
            "Loaded configuration"
        );

        Ok(Project {
            config,
            site,
            profile: self.profile.clone(),
        })
    }
}

/// Loaded configuration with its effective site options.
pub(crate) struct Project {
    pub config: Config,
    pub site: EffectiveConfig,
    pub profile: Option<String>,
}

impl Project {
    /// Discover documents under the configured source directory.
    pub(crate) fn registry(&self) -> Result<DocumentRegistry, CliError> {
        let source = FsSource::new(self.config.docs_resolved.source_dir.clone());
        Ok(DocumentRegistry::from_source(&source)?)
    }

    /// Load the configured sidebars file.
    pub(crate) fn sidebars(&self) -> Result<Sidebars, CliError> {
        Ok(Sidebars::load(&self.config.docs_resolved.sidebars_path)?)
    }
}

/// Write a value as JSON to stdout.
pub(crate) fn write_json(value: &impl Serialize, compact: bool) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    if compact {
        serde_json::to_writer(&mut stdout, value)?;
    } else {
        serde_json::to_writer_pretty(&mut stdout, value)?;
    }
    writeln!(stdout)?;
    Ok(())
}
