//! `docnav config` command implementation.

use std::path::Path;

use clap::Args;
use docnav_config::EffectiveConfig;
use serde::Serialize;

use super::{ProjectArgs, write_json};
use crate::error::CliError;

/// Arguments for the config command.
#[derive(Args)]
pub(crate) struct ConfigArgs {
    #[command(flatten)]
    project: ProjectArgs,

    /// Print compact JSON.
    #[arg(long)]
    compact: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfigOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_path: Option<&'a Path>,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile: Option<&'a str>,
    site: &'a EffectiveConfig,
    docs: DocsOutput<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DocsOutput<'a> {
    source_dir: &'a Path,
    sidebars: &'a Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    sidebar: Option<&'a str>,
}

impl ConfigArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let project = self.project.load(None)?;
        let docs = &project.config.docs_resolved;

        write_json(
            &ConfigOutput {
                config_path: project.config.config_path.as_deref(),
                profile: project.profile.as_deref(),
                site: &project.site,
                docs: DocsOutput {
                    source_dir: &docs.source_dir,
                    sidebars: &docs.sidebars_path,
                    sidebar: docs.sidebar.as_deref(),
                },
            },
            self.compact,
        )
    }
}
