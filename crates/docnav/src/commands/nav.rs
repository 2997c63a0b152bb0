//! `docnav nav` command implementation.

use clap::Args;
use docnav_config::EffectiveConfig;
use docnav_site::{ResolvedNavigation, Sidebars};
use serde::Serialize;

use super::{ProjectArgs, write_json};
use crate::error::CliError;
use crate::output::{Output, OutputSink};

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    #[command(flatten)]
    project: ProjectArgs,

    /// Sidebar to resolve (default: configured sidebar, or the only one defined).
    #[arg(long)]
    sidebar: Option<String>,

    /// Print compact JSON.
    #[arg(long)]
    compact: bool,
}

/// JSON document printed by `docnav nav`.
#[derive(Serialize)]
struct NavOutput<'a> {
    site: &'a EffectiveConfig,
    sidebar: &'a str,
    navigation: &'a ResolvedNavigation,
}

impl NavArgs {
    /// Execute the nav command.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails, no sidebar can be selected, or
    /// resolution fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let project = self.project.load(self.sidebar)?;
        let registry = project.registry()?;
        let sidebars = project.sidebars()?;

        let name = select_sidebar(project.config.docs_resolved.sidebar.as_deref(), &sidebars)?;

        let mut sink = OutputSink::new(&output);
        let navigation = sidebars.resolve(
            &name,
            &registry,
            project.site.broken_link_policy(),
            &mut sink,
        )?;
        tracing::info!(sidebar = %name, documents = navigation.len(), "Resolved navigation");

        write_json(
            &NavOutput {
                site: &project.site,
                sidebar: &name,
                navigation: &navigation,
            },
            self.compact,
        )
    }
}

/// Pick the requested sidebar, or the only one when none is requested.
fn select_sidebar(requested: Option<&str>, sidebars: &Sidebars) -> Result<String, CliError> {
    if let Some(name) = requested {
        return Ok(name.to_owned());
    }
    if let Some(name) = sidebars.sole() {
        return Ok(name.to_owned());
    }
    if sidebars.is_empty() {
        return Err(CliError::Validation("No sidebars defined".to_owned()));
    }
    Err(CliError::Validation(format!(
        "Multiple sidebars defined ({}); choose one with --sidebar",
        sidebars.names().collect::<Vec<_>>().join(", ")
    )))
}
