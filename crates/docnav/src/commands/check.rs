//! `docnav check` command implementation.

use clap::Args;
use docnav_site::{NavError, ResolutionError, check_links, validate};

use super::ProjectArgs;
use crate::error::CliError;
use crate::output::{Output, OutputSink};

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    project: ProjectArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// Every sidebar and the markdown links are checked before failing, so
    /// one run reports all unresolved references.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails, a sidebar is malformed, or any
    /// reference is unresolved under the `throw` policy.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let project = self.project.load(None)?;

        output.highlight(&format!("Checking {}", project.site.title()));
        if let Some(profile) = &project.profile {
            output.info(&format!("Profile: {profile}"));
        }
        output.info(&format!(
            "Source directory: {}",
            project.config.docs_resolved.source_dir.display()
        ));

        let registry = project.registry()?;
        let sidebars = project.sidebars()?;
        output.info(&format!(
            "Found {} documents and {} sidebar(s)",
            registry.len(),
            sidebars.len()
        ));

        let mut sink = OutputSink::new(&output);
        let mut fatal: Vec<ResolutionError> = Vec::new();

        for name in sidebars.names() {
            match sidebars.resolve(name, &registry, project.site.broken_link_policy(), &mut sink) {
                Ok(navigation) => {
                    output.info(&format!("Sidebar '{name}': {} documents", navigation.len()));
                }
                Err(NavError::Fatal(err)) => fatal.extend_from_slice(err.unresolved()),
                Err(err) => return Err(err.into()),
            }
        }

        let link_errors = check_links(&registry);
        if let Err(err) = validate(
            link_errors,
            project.site.broken_markdown_link_policy(),
            &mut sink,
        ) {
            fatal.extend_from_slice(err.unresolved());
        }

        if !fatal.is_empty() {
            for error in &fatal {
                output.error(&error.to_string());
            }
            return Err(CliError::Validation(format!(
                "{} unresolved document reference(s)",
                fatal.len()
            )));
        }

        match sink.reported() {
            0 => output.success("All document references resolved"),
            n => output.warning(&format!("Check passed with {n} warning(s)")),
        }
        Ok(())
    }
}
