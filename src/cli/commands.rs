//! Top-level driver: settings → services → registry → resolve → run.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{data, registry, Resolver};
use crate::cli::args::Cli;
use crate::cli::output;
use crate::cli::CliResult;
use crate::commands::builtin_registry;
use crate::config::Settings;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::TerminalPrompter;

/// Prompts are shown only when nothing opts out and stdin is a terminal.
pub fn is_interactive(cli: &Cli, settings: &Settings) -> bool {
    !cli.non_interactive
        && settings.interactive != Some(false)
        && TerminalPrompter::stdin_is_terminal()
}

#[instrument(skip(cli), fields(tokens = ?cli.tokens))]
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.project_dir.as_deref())?;
    data::seed_default_data(&settings.data);

    let interactive = is_interactive(cli, &settings);
    debug!("execute_command: interactive={}", interactive);

    let mut services = ServiceContainer::new(settings, interactive);
    if let Some(dir) = &cli.project_dir {
        services = services.with_project_dir(dir.clone());
    }

    registry::install(builtin_registry()?);
    let resolver = Resolver::installed(Arc::new(services));

    let mut instance = resolver.resolve(&cli.tokens)?;
    if let Some(out) = instance.run()? {
        output::info(&out);
    }
    Ok(())
}
