//! Command dispatch
//!
//! Loads settings, builds the service container, and routes each
//! subcommand to the service that implements it.

use std::io;
use std::path::Path;

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::LogLevel;
use crate::infrastructure::{InfraError, ServiceContainer};

/// Entry point used by `main`.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if let Some(Commands::Completion { shell }) = &cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(*shell, &mut cmd, "escalog", &mut io::stdout());
        return Ok(());
    }

    let settings = Settings::load(cli.config.as_deref())?;
    let container = ServiceContainer::new(settings);
    dispatch(cli.command.as_ref().unwrap_or(&Commands::Run), &container)
}

/// Run one command against an already wired container.
pub fn dispatch(command: &Commands, container: &ServiceContainer) -> CliResult<()> {
    match command {
        Commands::Run => run(container),
        Commands::Log { level, text } => log(container, *level, text),
        Commands::Mail { recipient, content } => mail(container, recipient, content),
        Commands::Append { path, line } => append(container, path, line),
        Commands::Config { command } => config(container, command),
        Commands::Completion { .. } => Err(CliError::InvalidArgs(
            "completion is handled before services are built".into(),
        )),
    }
}

#[instrument(skip(container))]
fn run(container: &ServiceContainer) -> CliResult<()> {
    container.program().run()?;
    Ok(())
}

#[instrument(skip(container))]
fn log(container: &ServiceContainer, level: LogLevel, text: &str) -> CliResult<()> {
    container.logger.log(level, text)?;
    Ok(())
}

#[instrument(skip(container))]
fn mail(container: &ServiceContainer, recipient: &str, content: &str) -> CliResult<()> {
    container.mail_sender.send_mail(recipient, content)?;
    Ok(())
}

#[instrument(skip(container))]
fn append(container: &ServiceContainer, path: &Path, line: &str) -> CliResult<()> {
    container.writer_factory.create(path).append_line(line)?;
    Ok(())
}

fn config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    let text = match command {
        ConfigCommands::Show => container.settings.to_toml()?,
        ConfigCommands::Template => Settings::template(),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => path.display().to_string(),
            None => {
                output::warning("no home directory; global config unavailable");
                return Ok(());
            }
        },
    };
    debug!("config: {:?}", command);
    container
        .console
        .write_line(text.trim_end())
        .map_err(|e| InfraError::io("write config output", e))?;
    Ok(())
}
