use anyhow::Context;
use clap::Parser;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod output;
mod ui;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("pmr error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    if let cli::Commands::Schema(args) = &cli.command {
        return commands::schema::handle(args, &flags);
    }

    let config = bootstrap::load_config()?;
    let command = cli.command;

    if let cli::Commands::Session {
        action: cli::subcommands::SessionCommands::New,
    } = &command
    {
        return commands::session::new(&config, &flags);
    }

    let mut ctx = context::AppContext::load(config, &flags)
        .context("failed to load the pmr session")?;

    let result = commands::dispatch::dispatch(command.clone(), &mut ctx, &flags).await;
    if command_mutates_session(&command) {
        return settle(result, ctx.save_session());
    }
    result
}

/// The command's own error wins over a failed session write, which is then
/// only logged.
fn settle(result: anyhow::Result<()>, saved: anyhow::Result<()>) -> anyhow::Result<()> {
    match (result, saved) {
        (Err(error), Err(save_error)) => {
            tracing::warn!("failed to write the session after a command error: {save_error:#}");
            Err(error)
        }
        (result, saved) => result.and(saved),
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("PUBMEDR_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

/// Commands whose session changes must be written back, even on failure
/// (a failed chat turn still records the instruction).
fn command_mutates_session(command: &cli::Commands) -> bool {
    use crate::cli::subcommands::{
        ChatCommands, QueryCommands, SavedCommands, SessionCommands, SettingsCommands,
        SnapshotCommands,
    };

    match command {
        cli::Commands::Session { action } => !matches!(action, SessionCommands::Show),
        cli::Commands::Settings { action } => !matches!(action, SettingsCommands::Show { .. }),
        cli::Commands::Chat { action } => !matches!(action, ChatCommands::History),
        cli::Commands::Query { action } => !matches!(action, QueryCommands::List { .. }),
        cli::Commands::Saved { action } => matches!(action, SavedCommands::Restore { .. }),
        cli::Commands::Snapshot { action } => matches!(action, SnapshotCommands::Load),
        cli::Commands::Setup(_) | cli::Commands::Run(_) => true,
        cli::Commands::Results(_)
        | cli::Commands::Summarize(_)
        | cli::Commands::Save(_)
        | cli::Commands::Schema(_) => false,
    }
}
