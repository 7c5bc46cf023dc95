//! SkillKit CLI entry point.
//!
//! Binary name: `tsk`
//!
//! Parses CLI arguments, sets up logging, resolves storage roots and
//! configuration, then dispatches to the command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use state::AppState;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,skillkit=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "tsk", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(cli.project_dir.clone())?;

    match cli.command {
        Commands::Install {
            source,
            global,
            universal,
            all,
            force,
            skills,
        } => {
            let args = cli::skill::InstallArgs {
                source: &source,
                global,
                universal,
                all,
                force,
                skills: &skills,
            };
            cli::skill::handle_install(args, &state, cli.json)?;
        }

        Commands::List => {
            cli::skill::handle_list(&state, cli.json)?;
        }

        Commands::Where { name } => {
            cli::skill::handle_where(&name, &state, cli.json)?;
        }

        Commands::Locations => {
            cli::skill::handle_locations(&state, cli.json)?;
        }

        Commands::Remove { names, yes } => {
            cli::skill::handle_remove(&names, yes, &state, cli.json)?;
        }

        Commands::Sync {
            output,
            auto,
            skills,
        } => {
            cli::sync::handle_sync(output.as_deref(), auto, &skills, &state, cli.json)?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
