//! CLI command definitions for the `tsk` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod skill;
pub mod sync;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Install and manage agent skills across project and global locations.
#[derive(Parser)]
#[command(name = "tsk", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Project root for project-scoped locations (defaults to the current directory).
    #[arg(long, global = true, env = "SKILLKIT_PROJECT_DIR")]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Install skills from a local directory.
    #[command(alias = "add")]
    Install {
        /// Directory holding one skill, or subdirectories of skills.
        source: PathBuf,

        /// Install under the home directory instead of the project.
        #[arg(short, long)]
        global: bool,

        /// Install into the universal `.agent` namespace.
        #[arg(short, long)]
        universal: bool,

        /// Install every skill found without prompting.
        #[arg(short, long, conflicts_with = "skills")]
        all: bool,

        /// Overwrite existing skills with different content.
        #[arg(short, long)]
        force: bool,

        /// Only install these skills (comma-separated).
        #[arg(short, long, value_delimiter = ',')]
        skills: Vec<String>,
    },

    /// List installed skills (highest-priority copy of each name).
    #[command(alias = "ls")]
    List,

    /// Show where a skill resolves to.
    Where {
        /// Skill name.
        name: String,
    },

    /// Show the storage locations in priority order.
    Locations,

    /// Remove installed skills.
    #[command(alias = "rm", alias = "manage")]
    Remove {
        /// Skills to remove; prompts for a selection when omitted.
        names: Vec<String>,

        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },

    /// Write installed skills into AGENTS.md.
    Sync {
        /// Output file (relative paths resolve against the project root).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Include every installed skill without prompting.
        #[arg(long, conflicts_with = "skills")]
        auto: bool,

        /// Only include these skills (comma-separated).
        #[arg(short, long, value_delimiter = ',')]
        skills: Vec<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_install_flags() {
        let cli = Cli::try_parse_from([
            "tsk", "install", "./vendor", "-g", "-u", "--force", "--skills", "pdf,lint",
        ])
        .unwrap();
        match cli.command {
            Commands::Install {
                source,
                global,
                universal,
                all,
                force,
                skills,
            } => {
                assert_eq!(source, PathBuf::from("./vendor"));
                assert!(global && universal && force);
                assert!(!all);
                assert_eq!(skills, vec!["pdf", "lint"]);
            }
            _ => panic!("expected install"),
        }
    }

    #[test]
    fn all_conflicts_with_skills() {
        assert!(Cli::try_parse_from(["tsk", "install", ".", "--all", "-s", "pdf"]).is_err());
    }

    #[test]
    fn manage_is_remove_alias() {
        let cli = Cli::try_parse_from(["tsk", "manage", "pdf", "--yes"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Remove { ref names, yes: true } if names == &["pdf"]
        ));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["tsk", "list", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
    }
}
