// src/cli.rs
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use training_plan_lib::ExerciseSpec;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "A CLI tool to compose and submit training plans",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the exercises a plan can be built from
    Catalog,
    /// Build a plan and show it without submitting
    Preview {
        /// Name of the plan (e.g., "Leg Day")
        #[arg(short, long)]
        name: String,
        /// Exercise as NAME[:SETS[:REPS]], repeatable (e.g., "Sentadillas:4:15")
        #[arg(short, long = "exercise")]
        exercises: Vec<ExerciseSpec>,
    },
    /// Build a plan and submit it to the plan service
    Create {
        /// Name of the plan (e.g., "Leg Day")
        #[arg(short, long)]
        name: String,
        /// Exercise as NAME[:SETS[:REPS]], repeatable (e.g., "Sentadillas:4:15")
        #[arg(short, long = "exercise")]
        exercises: Vec<ExerciseSpec>,
    },
    /// Edit a plan interactively, then submit or cancel
    Compose,
    /// Show the path to the config file
    ConfigPath,
    /// Generate shell completion scripts
    GenerateCompletion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

// Function to parse CLI arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}
