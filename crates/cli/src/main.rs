use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "findlight")]
#[command(about = "Findlight in-document search CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    action: Option<Action>,
}

#[derive(Subcommand)]
enum Action {
    /// Show version information
    #[command(name = "-version")]
    Version,

    /// Show help and available actions
    #[command(name = "-help")]
    Help,

    /// Search a JSON document and print every match
    #[command(name = "-search")]
    Search(SearchArgs),

    /// Check whether a regex is valid and meaningful
    #[command(name = "-check-regex")]
    CheckRegex {
        /// Pattern to classify
        pattern: String,
    },

    /// Display current configuration
    #[command(name = "-show-config")]
    ShowConfig,

    /// Validate configuration file
    #[command(name = "-validate-config")]
    ValidateConfig,
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Document file in the findlight JSON format
    pub file: PathBuf,

    /// Keyword or regex to search for
    pub keyword: String,

    /// Match case exactly
    #[arg(long)]
    pub case_sensitive: bool,

    /// Only match whole words
    #[arg(long)]
    pub whole_word: bool,

    /// Treat the keyword as a regular expression
    #[arg(long)]
    pub regex: bool,

    /// Print a JSON report instead of plain lines
    #[arg(long)]
    pub json: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.action {
        Some(Action::Version) => {
            commands::version::run();
            Ok(())
        }
        Some(Action::Help) => {
            commands::help::run();
            Ok(())
        }
        Some(Action::Search(args)) => commands::search::run(args),
        Some(Action::CheckRegex { pattern }) => {
            commands::check_regex::run(&pattern);
            Ok(())
        }
        Some(Action::ShowConfig) => commands::show_config::run(),
        Some(Action::ValidateConfig) => commands::validate_config::run(),
        None => {
            // No subcommand: show help
            commands::help::run();
            Ok(())
        }
    };

    if let Err(error) = result {
        eprintln!("Error: {error:#}");
        std::process::exit(1);
    }
}
