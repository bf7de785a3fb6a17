//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::domain::LogLevel;

/// Severity logger that escalates warnings and errors to protected log files and e-mail
#[derive(Parser, Debug)]
#[command(name = "escalog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase diagnostic output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file layered over the global one
    #[arg(short, long, global = true, env = "ESCALOG_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the startup routine (default)
    Run,

    /// Log one line; warning and error are escalated
    Log {
        /// debug, information, warning or error
        level: LogLevel,
        /// Text to log
        text: String,
    },

    /// Send one simulated e-mail
    Mail {
        /// Recipient address (must contain @)
        recipient: String,
        /// Mail content
        content: String,
    },

    /// Append a line to a protected file
    Append {
        /// Target file, created when missing
        #[arg(value_hint = ValueHint::FilePath)]
        path: PathBuf,
        /// Line to append
        line: String,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Print a commented config template
    Template,
    /// Print the global config file location
    Path,
}
