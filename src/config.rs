//! Configuration and CLI argument handling

use clap::{Parser, Subcommand};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "pomodoro")]
#[command(about = "A 25-minute Pomodoro timer whose state survives between runs")]
#[command(version)]
pub struct Config {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// The three verbs understood by the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Start a new 25-minute Pomodoro
    Start {
        /// Stay in the foreground until the Pomodoro finishes
        #[arg(long)]
        wait: bool,
    },
    /// Stop the current Pomodoro
    Stop,
    /// Check the status of the current Pomodoro
    Status,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }

    /// Whether the process should stay alive until the completion fires
    pub fn wait_for_completion(&self) -> bool {
        matches!(self.command, Command::Start { wait: true })
    }
}
