//! Command-line interface for Causelist.

pub mod commands;

use clap::{Parser, Subcommand};

/// Causelist - case management for legal practitioners
#[derive(Parser)]
#[command(name = "causelist")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the web server (default)
    Serve,

    /// Send SMS reminders for cases with hearings tomorrow.
    /// Intended to be invoked by an external scheduler (cron).
    #[command(alias = "send_reminders")]
    SendReminders,

    /// Create a default config file
    Init,
}
