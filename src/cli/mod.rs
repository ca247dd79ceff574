//! CLI module for the iris model server
//!
//! Subcommands:
//! - `serve`: run the HTTP server
//! - `switch`: point the registry at another model version
//! - `info`: print the resolved version and artifact availability

pub mod info;
pub mod serve;
pub mod switch;

use clap::{Parser, Subcommand};

/// Iris model server - versioned classifier serving with a persisted registry
#[derive(Parser)]
#[command(name = "iris-model-server")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Record a new active version in the registry
    Switch(switch::SwitchArgs),

    /// Print deployment state as JSON
    Info,
}
