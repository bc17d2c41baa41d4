//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--config, --verbose) are inherited by all subcommands
//! - Credentials are never prompted for; pass them as flags or environment

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::demos::Demo;

/// Kitbash - component composition and lifecycle toolkit
#[derive(Parser, Debug)]
#[command(name = "kitbash")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ./kitbash.toml, then the user config)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one of the composition demos
    Demo {
        /// Which demo to run
        #[arg(value_enum)]
        name: Demo,

        /// Username presented to the decorator demo
        #[arg(long, requires = "password")]
        username: Option<String>,

        /// Password presented to the decorator demo
        #[arg(long, requires = "username")]
        password: Option<String>,
    },

    /// List the available demos
    List,
}
