//! CLI command definitions for the `punchcard` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod content;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Browse and manage Punchcard content.
#[derive(Parser)]
#[command(name = "punchcard", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on (defaults to the configured port).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (defaults to the configured host).
        #[arg(long)]
        host: Option<String>,
    },

    /// List registered content types.
    Types,

    /// List records of a content type.
    #[command(alias = "ls")]
    List {
        /// Content type slug (e.g. "users").
        type_slug: String,

        /// Field to sort by.
        #[arg(long)]
        sort: Option<String>,

        /// Sort direction ("asc" or "desc").
        #[arg(long)]
        sort_dir: Option<String>,

        /// Page number, starting at 1.
        #[arg(long)]
        page: Option<String>,

        /// Records per page (1-100).
        #[arg(long)]
        per_page: Option<String>,
    },

    /// Show a single record with its attributes.
    Show {
        /// Record id (UUID).
        id: String,
    },

    /// Insert records from a JSON file (an array of records).
    Import {
        /// Path to the JSON file.
        file: PathBuf,
    },

    /// Delete every record of a content type.
    Purge {
        /// Content type slug.
        type_slug: String,

        /// Skip the confirmation check.
        #[arg(long)]
        force: bool,
    },
}
