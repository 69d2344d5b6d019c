//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "iso360")]
#[command(about = "Inspect Xbox 360 disc images and executables", long_about = None)]
pub(crate) struct Cli {
    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Never download the title table
    #[arg(long, global = true)]
    pub offline: bool,

    /// Use this title table instead of the cached one
    #[arg(long, global = true)]
    pub lookup_csv: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Analyze disc images (.iso) or bare executables (.xex)
    Analyze {
        /// Files to analyze
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Print one JSON document instead of text
        #[arg(long)]
        json: bool,

        /// Skip the media id to title lookup
        #[arg(long)]
        no_lookup: bool,
    },

    /// Copy default.xex out of a disc image
    Extract {
        /// Disc image to read
        iso: PathBuf,

        /// Output file (default: the image path with a .xex extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Resolve a media id (8 hex digits) to a title
    Lookup {
        media_id: String,
    },

    /// Manage the cached title table
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum CacheAction {
    /// Download the title table now
    Fetch,

    /// Show the cached table's location, size and age
    Info,

    /// Remove the cached table
    Clear,
}

impl Cli {
    /// Whether stdout is reserved for machine-readable output.
    pub(crate) fn json_output(&self) -> bool {
        matches!(self.command, Commands::Analyze { json: true, .. })
    }
}
