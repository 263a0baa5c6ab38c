//! CLI parse: clap types for easel. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Easel CLI - zone artwork generation
#[derive(Parser)]
#[command(name = "easel")]
#[command(about = "Generate zone artwork assets with the Google image models")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default easel.toml discovery)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Assets root directory (overrides config)
    #[arg(long)]
    pub assets_root: Option<PathBuf>,

    /// Maximum generation requests in flight (overrides config)
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate full zone scenes with wildlife already in the composition
    Scenes {
        /// Zones to generate (default: all known zones)
        zones: Vec<String>,

        /// Model override for this run
        #[arg(long)]
        model: Option<String>,
    },
    /// Generate zone backdrops for layering sprites on top
    Backgrounds {
        /// Zones to generate (default: all known zones)
        zones: Vec<String>,

        /// Restyle each zone's reference image instead of generating from scratch
        #[arg(long)]
        style_transfer: bool,

        /// Model override for this run
        #[arg(long)]
        model: Option<String>,
    },
    /// Generate wildlife sprites
    Sprites {
        /// Zones to generate (default: all zones that have wildlife)
        zones: Vec<String>,

        /// Generate only this creature id
        #[arg(long)]
        creature: Option<String>,

        /// Model override for this run
        #[arg(long)]
        model: Option<String>,
    },
    /// Show the zone catalog
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}
