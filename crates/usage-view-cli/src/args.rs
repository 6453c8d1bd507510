//! Command-line argument definitions for the usage view CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, grouping overrides and logging verbosity.

use clap::Parser;

/// Command-line arguments for the usage view tool
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the occurrence list (TOML)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output text file; stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Turn grouping along a dimension on (repeatable)
    #[arg(long, value_name = "DIMENSION")]
    pub enable: Vec<String>,

    /// Turn grouping along a dimension off (repeatable)
    #[arg(long, value_name = "DIMENSION")]
    pub disable: Vec<String>,

    /// Comma separated dimension order, outermost first
    #[arg(long, value_name = "DIMENSIONS", value_delimiter = ',')]
    pub order: Vec<String>,

    /// Render only the root line
    #[arg(long)]
    pub collapsed: bool,

    /// Write the effective configuration to this path
    #[arg(long, value_name = "PATH")]
    pub save_config: Option<String>,
}
