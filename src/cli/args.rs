//! Command line argument parsing for the complaint router CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// complaint-router - classify complaints and route them to departments
#[derive(Parser, Debug, Clone)]
#[command(name = "complaint-router")]
#[command(about = "Classify complaint narratives and route them to the responsible department")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct RouterArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Engine configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Model snapshot to load instead of training on startup
    #[arg(short, long, value_name = "SNAPSHOT", global = true)]
    pub model: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl RouterArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n + 1,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Classify a complaint and show its department
    Classify(ClassifyArgs),

    /// Train a model and optionally save the snapshot
    Train(TrainArgs),

    /// Show the department for a category
    Route(RouteArgs),

    /// List the department table
    Departments,
}

/// Arguments for classifying a complaint
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// Complaint title
    #[arg(short, long)]
    pub title: String,

    /// Complaint description
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Override the confidence threshold
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Complaint identifier; when set, the department notice is logged
    #[arg(long)]
    pub notify: Option<String>,
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Training corpus (JSON array of {text, category}); defaults to the
    /// built-in corpus
    #[arg(long, value_name = "CORPUS_FILE")]
    pub corpus: Option<PathBuf>,

    /// Where to write the trained snapshot
    #[arg(short, long, value_name = "SNAPSHOT")]
    pub output: Option<PathBuf>,
}

/// Arguments for routing a category
#[derive(Parser, Debug, Clone)]
pub struct RouteArgs {
    /// Category name, e.g. "Cyber Harassment"
    #[arg(value_name = "CATEGORY")]
    pub category: String,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
