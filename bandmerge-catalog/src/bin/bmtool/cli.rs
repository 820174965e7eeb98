//! CLI argument definitions for bmtool

use bandmerge_catalog::io::LoadOptions;
use bandmerge_core::constants::{DEFAULT_HEADER_LINES, DEFAULT_RADIUS_DEG};
use bandmerge_core::Band;
use bandmerge_xmatch::SearchStrategy;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bmtool")]
#[command(about = "Difference and union of band-merge catalogs by mutual nearest-neighbour matching")]
#[command(version)]
pub struct Cli {
    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Band whose coordinates are matched
    #[arg(short, long, global = true, value_enum, default_value = "k")]
    pub band: BandArg,

    /// Cross-match radius in degrees
    #[arg(short, long, global = true, default_value_t = DEFAULT_RADIUS_DEG)]
    pub radius: f64,

    /// Nearest-neighbour backend
    #[arg(long, global = true, value_enum, default_value = "kd-tree")]
    pub strategy: StrategyArg,

    /// Epoch lines at the top of every input file
    #[arg(long, global = true, default_value_t = DEFAULT_HEADER_LINES)]
    pub header_lines: usize,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            band: self.band.into(),
            header_lines: self.header_lines,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Remove from INPUT every source confirmed in any filter catalog
    Diff(DiffArgs),

    /// Merge catalogs in order, dropping sources already present
    Union(UnionArgs),

    /// Print the mutually matched row indices of two catalogs
    Match(MatchArgs),
}

#[derive(Parser)]
pub struct DiffArgs {
    /// Band-merge file to filter
    #[arg(value_name = "BAND-MERGE")]
    pub input: PathBuf,

    /// Band-merge files with the sources to be removed from input
    #[arg(short, long, value_name = "BAND-MERGE", num_args = 1.., required = true)]
    pub filters: Vec<PathBuf>,

    /// Destination of the difference
    #[arg(short, long, value_name = "PATH")]
    pub output: PathBuf,
}

#[derive(Parser)]
pub struct UnionArgs {
    /// Band-merge files, in priority order
    #[arg(value_name = "BAND-MERGE", num_args = 1.., required = true)]
    pub catalogs: Vec<PathBuf>,

    /// Destination of the union
    #[arg(short, long, value_name = "PATH")]
    pub output: PathBuf,
}

#[derive(Parser)]
pub struct MatchArgs {
    #[arg(value_name = "BAND-MERGE")]
    pub left: PathBuf,

    #[arg(value_name = "BAND-MERGE")]
    pub right: PathBuf,

    /// Write pairs here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum BandArg {
    H,
    J,
    K,
}

impl From<BandArg> for Band {
    fn from(arg: BandArg) -> Self {
        match arg {
            BandArg::H => Band::H,
            BandArg::J => Band::J,
            BandArg::K => Band::K,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    KdTree,
    BruteForce,
}

impl From<StrategyArg> for SearchStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::KdTree => SearchStrategy::KdTree,
            StrategyArg::BruteForce => SearchStrategy::BruteForce,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
