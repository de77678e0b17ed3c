//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use dx_cli::config::ScanOverrides;
use dx_model::{MatchPolicy, SimilarityMetric};
use dx_output::{DEFAULT_OUTPUT_FILE, OutputFormat};

#[derive(Parser)]
#[command(
    name = "drug-extraction",
    version,
    about = "Find drug mentions in free-text records",
    long_about = "Scan a text column of a CSV file for drug names and their synonyms.\n\n\
                  Matches are fuzzy by default (Jaro-Winkler similarity >= 0.90) and\n\
                  written as JSON lines, one object per match."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include record ids and text in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// TOML settings file; flags take precedence over its values.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract drug mentions into a JSON-lines file.
    Extract(ExtractArgs),

    /// Convert JSON-lines output to JSON or CSV.
    Format(FormatArgs),

    /// Remove output files from a previous run.
    Clean(CleanArgs),

    /// Clean, extract, and format in one run.
    Pipeline(PipelineArgs),

    /// Show the loaded drug dictionary.
    Dictionary(DictionaryArgs),
}

#[derive(Args)]
pub struct ExtractArgs {
    /// CSV file with a header row.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Column with record ids (default: row position).
    #[arg(long = "id-col", value_name = "NAME")]
    pub id_column: Option<String>,

    /// Column with the text to search.
    #[arg(long = "target-col", value_name = "NAME")]
    pub target_column: String,

    /// JSON-lines file to append matches to.
    #[arg(long = "output", value_name = "PATH", default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Hide the progress bar.
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    #[command(flatten)]
    pub scan: ScanArgs,
}

#[derive(Args)]
pub struct ScanArgs {
    /// Require exact matches after normalization.
    #[arg(long = "strict")]
    pub strict: bool,

    /// Minimum similarity for a fuzzy match, in (0, 1].
    #[arg(long = "threshold", value_name = "RATIO")]
    pub threshold: Option<f64>,

    /// Similarity metric for fuzzy matching.
    #[arg(long = "metric", value_enum)]
    pub metric: Option<MetricArg>,

    /// Which match to report when a drug matches several words.
    #[arg(long = "policy", value_enum)]
    pub policy: Option<PolicyArg>,

    /// Worker threads.
    #[arg(long = "jobs", short = 'j', value_name = "N")]
    pub jobs: Option<usize>,

    /// Records per streamed chunk.
    #[arg(long = "chunk-size", value_name = "N")]
    pub chunk_size: Option<usize>,

    /// Dictionary file (YAML or JSON) replacing the bundled one.
    #[arg(long = "dictionary", value_name = "PATH")]
    pub dictionary: Option<PathBuf>,
}

impl ScanArgs {
    pub fn overrides(&self) -> ScanOverrides {
        ScanOverrides {
            strict: self.strict,
            threshold: self.threshold,
            metric: self.metric.map(Into::into),
            policy: self.policy.map(Into::into),
            jobs: self.jobs,
            chunk_size: self.chunk_size,
        }
    }
}

#[derive(Args)]
pub struct FormatArgs {
    /// JSON-lines file produced by `extract`.
    #[arg(long = "input", value_name = "PATH", default_value = DEFAULT_OUTPUT_FILE)]
    pub input: PathBuf,

    /// Target format.
    #[arg(long = "format-type", value_enum)]
    pub format_type: FormatArg,

    /// Destination (default: input path with the format's extension).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct CleanArgs {
    /// Directory to clean.
    #[arg(long = "dir", value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,
}

#[derive(Args)]
pub struct PipelineArgs {
    #[command(flatten)]
    pub extract: ExtractArgs,

    /// Remove previous outputs from the output directory first.
    #[arg(long = "clean")]
    pub clean: bool,

    /// Also convert the output to this format.
    #[arg(long = "format-type", value_enum)]
    pub format_type: Option<FormatArg>,
}

#[derive(Args)]
pub struct DictionaryArgs {
    /// Dictionary file (YAML or JSON) replacing the bundled one.
    #[arg(long = "dictionary", value_name = "PATH")]
    pub dictionary: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MetricArg {
    JaroWinkler,
    Levenshtein,
    DamerauLevenshtein,
}

impl From<MetricArg> for SimilarityMetric {
    fn from(arg: MetricArg) -> Self {
        match arg {
            MetricArg::JaroWinkler => Self::JaroWinkler,
            MetricArg::Levenshtein => Self::Levenshtein,
            MetricArg::DamerauLevenshtein => Self::DamerauLevenshtein,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    FirstMatch,
    BestScore,
}

impl From<PolicyArg> for MatchPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::FirstMatch => Self::FirstMatch,
            PolicyArg::BestScore => Self::BestScore,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    Json,
    Csv,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => Self::Json,
            FormatArg::Csv => Self::Csv,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
