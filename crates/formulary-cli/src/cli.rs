//! CLI argument definitions for the formulary reconciler.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "formulary",
    version,
    about = "Formulary reconciler - Annotate a template formulary with facility notes",
    long_about = "Reconcile a template drug formulary against a facility formulary.\n\n\
                  Drug names are reduced to canonical keys, facility notes are grouped\n\
                  per key, and matched template rows get the notes merged into their\n\
                  prescribing restrictions."
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

    /// Log output format (pretty for human, json for machine parsing).
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Reconcile the template against the facility formulary and write the result.
    Reconcile(ReconcileArgs),

    /// Print the canonical key for each drug name.
    Normalize(NormalizeArgs),

    /// List the active noise vocabulary.
    Vocabulary(VocabularyArgs),
}

#[derive(Parser)]
pub struct ReconcileArgs {
    /// Template formulary CSV.
    #[arg(long = "template", value_name = "PATH", default_value = "fukkm-template.csv")]
    pub template: PathBuf,

    /// Facility formulary CSV.
    #[arg(
        long = "facility",
        value_name = "PATH",
        default_value = "cleaned-formulari-pkdkl.csv"
    )]
    pub facility: PathBuf,

    /// Output CSV for the reconciled formulary.
    #[arg(long = "output", value_name = "PATH", default_value = "fpkdkl.csv")]
    pub output: PathBuf,

    /// Noise vocabulary JSON (default: built-in vocabulary).
    #[arg(long = "vocabulary", value_name = "JSON")]
    pub vocabulary: Option<PathBuf>,

    /// Reconcile and report without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    #[command(flatten)]
    pub columns: ColumnArgs,
}

/// Column name overrides for non-standard exports.
#[derive(Args, Default)]
pub struct ColumnArgs {
    /// Template column holding the drug name.
    #[arg(long = "template-name-column", value_name = "NAME")]
    pub template_name: Option<String>,

    /// Template column holding the prescribing restrictions.
    #[arg(long = "restriction-column", value_name = "NAME")]
    pub restriction: Option<String>,

    /// Facility column holding the drug name.
    #[arg(long = "facility-name-column", value_name = "NAME")]
    pub facility_name: Option<String>,

    /// Facility column holding the notes.
    #[arg(long = "facility-note-column", value_name = "NAME")]
    pub facility_note: Option<String>,
}

#[derive(Parser)]
pub struct NormalizeArgs {
    /// Drug names to normalize.
    #[arg(value_name = "NAME", required = true)]
    pub names: Vec<String>,

    /// Noise vocabulary JSON (default: built-in vocabulary).
    #[arg(long = "vocabulary", value_name = "JSON")]
    pub vocabulary: Option<PathBuf>,

    /// Show the output of every rule, not just the final key.
    #[arg(long = "explain")]
    pub explain: bool,
}

#[derive(Parser)]
pub struct VocabularyArgs {
    /// Noise vocabulary JSON (default: built-in vocabulary).
    #[arg(long = "vocabulary", value_name = "JSON")]
    pub vocabulary: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
