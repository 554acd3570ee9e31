//! End-to-end reconciliation run: load, reconcile, write.
//!
//! Every stage runs inside its own `info_span!`. The output file is only
//! touched after reconciliation has fully succeeded.

use std::path::{Path, PathBuf};

use anyhow::Context;
use formulary_ingest::{IngestError, read_formulary, write_formulary};
use formulary_model::{ReconcileOptions, SourceRole};
use formulary_normalize::{NoiseVocabulary, Normalizer};
use formulary_reconcile::{ReconcileStats, reconcile};
use polars::prelude::DataFrame;
use thiserror::Error;
use tracing::{info, info_span};

/// Failure of a reconciliation run.
#[derive(Debug, Error)]
pub enum RunError {
    /// One of the two input tables does not exist.
    #[error("{role} source not found: {}. Please ensure both CSV files are present.", path.display())]
    MissingSource { role: SourceRole, path: PathBuf },

    #[error("an unexpected error occurred: {0:#}")]
    Unexpected(anyhow::Error),
}

impl From<anyhow::Error> for RunError {
    fn from(error: anyhow::Error) -> Self {
        RunError::Unexpected(error)
    }
}

impl RunError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::MissingSource { .. } => 2,
            RunError::Unexpected(_) => 1,
        }
    }
}

/// Inputs of one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub template: PathBuf,
    pub facility: PathBuf,
    pub output: PathBuf,
    /// Vocabulary JSON; the built-in vocabulary when `None`.
    pub vocabulary: Option<PathBuf>,
    pub options: ReconcileOptions,
    pub dry_run: bool,
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub stats: ReconcileStats,
    pub vocabulary_version: String,
    /// Where the merged formulary was written; `None` on a dry run.
    pub output: Option<PathBuf>,
}

impl RunSummary {
    pub fn matched(&self) -> usize {
        self.stats.matched
    }
}

/// Build a normalizer from a vocabulary file, or the built-in one.
pub fn load_normalizer(vocabulary: Option<&Path>) -> anyhow::Result<Normalizer> {
    match vocabulary {
        Some(path) => {
            let vocabulary = NoiseVocabulary::from_json_path(path)?;
            Normalizer::new(&vocabulary)
                .with_context(|| format!("compile vocabulary {}", path.display()))
        }
        None => Ok(Normalizer::builtin().clone()),
    }
}

fn load_source(path: &Path, role: SourceRole) -> Result<DataFrame, RunError> {
    let span = info_span!("ingest", role = %role, path = %path.display());
    let _enter = span.enter();
    read_formulary(path, role).map_err(|error| match error {
        IngestError::SourceNotFound { role, path } => RunError::MissingSource { role, path },
        other => {
            RunError::Unexpected(anyhow::Error::new(other).context(format!("load {role} source")))
        }
    })
}

/// Run the whole pipeline.
///
/// The template is loaded before the facility, so when both are missing the
/// template is the one reported.
pub fn run_reconcile(config: &RunConfig) -> Result<RunSummary, RunError> {
    let normalizer = load_normalizer(config.vocabulary.as_deref())?;
    info!(
        vocabulary = normalizer.vocabulary_version(),
        rules = normalizer.rules().len(),
        "normalizer ready"
    );

    let template = load_source(&config.template, SourceRole::Template)?;
    let facility = load_source(&config.facility, SourceRole::Facility)?;

    let mut reconciliation = reconcile(&template, &facility, &normalizer, &config.options)
        .context("reconcile formulary")?;

    let output = if config.dry_run {
        info!("dry run: skipping output");
        None
    } else {
        let span = info_span!("output", path = %config.output.display());
        let _enter = span.enter();
        write_formulary(&mut reconciliation.merged, &config.output)
            .with_context(|| format!("write {}", config.output.display()))?;
        info!(rows = reconciliation.matched(), "wrote merged formulary");
        Some(config.output.clone())
    };

    Ok(RunSummary {
        stats: reconciliation.stats,
        vocabulary_version: normalizer.vocabulary_version().to_string(),
        output,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_distinguish_missing_sources() {
        let missing = RunError::MissingSource {
            role: SourceRole::Facility,
            path: PathBuf::from("cleaned-formulari-pkdkl.csv"),
        };
        assert_eq!(missing.exit_code(), 2);
        assert!(missing.to_string().starts_with("facility source not found"));

        let unexpected = RunError::from(anyhow::anyhow!("boom"));
        assert_eq!(unexpected.exit_code(), 1);
        assert!(unexpected.to_string().contains("boom"));
    }

    #[test]
    fn builtin_normalizer_without_vocabulary_file() {
        let normalizer = load_normalizer(None).unwrap();
        assert_eq!(
            normalizer.vocabulary_version(),
            formulary_normalize::BUILTIN_VERSION
        );
    }
}
