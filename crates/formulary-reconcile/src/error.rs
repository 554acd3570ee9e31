//! Error types for reconciliation.

use formulary_ingest::IngestError;
use formulary_model::SourceRole;
use thiserror::Error;

/// Errors raised while reconciling two formulary tables.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// A column the reconciler needs is absent from one of the inputs.
    #[error("{role} source is missing required column '{column}'")]
    MissingColumn { role: SourceRole, column: String },

    /// Reading values out of a table failed.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for ReconcileError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for reconciliation.
pub type Result<T> = std::result::Result<T, ReconcileError>;
