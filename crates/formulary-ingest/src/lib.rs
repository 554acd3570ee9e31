//! Formulary table ingestion and output.
//!
//! Both formulary sources are plain CSV exports. They are loaded into Polars
//! DataFrames with every column kept as text, so passthrough fields reach the
//! output exactly as they were written.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use formulary_ingest::{read_formulary, write_formulary};
//! use formulary_model::SourceRole;
//!
//! let mut df = read_formulary(Path::new("fukkm-template.csv"), SourceRole::Template)?;
//! write_formulary(&mut df, Path::new("copy.csv"))?;
//! ```

mod csv;
mod error;
mod values;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading / Writing ===
pub use csv::{read_formulary, write_formulary};

// === Value Helpers ===
pub use values::{any_to_string, column_text};
