//! Canonical column names.
//!
//! Facility sources are renamed onto these names on ingestion, so the
//! reconciler only ever looks columns up by the values below (or by the
//! overrides carried in [`ReconcileOptions`](crate::ReconcileOptions)).

/// Generic drug name, present on both sides.
pub const GENERIC_NAME: &str = "Generic Name";

/// Free-text prescribing restrictions on the template side.
pub const PRESCRIBING_RESTRICTIONS: &str = "Prescribing Restrictions";

/// Facility note column after renaming.
pub const NOTE: &str = "Catatan";

/// Generic name column as exported by the facility formulary.
pub const FACILITY_GENERIC_NAME: &str = "DRUG (GENERIC NAME)";

/// Note column as exported by the facility formulary.
pub const FACILITY_NOTE: &str = "CATATAN";

/// Literal written into the restriction column when the template left it empty.
pub const MISSING_RESTRICTION: &str = "None";

/// Separator used when joining notes and restrictions.
pub const NOTE_SEPARATOR: &str = "; ";
