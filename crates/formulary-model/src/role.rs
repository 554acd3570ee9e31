//! Input source roles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two reconciliation inputs a table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceRole {
    /// The master formulary template.
    Template,
    /// The facility-specific formulary.
    Facility,
}

impl SourceRole {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceRole::Template => "template",
            SourceRole::Facility => "facility",
        }
    }
}

impl fmt::Display for SourceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
