//! Restriction / note conflict resolution.

use formulary_model::ReconcileOptions;

/// True when a restriction carries no information of its own.
fn is_placeholder(restriction: &str, options: &ReconcileOptions) -> bool {
    let trimmed = restriction.trim();
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("none")
        || trimmed.eq_ignore_ascii_case(options.missing_restriction.trim())
}

/// Combine a template restriction with the aggregated facility note.
///
/// - missing restriction becomes `options.missing_restriction` (`"None"`)
/// - empty note: the restriction is returned unchanged
/// - placeholder restriction (`"None"`, blank): the note replaces it
/// - otherwise: `restriction + separator + note`
///
/// # Examples
///
/// ```
/// use formulary_model::ReconcileOptions;
/// use formulary_reconcile::merge_restriction;
///
/// let options = ReconcileOptions::default();
/// assert_eq!(merge_restriction(Some("None"), "Renal dose only", &options), "Renal dose only");
/// assert_eq!(
///     merge_restriction(Some("Specialist only"), "Max 5 days", &options),
///     "Specialist only; Max 5 days"
/// );
/// assert_eq!(merge_restriction(Some("Specialist only"), "", &options), "Specialist only");
/// assert_eq!(merge_restriction(None, "", &options), "None");
/// ```
pub fn merge_restriction(
    restriction: Option<&str>,
    note: &str,
    options: &ReconcileOptions,
) -> String {
    let restriction = match restriction {
        Some(value) if !value.is_empty() => value,
        _ => options.missing_restriction.as_str(),
    };
    if note.is_empty() {
        return restriction.to_string();
    }
    if is_placeholder(restriction, options) {
        note.to_string()
    } else {
        format!("{restriction}{}{note}", options.note_separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merge(restriction: Option<&str>, note: &str) -> String {
        merge_restriction(restriction, note, &ReconcileOptions::default())
    }

    #[test]
    fn none_is_replaced_by_note() {
        assert_eq!(merge(Some("None"), "Renal dose only"), "Renal dose only");
        assert_eq!(merge(Some("  NONE "), "Renal dose only"), "Renal dose only");
        assert_eq!(merge(None, "OTC"), "OTC");
    }

    #[test]
    fn real_restriction_is_prefixed() {
        assert_eq!(
            merge(Some("Specialist only"), "Max 5 days"),
            "Specialist only; Max 5 days"
        );
    }

    #[test]
    fn empty_note_keeps_restriction_verbatim() {
        assert_eq!(merge(Some("Specialist only"), ""), "Specialist only");
        assert_eq!(merge(Some("None"), ""), "None");
        assert_eq!(merge(Some("   "), ""), "   ");
        assert_eq!(merge(None, ""), "None");
    }

    #[test]
    fn blank_restriction_is_a_placeholder() {
        assert_eq!(merge(Some("  "), "OTC"), "OTC");
    }

    #[test]
    fn custom_missing_literal_is_a_placeholder() {
        let mut options = ReconcileOptions::default();
        options.missing_restriction = "N/A".to_string();
        assert_eq!(merge_restriction(None, "", &options), "N/A");
        assert_eq!(merge_restriction(None, "OTC", &options), "OTC");
        assert_eq!(merge_restriction(Some("n/a"), "OTC", &options), "OTC");
    }
}
