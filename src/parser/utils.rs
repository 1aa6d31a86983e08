//! Label escaping for Newick output.

/// Characters that force a label into single quotes.
const SPECIAL_CHARS: &[char] = &[',', ';', '(', ')', ':', '[', ']', '\''];

/// Returns whether `label` has to be quoted to survive a Newick round trip.
///
/// # Examples
/// ```
/// # use transtree::parser::utils::needs_quoting;
/// assert!(!needs_quoting("X_3"));
/// assert!(needs_quoting("Patient zero"));
/// assert!(needs_quoting("a:b"));
/// assert!(needs_quoting(""));
/// ```
pub fn needs_quoting(label: &str) -> bool {
    label.is_empty()
        || label
            .chars()
            .any(|c| c.is_whitespace() || SPECIAL_CHARS.contains(&c))
}

/// Escapes a label for use in a Newick string.
///
/// Labels with whitespace or special characters are wrapped in single quotes,
/// internal single quotes are doubled. Other labels are returned unchanged,
/// underscores included.
///
/// # Examples
/// ```
/// # use transtree::parser::utils::escape_label;
/// assert_eq!(escape_label("M_5"), "M_5");
/// assert_eq!(escape_label("Pu[ke]ko"), "'Pu[ke]ko'");
/// assert_eq!(escape_label("Australasian Swamphen"), "'Australasian Swamphen'");
/// assert_eq!(escape_label("Baillon's Crake"), "'Baillon''s Crake'");
/// ```
pub fn escape_label(label: &str) -> String {
    if needs_quoting(label) {
        format!("'{}'", label.replace('\'', "''"))
    } else {
        label.to_string()
    }
}
