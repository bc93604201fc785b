//! Line label normalization.

/// Canonicalize a raw line label to its rider-facing line code.
///
/// Service-class prefixes are stripped so that line numbers are comparable
/// across service types: a leading `"S"` (S-Bahn) or a leading `"RB"`
/// (regional) is removed. The checks run in that order against the
/// original label and at most one strip is applied; anything else is left
/// unchanged, including labels too short to carry a prefix.
///
/// # Examples
///
/// ```
/// use disruption_server::domain::normalize_line;
///
/// assert_eq!(normalize_line("S41"), "41");
/// assert_eq!(normalize_line("RB48"), "48");
/// assert_eq!(normalize_line("ICE 1"), "ICE 1");
/// assert_eq!(normalize_line("41"), "41");
/// ```
pub fn normalize_line(label: &str) -> &str {
    if let Some(rest) = label.strip_prefix('S') {
        return rest;
    }
    if let Some(rest) = label.strip_prefix("RB") {
        return rest;
    }
    label
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Labels as the feed actually spells them: a bare line number, an
    /// S-Bahn or regional prefix in front of one, or a long-distance
    /// service name.
    fn feed_label() -> impl Strategy<Value = String> {
        proptest::string::string_regex("(S|RB)?[0-9]{1,3}|(ICE|IC|EC) [0-9]{1,3}").unwrap()
    }

    proptest! {
        /// Normalizing an already-normalized label returns it unchanged
        #[test]
        fn idempotent(label in feed_label()) {
            let once = normalize_line(&label).to_string();
            prop_assert_eq!(normalize_line(&once), once.as_str());
        }

        /// The result never ends up longer than the input
        #[test]
        fn never_grows(label in feed_label()) {
            prop_assert!(normalize_line(&label).len() <= label.len());
        }

        /// Prefixed labels lose exactly their prefix
        #[test]
        fn prefix_stripped(number in "[0-9]{1,3}") {
            let s_label = format!("S{}", number);
            prop_assert_eq!(normalize_line(&s_label), number.as_str());
            let rb_label = format!("RB{}", number);
            prop_assert_eq!(normalize_line(&rb_label), number.as_str());
        }
    }
}
