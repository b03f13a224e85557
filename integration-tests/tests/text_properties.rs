//! Property-based tests for string compaction and assertion messages.

use proptest::prelude::*;
use seqdiff::report::expected_but_was;
use seqdiff::text::{ELLIPSIS, MAX_CONTEXT_LENGTH, compact_diff};

/// Strings over a few ASCII and multi-byte characters so shared runs are common.
fn text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec!['a', 'b', 'é', '€', ' ', '\n']), 0..40)
        .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: Without truncation, prefix + middle + suffix rebuilds each string.
    #[test]
    fn untruncated_parts_rebuild_inputs(old in text(), new in text()) {
        let diff = compact_diff(&old, &new, usize::MAX);

        prop_assert_eq!(format!("{}{}{}", diff.prefix, diff.old_middle, diff.suffix), old.clone());
        prop_assert_eq!(format!("{}{}{}", diff.prefix, diff.new_middle, diff.suffix), new.clone());
        prop_assert_eq!(diff.prefix.chars().count(), diff.prefix_len());
        prop_assert_eq!(diff.suffix.chars().count(), diff.suffix_len());
    }

    /// Property: Prefix and suffix never overlap and are maximal.
    #[test]
    fn boundaries_are_maximal(old in text(), new in text()) {
        let diff = compact_diff(&old, &new, MAX_CONTEXT_LENGTH);
        let shortest = old.chars().count().min(new.chars().count());
        prop_assert!(diff.prefix_len() + diff.suffix_len() <= shortest);

        if let (Some(a), Some(b)) = (diff.old_middle.chars().next(), diff.new_middle.chars().next()) {
            prop_assert_ne!(a, b);
        }
        if let (Some(a), Some(b)) = (diff.old_middle.chars().last(), diff.new_middle.chars().last()) {
            prop_assert_ne!(a, b);
        }
    }

    /// Property: Displayed context is capped at `max_context` chars plus the marker.
    #[test]
    fn displayed_context_is_capped(old in text(), new in text(), max_context in 0usize..8) {
        let diff = compact_diff(&old, &new, max_context);
        let cap = max_context + ELLIPSIS.chars().count();

        prop_assert!(diff.prefix.chars().count() <= cap);
        prop_assert!(diff.suffix.chars().count() <= cap);
        prop_assert_eq!(diff.prefix.starts_with(ELLIPSIS), diff.prefix_len() > max_context);
        prop_assert_eq!(diff.suffix.ends_with(ELLIPSIS), diff.suffix_len() > max_context);
    }

    /// Property: Messages for differing strings never contain raw line breaks.
    #[test]
    fn messages_escape_line_breaks(old in "[ab\n]{0,12}", new in "[ab\n]{0,12}") {
        prop_assume!(old != new);
        let message = expected_but_was(&old, &new, usize::MAX);
        let diff = compact_diff(&old, &new, usize::MAX);
        let shared_breaks = 2 * (diff.prefix.matches('\n').count() + diff.suffix.matches('\n').count());
        prop_assert_eq!(message.matches('\n').count(), shared_breaks);
    }
}

#[test]
fn test_long_shared_prefix_keeps_last_twenty_chars() {
    let shared = "The quick brown fox jumps over the lazy dog";
    let diff = compact_diff(&format!("{shared}X"), &format!("{shared}Y"), MAX_CONTEXT_LENGTH);

    assert_eq!(diff.prefix, format!("{ELLIPSIS}{}", &shared[shared.len() - 20..]));
    assert_eq!(diff.old_middle, "X");
    assert_eq!(diff.new_middle, "Y");
    assert_eq!(diff.suffix, "");
}
