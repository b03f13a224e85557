//! Compaction of string differences for display.
//!
//! The common prefix and suffix of two strings are stripped so only the
//! differing middles remain, and long shared boundaries are cut down to a
//! window of context. All lengths count `char`s, so multi-byte text is never
//! split.

use serde::Serialize;

/// Default number of shared characters kept on each side of a difference.
pub const MAX_CONTEXT_LENGTH: usize = 20;

/// Marker standing in for truncated shared text.
pub const ELLIPSIS: &str = "...";

/// Two strings reduced to their shared boundaries and differing middles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompactedDiff {
    /// Shared prefix as displayed, led by [`ELLIPSIS`] when truncated.
    pub prefix: String,
    /// Shared suffix as displayed, followed by [`ELLIPSIS`] when truncated.
    pub suffix: String,
    /// Part of the old string between prefix and suffix.
    pub old_middle: String,
    /// Part of the new string between prefix and suffix.
    pub new_middle: String,
    #[serde(skip)]
    prefix_len: usize,
    #[serde(skip)]
    suffix_len: usize,
}

impl CompactedDiff {
    /// Length in chars of the full shared prefix, before truncation.
    #[must_use]
    pub const fn prefix_len(&self) -> usize {
        self.prefix_len
    }

    /// Length in chars of the full shared suffix, before truncation.
    #[must_use]
    pub const fn suffix_len(&self) -> usize {
        self.suffix_len
    }

    /// Whether the two strings differ at all.
    ///
    /// Identical strings leave both middles empty and nothing to highlight.
    #[must_use]
    pub fn has_difference(&self) -> bool {
        self.old_middle != self.new_middle
    }
}

/// Splits `old` and `new` into shared prefix, shared suffix and differing middles.
///
/// The suffix is measured only over what remains after the prefix, so the two
/// never overlap. Shared text longer than `max_context` chars is truncated for
/// display, but the middles are always cut at the untruncated boundaries.
#[must_use]
pub fn compact_diff(old: &str, new: &str, max_context: usize) -> CompactedDiff {
    let prefix_len = old
        .chars()
        .zip(new.chars())
        .take_while(|(a, b)| a == b)
        .count();
    let old_rest = &old[byte_offset(old, prefix_len)..];
    let new_rest = &new[byte_offset(new, prefix_len)..];

    let suffix_len = old_rest
        .chars()
        .rev()
        .zip(new_rest.chars().rev())
        .take_while(|(a, b)| a == b)
        .count();
    let old_split = byte_offset(old_rest, old_rest.chars().count() - suffix_len);
    let new_split = byte_offset(new_rest, new_rest.chars().count() - suffix_len);

    let shared_prefix = &old[..old.len() - old_rest.len()];
    let shared_suffix = &old_rest[old_split..];

    CompactedDiff {
        prefix: compact_prefix(shared_prefix, prefix_len, max_context),
        suffix: compact_suffix(shared_suffix, suffix_len, max_context),
        old_middle: old_rest[..old_split].to_owned(),
        new_middle: new_rest[..new_split].to_owned(),
        prefix_len,
        suffix_len,
    }
}

/// Byte offset of the `n`th char of `s`, or `s.len()` past the end.
fn byte_offset(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(i, _)| i)
}

fn compact_prefix(prefix: &str, len: usize, max_context: usize) -> String {
    if len <= max_context {
        return prefix.to_owned();
    }
    format!("{ELLIPSIS}{}", &prefix[byte_offset(prefix, len - max_context)..])
}

fn compact_suffix(suffix: &str, len: usize, max_context: usize) -> String {
    if len <= max_context {
        return suffix.to_owned();
    }
    format!("{}{ELLIPSIS}", &suffix[..byte_offset(suffix, max_context)])
}
