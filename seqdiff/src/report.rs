//! Human-readable failure messages built on the diff engine.
//!
//! These helpers turn edit scripts, update streams and compacted strings into
//! the one-line and multi-line messages an assertion layer shows when two
//! values differ.

use std::fmt::{Debug, Write as _};
use std::sync::LazyLock;

use regex::Regex;

use crate::edit::{Edit, changes, compute_edit_script};
use crate::reconcile::UpdateOp;
use crate::text::compact_diff;

static SPECIAL_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"[\r\n\t]") {
    Ok(re) => re,
    Err(e) => panic!("regex pattern should be valid at compile time: {e}"),
});

/// Escapes carriage returns, newlines and tabs as `\r`, `\n` and `\t`.
#[must_use]
pub fn render_special_whitespace(s: &str) -> String {
    SPECIAL_WHITESPACE
        .replace_all(s, |caps: &regex::Captures<'_>| match &caps[0] {
            "\r" => r"\r",
            "\n" => r"\n",
            _ => r"\t",
        })
        .into_owned()
}

/// Formats a two-value mismatch, bracketing the part that differs.
///
/// ```
/// use seqdiff::report::expected_but_was;
///
/// assert_eq!(
///     expected_but_was("hello world", "hello there", 20),
///     ":<hello [world]> but was:<hello [there]>",
/// );
/// ```
///
/// Carriage returns, newlines and tabs inside the brackets are escaped. When
/// both strings are equal (two values that display the same) there is nothing
/// to bracket and both are shown whole.
#[must_use]
pub fn expected_but_was(expected: &str, actual: &str, max_context: usize) -> String {
    bracket_difference(expected, actual, max_context, render_special_whitespace)
}

/// Like [`expected_but_was`], but leaves whitespace in the brackets as is.
#[must_use]
pub fn expected_but_was_verbatim(expected: &str, actual: &str, max_context: usize) -> String {
    bracket_difference(expected, actual, max_context, str::to_owned)
}

fn bracket_difference(
    expected: &str,
    actual: &str,
    max_context: usize,
    render: impl Fn(&str) -> String,
) -> String {
    if expected == actual {
        return format!(":<{expected}> but was:<{actual}>");
    }
    let diff = compact_diff(expected, actual, max_context);
    let expected_middle = render(&diff.old_middle);
    let actual_middle = render(&diff.new_middle);
    let (prefix, suffix) = (&diff.prefix, &diff.suffix);
    format!(
        ":<{prefix}[{expected_middle}]{suffix}> but was:<{prefix}[{actual_middle}]{suffix}>"
    )
}

/// Lists the elements missing from and unexpected in `actual`, by index.
///
/// The first line shows both lists; each following line is one deletion
/// (`expected`) or insertion (`unexpected`) from the shortest edit script.
#[must_use]
pub fn describe_list_differences<T: Debug + PartialEq>(expected: &[T], actual: &[T]) -> String {
    let script = compute_edit_script(expected, actual);
    let mut out = format!("to contain exactly:<{expected:?}> but was:<{actual:?}>");
    for edit in changes(&script) {
        match edit {
            Edit::Delete {
                old_index,
                old_value,
            } => {
                let _ = write!(out, "\n at index:{old_index} expected:<{old_value:?}>");
            }
            Edit::Insert {
                new_index,
                new_value,
            } => {
                let _ = write!(out, "\n at index:{new_index} unexpected:<{new_value:?}>");
            }
            Edit::Equal { .. } => {}
        }
    }
    out
}

/// One line per update operation.
#[must_use]
pub fn describe_updates(ops: &[UpdateOp]) -> String {
    ops.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
