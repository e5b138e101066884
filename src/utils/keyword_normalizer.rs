//! Keyword normalization for the remote search API.
//!
//! Turns free-text keyword input into the boolean-AND query syntax the
//! search API understands.

use regex::Regex;
use std::sync::LazyLock;

/// `<N> years`, optionally already followed by `experience`.
static YEARS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*years(?:\s+experience)?").unwrap());

/// Normalizes a keyword string into a canonical AND query.
///
/// # Normalization Rules
///
/// 1. **Whitespace**: Runs collapsed to a single space, ends trimmed
/// 2. **Commas**: Each comma-separated term is joined with ` AND `; blank terms are dropped
/// 3. **Experience**: The first `<N> years` becomes `<N> years experience`
///
/// The function is idempotent and never fails; empty input yields an empty string.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_keyword("Java, Python,  Go"), "Java AND Python AND Go");
/// assert_eq!(normalize_keyword("3 years exp"), "3 years experience exp");
/// ```
pub fn normalize_keyword(input: &str) -> String {
    let joined = input
        .split(',')
        .map(collapse_whitespace)
        .filter(|term| !term.is_empty())
        .collect::<Vec<_>>()
        .join(" AND ");

    YEARS_REGEX
        .replace(&joined, "$1 years experience")
        .into_owned()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
