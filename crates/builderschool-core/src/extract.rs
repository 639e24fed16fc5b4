//! Best-effort isolation of a JSON value inside free-form model output.
//!
//! Models asked for "only JSON" still wrap it in markdown fences or add a
//! sentence before or after. [`extract_json`] strips fences and slices from
//! the first `{`/`[` to the last closer of the same kind. It is a heuristic,
//! not a parser: a closing bracket inside trailing prose widens the span,
//! and prose brackets ahead of the payload shift its start. Callers parse
//! the result and treat failure as malformed output.

use std::sync::LazyLock;

use regex::Regex;

/// A fence marker with an optional language tag and the whitespace after it.
static FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```[A-Za-z0-9_+-]*\s*").expect("valid fence regex"));

/// Strip markdown fences and return the outermost JSON-looking span.
///
/// Idempotent: `extract_json(&extract_json(x)) == extract_json(x)`.
pub fn extract_json(text: &str) -> String {
    let mut stripped = text.trim().to_string();
    // Removing one marker can splice surrounding backticks into a new one.
    while FENCE.is_match(&stripped) {
        stripped = FENCE.replace_all(&stripped, "").into_owned();
    }
    let stripped = stripped.trim();

    let Some(start) = stripped.find(['{', '[']) else {
        return stripped.to_string();
    };
    let tail = &stripped[start..];
    let closer = if tail.starts_with('{') { '}' } else { ']' };

    match tail.rfind(closer) {
        Some(end) => tail[..=end].trim().to_string(),
        None => tail.trim().to_string(),
    }
}
