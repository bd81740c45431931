//! Executive summary extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Paragraphs kept in the summary.
pub const SUMMARY_POINTS: usize = 3;

/// Longest summary point kept verbatim, in characters.
pub const POINT_MAX_CHARS: usize = 120;

/// Characters kept ahead of the ellipsis when a point is cut.
pub const POINT_KEPT_CHARS: usize = 117;

const ELLIPSIS: char = '…';

lazy_static! {
    /// A blank line: two line breaks with only whitespace between them.
    static ref PARAGRAPH_BREAK: Regex = Regex::new(r"\r?\n[ \t]*\r?\n").unwrap();
}

/// Cut `point` to [`POINT_KEPT_CHARS`] characters plus `…` when it exceeds
/// [`POINT_MAX_CHARS`].
pub fn truncate_point(point: &str) -> String {
    if point.chars().count() <= POINT_MAX_CHARS {
        return point.to_string();
    }

    let mut out: String = point.chars().take(POINT_KEPT_CHARS).collect();
    out.push(ELLIPSIS);
    out
}

/// First paragraphs of the document, trimmed and truncated.
pub fn executive_summary(text: &str) -> Vec<String> {
    PARAGRAPH_BREAK
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .take(SUMMARY_POINTS)
        .map(truncate_point)
        .collect()
}
