//! # Support Utilities

/// Byte offsets of the char boundaries of `text` in `(0, limit]`,
/// longest first.
///
/// Used for greedy longest-match scans over utf-8 text.
pub(crate) fn prefix_ends(
    text: &str,
    limit: usize,
) -> Vec<usize> {
    let mut ends: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .filter(|&i| i > 0 && i <= limit)
        .collect();
    if text.len() <= limit {
        ends.push(text.len());
    }
    ends.reverse();
    ends
}
