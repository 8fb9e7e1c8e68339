//! Case-insensitive matching and context snippets.
//!
//! All positions here are character positions, so windows never split a
//! multi-byte code point.

use crate::error::SnippetError;
use tracing::error;

const ELLIPSIS: &str = "...";

/// Character index of the first case-insensitive occurrence of `query`.
///
/// Each candidate window is lowercased as a whole, so context-dependent
/// folds such as the Greek final sigma compare equal.
pub fn find_match(body: &str, query: &str) -> Option<usize> {
    let query_chars = query.chars().count();
    if query_chars == 0 {
        return Some(0);
    }
    let query_lower = query.to_lowercase();

    let mut bounds: Vec<usize> = body.char_indices().map(|(i, _)| i).collect();
    bounds.push(body.len());
    if query_chars >= bounds.len() {
        return None;
    }
    (0..bounds.len() - query_chars).find(|&start| {
        body[bounds[start]..bounds[start + query_chars]].to_lowercase() == query_lower
    })
}

pub fn contains_ignore_case(body: &str, query: &str) -> bool {
    find_match(body, query).is_some()
}

/// Excerpt around the first match with up to `context` characters on each side.
///
/// Returns `Ok(None)` when `query` does not occur in `body`.
pub fn build_snippet(body: &str, query: &str, context: usize) -> Result<Option<String>, SnippetError> {
    let Some(match_start) = find_match(body, query) else {
        return Ok(None);
    };

    let total_chars = body.chars().count();
    let start = match_start.saturating_sub(context);
    let end = (match_start + query.chars().count() + context).min(total_chars);

    // byte_offset always lands on a char boundary; this guard backs the fallback path
    let start_byte = byte_offset(body, start);
    let end_byte = byte_offset(body, end);
    let window = body.get(start_byte..end_byte).ok_or(SnippetError {
        start: start_byte,
        end: end_byte,
        len: body.len(),
    })?;

    let prefix = if start > 0 { ELLIPSIS } else { "" };
    let suffix = if end < total_chars { ELLIPSIS } else { "" };
    Ok(Some(format!("{}{}{}", prefix, window, suffix).trim().to_string()))
}

/// Leading `2 * context` characters of the body, used when a window cannot be built.
pub fn fallback_snippet(body: &str, context: usize) -> String {
    let limit = context * 2;
    let mut head = body.chars().take(limit + 1);
    let truncated: String = head.by_ref().take(limit).collect();
    if head.next().is_some() {
        format!("{}{}", truncated, ELLIPSIS)
    } else {
        truncated
    }
}

/// Snippet for a body that matches `query`, or `None` if it does not match.
pub fn try_match(body: &str, query: &str, context: usize) -> Option<String> {
    if !contains_ignore_case(body, query) {
        return None;
    }
    match build_snippet(body, query, context) {
        Ok(snippet) => snippet,
        Err(e) => {
            error!("Error generating snippet: {}", e);
            Some(fallback_snippet(body, context))
        }
    }
}

fn byte_offset(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}
