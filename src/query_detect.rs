//! Statement boundary detection for SQL scripts
//!
//! Resolves which statement sits under a cursor offset and enumerates every
//! statement in a script, without a SQL parser: boundaries come from
//! semicolon scans, and a shallow leading-keyword check stands in for a
//! grammar. All functions are pure over `&str`; offsets are byte offsets.

use crate::models::{LineColumn, QueryInfo};

/// Leading keywords that mark a chunk of text as a runnable statement.
/// Fixed list; extending it (e.g. MERGE, CALL) is a product decision.
const VALID_KEYWORDS: [&str; 9] = [
    "select",
    "with",
    "insert",
    "update",
    "delete",
    "create",
    "drop",
    "alter",
    "truncate",
];

#[inline]
fn is_separator(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte == b';'
}

#[inline]
fn count_newlines(bytes: &[u8]) -> usize {
    bytes.iter().filter(|&&b| b == b'\n').count()
}

/// Find the statement under `cursor_position` in `text`.
///
/// Returns `None` for empty text or an out-of-range cursor, and when no
/// keyword-leading statement can be found around the cursor. A cursor sitting
/// in trailing whitespace resolves to the statement before it; a cursor in a
/// blank-line gap between statements resolves to the statement after it.
pub fn find_current_query_in_text(text: &str, cursor_position: usize) -> Option<QueryInfo> {
    if text.is_empty() || cursor_position > text.len() {
        return None;
    }

    let bytes = text.as_bytes();
    let mut effective_cursor = cursor_position.min(text.len() - 1);

    // Cursor immediately after a semicolon with no whitespace in between
    // still means the previous statement: "query1;query2" with the cursor on
    // the 'q' of query2 resolves to query1.
    if effective_cursor > 0
        && bytes[effective_cursor - 1] == b';'
        && bytes[effective_cursor] != b';'
        && !bytes[effective_cursor].is_ascii_whitespace()
    {
        effective_cursor -= 1;
    }

    search_for_query_at(text, effective_cursor)
}

/// Alias for [`find_current_query_in_text`] for callers that think in spans.
pub fn find_query_boundaries(text: &str, position: usize) -> Option<QueryInfo> {
    find_current_query_in_text(text, position)
}

fn search_for_query_at(text: &str, search_cursor: usize) -> Option<QueryInfo> {
    let bytes = text.as_bytes();
    let mut cursor = search_cursor;

    // A cursor in a "blank separator" area (a genuinely blank line between
    // statements) should resolve FORWARD to the next statement, not backward.
    // Detect it by scanning back through whitespace/semicolons for two
    // newlines separated only by spaces/tabs.
    let mut in_blank_area = false;
    if is_separator(bytes[cursor]) {
        let mut temp_cursor = cursor;
        while temp_cursor > 0 && is_separator(bytes[temp_cursor]) {
            if bytes[temp_cursor] == b'\n' {
                let mut check_cursor = temp_cursor - 1;
                while check_cursor > 0
                    && (bytes[check_cursor] == b' ' || bytes[check_cursor] == b'\t')
                {
                    check_cursor -= 1;
                }
                if bytes[check_cursor] == b'\n' {
                    in_blank_area = true;
                    break;
                }
            }
            temp_cursor -= 1;
        }
    }

    if in_blank_area {
        while cursor < text.len() - 1 && is_separator(bytes[cursor]) {
            cursor += 1;
        }
    } else {
        while cursor > 0 && is_separator(bytes[cursor]) {
            cursor -= 1;
        }
    }

    // Each semicolon-delimited chunk around the cursor is tried as a
    // candidate; chunks that fail the keyword check (comment-only blocks,
    // prose) are skipped by retrying before their left boundary.
    loop {
        let mut left_boundary = 0;
        for i in (0..=cursor).rev() {
            if bytes[i] == b';' {
                left_boundary = i + 1;
                break;
            }
        }

        let mut right_boundary = text.len();
        for (i, &b) in bytes.iter().enumerate().skip(cursor + 1) {
            if b == b';' {
                right_boundary = i;
                break;
            }
        }

        let query_text = text[left_boundary..right_boundary].trim();

        // A chunk wholly wrapped in /* ... */ is commented-out code, never a
        // statement, even if a keyword appears inside it.
        let is_comment_block = query_text.starts_with("/*") && query_text.ends_with("*/");

        if !is_comment_block && is_valid_query(query_text) {
            return Some(build_query_info(
                text,
                query_text,
                left_boundary,
                right_boundary,
            ));
        }

        if left_boundary < 2 {
            break;
        }
        log::debug!(
            "no statement in chunk {}..{}, retrying before it",
            left_boundary,
            right_boundary
        );
        cursor = left_boundary - 2;
        while cursor > 0 && is_separator(bytes[cursor]) {
            cursor -= 1;
        }
    }

    None
}

/// Assemble the result: strip whole leading/trailing comment lines from the
/// candidate and shift the boundaries past the removed text (+1 for the
/// removed newline), then count lines in the document prefixes.
fn build_query_info(
    text: &str,
    candidate: &str,
    left_boundary: usize,
    right_boundary: usize,
) -> QueryInfo {
    let lines: Vec<&str> = candidate.split('\n').collect();
    let mut first_query_line = 0;
    let mut last_query_line = lines.len() - 1;

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if !trimmed.starts_with("--")
            && !trimmed.starts_with("/*")
            && !trimmed.starts_with("*/")
            && !trimmed.is_empty()
        {
            first_query_line = i;
            break;
        }
    }

    for i in (first_query_line..lines.len()).rev() {
        let trimmed = lines[i].trim();
        if !trimmed.starts_with("--")
            && !trimmed.starts_with("*/")
            && !trimmed.ends_with("*/")
            && !trimmed.is_empty()
        {
            last_query_line = i;
            break;
        }
    }

    let mut query_text = candidate.to_string();
    let mut start_position = left_boundary;
    let mut end_position = right_boundary;

    if first_query_line > 0 || last_query_line < lines.len() - 1 {
        query_text = lines[first_query_line..=last_query_line].join("\n");

        if first_query_line > 0 {
            let leading_len: usize = lines[..first_query_line].join("\n").len();
            start_position += leading_len + 1;
        }
        if last_query_line < lines.len() - 1 {
            let trailing_len: usize = lines[last_query_line + 1..].join("\n").len();
            end_position -= trailing_len + 1;
        }
    }

    // Count newlines on raw bytes: the adjusted offsets are measured against
    // the trimmed candidate and may not land on a char boundary of `text`.
    let bytes = text.as_bytes();
    let start_line = count_newlines(&bytes[..start_position.min(bytes.len())]);
    let end_line = count_newlines(&bytes[..end_position.min(bytes.len())]);

    QueryInfo {
        text: query_text,
        start_line,
        end_line,
        start_position,
        end_position,
    }
}

/// Shallow "looks like SQL" check: true when any non-comment line's first
/// whitespace-delimited token is a whitelisted statement keyword.
pub fn is_valid_query(query_text: &str) -> bool {
    if query_text.is_empty() {
        return false;
    }

    let normalized = query_text.to_lowercase();
    for line in normalized.split('\n') {
        let trimmed = line.trim();
        if trimmed.starts_with("--") || trimmed.starts_with("/*") {
            continue;
        }
        if let Some(first_word) = trimmed.split_whitespace().next()
            && VALID_KEYWORDS.contains(&first_word)
        {
            return true;
        }
    }

    false
}

/// Enumerate every statement in `text`, in document order.
///
/// Chunks that fail the keyword check are silently dropped. After each
/// semicolon the scan start skips spaces and tabs, but not newlines, so a
/// statement beginning on the next line keeps the newline inside its span.
pub fn extract_all_queries(text: &str) -> Vec<QueryInfo> {
    let bytes = text.as_bytes();
    let mut queries = Vec::new();
    let mut current_start = 0;

    for i in 0..bytes.len() {
        if bytes[i] != b';' {
            continue;
        }
        let query_text = text[current_start..i].trim();
        if is_valid_query(query_text) {
            queries.push(QueryInfo {
                text: query_text.to_string(),
                start_line: count_newlines(&bytes[..current_start]),
                end_line: count_newlines(&bytes[..i]),
                start_position: current_start,
                end_position: i,
            });
        }
        current_start = i + 1;
        while current_start < bytes.len()
            && bytes[current_start].is_ascii_whitespace()
            && bytes[current_start] != b'\n'
        {
            current_start += 1;
        }
    }

    // Trailing statement without a terminating semicolon
    if current_start < text.len() {
        let query_text = text[current_start..].trim();
        if is_valid_query(query_text) {
            queries.push(QueryInfo {
                text: query_text.to_string(),
                start_line: count_newlines(&bytes[..current_start]),
                end_line: count_newlines(bytes),
                start_position: current_start,
                end_position: text.len(),
            });
        }
    }

    queries
}

/// Zero-based line/column of a byte offset. Positions past the end of the
/// text clamp to the end; columns count characters, not bytes.
pub fn get_line_and_column(text: &str, position: usize) -> LineColumn {
    if text.is_empty() {
        return LineColumn::default();
    }

    let bytes = text.as_bytes();
    let prefix = &bytes[..position.min(bytes.len())];
    let line_start = prefix
        .iter()
        .rposition(|&b| b == b'\n')
        .map(|p| p + 1)
        .unwrap_or(0);

    LineColumn {
        line: count_newlines(prefix),
        column: String::from_utf8_lossy(&prefix[line_start..]).chars().count(),
    }
}

/// Inverse of [`get_line_and_column`] with 1-based line/column, for callers
/// that address the script the way an editor gutter does.
pub fn line_column_to_offset(text: &str, line: usize, column: usize) -> usize {
    let mut offset = 0;
    for (i, l) in text.split('\n').enumerate() {
        if i + 1 >= line.max(1) {
            break;
        }
        offset += l.len() + 1;
    }
    offset + column.saturating_sub(1)
}
