use serde::{Deserialize, Serialize};

/// A single SQL statement located inside a larger script.
///
/// `text` is trimmed and stripped of whole leading/trailing comment lines;
/// the positions are byte offsets into the original, unmodified document and
/// the line numbers are zero-based newline counts before those offsets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryInfo {
    pub text: String,
    pub start_line: usize,
    pub end_line: usize,
    pub start_position: usize,
    pub end_position: usize,
}

/// Zero-based line/column pair for diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineColumn {
    pub line: usize,
    pub column: usize,
}
