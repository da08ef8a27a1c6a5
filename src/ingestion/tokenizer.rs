//! Line tokenization with per-line delimiter detection.
//!
//! Source files are either strictly tab-delimited or use runs of spaces as a
//! delimiter, never a mix within one file. Detecting per line rather than per
//! file tolerates a stray leading/trailing space without breaking
//! tab-delimited files.

/// Split one line into field tokens.
///
/// Rules:
///
/// - If the line contains any tab, split on single tabs. Empty trailing
///   tokens are preserved (a trailing delimiter is significant); each token
///   is trimmed of stray surrounding spaces.
/// - Otherwise, split on runs of whitespace.
/// - A line that is empty after trimming yields no tokens; the loader counts
///   such lines as skipped.
pub fn tokenize(line: &str) -> Vec<String> {
    if line.trim().is_empty() {
        return Vec::new();
    }

    if line.contains('\t') {
        line.split('\t').map(|t| t.trim().to_string()).collect()
    } else {
        line.split_whitespace().map(str::to_string).collect()
    }
}

/// Returns `true` if the line looks like text and can be tokenized at all.
///
/// Lines carrying control characters (other than tab and carriage return)
/// are treated as binary content: skipped and counted, never fatal on their
/// own.
pub fn line_is_text(line: &str) -> bool {
    !line
        .chars()
        .any(|c| c.is_control() && c != '\t' && c != '\r')
}
