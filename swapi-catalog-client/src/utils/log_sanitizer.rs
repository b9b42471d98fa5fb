//! Log sanitization utilities
//!
//! A full collection body runs to tens of kilobytes; debug and error logs
//! only ever see its head.

/// Maximum number of bytes of a body to include in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Largest char boundary at or below `index`.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    (0..=index).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}

/// Truncate a response body for logging.
///
/// Bodies within the limit are returned unchanged; longer ones keep their
/// first `TRUNCATE_LIMIT` bytes plus a note with the total size.
pub fn truncate_for_log(body: &str) -> String {
    if body.len() <= TRUNCATE_LIMIT {
        body.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &body[..floor_char_boundary(body, TRUNCATE_LIMIT)],
            body.len()
        )
    }
}
