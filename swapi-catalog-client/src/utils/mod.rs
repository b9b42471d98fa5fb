//! Utility modules.

/// Timestamp parsing and display helpers for upstream ISO 8601 fields.
pub mod datetime;

/// Keeps large response bodies out of debug/error logs.
pub mod log_sanitizer;
