//! Utility modules.

/// Serde helpers for registrar timestamps and loosely typed numbers.
pub mod datetime;

/// Truncation and credential redaction for log output.
pub mod log_sanitizer;
