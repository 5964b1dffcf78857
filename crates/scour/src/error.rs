//! Error types for source scanning.

use thiserror::Error;

/// Fatal scanning errors.
///
/// Only configuration-shaped problems are fatal: a glob pattern that does
/// not compile means the build was never going to scan what the caller
/// intended. Per-file read failures are *not* errors — they degrade to
/// [`crate::extract::SourceIssue`] diagnostics and the scan continues.
#[derive(Error, Debug)]
pub enum ScanError {
    /// A content glob pattern failed to compile.
    #[error("invalid content pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        source: globset::Error,
    },
}
