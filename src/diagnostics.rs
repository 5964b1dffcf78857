//! Build diagnostics: what was seen but not turned into CSS.
//!
//! None of these are errors. The superset scan guarantees a stream of
//! unknown-utility entries from ordinary source text; callers that want
//! strict builds can filter for the reasons they care about (unknown
//! tokens are the usual "typo in class name" signal) and decide whether
//! to fail.

use std::fmt;
use std::path::PathBuf;

use ucss::UnmatchedReason;

/// Why a candidate or file produced no CSS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticReason {
    /// No rule stem matched the base token.
    UnknownUtility,
    /// A rule matched but the token name is absent from the theme.
    UnknownToken,
    /// A bracketed arbitrary value failed its syntax check.
    ArbitraryValueSyntax,
    /// A content file could not be read or decoded.
    SourceRead(String),
}

impl From<UnmatchedReason> for DiagnosticReason {
    fn from(reason: UnmatchedReason) -> Self {
        match reason {
            UnmatchedReason::UnknownUtility => DiagnosticReason::UnknownUtility,
            UnmatchedReason::UnknownToken => DiagnosticReason::UnknownToken,
            UnmatchedReason::ArbitraryValueSyntax => DiagnosticReason::ArbitraryValueSyntax,
        }
    }
}

impl fmt::Display for DiagnosticReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticReason::UnknownUtility => write!(f, "unknown utility"),
            DiagnosticReason::UnknownToken => write!(f, "unknown token"),
            DiagnosticReason::ArbitraryValueSyntax => write!(f, "invalid arbitrary value"),
            DiagnosticReason::SourceRead(detail) => write!(f, "unreadable source: {detail}"),
        }
    }
}

/// One diagnostic entry in the build output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The candidate string, absent for whole-file issues.
    pub candidate: Option<String>,
    /// The file the candidate or issue came from.
    pub source: PathBuf,
    pub reason: DiagnosticReason,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.candidate {
            Some(candidate) => write!(
                f,
                "{}: `{}`: {}",
                self.source.display(),
                candidate,
                self.reason
            ),
            None => write!(f, "{}: {}", self.source.display(), self.reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_source_and_reason() {
        let diagnostic = Diagnostic {
            candidate: Some("bg-brand-purple".to_string()),
            source: PathBuf::from("src/app.rs"),
            reason: DiagnosticReason::UnknownToken,
        };
        assert_eq!(
            diagnostic.to_string(),
            "src/app.rs: `bg-brand-purple`: unknown token"
        );
    }
}
