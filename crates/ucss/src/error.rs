//! Error types for theme resolution and engine construction.
//!
//! Only configuration problems are represented as `Err` values: a malformed
//! theme value or an unusable dark-mode selector aborts the build before any
//! source file is scanned. Everything that can go wrong *per candidate*
//! (unknown utility, missing token, bad arbitrary value) degrades to a
//! diagnostic instead — see [`crate::matcher::UnmatchedReason`].

use thiserror::Error;

/// Fatal configuration errors.
///
/// # Examples
///
/// ```rust
/// use std::collections::BTreeMap;
/// use ucss::theme::{resolve, TokenNode};
///
/// let mut base = BTreeMap::new();
/// base.insert(
///     "opacity".to_string(),
///     TokenNode::Number(f64::NAN),
/// );
/// let mut theme = BTreeMap::new();
/// theme.insert("colors".to_string(), TokenNode::Group(base));
///
/// assert!(resolve(&theme, &BTreeMap::new()).is_err());
/// ```
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A theme leaf could not be coerced to a CSS-legal value.
    ///
    /// The string identifies the offending token path (e.g.
    /// `colors.brand.blue`) and what was wrong with it.
    #[error("invalid theme value at `{path}`: {reason}")]
    InvalidTokenValue { path: String, reason: String },

    /// The custom dark-mode selector is empty or not selector-shaped.
    #[error("invalid dark-mode selector `{0}`")]
    InvalidDarkSelector(String),
}
