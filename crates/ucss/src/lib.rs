//! # UCSS - Utility-class CSS core
//!
//! The core engine behind the windlass stylesheet generator: theme
//! resolution, the utility rule library, candidate matching, and
//! stylesheet assembly. This crate is pure computation — it never touches
//! the filesystem; source scanning lives in the `scour` crate and the
//! pipeline glue in the root `windlass` crate.
//!
//! ## Quick Start
//!
//! ```rust
//! use ucss::assemble::assemble;
//! use ucss::config::DarkMode;
//! use ucss::matcher::{match_candidate, MatchOutcome};
//! use ucss::rules::RuleLibrary;
//! use ucss::theme::TokenTable;
//!
//! let mut table = TokenTable::default();
//! table.insert("colors", "brand-blue", "#4fc3f7");
//! let library = RuleLibrary::standard(&DarkMode::Media).unwrap();
//!
//! let mut matched = Vec::new();
//! for candidate in ["flex", "bg-brand-blue", "flex", "not-a-class"] {
//!     if let MatchOutcome::Matched(rule) = match_candidate(candidate, &table, &library) {
//!         matched.push(rule);
//!     }
//! }
//!
//! let css = assemble(&matched);
//! assert_eq!(css.matches("display: flex;").count(), 1);
//! assert!(css.contains("background-color: #4fc3f7;"));
//! ```
//!
//! ## Pipeline position
//!
//! Configuration → [`theme::resolve`] → token table; [`rules::RuleLibrary`]
//! is built once per run from the dark-mode strategy; extracted candidates
//! go through [`matcher::match_candidate`] and the survivors through
//! [`assemble::assemble`]. The token table and library are immutable after
//! construction and are shared by matcher workers without locking.
//!
//! ## Modules
//!
//! - [`config`]: the resolved configuration object and dark-mode strategy
//! - [`theme`]: nested token mappings into a flat [`theme::TokenTable`]
//! - [`rules`]: the utility catalog and variant definitions
//! - [`matcher`]: candidate parsing and rule instantiation
//! - [`assemble`]: deduplication, ordering, and CSS serialization
//! - [`error`]: fatal configuration errors

pub mod assemble;
pub mod config;
pub mod error;
pub mod matcher;
pub mod rules;
pub mod theme;

pub use config::{Config, DarkMode, ThemeConfig};
pub use error::ConfigError;
pub use matcher::{MatchOutcome, MatchedRule, UnmatchedReason};
pub use rules::RuleLibrary;
pub use theme::{TokenNode, TokenTable};
