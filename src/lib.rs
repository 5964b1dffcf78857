//! # Windlass - on-demand utility CSS generation
//!
//! A build-time engine that scans a project's sources for utility-class
//! tokens, resolves each against a theme-parameterized rule library, and
//! emits a minimal, deduplicated stylesheet containing only the rules
//! actually used.
//!
//! This crate is the pipeline facade; the heavy lifting lives in two
//! member crates:
//!
//! - [`ucss`]: theme resolution, the rule library, matching, assembly
//! - [`scour`]: content glob resolution and candidate extraction
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use windlass::{build, Config};
//!
//! let config: Config = serde_json::from_str(r##"{
//!     "darkMode": "class",
//!     "content": ["./index.html", "./src/**/*.rs"],
//!     "theme": { "extend": { "colors": { "brand": { "blue": "#4fc3f7" } } } }
//! }"##)?;
//!
//! let output = build(&config, Path::new("."))?;
//! println!("{}", output.css);
//! for diagnostic in &output.diagnostics {
//!     eprintln!("warning: {diagnostic}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Contract
//!
//! `build` receives a resolved [`Config`] and a project root, reads the
//! matched content files, and returns the stylesheet text plus
//! diagnostics. It never writes anything, never touches the network, and
//! only a configuration problem makes it fail; unreadable files and
//! unmatched candidates degrade to diagnostics.

pub mod diagnostics;
pub mod pipeline;

pub use diagnostics::{Diagnostic, DiagnosticReason};
pub use pipeline::{build, BuildError, BuildOutput};
pub use ucss::{Config, ConfigError, DarkMode, ThemeConfig};
