//! # Scour - content scanning for the windlass engine
//!
//! Resolves content glob patterns against a project root and extracts
//! utility-class candidates from the matched files. The scan is a
//! deliberate overapproximation: anything class-name-shaped comes out as a
//! [`Candidate`] and the matcher downstream decides what is real.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! let files = scour::resolve_sources(Path::new("."), &["src/**/*.rs".to_string()])?;
//! let extraction = scour::extract(&files);
//! for candidate in &extraction.candidates {
//!     println!("{} ({}:{})", candidate.raw, candidate.source.display(), candidate.offset);
//! }
//! # Ok::<(), scour::ScanError>(())
//! ```
//!
//! ## Determinism
//!
//! For a fixed file set and contents the candidate list is identical
//! across runs and across glob-pattern orderings: files are sorted before
//! extraction, extraction runs per file (in parallel), and the merge is a
//! single-threaded union that keeps first occurrences.
//!
//! ## Modules
//!
//! - [`sources`]: glob resolution and the gitignore-aware walk
//! - [`extract`]: the candidate scanner
//! - [`error`]: fatal pattern errors

pub mod error;
pub mod extract;
pub mod sources;

pub use error::ScanError;
pub use extract::{extract, scan_text, Candidate, Extraction, SourceIssue};
pub use sources::resolve_sources;
