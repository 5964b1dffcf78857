//! Candidate extraction: a superset scan over source text.
//!
//! The scanner does not parse any source language. It splits text on
//! delimiter characters and keeps every maximal run of class-name
//! characters that contains at least one alphanumeric. False positives are
//! expected and cheap — the matcher is the authority on validity — but a
//! false negative would silently drop a rule from the stylesheet, so the
//! character class is deliberately generous (`:` for variants, `[ ]` for
//! arbitrary values, `/ . %` for fractions, scale steps, and percentages).
//!
//! Files are read and scanned in parallel; the per-file results are merged
//! single-threaded over the sorted file list, so the candidate order (and
//! therefore every downstream tie-break) is deterministic regardless of
//! thread scheduling.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

/// A raw token extracted from a source file.
///
/// Path and byte offset are for diagnostics only; matching depends solely
/// on `raw`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub raw: String,
    pub source: PathBuf,
    pub offset: usize,
}

/// A file that could not be scanned. Recorded, never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceIssue {
    pub source: PathBuf,
    pub reason: String,
}

/// Result of extracting over a file set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Deduplicated candidates, first occurrence wins, in file order.
    pub candidates: Vec<Candidate>,
    /// Unreadable or undecodable files that were skipped.
    pub issues: Vec<SourceIssue>,
}

/// Extracts candidates from every file, deterministically for a fixed
/// file list and contents.
pub fn extract(files: &[PathBuf]) -> Extraction {
    let per_file: Vec<Result<Vec<Candidate>, SourceIssue>> = files
        .par_iter()
        .map(|path| scan_file(path))
        .collect();

    let mut extraction = Extraction::default();
    let mut seen: HashSet<String> = HashSet::new();
    for outcome in per_file {
        match outcome {
            Ok(candidates) => {
                for candidate in candidates {
                    if seen.insert(candidate.raw.clone()) {
                        extraction.candidates.push(candidate);
                    }
                }
            }
            Err(issue) => {
                log::warn!("skipping {}: {}", issue.source.display(), issue.reason);
                extraction.issues.push(issue);
            }
        }
    }

    log::debug!(
        "extracted {} unique candidates from {} files ({} skipped)",
        extraction.candidates.len(),
        files.len(),
        extraction.issues.len()
    );
    extraction
}

fn scan_file(path: &Path) -> Result<Vec<Candidate>, SourceIssue> {
    let bytes = fs::read(path).map_err(|error| SourceIssue {
        source: path.to_path_buf(),
        reason: format!("read failed: {error}"),
    })?;
    let text = std::str::from_utf8(&bytes).map_err(|_| SourceIssue {
        source: path.to_path_buf(),
        reason: "not valid UTF-8".to_string(),
    })?;

    Ok(scan_text(text)
        .into_iter()
        .map(|(offset, raw)| Candidate {
            raw: raw.to_string(),
            source: path.to_path_buf(),
            offset,
        })
        .collect())
}

/// Scans text for class-name-shaped tokens, returning byte offsets.
///
/// Inside a `[...]` group a few extra characters stay part of the token
/// (`(`, `)`, `,`, `#`), so arbitrary values like `h-[calc(100vh-12rem)]`
/// and `bg-[#fff]` survive extraction intact.
pub fn scan_text(text: &str) -> Vec<(usize, &str)> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    let mut bracket_depth = 0_u32;

    for (i, c) in text.char_indices() {
        let in_token = start.is_some();
        let allowed = is_candidate_char(c)
            || (in_token && bracket_depth > 0 && matches!(c, '(' | ')' | ',' | '#'));
        if allowed {
            if start.is_none() {
                start = Some(i);
            }
            match c {
                '[' => bracket_depth += 1,
                ']' => bracket_depth = bracket_depth.saturating_sub(1),
                _ => {}
            }
        } else if let Some(begin) = start.take() {
            push_token(&mut tokens, begin, &text[begin..i]);
            bracket_depth = 0;
        }
    }
    if let Some(begin) = start {
        push_token(&mut tokens, begin, &text[begin..]);
    }
    tokens
}

fn push_token<'a>(tokens: &mut Vec<(usize, &'a str)>, offset: usize, token: &'a str) {
    // Superset filter: anything without an alphanumeric is punctuation
    // noise (`---`, `...`), not a possible class name.
    if token.chars().any(|c| c.is_ascii_alphanumeric()) {
        tokens.push((offset, token));
    }
}

fn is_candidate_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '[' | ']' | '/' | '.' | '%')
}
