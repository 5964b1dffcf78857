//! The build pipeline: configuration in, stylesheet and diagnostics out.
//!
//! A single logical pass with no shared mutable state between stages:
//! theme resolution and library construction happen once and are then
//! shared read-only; extraction and matching fan out across the rayon
//! pool and merge in deterministic order; assembly is single-threaded.
//! Only configuration problems abort — everything else degrades to fewer
//! rules plus diagnostics.

use std::path::Path;

use rayon::prelude::*;
use thiserror::Error;

use ucss::assemble::assemble;
use ucss::matcher::{match_candidate, MatchOutcome};
use ucss::rules::RuleLibrary;
use ucss::theme::resolve_config;
use ucss::Config;

use crate::diagnostics::{Diagnostic, DiagnosticReason};

/// Fatal build errors. Anything recoverable is a [`Diagnostic`] instead.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ucss::ConfigError),
    #[error(transparent)]
    Scan(#[from] scour::ScanError),
}

/// The generated stylesheet plus everything that didn't make it in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutput {
    pub css: String,
    pub diagnostics: Vec<Diagnostic>,
}

/// Runs a full build over the project at `root`.
///
/// No side effects beyond reading the matched content files: persistence
/// of the returned stylesheet is the caller's responsibility.
pub fn build(config: &Config, root: &Path) -> Result<BuildOutput, BuildError> {
    let table = resolve_config(&config.theme)?;
    let library = RuleLibrary::standard(&config.dark_mode)?;
    log::debug!(
        "token table ready ({} tokens), library ready ({} utilities)",
        table.len(),
        library.len()
    );

    let files = scour::resolve_sources(root, &config.content)?;
    let extraction = scour::extract(&files);

    let mut diagnostics: Vec<Diagnostic> = extraction
        .issues
        .into_iter()
        .map(|issue| Diagnostic {
            candidate: None,
            source: issue.source,
            reason: DiagnosticReason::SourceRead(issue.reason),
        })
        .collect();

    // Candidates are independent; match in parallel but keep the input
    // order for the assembler's first-seen tie-break.
    let outcomes: Vec<MatchOutcome> = extraction
        .candidates
        .par_iter()
        .map(|candidate| match_candidate(&candidate.raw, &table, &library))
        .collect();

    let total_candidates = extraction.candidates.len();
    let mut matched = Vec::new();
    for (candidate, outcome) in extraction.candidates.iter().zip(outcomes) {
        match outcome {
            MatchOutcome::Matched(rule) => matched.push(rule),
            MatchOutcome::Unmatched(reason) => diagnostics.push(Diagnostic {
                candidate: Some(candidate.raw.clone()),
                source: candidate.source.clone(),
                reason: reason.into(),
            }),
        }
    }
    log::debug!("matched {} of {total_candidates} candidates", matched.len());

    Ok(BuildOutput {
        css: assemble(&matched),
        diagnostics,
    })
}
