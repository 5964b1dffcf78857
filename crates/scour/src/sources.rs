//! Content glob resolution over a project root.
//!
//! Patterns are compiled into one [`GlobSet`] and matched against paths
//! relative to the root during a gitignore-aware walk. The result is a
//! sorted, deduplicated file list: sorting is what makes the rest of the
//! pipeline independent of walk order and of the order the glob patterns
//! were given in.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

use crate::error::ScanError;

/// Resolves content glob patterns to a sorted list of readable files.
pub fn resolve_sources(root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>, ScanError> {
    let globset = build_globset(patterns)?;
    // Patterns without wildcards name one exact file; such an explicit
    // request overrides the conventional skip list below.
    let literals: Vec<&str> = patterns
        .iter()
        .map(|pattern| pattern.strip_prefix("./").unwrap_or(pattern.as_str()))
        .filter(|pattern| !pattern.contains(['*', '?', '[', '{']))
        .collect();
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .build();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                log::warn!("skipping unwalkable entry: {error}");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        if !globset.is_match(relative) && !globset.is_match(path) {
            continue;
        }
        if skip_by_convention(path) && !literals.iter().any(|literal| Path::new(literal) == relative)
        {
            log::debug!("skipping {}: excluded by convention", path.display());
            continue;
        }
        if seen.insert(path.to_path_buf()) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    log::debug!("resolved {} content files under {}", files.len(), root.display());
    Ok(files)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet, ScanError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        // Leading `./` is common in config files but never appears in the
        // relative paths the walker produces.
        let cleaned = pattern.strip_prefix("./").unwrap_or(pattern);
        let glob = Glob::new(cleaned).map_err(|source| ScanError::Pattern {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| ScanError::Pattern {
        pattern: patterns.join(", "),
        source,
    })
}

/// Files a wildcard match should not pull in: generated stylesheets
/// cannot contribute candidates, and binary or lockfile content only adds
/// noise to the superset scan. A literal pattern naming the file exactly
/// overrides this list.
fn skip_by_convention(path: &Path) -> bool {
    if path
        .components()
        .any(|component| component.as_os_str() == "node_modules")
    {
        return true;
    }

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("");
    if matches!(
        file_name,
        "package-lock.json" | "yarn.lock" | "pnpm-lock.yaml" | "Cargo.lock" | "poetry.lock"
    ) {
        return true;
    }

    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    matches!(
        ext.as_deref(),
        Some(
            "css" | "scss" | "sass" | "less" | "png" | "jpg" | "jpeg" | "gif" | "webp" | "ico"
                | "woff" | "woff2" | "ttf" | "otf" | "pdf" | "zip" | "gz" | "mp4" | "mp3"
        )
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_patterns_are_fatal() {
        let err = resolve_sources(Path::new("."), &["src/**/*.{rs".to_string()]);
        assert!(err.is_err());
    }

    #[test]
    fn conventional_skips() {
        assert!(skip_by_convention(Path::new("dist/out.css")));
        assert!(skip_by_convention(Path::new("node_modules/x/index.html")));
        assert!(skip_by_convention(Path::new("Cargo.lock")));
        assert!(!skip_by_convention(Path::new("src/app.rs")));
        assert!(!skip_by_convention(Path::new("index.html")));
    }
}
