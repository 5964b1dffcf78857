//! Class matching: candidate strings against the rule library.
//!
//! A candidate like `md:dark:bg-brand-blue` is consumed left to right:
//! variant prefixes are taken greedily off the front (no backtracking —
//! the first segment that is not a known variant ends the chain and the
//! remainder, colons and all, is the base utility token), then the base is
//! resolved through the rule library, with bracketed `[...]` suffixes
//! taken as arbitrary values that bypass the token table. Color tokens
//! accept a `/NN` opacity modifier (`bg-slate-900/50`).
//!
//! Matching is pure: the same candidate against the same table and library
//! always yields the same outcome, which is what lets the pipeline fan
//! candidates out across worker threads.
//!
//! ## Example
//!
//! ```rust
//! use ucss::config::DarkMode;
//! use ucss::matcher::{match_candidate, MatchOutcome};
//! use ucss::rules::RuleLibrary;
//! use ucss::theme::TokenTable;
//!
//! let mut table = TokenTable::default();
//! table.insert("colors", "brand-blue", "#4fc3f7");
//! let library = RuleLibrary::standard(&DarkMode::Class { selector: None }).unwrap();
//!
//! match match_candidate("dark:bg-brand-blue", &table, &library) {
//!     MatchOutcome::Matched(rule) => {
//!         assert_eq!(rule.selector, ".dark .dark\\:bg-brand-blue");
//!         assert_eq!(rule.declarations, vec!["background-color: #4fc3f7"]);
//!     }
//!     MatchOutcome::Unmatched(_) => panic!("should match"),
//! }
//! ```

use nom::branch::alt;
use nom::bytes::complete::take_while1;
use nom::character::complete::char;
use nom::combinator::recognize;
use nom::multi::many0;
use nom::sequence::delimited;
use nom::IResult;

use crate::rules::{RuleDefinition, RuleKind, RuleLibrary, VariantWrap};
use crate::theme::TokenTable;

/// Why a candidate failed to match. Diagnostics, never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnmatchedReason {
    /// No rule's stem matches the base token at all — the common case for
    /// ordinary source text swept up by the superset scan.
    UnknownUtility,
    /// A stem matched but the token name is absent from the table (the
    /// "typo in class name" case).
    UnknownToken,
    /// A bracketed value failed the syntactic validity check.
    ArbitraryValueSyntax,
}

/// A successfully matched rule, ready for assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedRule {
    /// The originating candidate, kept for trace/diagnostics.
    pub class: String,
    /// Full CSS selector, variant transforms applied.
    pub selector: String,
    /// `property: value` lines, in rule-template order.
    pub declarations: Vec<String>,
    /// Media wrappers, outermost first.
    pub media: Vec<String>,
    /// Declaration-order index of the matched rule.
    pub rule_index: usize,
    /// Number of variant prefixes the candidate carried.
    pub variant_depth: usize,
}

/// Outcome of matching one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    Matched(MatchedRule),
    Unmatched(UnmatchedReason),
}

/// Matches a single candidate against the token table and rule library.
pub fn match_candidate(raw: &str, table: &TokenTable, library: &RuleLibrary) -> MatchOutcome {
    let segments = split_segments(raw);

    // Greedy left-to-right variant consumption: stop at the first segment
    // that is not a known variant, or when only one segment remains.
    let mut variants = Vec::new();
    let mut base_start = 0;
    for &(offset, segment) in &segments[..segments.len() - 1] {
        match library.variant(segment) {
            Some(variant) => {
                variants.push(variant);
                base_start = offset + segment.len() + 1;
            }
            None => break,
        }
    }
    let base = &raw[base_start..];
    if base.is_empty() {
        return MatchOutcome::Unmatched(UnmatchedReason::UnknownUtility);
    }

    let (rule_index, declarations) = match resolve_base(base, table, library) {
        Ok(resolved) => resolved,
        Err(reason) => return MatchOutcome::Unmatched(reason),
    };

    let mut selector = format!(".{}", escape_class(raw));
    let mut media = Vec::new();
    // Innermost-first: the rightmost variant wraps the bare rule, so the
    // leftmost prefix ends up as the outermost wrapper.
    for variant in variants.iter().rev() {
        match &variant.wrap {
            VariantWrap::Pseudo(pseudo) => selector.push_str(pseudo),
            VariantWrap::Ancestor(ancestor) => selector = format!("{ancestor}{selector}"),
            VariantWrap::Media(query) => media.insert(0, query.clone()),
        }
    }

    MatchOutcome::Matched(MatchedRule {
        class: raw.to_string(),
        selector,
        declarations,
        media,
        rule_index,
        variant_depth: variants.len(),
    })
}

/// Splits a candidate on `:` outside brackets, returning byte offsets.
fn split_segments(raw: &str) -> Vec<(usize, &str)> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut depth = 0_i32;
    for (i, c) in raw.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth -= 1,
            ':' if depth == 0 => {
                segments.push((start, &raw[start..i]));
                start = i + 1;
            }
            _ => {}
        }
    }
    segments.push((start, &raw[start..]));
    segments
}

/// Resolves the base token to a rule index and instantiated declarations.
fn resolve_base(
    base: &str,
    table: &TokenTable,
    library: &RuleLibrary,
) -> Result<(usize, Vec<String>), UnmatchedReason> {
    let mut saw_token_miss = false;
    let mut saw_bad_arbitrary = false;

    for rule in library.lookup(base) {
        match rule.kind {
            RuleKind::Static(decls) => {
                if base == rule.stem {
                    return Ok((rule.index, instantiate_static(decls)));
                }
            }
            RuleKind::Themed {
                category,
                properties,
            } => {
                let Some(rest) = themed_rest(base, rule) else {
                    continue;
                };
                if rest.starts_with('[') {
                    let Some(arbitrary_properties) = rule.arbitrary else {
                        continue;
                    };
                    match parse_arbitrary_value(rest) {
                        Some(value) => {
                            return Ok((rule.index, instantiate(arbitrary_properties, &value)));
                        }
                        None => {
                            saw_bad_arbitrary = true;
                            continue;
                        }
                    }
                }
                match table.get(category, rest) {
                    Some(value) => return Ok((rule.index, instantiate(properties, value))),
                    None => {
                        if let Some(value) = opacity_modified(category, rest, table) {
                            return Ok((rule.index, instantiate(properties, &value)));
                        }
                        saw_token_miss = true;
                        continue;
                    }
                }
            }
        }
    }

    if saw_bad_arbitrary {
        Err(UnmatchedReason::ArbitraryValueSyntax)
    } else if saw_token_miss {
        Err(UnmatchedReason::UnknownToken)
    } else {
        Err(UnmatchedReason::UnknownUtility)
    }
}

/// Resolves a `token/NN` opacity modifier against a color token.
///
/// Only the color category takes modifiers (`w-1/2` stays an unknown
/// token); the modifier must be an integer percentage 0..=100.
fn opacity_modified(category: &str, rest: &str, table: &TokenTable) -> Option<String> {
    if category != "colors" {
        return None;
    }
    let (name, modifier) = rest.rsplit_once('/')?;
    if modifier.is_empty() || !modifier.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let percent: u32 = modifier.parse().ok().filter(|p| *p <= 100)?;
    let value = table.get(category, name)?;
    Some(format!("color-mix(in srgb, {value} {percent}%, transparent)"))
}

/// The part of `base` after a themed rule's stem: `DEFAULT` for the bare
/// stem, the dash-separated remainder otherwise.
fn themed_rest<'a>(base: &'a str, rule: &RuleDefinition) -> Option<&'a str> {
    if base == rule.stem {
        return Some("DEFAULT");
    }
    base.strip_prefix(rule.stem)?.strip_prefix('-')
}

fn instantiate_static(decls: &[(&str, &str)]) -> Vec<String> {
    decls
        .iter()
        .map(|(property, value)| format!("{property}: {value}"))
        .collect()
}

fn instantiate(properties: &[&str], value: &str) -> Vec<String> {
    properties
        .iter()
        .map(|property| format!("{property}: {value}"))
        .collect()
}

/// Validates a bracketed arbitrary value and returns the literal CSS value.
///
/// Requirements: the whole remainder is one balanced `[...]` group,
/// non-empty, without whitespace or unbalanced parentheses. Underscores
/// decode to spaces so multi-word values survive extraction.
fn parse_arbitrary_value(input: &str) -> Option<String> {
    let (rest, content) = bracketed(input).ok()?;
    if !rest.is_empty() || content.is_empty() {
        return None;
    }
    if content.chars().any(char::is_whitespace) {
        return None;
    }
    let mut paren_depth = 0_i32;
    for c in content.chars() {
        match c {
            '(' => paren_depth += 1,
            ')' => {
                paren_depth -= 1;
                if paren_depth < 0 {
                    return None;
                }
            }
            _ => {}
        }
    }
    if paren_depth != 0 {
        return None;
    }
    Some(content.replace('_', " "))
}

fn bracketed(input: &str) -> IResult<&str, &str> {
    delimited(char('['), balanced_brackets, char(']'))(input)
}

fn balanced_brackets(input: &str) -> IResult<&str, &str> {
    recognize(many0(alt((
        take_while1(|c: char| c != '[' && c != ']'),
        recognize(delimited(char('['), balanced_brackets, char(']'))),
    ))))(input)
}

/// Escapes a raw class name for use in a CSS selector.
///
/// A selector ident may not start with a bare digit, so a leading digit
/// is hex-escaped: `2xl:flex` becomes `\32 xl\:flex`.
fn escape_class(class: &str) -> String {
    let mut escaped = String::with_capacity(class.len() + 8);
    for (i, c) in class.char_indices() {
        if i == 0 && c.is_ascii_digit() {
            escaped.push_str("\\3");
            escaped.push(c);
            escaped.push(' ');
        } else if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            escaped.push(c);
        } else {
            escaped.push('\\');
            escaped.push(c);
        }
    }
    escaped
}
