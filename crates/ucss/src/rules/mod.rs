//! The rule library: utility and variant generators.
//!
//! The library is a fixed catalog of [`RuleDefinition`]s plus the variant
//! set derived from the dark-mode strategy. Each definition carries an
//! explicit integer index assigned at construction; the assembler sorts by
//! that index, never by container iteration order, so output order is
//! stable across runs.
//!
//! ## Submodules
//!
//! - [`catalog`]: the built-in utility definitions
//! - [`variants`]: variant prefixes and their selector/media wrappers
//!
//! ## Lookup
//!
//! [`RuleLibrary::lookup`] returns every definition whose stem could start
//! the given base token, in declaration order. The matcher tries them in
//! turn, so an exact static utility declared before a theme-bound one with
//! the same stem wins (`border` resolves to `border-width: 1px` while
//! `border-slate-200` falls through to the color rule).

pub mod catalog;
pub mod variants;

use std::collections::HashMap;

pub use variants::{VariantDefinition, VariantWrap};

use crate::config::DarkMode;
use crate::error::ConfigError;

/// How a utility produces its declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Literal utility: a fixed declaration list, no token needed.
    Static(&'static [(&'static str, &'static str)]),
    /// Token-bound utility: the suffix after the stem names a token in
    /// `category`, and its value fills each property.
    Themed {
        category: &'static str,
        properties: &'static [&'static str],
    },
}

/// One utility-class generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleDefinition {
    /// Literal class-name prefix (`bg`, `p`, `flex-col`, ...).
    pub stem: &'static str,
    pub kind: RuleKind,
    /// Properties an arbitrary `[...]` value fills, or `None` if the
    /// utility does not accept arbitrary values.
    pub arbitrary: Option<&'static [&'static str]>,
    /// Declaration-order index; fixes cascade order deterministically.
    pub index: usize,
}

/// The frozen rule library shared by all matcher workers.
#[derive(Debug)]
pub struct RuleLibrary {
    rules: &'static [RuleDefinition],
    by_stem: HashMap<&'static str, Vec<usize>>,
    variants: HashMap<String, VariantDefinition>,
}

impl RuleLibrary {
    /// Builds the standard library for the given dark-mode strategy.
    pub fn standard(dark_mode: &DarkMode) -> Result<Self, ConfigError> {
        let rules = catalog::catalog();
        let mut by_stem: HashMap<&'static str, Vec<usize>> = HashMap::new();
        for rule in rules {
            by_stem.entry(rule.stem).or_default().push(rule.index);
        }

        let mut variants = HashMap::new();
        for variant in variants::standard_variants(dark_mode)? {
            variants.insert(variant.prefix.clone(), variant);
        }

        Ok(Self {
            rules,
            by_stem,
            variants,
        })
    }

    /// All definitions whose stem is the base token itself or a
    /// dash-terminated prefix of it, in declaration order.
    pub fn lookup(&self, base: &str) -> impl Iterator<Item = &RuleDefinition> {
        let mut indices = Vec::new();
        for stem in stem_prefixes(base) {
            if let Some(found) = self.by_stem.get(stem) {
                indices.extend_from_slice(found);
            }
        }
        indices.sort_unstable();
        indices.into_iter().map(|index| &self.rules[index])
    }

    /// Looks up a variant prefix (`dark`, `hover`, `md`, ...).
    pub fn variant(&self, prefix: &str) -> Option<&VariantDefinition> {
        self.variants.get(prefix)
    }

    /// Number of utility definitions in the library.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Candidate stems for a base token: the whole token plus every prefix
/// ending just before a `-`. Stops at the first `[`, since everything from
/// an arbitrary-value bracket onward is value, not stem.
fn stem_prefixes(base: &str) -> impl Iterator<Item = &str> {
    let scan_end = base.find('[').unwrap_or(base.len());
    let mut stems: Vec<&str> = base[..scan_end]
        .char_indices()
        .filter(|(_, c)| *c == '-')
        .map(|(i, _)| &base[..i])
        .collect();
    if scan_end == base.len() {
        stems.push(base);
    }
    stems.into_iter().filter(|stem| !stem.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> RuleLibrary {
        RuleLibrary::standard(&DarkMode::Media).unwrap()
    }

    #[test]
    fn lookup_orders_by_declaration_index() {
        let library = library();
        let hits: Vec<_> = library.lookup("border-slate-200").collect();
        assert!(hits.len() >= 2, "expected static and themed border rules");
        for pair in hits.windows(2) {
            assert!(pair[0].index < pair[1].index);
        }
    }

    #[test]
    fn lookup_unknown_stem_is_empty_not_an_error() {
        let library = library();
        assert_eq!(library.lookup("zork-7").count(), 0);
    }

    #[test]
    fn stem_prefixes_stop_at_brackets() {
        let stems: Vec<_> = stem_prefixes("p-[12px]").collect();
        assert_eq!(stems, vec!["p"]);

        let stems: Vec<_> = stem_prefixes("bg-brand-blue").collect();
        assert_eq!(stems, vec!["bg", "bg-brand", "bg-brand-blue"]);
    }

    #[test]
    fn dark_variant_follows_strategy() {
        let media = library();
        assert!(matches!(
            media.variant("dark").map(|v| &v.wrap),
            Some(VariantWrap::Media(_))
        ));

        let class = RuleLibrary::standard(&DarkMode::Class { selector: None }).unwrap();
        assert!(matches!(
            class.variant("dark").map(|v| &v.wrap),
            Some(VariantWrap::Ancestor(_))
        ));

        let disabled = RuleLibrary::standard(&DarkMode::Disabled).unwrap();
        assert!(disabled.variant("dark").is_none());
    }
}
