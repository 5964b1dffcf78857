//! Stylesheet assembly: deduplicated, deterministically ordered CSS text.
//!
//! Ordering is required for cascade correctness, not aesthetics: rules
//! sort by the rule definition's declaration index, then by variant depth
//! (bare rules before varianted ones, so a `hover:` rule is never
//! overridden by a later-declared base rule of lower specificity), then by
//! first-seen candidate order as the final tie-break.

use std::collections::HashSet;
use std::fmt::Write;

use crate::matcher::MatchedRule;

/// Serializes matched rules into a stylesheet.
///
/// Two candidates that resolved to textually identical rules (same
/// wrappers, selector, and declarations) emit one rule. The input is not
/// mutated; the first-seen occurrence wins the tie-break position.
pub fn assemble(matches: &[MatchedRule]) -> String {
    let mut seen = HashSet::new();
    let mut ordered: Vec<(usize, &MatchedRule)> = Vec::new();
    for (first_seen, rule) in matches.iter().enumerate() {
        let identity = (
            rule.media.clone(),
            rule.selector.clone(),
            rule.declarations.clone(),
        );
        if seen.insert(identity) {
            ordered.push((first_seen, rule));
        }
    }

    ordered.sort_by_key(|(first_seen, rule)| (rule.rule_index, rule.variant_depth, *first_seen));

    let mut css = String::new();
    for (_, rule) in &ordered {
        write_rule(&mut css, rule);
    }
    css
}

fn write_rule(css: &mut String, rule: &MatchedRule) {
    let depth = rule.media.len();
    for (level, query) in rule.media.iter().enumerate() {
        let _ = writeln!(css, "{}@media {} {{", indent(level), query);
    }
    let _ = writeln!(css, "{}{} {{", indent(depth), rule.selector);
    for declaration in &rule.declarations {
        let _ = writeln!(css, "{}{};", indent(depth + 1), declaration);
    }
    let _ = writeln!(css, "{}}}", indent(depth));
    for level in (0..depth).rev() {
        let _ = writeln!(css, "{}}}", indent(level));
    }
}

fn indent(level: usize) -> String {
    "  ".repeat(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(
        class: &str,
        declarations: &[&str],
        media: &[&str],
        rule_index: usize,
        variant_depth: usize,
    ) -> MatchedRule {
        MatchedRule {
            class: class.to_string(),
            selector: format!(".{class}"),
            declarations: declarations.iter().map(|d| d.to_string()).collect(),
            media: media.iter().map(|m| m.to_string()).collect(),
            rule_index,
            variant_depth,
        }
    }

    #[test]
    fn identical_rules_emit_once() {
        let matched = vec![
            rule("text-brand-orange", &["color: #ffb74d"], &[], 40, 0),
            rule("text-brand-orange", &["color: #ffb74d"], &[], 40, 0),
        ];
        let css = assemble(&matched);
        assert_eq!(css.matches("color: #ffb74d;").count(), 1);
    }

    #[test]
    fn base_rules_precede_their_variants() {
        let matched = vec![
            rule("hover:flex", &["display: flex"], &[], 3, 1),
            rule("flex", &["display: flex"], &[], 3, 0),
        ];
        let css = assemble(&matched);
        let base = css.find(".flex {").unwrap();
        let varianted = css.find(".hover:flex").unwrap();
        assert!(base < varianted);
    }

    #[test]
    fn declaration_index_dominates_ordering() {
        let matched = vec![
            rule("later", &["margin: 1rem"], &[], 30, 0),
            rule("earlier", &["padding: 1rem"], &[], 22, 0),
        ];
        let css = assemble(&matched);
        assert!(css.find(".earlier").unwrap() < css.find(".later").unwrap());
    }

    #[test]
    fn first_seen_order_breaks_ties() {
        let matched = vec![
            rule("p-4", &["padding: 1rem"], &[], 22, 0),
            rule("p-2", &["padding: 0.5rem"], &[], 22, 0),
        ];
        let css = assemble(&matched);
        assert!(css.find(".p-4").unwrap() < css.find(".p-2").unwrap());
    }

    #[test]
    fn media_wrappers_nest_outermost_first() {
        let matched = vec![rule(
            "md:dark:flex",
            &["display: flex"],
            &["(min-width: 768px)", "(prefers-color-scheme: dark)"],
            3,
            2,
        )];
        let css = assemble(&matched);
        let expected = "@media (min-width: 768px) {\n  @media (prefers-color-scheme: dark) {\n    .md:dark:flex {\n      display: flex;\n    }\n  }\n}\n";
        assert_eq!(css, expected);
    }

    #[test]
    fn assemble_never_mutates_input() {
        let matched = vec![rule("flex", &["display: flex"], &[], 3, 0)];
        let snapshot = matched.clone();
        let _ = assemble(&matched);
        assert_eq!(matched, snapshot);
    }
}
