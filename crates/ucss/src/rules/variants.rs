//! Variant definitions: prefixes that change when or where a utility
//! applies.
//!
//! A variant wraps an already-matched rule. Media variants push an
//! `@media` wrapper; selector variants rewrite the rule's selector, either
//! by appending a pseudo-class or by prepending an ancestor. Variants
//! compose right-to-left so the leftmost prefix in the candidate becomes
//! the outermost wrapper: `md:dark:bg-brand-blue` with the `class`
//! strategy is the `.dark`-guarded rule inside the `md` media query.

use phf::phf_ordered_map;

use crate::config::DarkMode;
use crate::error::ConfigError;

/// Responsive breakpoints in ascending min-width order.
static BREAKPOINTS: phf::OrderedMap<&'static str, u32> = phf_ordered_map! {
    "sm" => 640u32,
    "md" => 768u32,
    "lg" => 1024u32,
    "xl" => 1280u32,
    "2xl" => 1536u32,
};

/// Pseudo-class state variants.
static PSEUDO_CLASSES: phf::OrderedMap<&'static str, &'static str> = phf_ordered_map! {
    "hover" => ":hover",
    "focus" => ":focus",
    "active" => ":active",
    "disabled" => ":disabled",
};

/// The selector/media transform a variant applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantWrap {
    /// Wrap the rule in `@media <condition>`.
    Media(String),
    /// Append a pseudo-class to the rule's selector.
    Pseudo(&'static str),
    /// Prepend an ancestor selector (includes its trailing space).
    Ancestor(String),
}

/// One variant generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantDefinition {
    /// The prefix token, without the trailing `:`.
    pub prefix: String,
    pub wrap: VariantWrap,
    /// Declaration-order index, stable across runs.
    pub index: usize,
}

/// Builds the standard variant set for a dark-mode strategy.
///
/// When dark mode is disabled no `dark` variant exists at all, so
/// `dark:`-prefixed candidates fall out of the variant chain and surface
/// as unknown-utility diagnostics.
pub fn standard_variants(dark_mode: &DarkMode) -> Result<Vec<VariantDefinition>, ConfigError> {
    let mut variants = Vec::new();
    let mut push = |prefix: &str, wrap: VariantWrap| {
        let index = variants.len();
        variants.push(VariantDefinition {
            prefix: prefix.to_string(),
            wrap,
            index,
        });
    };

    match dark_mode {
        DarkMode::Media => push(
            "dark",
            VariantWrap::Media("(prefers-color-scheme: dark)".to_string()),
        ),
        DarkMode::Class { .. } => {
            let selector = dark_mode.class_selector().unwrap_or(".dark");
            validate_selector(selector)?;
            push("dark", VariantWrap::Ancestor(format!("{selector} ")));
        }
        DarkMode::Disabled => {}
    }

    for (name, min_width) in BREAKPOINTS.entries() {
        push(
            name,
            VariantWrap::Media(format!("(min-width: {min_width}px)")),
        );
    }

    for (name, pseudo) in PSEUDO_CLASSES.entries() {
        push(name, VariantWrap::Pseudo(pseudo));
    }

    // Group interaction: applies when a `.group` ancestor is hovered.
    push("group-hover", VariantWrap::Ancestor(".group:hover ".to_string()));

    Ok(variants)
}

fn validate_selector(selector: &str) -> Result<(), ConfigError> {
    let valid = !selector.trim().is_empty()
        && !selector.contains(['{', '}', ';'])
        && !selector.chars().any(char::is_control);
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidDarkSelector(selector.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoints_ascend_and_keep_declaration_order() {
        let variants = standard_variants(&DarkMode::Disabled).unwrap();
        let widths: Vec<u32> = variants
            .iter()
            .filter_map(|v| match &v.wrap {
                VariantWrap::Media(query) => query
                    .strip_prefix("(min-width: ")
                    .and_then(|rest| rest.strip_suffix("px)"))
                    .and_then(|px| px.parse().ok()),
                _ => None,
            })
            .collect();
        assert_eq!(widths, vec![640, 768, 1024, 1280, 1536]);
        for (position, variant) in variants.iter().enumerate() {
            assert_eq!(variant.index, position);
        }
    }

    #[test]
    fn custom_dark_selector_is_validated() {
        let good = DarkMode::Class {
            selector: Some("[data-theme=dark]".to_string()),
        };
        let variants = standard_variants(&good).unwrap();
        assert_eq!(
            variants[0].wrap,
            VariantWrap::Ancestor("[data-theme=dark] ".to_string())
        );

        let bad = DarkMode::Class {
            selector: Some("".to_string()),
        };
        assert!(standard_variants(&bad).is_err());
    }
}
