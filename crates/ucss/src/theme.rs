//! Theme resolution: nested design tokens into a flat, queryable table.
//!
//! A theme is a nested mapping per category (`colors`, `spacing`, ...).
//! Resolution flattens each category into dash-joined token names, so
//! `colors.brand.blue` becomes the `colors` entry named `brand-blue`, and
//! merges the `extend` overlay on top of the base:
//!
//! - an extend entry for an existing `(category, name)` pair overrides it;
//! - an extend entry for a new name is added without removing siblings.
//!
//! ## Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use ucss::theme::{resolve, TokenNode};
//!
//! let mut brand = BTreeMap::new();
//! brand.insert("blue".to_string(), TokenNode::Value("#4fc3f7".to_string()));
//! let mut colors = BTreeMap::new();
//! colors.insert("brand".to_string(), TokenNode::Group(brand));
//! let mut extend = BTreeMap::new();
//! extend.insert("colors".to_string(), TokenNode::Group(colors));
//!
//! let table = resolve(&BTreeMap::new(), &extend).unwrap();
//! assert_eq!(table.get("colors", "brand-blue"), Some("#4fc3f7"));
//! ```

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::config::ThemeConfig;
use crate::error::ConfigError;

/// One node of a nested theme mapping: a leaf value or a named group.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TokenNode {
    Value(String),
    Number(f64),
    Group(BTreeMap<String, TokenNode>),
}

impl TokenNode {
    /// Convenience constructor for a leaf value.
    pub fn value(text: &str) -> Self {
        TokenNode::Value(text.to_string())
    }
}

/// Flat token table: `(category, name) -> CSS value`.
///
/// Read-only once resolved; the matcher shares it across workers without
/// locking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenTable {
    categories: HashMap<String, HashMap<String, String>>,
}

impl TokenTable {
    /// Looks up a token value.
    pub fn get(&self, category: &str, name: &str) -> Option<&str> {
        self.categories
            .get(category)
            .and_then(|tokens| tokens.get(name))
            .map(String::as_str)
    }

    /// Inserts a token, replacing any previous value for the same key.
    pub fn insert(&mut self, category: &str, name: &str, value: &str) {
        self.categories
            .entry(category.to_string())
            .or_default()
            .insert(name.to_string(), value.to_string());
    }

    /// Returns a new table with `overlay` merged on top of `self`.
    ///
    /// Same-key overlay entries win; new names are added; categories absent
    /// from the overlay pass through unchanged. Extending with an empty
    /// table is the identity (resolution is idempotent).
    pub fn extended(&self, overlay: &TokenTable) -> TokenTable {
        let mut merged = self.clone();
        for (category, tokens) in &overlay.categories {
            let target = merged.categories.entry(category.clone()).or_default();
            for (name, value) in tokens {
                target.insert(name.clone(), value.clone());
            }
        }
        merged
    }

    /// Total number of tokens across all categories.
    pub fn len(&self) -> usize {
        self.categories.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Merges a base theme and an extend overlay into a flat [`TokenTable`].
///
/// Pure function over its inputs. Fails with [`ConfigError`] if any leaf
/// cannot be coerced to a CSS-legal value (non-finite number, empty string,
/// control characters).
pub fn resolve(
    base: &BTreeMap<String, TokenNode>,
    extend: &BTreeMap<String, TokenNode>,
) -> Result<TokenTable, ConfigError> {
    let base_table = flatten_theme(base)?;
    let extend_table = flatten_theme(extend)?;
    Ok(base_table.extended(&extend_table))
}

/// Resolves a [`ThemeConfig`] against the built-in defaults.
///
/// Categories present in the config's base layer replace the corresponding
/// default category wholesale; `extend` merges on top.
pub fn resolve_config(theme: &ThemeConfig) -> Result<TokenTable, ConfigError> {
    let mut base = default_theme().clone();
    for (category, node) in &theme.base {
        base.insert(category.clone(), node.clone());
    }
    resolve(&base, &theme.extend)
}

fn flatten_theme(theme: &BTreeMap<String, TokenNode>) -> Result<TokenTable, ConfigError> {
    let mut table = TokenTable::default();
    for (category, node) in theme {
        let mut path = Vec::new();
        flatten_node(category, node, &mut path, &mut table)?;
    }
    Ok(table)
}

fn flatten_node(
    category: &str,
    node: &TokenNode,
    path: &mut Vec<String>,
    table: &mut TokenTable,
) -> Result<(), ConfigError> {
    match node {
        TokenNode::Group(children) => {
            for (key, child) in children {
                // `DEFAULT` names the group itself rather than adding a
                // path segment, so `rounded` can resolve without a suffix.
                if key == "DEFAULT" {
                    let name = token_name(path);
                    let value = leaf_value(category, path, key, child)?;
                    table.insert(category, &name, &value);
                } else {
                    path.push(key.clone());
                    flatten_node(category, child, path, table)?;
                    path.pop();
                }
            }
            Ok(())
        }
        leaf => {
            let name = token_name(path);
            let value = leaf_value(category, path, "", leaf)?;
            table.insert(category, &name, &value);
            Ok(())
        }
    }
}

fn token_name(path: &[String]) -> String {
    if path.is_empty() {
        "DEFAULT".to_string()
    } else {
        path.join("-")
    }
}

fn leaf_value(
    category: &str,
    path: &[String],
    key: &str,
    node: &TokenNode,
) -> Result<String, ConfigError> {
    let describe = || {
        let mut full = vec![category.to_string()];
        full.extend(path.iter().cloned());
        if !key.is_empty() {
            full.push(key.to_string());
        }
        full.join(".")
    };

    match node {
        TokenNode::Value(text) => {
            if text.is_empty() {
                return Err(ConfigError::InvalidTokenValue {
                    path: describe(),
                    reason: "empty string".to_string(),
                });
            }
            if text.chars().any(char::is_control) {
                return Err(ConfigError::InvalidTokenValue {
                    path: describe(),
                    reason: "contains control characters".to_string(),
                });
            }
            Ok(text.clone())
        }
        TokenNode::Number(number) => {
            if !number.is_finite() {
                return Err(ConfigError::InvalidTokenValue {
                    path: describe(),
                    reason: "not a finite number".to_string(),
                });
            }
            Ok(format_number(*number))
        }
        TokenNode::Group(_) => Err(ConfigError::InvalidTokenValue {
            path: describe(),
            reason: "expected a value, found a nested group".to_string(),
        }),
    }
}

fn format_number(number: f64) -> String {
    if number == number.trunc() {
        format!("{}", number as i64)
    } else {
        format!("{number}")
    }
}

/// The built-in default theme.
///
/// Deliberately compact: a neutral palette, the quarter-rem spacing scale,
/// and the scales the rule catalog binds to. Project configs replace or
/// extend these per category.
pub fn default_theme() -> &'static BTreeMap<String, TokenNode> {
    static DEFAULT: Lazy<BTreeMap<String, TokenNode>> = Lazy::new(build_default_theme);
    &DEFAULT
}

fn build_default_theme() -> BTreeMap<String, TokenNode> {
    let mut theme = BTreeMap::new();
    theme.insert("colors".to_string(), default_colors());
    theme.insert("spacing".to_string(), default_spacing());
    theme.insert(
        "borderRadius".to_string(),
        group(&[
            ("DEFAULT", "0.25rem"),
            ("sm", "0.125rem"),
            ("md", "0.375rem"),
            ("lg", "0.5rem"),
            ("xl", "0.75rem"),
            ("full", "9999px"),
        ]),
    );
    theme.insert(
        "boxShadow".to_string(),
        group(&[
            (
                "DEFAULT",
                "0 1px 3px 0 rgb(0 0 0 / 0.1), 0 1px 2px -1px rgb(0 0 0 / 0.1)",
            ),
            ("sm", "0 1px 2px 0 rgb(0 0 0 / 0.05)"),
            (
                "md",
                "0 4px 6px -1px rgb(0 0 0 / 0.1), 0 2px 4px -2px rgb(0 0 0 / 0.1)",
            ),
            ("none", "none"),
        ]),
    );
    theme.insert(
        "opacity".to_string(),
        group(&[
            ("0", "0"),
            ("5", "0.05"),
            ("10", "0.1"),
            ("25", "0.25"),
            ("50", "0.5"),
            ("75", "0.75"),
            ("90", "0.9"),
            ("95", "0.95"),
            ("100", "1"),
        ]),
    );
    theme.insert(
        "letterSpacing".to_string(),
        group(&[
            ("tighter", "-0.05em"),
            ("tight", "-0.025em"),
            ("normal", "0em"),
            ("wide", "0.025em"),
            ("wider", "0.05em"),
            ("widest", "0.1em"),
        ]),
    );
    theme.insert(
        "lineHeight".to_string(),
        group(&[
            ("none", "1"),
            ("tight", "1.25"),
            ("snug", "1.375"),
            ("normal", "1.5"),
            ("relaxed", "1.625"),
            ("loose", "2"),
        ]),
    );
    theme.insert("gridTemplateColumns".to_string(), default_grid_columns());
    theme.insert(
        "transitionDuration".to_string(),
        group(&[
            ("75", "75ms"),
            ("100", "100ms"),
            ("150", "150ms"),
            ("200", "200ms"),
            ("300", "300ms"),
            ("500", "500ms"),
            ("700", "700ms"),
            ("1000", "1000ms"),
        ]),
    );
    theme
}

fn default_colors() -> TokenNode {
    let mut colors = BTreeMap::new();
    colors.insert("transparent".to_string(), TokenNode::value("transparent"));
    colors.insert("white".to_string(), TokenNode::value("#ffffff"));
    colors.insert("black".to_string(), TokenNode::value("#000000"));
    colors.insert(
        "slate".to_string(),
        group(&[
            ("50", "#f8fafc"),
            ("100", "#f1f5f9"),
            ("200", "#e2e8f0"),
            ("300", "#cbd5e1"),
            ("400", "#94a3b8"),
            ("500", "#64748b"),
            ("600", "#475569"),
            ("700", "#334155"),
            ("800", "#1e293b"),
            ("900", "#0f172a"),
        ]),
    );
    colors.insert(
        "gray".to_string(),
        group(&[
            ("50", "#f9fafb"),
            ("100", "#f3f4f6"),
            ("200", "#e5e7eb"),
            ("300", "#d1d5db"),
            ("400", "#9ca3af"),
            ("500", "#6b7280"),
            ("600", "#4b5563"),
            ("700", "#374151"),
            ("800", "#1f2937"),
            ("900", "#111827"),
        ]),
    );
    TokenNode::Group(colors)
}

fn default_spacing() -> TokenNode {
    let mut spacing = BTreeMap::new();
    spacing.insert("0".to_string(), TokenNode::value("0px"));
    spacing.insert("px".to_string(), TokenNode::value("1px"));

    // Quarter-rem scale: the key is the number of quarter-rems, so `4`
    // is 1rem. Half steps up to 4, then the conventional sparse steps.
    let half_steps = [1_u32, 2, 3, 4, 5, 6, 7, 8];
    for halves in half_steps {
        let key = halves as f64 / 2.0;
        spacing.insert(format_scale(key), rem_value(key * 0.25));
    }
    let whole_steps = [
        5_u32, 6, 7, 8, 9, 10, 11, 12, 14, 16, 20, 24, 28, 32, 36, 40, 44, 48, 52, 56, 60, 64, 72,
        80, 96,
    ];
    for key in whole_steps {
        spacing.insert(format!("{key}"), rem_value(key as f64 * 0.25));
    }
    TokenNode::Group(spacing)
}

fn format_scale(key: f64) -> String {
    if key == key.trunc() {
        format!("{}", key as u32)
    } else {
        format!("{key}")
    }
}

fn rem_value(rem: f64) -> TokenNode {
    if rem == rem.trunc() {
        TokenNode::Value(format!("{}rem", rem as u32))
    } else {
        TokenNode::Value(format!("{rem}rem"))
    }
}

fn default_grid_columns() -> TokenNode {
    let mut columns = BTreeMap::new();
    columns.insert("none".to_string(), TokenNode::value("none"));
    for n in 1..=12_u32 {
        columns.insert(
            format!("{n}"),
            TokenNode::Value(format!("repeat({n}, minmax(0, 1fr))")),
        );
    }
    TokenNode::Group(columns)
}

fn group(entries: &[(&str, &str)]) -> TokenNode {
    TokenNode::Group(
        entries
            .iter()
            .map(|(name, value)| (name.to_string(), TokenNode::value(value)))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brand_extend() -> BTreeMap<String, TokenNode> {
        let mut brand = BTreeMap::new();
        brand.insert("dark".to_string(), TokenNode::value("#121212"));
        brand.insert("blue".to_string(), TokenNode::value("#4fc3f7"));
        brand.insert("orange".to_string(), TokenNode::value("#ffb74d"));
        let mut colors = BTreeMap::new();
        colors.insert("brand".to_string(), TokenNode::Group(brand));
        let mut extend = BTreeMap::new();
        extend.insert("colors".to_string(), TokenNode::Group(colors));
        extend
    }

    #[test]
    fn nested_groups_flatten_to_dash_joined_names() {
        let table = resolve(&BTreeMap::new(), &brand_extend()).unwrap();
        assert_eq!(table.get("colors", "brand-blue"), Some("#4fc3f7"));
        assert_eq!(table.get("colors", "brand-orange"), Some("#ffb74d"));
    }

    #[test]
    fn extend_wins_on_collision_and_keeps_siblings() {
        let mut base_colors = BTreeMap::new();
        base_colors.insert("accent".to_string(), TokenNode::value("#ff0000"));
        base_colors.insert("muted".to_string(), TokenNode::value("#888888"));
        let mut base = BTreeMap::new();
        base.insert("colors".to_string(), TokenNode::Group(base_colors));

        let mut extend_colors = BTreeMap::new();
        extend_colors.insert("accent".to_string(), TokenNode::value("#00ff00"));
        extend_colors.insert("fresh".to_string(), TokenNode::value("#0000ff"));
        let mut extend = BTreeMap::new();
        extend.insert("colors".to_string(), TokenNode::Group(extend_colors));

        let table = resolve(&base, &extend).unwrap();
        assert_eq!(table.get("colors", "accent"), Some("#00ff00"));
        assert_eq!(table.get("colors", "muted"), Some("#888888"));
        assert_eq!(table.get("colors", "fresh"), Some("#0000ff"));
    }

    #[test]
    fn resolution_is_idempotent() {
        let mut base = BTreeMap::new();
        base.insert(
            "colors".to_string(),
            group(&[("ink", "#111111"), ("paper", "#fefefe")]),
        );
        let table = resolve(&base, &brand_extend()).unwrap();
        assert_eq!(table.extended(&TokenTable::default()), table);
    }

    #[test]
    fn numbers_coerce_to_css_values() {
        let mut base = BTreeMap::new();
        base.insert(
            "zIndex".to_string(),
            TokenNode::Group(BTreeMap::from([
                ("modal".to_string(), TokenNode::Number(40.0)),
                ("half".to_string(), TokenNode::Number(0.5)),
            ])),
        );
        let table = resolve(&base, &BTreeMap::new()).unwrap();
        assert_eq!(table.get("zIndex", "modal"), Some("40"));
        assert_eq!(table.get("zIndex", "half"), Some("0.5"));
    }

    #[test]
    fn malformed_values_are_config_errors() {
        let mut base = BTreeMap::new();
        base.insert(
            "colors".to_string(),
            TokenNode::Group(BTreeMap::from([(
                "bad".to_string(),
                TokenNode::Number(f64::INFINITY),
            )])),
        );
        let err = resolve(&base, &BTreeMap::new()).unwrap_err();
        assert!(err.to_string().contains("colors.bad"));

        let mut empty = BTreeMap::new();
        empty.insert("colors".to_string(), TokenNode::value(""));
        assert!(resolve(&empty, &BTreeMap::new()).is_err());
    }

    #[test]
    fn default_key_names_the_group_itself() {
        let mut radius = BTreeMap::new();
        radius.insert("DEFAULT".to_string(), TokenNode::value("0.25rem"));
        radius.insert("lg".to_string(), TokenNode::value("0.5rem"));
        let mut base = BTreeMap::new();
        base.insert("borderRadius".to_string(), TokenNode::Group(radius));

        let table = resolve(&base, &BTreeMap::new()).unwrap();
        assert_eq!(table.get("borderRadius", "DEFAULT"), Some("0.25rem"));
        assert_eq!(table.get("borderRadius", "lg"), Some("0.5rem"));
    }

    #[test]
    fn config_base_replaces_default_category() {
        use crate::config::ThemeConfig;

        let mut base = BTreeMap::new();
        base.insert("colors".to_string(), group(&[("ink", "#111111")]));
        let theme = ThemeConfig {
            base,
            extend: BTreeMap::new(),
        };
        let table = resolve_config(&theme).unwrap();
        assert_eq!(table.get("colors", "ink"), Some("#111111"));
        // The default palette for the replaced category is gone...
        assert_eq!(table.get("colors", "slate-900"), None);
        // ...but untouched categories keep their defaults.
        assert_eq!(table.get("spacing", "4"), Some("1rem"));
    }
}
