//! Resolved configuration consumed by the engine.
//!
//! The engine never reads configuration files itself; the caller hands it a
//! fully constructed [`Config`]. The types derive [`serde::Deserialize`] so
//! that callers can map them from whatever on-disk format they use, and the
//! accepted shapes mirror the conventional config artifact:
//!
//! ```json
//! {
//!     "darkMode": "class",
//!     "content": ["./index.html", "./src/**/*.rs"],
//!     "theme": { "extend": { "colors": { "brand": { "blue": "#4fc3f7" } } } },
//!     "plugins": []
//! }
//! ```
//!
//! A `Config` is immutable once built: the pipeline derives a
//! [`TokenTable`](crate::theme::TokenTable) and a
//! [`RuleLibrary`](crate::rules::RuleLibrary) from it exactly once per run.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::theme::TokenNode;

/// Dark-mode strategy for the `dark:` variant.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DarkMode {
    /// Wrap dark rules in `@media (prefers-color-scheme: dark)`.
    #[default]
    Media,
    /// Guard dark rules with an ancestor class selector, `.dark` unless a
    /// custom selector is given.
    Class { selector: Option<String> },
    /// No `dark:` variant is registered at all.
    Disabled,
}

impl DarkMode {
    /// The ancestor selector used by the `class` strategy.
    pub fn class_selector(&self) -> Option<&str> {
        match self {
            DarkMode::Class { selector } => Some(selector.as_deref().unwrap_or(".dark")),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for DarkMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Accepted shapes: "media", "class", false, ["class", ".custom"].
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Flag(bool),
            Name(String),
            WithSelector(Vec<String>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Flag(true) => Ok(DarkMode::Media),
            Repr::Flag(false) => Ok(DarkMode::Disabled),
            Repr::Name(name) => match name.as_str() {
                "media" => Ok(DarkMode::Media),
                "class" => Ok(DarkMode::Class { selector: None }),
                other => Err(serde::de::Error::custom(format!(
                    "unknown dark-mode strategy: {other}"
                ))),
            },
            Repr::WithSelector(parts) => match parts.as_slice() {
                [name] if name.as_str() == "class" => Ok(DarkMode::Class { selector: None }),
                [name, selector] if name.as_str() == "class" => Ok(DarkMode::Class {
                    selector: Some(selector.clone()),
                }),
                _ => Err(serde::de::Error::custom(
                    "dark-mode list form must be [\"class\"] or [\"class\", selector]",
                )),
            },
        }
    }
}

/// Theme token mappings: a base layer plus an `extend` overlay.
///
/// Categories present in `base` replace the built-in defaults wholesale;
/// `extend` entries merge on top, winning on key collision and adding new
/// names without removing siblings.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ThemeConfig {
    #[serde(default)]
    pub extend: BTreeMap<String, TokenNode>,
    #[serde(flatten)]
    pub base: BTreeMap<String, TokenNode>,
}

/// The resolved configuration object handed to the build pipeline.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Dark-mode strategy for the `dark:` variant.
    pub dark_mode: DarkMode,
    /// Ordered content glob patterns, resolved against the project root.
    pub content: Vec<String>,
    /// Theme base values plus `extend` overrides.
    pub theme: ThemeConfig,
    /// Opaque plugin list. Forwarded by the caller's tooling; the core
    /// engine neither inspects nor rejects it.
    pub plugins: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dark_mode(json: &str) -> DarkMode {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn dark_mode_accepts_all_config_shapes() {
        assert_eq!(dark_mode("\"media\""), DarkMode::Media);
        assert_eq!(dark_mode("\"class\""), DarkMode::Class { selector: None });
        assert_eq!(dark_mode("false"), DarkMode::Disabled);
        assert_eq!(
            dark_mode("[\"class\", \"[data-theme=dark]\"]"),
            DarkMode::Class {
                selector: Some("[data-theme=dark]".to_string())
            }
        );
    }

    #[test]
    fn dark_mode_rejects_unknown_strategy() {
        assert!(serde_json::from_str::<DarkMode>("\"auto\"").is_err());
    }

    #[test]
    fn class_selector_defaults_to_dark() {
        let mode = DarkMode::Class { selector: None };
        assert_eq!(mode.class_selector(), Some(".dark"));
        assert_eq!(DarkMode::Media.class_selector(), None);
    }

    #[test]
    fn theme_config_splits_base_and_extend() {
        let theme: ThemeConfig = serde_json::from_str(
            r##"{
                "spacing": { "gutter": "2rem" },
                "extend": { "colors": { "brand": { "blue": "#4fc3f7" } } }
            }"##,
        )
        .unwrap();

        assert!(theme.base.contains_key("spacing"));
        assert!(!theme.base.contains_key("extend"));
        assert!(theme.extend.contains_key("colors"));
    }
}
