//! The built-in utility catalog.
//!
//! Declaration order here *is* cascade order: the assembler sorts matched
//! rules by the index assigned below. Keep axis utilities after their
//! shorthand (`p` before `px` before `pt`) so the more specific class wins
//! when both appear on an element.

use once_cell::sync::Lazy;

use super::{RuleDefinition, RuleKind};

/// The full catalog, built once per process.
pub fn catalog() -> &'static [RuleDefinition] {
    static CATALOG: Lazy<Vec<RuleDefinition>> = Lazy::new(build_catalog);
    &CATALOG
}

struct Builder {
    rules: Vec<RuleDefinition>,
}

impl Builder {
    fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Literal utility with fixed declarations.
    fn stat(&mut self, stem: &'static str, decls: &'static [(&'static str, &'static str)]) {
        self.push(stem, RuleKind::Static(decls), None);
    }

    /// Token-bound utility; arbitrary values fill the same properties.
    fn themed(
        &mut self,
        stem: &'static str,
        category: &'static str,
        properties: &'static [&'static str],
    ) {
        self.push(
            stem,
            RuleKind::Themed {
                category,
                properties,
            },
            Some(properties),
        );
    }

    /// Token-bound utility whose arbitrary form targets different
    /// properties (e.g. `text-slate-500` is a color but `text-[10px]` is a
    /// font size).
    fn themed_arb(
        &mut self,
        stem: &'static str,
        category: &'static str,
        properties: &'static [&'static str],
        arbitrary: &'static [&'static str],
    ) {
        self.push(
            stem,
            RuleKind::Themed {
                category,
                properties,
            },
            Some(arbitrary),
        );
    }

    fn push(&mut self, stem: &'static str, kind: RuleKind, arbitrary: Option<&'static [&'static str]>) {
        let index = self.rules.len();
        self.rules.push(RuleDefinition {
            stem,
            kind,
            arbitrary,
            index,
        });
    }
}

fn build_catalog() -> Vec<RuleDefinition> {
    let mut b = Builder::new();

    // Position
    b.stat("relative", &[("position", "relative")]);
    b.stat("absolute", &[("position", "absolute")]);
    b.stat("fixed", &[("position", "fixed")]);
    b.stat("sticky", &[("position", "sticky")]);
    b.stat("inset-0", &[("inset", "0px")]);
    b.stat("top-0", &[("top", "0px")]);
    b.stat("right-0", &[("right", "0px")]);
    b.stat("bottom-0", &[("bottom", "0px")]);
    b.stat("left-0", &[("left", "0px")]);

    // Display
    b.stat("block", &[("display", "block")]);
    b.stat("inline-block", &[("display", "inline-block")]);
    b.stat("inline-flex", &[("display", "inline-flex")]);
    b.stat("flex", &[("display", "flex")]);
    b.stat("grid", &[("display", "grid")]);
    b.stat("hidden", &[("display", "none")]);

    // Flexbox
    b.stat("flex-row", &[("flex-direction", "row")]);
    b.stat("flex-col", &[("flex-direction", "column")]);
    b.stat("flex-wrap", &[("flex-wrap", "wrap")]);
    b.stat("flex-1", &[("flex", "1 1 0%")]);
    b.stat("flex-none", &[("flex", "none")]);
    b.stat("flex-shrink-0", &[("flex-shrink", "0")]);
    b.stat("items-start", &[("align-items", "flex-start")]);
    b.stat("items-center", &[("align-items", "center")]);
    b.stat("items-stretch", &[("align-items", "stretch")]);
    b.stat("justify-start", &[("justify-content", "flex-start")]);
    b.stat("justify-center", &[("justify-content", "center")]);
    b.stat("justify-between", &[("justify-content", "space-between")]);
    b.stat("justify-end", &[("justify-content", "flex-end")]);

    // Grid
    b.themed("grid-cols", "gridTemplateColumns", &["grid-template-columns"]);
    b.themed("gap", "spacing", &["gap"]);
    b.themed("gap-x", "spacing", &["column-gap"]);
    b.themed("gap-y", "spacing", &["row-gap"]);

    // Padding: shorthand first, then axes, then sides.
    b.themed("p", "spacing", &["padding"]);
    b.themed("px", "spacing", &["padding-left", "padding-right"]);
    b.themed("py", "spacing", &["padding-top", "padding-bottom"]);
    b.themed("pt", "spacing", &["padding-top"]);
    b.themed("pr", "spacing", &["padding-right"]);
    b.themed("pb", "spacing", &["padding-bottom"]);
    b.themed("pl", "spacing", &["padding-left"]);

    // Margin
    b.stat("mx-auto", &[("margin-left", "auto"), ("margin-right", "auto")]);
    b.themed("m", "spacing", &["margin"]);
    b.themed("mx", "spacing", &["margin-left", "margin-right"]);
    b.themed("my", "spacing", &["margin-top", "margin-bottom"]);
    b.themed("mt", "spacing", &["margin-top"]);
    b.themed("mr", "spacing", &["margin-right"]);
    b.themed("mb", "spacing", &["margin-bottom"]);
    b.themed("ml", "spacing", &["margin-left"]);

    // Sizing
    b.stat("w-full", &[("width", "100%")]);
    b.stat("w-screen", &[("width", "100vw")]);
    b.themed("w", "spacing", &["width"]);
    b.stat("h-full", &[("height", "100%")]);
    b.stat("h-screen", &[("height", "100vh")]);
    b.themed("h", "spacing", &["height"]);
    b.stat("min-h-screen", &[("min-height", "100vh")]);
    b.stat("max-w-none", &[("max-width", "none")]);
    b.stat("max-w-full", &[("max-width", "100%")]);

    // Colors
    b.themed("bg", "colors", &["background-color"]);

    // Typography: static sizes before the color-bound `text` rule, so
    // `text-sm` never reaches the token table.
    b.stat(
        "text-xs",
        &[("font-size", "0.75rem"), ("line-height", "1rem")],
    );
    b.stat(
        "text-sm",
        &[("font-size", "0.875rem"), ("line-height", "1.25rem")],
    );
    b.stat(
        "text-base",
        &[("font-size", "1rem"), ("line-height", "1.5rem")],
    );
    b.stat(
        "text-lg",
        &[("font-size", "1.125rem"), ("line-height", "1.75rem")],
    );
    b.stat(
        "text-xl",
        &[("font-size", "1.25rem"), ("line-height", "1.75rem")],
    );
    b.stat(
        "text-2xl",
        &[("font-size", "1.5rem"), ("line-height", "2rem")],
    );
    b.stat("text-left", &[("text-align", "left")]);
    b.stat("text-center", &[("text-align", "center")]);
    b.stat("text-right", &[("text-align", "right")]);
    b.themed_arb("text", "colors", &["color"], &["font-size"]);

    b.stat(
        "font-sans",
        &[("font-family", "ui-sans-serif, system-ui, sans-serif")],
    );
    b.stat(
        "font-mono",
        &[("font-family", "ui-monospace, SFMono-Regular, Menlo, monospace")],
    );
    b.stat("font-medium", &[("font-weight", "500")]);
    b.stat("font-semibold", &[("font-weight", "600")]);
    b.stat("font-bold", &[("font-weight", "700")]);
    b.stat("uppercase", &[("text-transform", "uppercase")]);
    b.stat(
        "truncate",
        &[
            ("overflow", "hidden"),
            ("text-overflow", "ellipsis"),
            ("white-space", "nowrap"),
        ],
    );
    b.themed("tracking", "letterSpacing", &["letter-spacing"]);
    b.themed("leading", "lineHeight", &["line-height"]);

    // Borders: static widths first, then the color-bound rule.
    b.stat("border", &[("border-width", "1px")]);
    b.stat("border-t", &[("border-top-width", "1px")]);
    b.stat("border-r", &[("border-right-width", "1px")]);
    b.stat("border-b", &[("border-bottom-width", "1px")]);
    b.stat("border-l", &[("border-left-width", "1px")]);
    b.themed("border", "colors", &["border-color"]);
    b.themed("rounded", "borderRadius", &["border-radius"]);

    // Effects
    b.themed("shadow", "boxShadow", &["box-shadow"]);
    b.themed("opacity", "opacity", &["opacity"]);

    // Interactivity
    b.stat("cursor-pointer", &[("cursor", "pointer")]);
    b.stat("select-none", &[("user-select", "none")]);
    b.stat("resize-none", &[("resize", "none")]);
    b.stat(
        "outline-none",
        &[
            ("outline", "2px solid transparent"),
            ("outline-offset", "2px"),
        ],
    );

    // Overflow
    b.stat("overflow-hidden", &[("overflow", "hidden")]);
    b.stat("overflow-auto", &[("overflow", "auto")]);
    b.stat("overflow-x-auto", &[("overflow-x", "auto")]);
    b.stat("overflow-y-auto", &[("overflow-y", "auto")]);

    // Transitions
    b.stat("transition-none", &[("transition-property", "none")]);
    b.stat(
        "transition-all",
        &[
            ("transition-property", "all"),
            ("transition-timing-function", "cubic-bezier(0.4, 0, 0.2, 1)"),
            ("transition-duration", "150ms"),
        ],
    );
    b.stat(
        "transition",
        &[
            (
                "transition-property",
                "color, background-color, border-color, opacity, box-shadow, transform",
            ),
            ("transition-timing-function", "cubic-bezier(0.4, 0, 0.2, 1)"),
            ("transition-duration", "150ms"),
        ],
    );
    b.themed("duration", "transitionDuration", &["transition-duration"]);

    b.rules
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexes_match_positions() {
        for (position, rule) in catalog().iter().enumerate() {
            assert_eq!(rule.index, position, "index drift at `{}`", rule.stem);
        }
    }

    #[test]
    fn shorthand_padding_precedes_axes_and_sides() {
        let find = |stem: &str| {
            catalog()
                .iter()
                .find(|rule| rule.stem == stem)
                .unwrap()
                .index
        };
        assert!(find("p") < find("px"));
        assert!(find("px") < find("pt"));
        assert!(find("m") < find("ml"));
    }

    #[test]
    fn border_width_is_declared_before_border_color() {
        let border_rules: Vec<_> = catalog()
            .iter()
            .filter(|rule| rule.stem == "border")
            .collect();
        assert_eq!(border_rules.len(), 2);
        assert!(matches!(border_rules[0].kind, RuleKind::Static(_)));
        assert!(matches!(border_rules[1].kind, RuleKind::Themed { .. }));
    }
}
