//! Palette registry for the standard theme.
//!
//! A static, ordered catalog of color schemes grouped by family. The `key` of
//! each scheme is the value persisted under `color-scheme` and mirrored to the
//! `data-color-scheme` attribute on the themed root.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether a scheme is built on a light or dark base.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteKind {
    Light,
    Dark,
}

impl PaletteKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaletteKind::Light => "light",
            PaletteKind::Dark => "dark",
        }
    }
}

/// A named color scheme with its preview swatches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    pub key: &'static str,
    pub family_label: &'static str,
    pub display_label: &'static str,
    pub kind: PaletteKind,
    /// `[base, accent1, accent2, accent3, accent4]`
    pub swatches: [&'static str; 5],
    /// Raised surface color (cards, sidebar)
    pub surface: &'static str,
    /// Primary text color on `base`
    pub text: &'static str,
    /// Secondary text color
    pub subtext: &'static str,
}

impl Palette {
    pub fn base(&self) -> &'static str {
        self.swatches[0]
    }

    pub fn accents(&self) -> &[&'static str] {
        &self.swatches[1..]
    }

    /// CSS custom properties this scheme assigns, in declaration order.
    pub fn css_variables(&self) -> Vec<(&'static str, &'static str)> {
        vec![
            ("--color-bg", self.swatches[0]),
            ("--color-surface", self.surface),
            ("--color-text", self.text),
            ("--color-subtext", self.subtext),
            ("--color-accent", self.swatches[1]),
            ("--color-info", self.swatches[2]),
            ("--color-success", self.swatches[3]),
            ("--color-warning", self.swatches[4]),
        ]
    }
}

/// A family of related schemes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaletteFamily {
    pub label: &'static str,
    pub schemes: &'static [Palette],
}

const CATPPUCCIN: &[Palette] = &[
    Palette {
        key: "mocha",
        family_label: "Catppuccin",
        display_label: "Mocha",
        kind: PaletteKind::Dark,
        swatches: ["#1e1e2e", "#cba6f7", "#89b4fa", "#a6e3a1", "#fab387"],
        surface: "#313244",
        text: "#cdd6f4",
        subtext: "#a6adc8",
    },
    Palette {
        key: "macchiato",
        family_label: "Catppuccin",
        display_label: "Macchiato",
        kind: PaletteKind::Dark,
        swatches: ["#24273a", "#c6a0f6", "#8aadf4", "#a6da95", "#f5a97f"],
        surface: "#363a4f",
        text: "#cad3f5",
        subtext: "#a5adcb",
    },
    Palette {
        key: "frappe",
        family_label: "Catppuccin",
        display_label: "Frappé",
        kind: PaletteKind::Dark,
        swatches: ["#303446", "#ca9ee6", "#8caaee", "#a6d189", "#ef9f76"],
        surface: "#414559",
        text: "#c6d0f5",
        subtext: "#a5adce",
    },
    Palette {
        key: "latte",
        family_label: "Catppuccin",
        display_label: "Latte",
        kind: PaletteKind::Light,
        swatches: ["#eff1f5", "#8839ef", "#1e66f5", "#40a02b", "#fe640b"],
        surface: "#ccd0da",
        text: "#4c4f69",
        subtext: "#6c6f85",
    },
];

const ROSE_PINE: &[Palette] = &[
    Palette {
        key: "rose-pine",
        family_label: "Rose Pine",
        display_label: "Rosé Pine",
        kind: PaletteKind::Dark,
        swatches: ["#191724", "#c4a7e7", "#9ccfd8", "#ebbcba", "#f6c177"],
        surface: "#1f1d2e",
        text: "#e0def4",
        subtext: "#908caa",
    },
    Palette {
        key: "rose-pine-dawn",
        family_label: "Rose Pine",
        display_label: "Rosé Pine Dawn",
        kind: PaletteKind::Light,
        swatches: ["#faf4ed", "#907aa9", "#56949f", "#d7827e", "#ea9d34"],
        surface: "#fffaf3",
        text: "#575279",
        subtext: "#797593",
    },
];

const OTHERS: &[Palette] = &[
    Palette {
        key: "dracula",
        family_label: "Others",
        display_label: "Dracula",
        kind: PaletteKind::Dark,
        swatches: ["#282a36", "#bd93f9", "#ff79c6", "#50fa7b", "#8be9fd"],
        surface: "#44475a",
        text: "#f8f8f2",
        subtext: "#6272a4",
    },
    Palette {
        key: "gruvbox-dark",
        family_label: "Others",
        display_label: "Gruvbox Dark",
        kind: PaletteKind::Dark,
        swatches: ["#282828", "#fb4934", "#b8bb26", "#fabd2f", "#83a598"],
        surface: "#3c3836",
        text: "#ebdbb2",
        subtext: "#a89984",
    },
    Palette {
        key: "tokyo-night",
        family_label: "Others",
        display_label: "Tokyo Night",
        kind: PaletteKind::Dark,
        swatches: ["#1a1b26", "#7aa2f7", "#bb9af7", "#9ece6a", "#e0af68"],
        surface: "#24283b",
        text: "#c0caf5",
        subtext: "#565f89",
    },
    Palette {
        key: "solarized-dark",
        family_label: "Others",
        display_label: "Solarized Dark",
        kind: PaletteKind::Dark,
        swatches: ["#002b36", "#268bd2", "#2aa198", "#859900", "#b58900"],
        surface: "#073642",
        text: "#93a1a1",
        subtext: "#657b83",
    },
    Palette {
        key: "solarized-light",
        family_label: "Others",
        display_label: "Solarized Light",
        kind: PaletteKind::Light,
        swatches: ["#fdf6e3", "#268bd2", "#2aa198", "#859900", "#b58900"],
        surface: "#eee8d5",
        text: "#586e75",
        subtext: "#839496",
    },
];

const FAMILIES: &[PaletteFamily] = &[
    PaletteFamily {
        label: "Catppuccin",
        schemes: CATPPUCCIN,
    },
    PaletteFamily {
        label: "Rose Pine",
        schemes: ROSE_PINE,
    },
    PaletteFamily {
        label: "Others",
        schemes: OTHERS,
    },
];

/// All families in display order.
pub fn families() -> &'static [PaletteFamily] {
    FAMILIES
}

/// All schemes, flattened in registry order.
pub fn all() -> impl Iterator<Item = &'static Palette> {
    FAMILIES.iter().flat_map(|f| f.schemes.iter())
}

/// The scheme used when nothing valid is persisted.
pub fn default_palette() -> &'static Palette {
    &CATPPUCCIN[0]
}

/// Find a scheme by key.
pub fn find(key: &str) -> Option<&'static Palette> {
    all().find(|p| p.key == key)
}

/// Find a scheme by key, falling back to the registry default.
pub fn lookup(key: &str) -> &'static Palette {
    find(key).unwrap_or_else(default_palette)
}

/// A validated color-scheme key. Never empty; always present in the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColorSchemeKey(&'static str);

impl ColorSchemeKey {
    /// Coerce any string to a registered key.
    pub fn coerce(key: &str) -> Self {
        Self(lookup(key).key)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    pub fn palette(&self) -> &'static Palette {
        lookup(self.0)
    }
}

impl Default for ColorSchemeKey {
    fn default() -> Self {
        Self(default_palette().key)
    }
}

impl fmt::Display for ColorSchemeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Stylesheet assigning each scheme's variables under its data attribute.
pub fn color_scheme_css() -> String {
    let mut css = String::new();
    for palette in all() {
        css.push_str(&format!("[data-color-scheme=\"{}\"] {{\n", palette.key));
        css.push_str(&format!("  color-scheme: {};\n", palette.kind.as_str()));
        for (name, value) in palette.css_variables() {
            css.push_str(&format!("  {}: {};\n", name, value));
        }
        css.push_str("}\n");
    }
    css
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_families_in_order() {
        let labels: Vec<_> = families().iter().map(|f| f.label).collect();
        assert_eq!(labels, vec!["Catppuccin", "Rose Pine", "Others"]);
    }

    #[test]
    fn test_all_keys_in_order() {
        let keys: Vec<_> = all().map(|p| p.key).collect();
        assert_eq!(
            keys,
            vec![
                "mocha",
                "macchiato",
                "frappe",
                "latte",
                "rose-pine",
                "rose-pine-dawn",
                "dracula",
                "gruvbox-dark",
                "tokyo-night",
                "solarized-dark",
                "solarized-light",
            ]
        );
    }

    #[test]
    fn test_unknown_key_falls_back_to_mocha() {
        assert_eq!(lookup("nord").key, "mocha");
        assert_eq!(lookup("").key, "mocha");
        assert_eq!(ColorSchemeKey::coerce("").as_str(), "mocha");
    }

    #[test]
    fn test_family_labels_match_members() {
        for family in families() {
            for scheme in family.schemes {
                assert_eq!(scheme.family_label, family.label);
                assert!(scheme.swatches.iter().all(|s| s.starts_with('#')));
            }
        }
    }

    #[test]
    fn test_light_schemes() {
        let light: Vec<_> = all()
            .filter(|p| p.kind == PaletteKind::Light)
            .map(|p| p.key)
            .collect();
        assert_eq!(light, vec!["latte", "rose-pine-dawn", "solarized-light"]);
    }

    #[test]
    fn test_css_keyed_by_attribute() {
        let css = color_scheme_css();
        assert!(css.contains("[data-color-scheme=\"latte\"]"));
        assert!(css.contains("--color-bg: #eff1f5;"));
        assert_eq!(css.matches("--color-accent").count(), all().count());
    }
}
