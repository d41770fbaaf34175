//! DOM binder: projects theme state onto the themed root element.
//!
//! The root's class list and `data-color-scheme` attribute are derived
//! entirely from [`ThemeState`]. Only the binder writes them, and a projection
//! replaces the whole set at once so the root never carries two variant classes.

use std::collections::BTreeMap;

use crate::store::ThemeState;

/// Marker class present while any console variant is active.
pub const CONSOLE_CLASS: &str = "console-theme";

/// Attribute mirroring the active color-scheme key.
pub const COLOR_SCHEME_ATTR: &str = "data-color-scheme";

/// Class and attribute set of the themed root.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RootAttributes {
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
}

impl RootAttributes {
    /// The attribute set mandated for `state`.
    pub fn for_state(state: &ThemeState) -> Self {
        let mut classes = Vec::new();
        if let Some(variant) = state.theme.variant() {
            classes.push(CONSOLE_CLASS.to_string());
            classes.push(variant.css_class().to_string());
        }
        if let Some(alert) = state.alert_condition.css_class() {
            classes.push(alert.to_string());
        }

        let mut attributes = BTreeMap::new();
        attributes.insert(
            COLOR_SCHEME_ATTR.to_string(),
            state.color_scheme.as_str().to_string(),
        );

        Self {
            classes,
            attributes,
        }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Space-separated class list for the `class` attribute.
    pub fn class_string(&self) -> String {
        self.classes.join(" ")
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn color_scheme(&self) -> &str {
        self.attribute(COLOR_SCHEME_ATTR).unwrap_or_default()
    }
}

/// Whether the console stylesheet has been brought in.
///
/// Activation is one-way; the stylesheet stays loaded after leaving the console.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConsoleAssets {
    #[default]
    Dormant,
    Active,
}

/// Result of projecting a state onto the root.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Projection {
    /// The root's classes or attributes changed.
    pub changed: bool,
    /// The console stylesheet was activated by this projection.
    pub assets_activated: bool,
}

/// Sole writer of the themed root.
#[derive(Clone, Debug, Default)]
pub struct DomBinder {
    root: RootAttributes,
    assets: ConsoleAssets,
    mutations: u64,
}

impl DomBinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> &RootAttributes {
        &self.root
    }

    pub fn console_assets(&self) -> ConsoleAssets {
        self.assets
    }

    /// Number of projections that actually changed the root.
    pub fn mutation_count(&self) -> u64 {
        self.mutations
    }

    pub fn project(&mut self, state: &ThemeState) -> Projection {
        let mut projection = Projection::default();

        if state.theme.is_console() && self.assets == ConsoleAssets::Dormant {
            self.assets = ConsoleAssets::Active;
            projection.assets_activated = true;
            tracing::debug!("Console assets activated");
        }

        let next = RootAttributes::for_state(state);
        if next != self.root {
            self.root = next;
            self.mutations += 1;
            projection.changed = true;
        }

        projection
    }
}
