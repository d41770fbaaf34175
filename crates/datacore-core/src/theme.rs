//! Theme identity: the standard theme and the two console variants.

use serde::{Deserialize, Serialize};

/// Top-level visual identity of the document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    Standard,
    ClassicConsole,
    ModernConsole,
}

/// The two sub-kinds of the console theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConsoleVariant {
    Classic,
    Modern,
}

impl ConsoleVariant {
    /// Class added to the themed root next to `console-theme`.
    pub fn css_class(&self) -> &'static str {
        match self {
            ConsoleVariant::Classic => "classic",
            ConsoleVariant::Modern => "modern",
        }
    }
}

impl Theme {
    /// Persisted value and parse key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Standard => "standard",
            Theme::ClassicConsole => "classic-console",
            Theme::ModernConsole => "modern-console",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Theme::Standard => "Standard",
            Theme::ClassicConsole => "LCARS Classic",
            Theme::ModernConsole => "LCARS Modern",
        }
    }

    pub fn all() -> &'static [Theme] {
        &[Theme::Standard, Theme::ClassicConsole, Theme::ModernConsole]
    }

    /// Parse a persisted value. Unknown or missing values become `Standard`.
    pub fn coerce(value: &str) -> Theme {
        match value {
            "classic-console" => Theme::ClassicConsole,
            "modern-console" => Theme::ModernConsole,
            _ => Theme::Standard,
        }
    }

    pub fn variant(&self) -> Option<ConsoleVariant> {
        match self {
            Theme::Standard => None,
            Theme::ClassicConsole => Some(ConsoleVariant::Classic),
            Theme::ModernConsole => Some(ConsoleVariant::Modern),
        }
    }

    pub fn is_console(&self) -> bool {
        self.variant().is_some()
    }

    /// Next theme for the header toggle.
    pub fn cycle(&self) -> Theme {
        match self {
            Theme::Standard => Theme::ClassicConsole,
            Theme::ClassicConsole => Theme::ModernConsole,
            Theme::ModernConsole => Theme::Standard,
        }
    }
}

/// Global condition projected into frame borders and pulse effects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertCondition {
    #[default]
    Nominal,
    Caution,
    Critical,
}

impl AlertCondition {
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            AlertCondition::Nominal => None,
            AlertCondition::Caution => Some("alert-caution"),
            AlertCondition::Critical => Some("alert-critical"),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AlertCondition::Nominal => "CONDITION GREEN",
            AlertCondition::Caution => "YELLOW ALERT",
            AlertCondition::Critical => "RED ALERT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_known_values() {
        for theme in Theme::all() {
            assert_eq!(Theme::coerce(theme.as_str()), *theme);
        }
    }

    #[test]
    fn test_coerce_unknown_is_standard() {
        assert_eq!(Theme::coerce("lcars"), Theme::Standard);
        assert_eq!(Theme::coerce(""), Theme::Standard);
    }

    #[test]
    fn test_serde_matches_persisted_keys() {
        let json = serde_json::to_string(&Theme::ModernConsole).unwrap();
        assert_eq!(json, "\"modern-console\"");
    }

    #[test]
    fn test_cycle_visits_every_theme() {
        let mut theme = Theme::Standard;
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(theme);
            theme = theme.cycle();
        }
        assert_eq!(theme, Theme::Standard);
        assert_eq!(seen, Theme::all());
    }

    #[test]
    fn test_alert_classes() {
        assert_eq!(AlertCondition::Nominal.css_class(), None);
        assert_eq!(AlertCondition::Critical.css_class(), Some("alert-critical"));
    }
}
