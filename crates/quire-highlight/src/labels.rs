//! Entity label display names and base colors.

use std::collections::HashMap;

/// Color for labels missing from the table.
pub const DEFAULT_ENTITY_COLOR: &str = "#9e9e9e";

/// Built-in labels: (label, display name, color).
const BUILTIN_LABELS: &[(&str, &str, &str)] = &[
    ("PER", "Person", "#e57373"),
    ("PERSON", "Person", "#e57373"),
    ("LOC", "Location", "#64b5f6"),
    ("GPE", "Geopolitical entity", "#4db6ac"),
    ("ORG", "Organization", "#81c784"),
    ("DATE", "Date", "#ba68c8"),
    ("EVENT", "Event", "#f06292"),
    ("MISC", "Miscellaneous", "#ffb74d"),
];

/// Display name and color of one label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelStyle {
    /// Human-readable name shown for the label.
    pub name: String,
    /// Base color, `#rrggbb`.
    pub color: String,
}

impl LabelStyle {
    /// Creates a label style.
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Lookup table from raw entity labels to their display style.
#[derive(Debug, Clone)]
pub struct LabelTable {
    /// Styles keyed by raw label.
    styles: HashMap<String, LabelStyle>,
    /// Color for unknown labels.
    default_color: String,
}

impl Default for LabelTable {
    fn default() -> Self {
        let styles = BUILTIN_LABELS
            .iter()
            .map(|(label, name, color)| (label.to_string(), LabelStyle::new(*name, *color)))
            .collect();
        Self {
            styles,
            default_color: DEFAULT_ENTITY_COLOR.to_string(),
        }
    }
}

impl LabelTable {
    /// Creates an empty table; every label falls back to `default_color`.
    pub fn empty(default_color: impl Into<String>) -> Self {
        Self {
            styles: HashMap::new(),
            default_color: default_color.into(),
        }
    }

    /// Adds or replaces the style of `label`.
    pub fn insert(&mut self, label: impl Into<String>, style: LabelStyle) {
        self.styles.insert(label.into(), style);
    }

    /// Sets the fallback color.
    pub fn set_default_color(&mut self, color: impl Into<String>) {
        self.default_color = color.into();
    }

    /// Looks up a label, trying an upper-cased match before falling back to the
    /// raw label text and the default color.
    pub fn style(&self, label: &str) -> LabelStyle {
        self.styles
            .get(label)
            .or_else(|| self.styles.get(&label.to_ascii_uppercase()))
            .cloned()
            .unwrap_or_else(|| LabelStyle::new(label, self.default_color.clone()))
    }

    /// Labels and styles, sorted by label.
    pub fn entries(&self) -> Vec<(&str, &LabelStyle)> {
        let mut entries: Vec<(&str, &LabelStyle)> = self
            .styles
            .iter()
            .map(|(label, style)| (label.as_str(), style))
            .collect();
        entries.sort_by_key(|(label, _)| *label);
        entries
    }

    /// The fallback color.
    pub fn default_color(&self) -> &str {
        &self.default_color
    }
}
