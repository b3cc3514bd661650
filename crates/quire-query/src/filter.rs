//! Structured filter input.
//!
//! A [`FilterMap`] is what the search form hands over: for every field, the
//! ordered list of literals the user typed, each tagged with how it combines
//! with its neighbours.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::QueryError;

/// Reserved key holding the lower bound of the date range.
pub const MIN_DATE_KEY: &str = "min_date";

/// Reserved key holding the upper bound of the date range.
pub const MAX_DATE_KEY: &str = "max_date";

/// Boolean operator attached to a filter entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operator {
    /// Conjunction.
    #[default]
    And,
    /// Disjunction.
    Or,
}

impl Operator {
    /// The keyword emitted into query strings.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// One user-supplied literal for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterEntry {
    /// The literal value.
    pub value: String,
    /// How this entry combines with its neighbours (AND when unset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,
    /// Whether matching documents should be excluded.
    #[serde(default)]
    pub negated: bool,
}

impl FilterEntry {
    /// Creates a non-negated entry with no explicit operator.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            operator: None,
            negated: false,
        }
    }

    /// Creates an entry tagged `AND`.
    pub fn and(value: impl Into<String>) -> Self {
        Self::new(value).with_operator(Operator::And)
    }

    /// Creates an entry tagged `OR`.
    pub fn or(value: impl Into<String>) -> Self {
        Self::new(value).with_operator(Operator::Or)
    }

    /// Creates a negated entry.
    pub fn not(value: impl Into<String>) -> Self {
        Self {
            negated: true,
            ..Self::new(value)
        }
    }

    /// Sets the operator.
    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.operator = Some(operator);
        self
    }

    /// The operator, defaulting to `AND`.
    pub fn operator(&self) -> Operator {
        self.operator.unwrap_or_default()
    }

    /// The trimmed value.
    pub fn term(&self) -> &str {
        self.value.trim()
    }

    /// Blank entries are ignored everywhere.
    pub fn is_active(&self) -> bool {
        !self.term().is_empty()
    }
}

/// An inclusive calendar date range (`YYYY-MM-DD` bounds).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day included.
    pub min: String,
    /// Last day included.
    pub max: String,
}

impl DateRange {
    /// Creates a date range.
    pub fn new(min: impl Into<String>, max: impl Into<String>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }

    /// True if both bounds are non-blank.
    pub fn is_complete(&self) -> bool {
        !self.min.trim().is_empty() && !self.max.trim().is_empty()
    }
}

/// Field name to ordered filter entries, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterMap {
    /// Entries per field; insertion order is the output order.
    fields: IndexMap<String, Vec<FilterEntry>>,
}

impl FilterMap {
    /// Creates an empty filter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a filter map from its JSON form, keeping field order.
    pub fn from_json(json: &str) -> Result<Self, QueryError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Replaces all entries of `field`.
    pub fn insert(&mut self, field: impl Into<String>, entries: Vec<FilterEntry>) {
        self.fields.insert(field.into(), entries);
    }

    /// Appends one entry to `field`.
    pub fn push(&mut self, field: impl Into<String>, entry: FilterEntry) {
        self.fields.entry(field.into()).or_default().push(entry);
    }

    /// Entries of `field`, if present.
    pub fn get(&self, field: &str) -> Option<&[FilterEntry]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// Field filters in form order, excluding the reserved date keys.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &[FilterEntry])> {
        self.fields
            .iter()
            .filter(|(name, _)| !is_reserved(name))
            .map(|(name, entries)| (name.as_str(), entries.as_slice()))
    }

    /// The date range encoded under the reserved keys, if both bounds are set.
    pub fn date_bounds(&self) -> Option<DateRange> {
        let min = self.first_active(MIN_DATE_KEY)?;
        let max = self.first_active(MAX_DATE_KEY)?;
        Some(DateRange::new(min, max))
    }

    /// Terms to highlight in results: trimmed values of active, non-negated
    /// entries, de-duplicated case-insensitively in first-seen order.
    pub fn highlight_terms(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.fields()
            .flat_map(|(_, entries)| entries.iter())
            .filter(|e| e.is_active() && !e.negated)
            .map(FilterEntry::term)
            .filter(|term| seen.insert(term.to_lowercase()))
            .map(str::to_string)
            .collect()
    }

    /// First active value stored under `key`.
    fn first_active(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)?
            .iter()
            .find(|e| e.is_active())
            .map(FilterEntry::term)
    }
}

/// True for keys that feed the date range rather than a field filter.
fn is_reserved(name: &str) -> bool {
    name == MIN_DATE_KEY || name == MAX_DATE_KEY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_defaults_to_and() {
        assert_eq!(FilterEntry::new("x").operator(), Operator::And);
        assert_eq!(FilterEntry::or("x").operator(), Operator::Or);
    }

    #[test]
    fn blank_entries_are_inactive() {
        assert!(!FilterEntry::new("").is_active());
        assert!(!FilterEntry::new("   \t").is_active());
        assert!(FilterEntry::new(" x ").is_active());
    }

    #[test]
    fn from_json_preserves_field_order() {
        let filters = FilterMap::from_json(
            r#"{
                "title": [{"value": "treaty", "operator": "AND"}],
                "author": [{"value": "Kant", "operator": "AND", "negated": false}],
                "abstract": [{"value": "peace"}]
            }"#,
        )
        .unwrap();

        let names: Vec<&str> = filters.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["title", "author", "abstract"]);
        assert_eq!(filters.get("abstract").unwrap()[0].operator, None);
    }

    #[test]
    fn from_json_rejects_bad_operator() {
        let err = FilterMap::from_json(r#"{"title": [{"value": "x", "operator": "XOR"}]}"#);
        assert!(matches!(err, Err(QueryError::InvalidFilters(_))));
    }

    #[test]
    fn fields_skip_reserved_keys() {
        let mut filters = FilterMap::new();
        filters.push(MIN_DATE_KEY, FilterEntry::new("2020-01-01"));
        filters.push("title", FilterEntry::new("treaty"));
        filters.push(MAX_DATE_KEY, FilterEntry::new("2020-12-31"));

        let names: Vec<&str> = filters.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["title"]);
    }

    #[test]
    fn date_bounds_need_both_keys() {
        let mut filters = FilterMap::new();
        filters.push(MIN_DATE_KEY, FilterEntry::new("2020-01-01"));
        assert_eq!(filters.date_bounds(), None);

        filters.push(MAX_DATE_KEY, FilterEntry::new(" 2020-12-31 "));
        assert_eq!(
            filters.date_bounds(),
            Some(DateRange::new("2020-01-01", "2020-12-31"))
        );
    }

    #[test]
    fn highlight_terms_skip_negated_and_duplicates() {
        let mut filters = FilterMap::new();
        filters.push("title", FilterEntry::and(" Treaty "));
        filters.push("title", FilterEntry::not("draft"));
        filters.push("body", FilterEntry::or("treaty"));
        filters.push("body", FilterEntry::or("peace"));
        filters.push("body", FilterEntry::new(""));

        assert_eq!(filters.highlight_terms(), vec!["Treaty", "peace"]);
    }
}
