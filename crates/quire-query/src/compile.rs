//! Filter compiler.
//!
//! Compiles a [`FilterMap`] into a [`Clause`] tree and renders it. The compiler
//! is stateless; every call receives the complete form state.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Clause, DateRange, Encoding, FilterEntry, FilterMap, Operator, QueryError};

/// Field the synthesized date range clause targets unless configured otherwise.
pub const DEFAULT_DATE_FIELD: &str = "date";

/// Time appended to the lower date bound.
const DAY_START: &str = "T00:00:00Z";

/// Time appended to the upper date bound.
const DAY_END: &str = "T23:59:59Z";

/// How filter entries are turned into a query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    /// Positive entries only, all joined with AND.
    Simple,
    /// Operator buckets, custom grouping and negation.
    #[default]
    Advanced,
    /// A user-written query string passed through untouched.
    Raw,
}

impl FromStr for QueryMode {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "advanced" => Ok(Self::Advanced),
            "raw" => Ok(Self::Raw),
            _ => Err(QueryError::UnknownMode(s.to_string())),
        }
    }
}

/// Everything a single compile call needs.
#[derive(Debug, Clone)]
pub struct CompileRequest<'a> {
    /// Per-field filter entries.
    pub filters: &'a FilterMap,
    /// Explicit date range; takes precedence over the reserved filter keys.
    pub date_range: Option<&'a DateRange>,
    /// Compilation mode.
    pub mode: QueryMode,
    /// Query used verbatim in raw mode.
    pub raw_query: Option<&'a str>,
    /// Keep positive entries in typed order instead of bucketing by operator.
    pub custom_grouping: bool,
    /// Field targeted by the date range clause.
    pub date_field: &'a str,
}

impl<'a> CompileRequest<'a> {
    /// Creates an advanced-mode request with standard grouping.
    pub fn new(filters: &'a FilterMap) -> Self {
        Self {
            filters,
            date_range: None,
            mode: QueryMode::default(),
            raw_query: None,
            custom_grouping: false,
            date_field: DEFAULT_DATE_FIELD,
        }
    }

    /// Sets the compilation mode.
    pub fn mode(mut self, mode: QueryMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enables or disables custom grouping.
    pub fn custom_grouping(mut self, enabled: bool) -> Self {
        self.custom_grouping = enabled;
        self
    }

    /// Sets the explicit date range.
    pub fn date_range(mut self, range: Option<&'a DateRange>) -> Self {
        self.date_range = range;
        self
    }

    /// Sets the raw query string.
    pub fn raw_query(mut self, query: Option<&'a str>) -> Self {
        self.raw_query = query;
        self
    }

    /// Sets the date field name.
    pub fn date_field(mut self, field: &'a str) -> Self {
        self.date_field = field;
        self
    }

    /// The trimmed raw query, if raw mode applies.
    fn raw(&self) -> Option<&'a str> {
        if self.mode != QueryMode::Raw {
            return None;
        }
        self.raw_query.map(str::trim).filter(|q| !q.is_empty())
    }
}

/// Compiles filters into a readable query string.
///
/// Returns an empty string when no entry survives.
pub fn compile(request: &CompileRequest<'_>) -> String {
    match request.raw() {
        Some(raw) => raw.to_string(),
        None => build_clause(request).render(Encoding::Plain),
    }
}

/// Compiles filters into a percent-encoded query string for transport.
///
/// Grouping is identical to [`compile`]; only field names and literals are
/// encoded. In raw mode the whole trimmed query is encoded.
pub fn compile_encoded(request: &CompileRequest<'_>) -> String {
    match request.raw() {
        Some(raw) => urlencoding::encode(raw).into_owned(),
        None => build_clause(request).render(Encoding::Percent),
    }
}

/// Builds the clause tree for a request.
///
/// Raw mode without a usable raw query compiles as advanced.
pub fn build_clause(request: &CompileRequest<'_>) -> Clause {
    let mut clauses: Vec<Clause> = match request.mode {
        QueryMode::Simple => request
            .filters
            .fields()
            .flat_map(|(field, entries)| simple_terms(field, entries))
            .collect(),
        QueryMode::Advanced | QueryMode::Raw => request
            .filters
            .fields()
            .filter_map(|(field, entries)| field_clause(field, entries, request.custom_grouping))
            .collect(),
    };

    let bounds = request
        .date_range
        .filter(|range| range.is_complete())
        .cloned()
        .or_else(|| request.filters.date_bounds());
    if let Some(range) = bounds {
        clauses.push(date_clause(request.date_field, &range));
    }

    Clause::all(clauses)
}

/// Simple mode: every active positive entry as a bare term.
fn simple_terms(field: &str, entries: &[FilterEntry]) -> Vec<Clause> {
    entries
        .iter()
        .filter(|e| e.is_active() && !e.negated)
        .map(|e| Clause::term(field, e.term()))
        .collect()
}

/// Advanced mode: the combined positive/negative clause for one field.
fn field_clause(field: &str, entries: &[FilterEntry], custom_grouping: bool) -> Option<Clause> {
    let (negative, positive): (Vec<&FilterEntry>, Vec<&FilterEntry>) = entries
        .iter()
        .filter(|e| e.is_active())
        .partition(|e| e.negated);

    let positive = if custom_grouping {
        sequence_clause(field, &positive)
    } else {
        bucket_clause(field, &positive)
    };
    let negative = negative_clause(field, &negative);

    match (positive, negative) {
        (Some(pos), Some(neg)) => Some(Clause::All(vec![pos, neg]).grouped()),
        (pos, neg) => pos.or(neg),
    }
}

/// Standard grouping: an AND bucket and an OR bucket, joined with AND.
fn bucket_clause(field: &str, entries: &[&FilterEntry]) -> Option<Clause> {
    let (and_bucket, or_bucket): (Vec<&FilterEntry>, Vec<&FilterEntry>) = entries
        .iter()
        .copied()
        .partition(|e| e.operator() == Operator::And);

    let mut buckets = Vec::with_capacity(2);
    if !and_bucket.is_empty() {
        buckets.push(Clause::all(terms(field, &and_bucket)).grouped());
    }
    if !or_bucket.is_empty() {
        buckets.push(Clause::any(terms(field, &or_bucket)).grouped());
    }

    match buckets.len() {
        0 => None,
        _ => Some(Clause::all(buckets)),
    }
}

/// Custom grouping: entries in typed order, each carrying its own operator.
fn sequence_clause(field: &str, entries: &[&FilterEntry]) -> Option<Clause> {
    match entries {
        [] => None,
        [single] => Some(Clause::term(field, single.term())),
        _ => Some(
            Clause::Sequence(
                entries
                    .iter()
                    .map(|e| (e.operator(), Clause::term(field, e.term())))
                    .collect(),
            )
            .grouped(),
        ),
    }
}

/// Negated entries ORed together under a single NOT.
fn negative_clause(field: &str, entries: &[&FilterEntry]) -> Option<Clause> {
    if entries.is_empty() {
        return None;
    }
    Some(Clause::not(Clause::any(terms(field, entries)).grouped()))
}

/// Field terms for a list of entries.
fn terms(field: &str, entries: &[&FilterEntry]) -> Vec<Clause> {
    entries
        .iter()
        .map(|e| Clause::term(field, e.term()))
        .collect()
}

/// The inclusive whole-day range clause.
fn date_clause(field: &str, range: &DateRange) -> Clause {
    Clause::Range {
        field: field.to_string(),
        from: format!("{}{DAY_START}", range.min.trim()),
        to: format!("{}{DAY_END}", range.max.trim()),
    }
}
