//! Half-open intervals and interval fusion.

use serde::{Deserialize, Serialize};

/// A half-open interval `[start, end)` over character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Inclusive start offset.
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
}

impl Span {
    /// Creates a span. An `end` before `start` yields an empty span at `start`.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Number of offsets covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True if the span covers nothing.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Clamps both ends to `limit`.
    pub fn clip(self, limit: usize) -> Self {
        Self::new(self.start.min(limit), self.end.min(limit))
    }

    /// True if the two spans share at least one offset.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Grows the span by `amount` on both sides, clamped to `[0, limit]`.
    pub fn widen(self, amount: usize, limit: usize) -> Self {
        Self::new(
            self.start.saturating_sub(amount),
            self.end.saturating_add(amount).min(limit),
        )
    }
}

/// Sorts spans by start and fuses each into its predecessor when the gap
/// between them is less than `gap`.
///
/// Overlapping spans always fuse. With `gap == 0` only overlapping spans fuse;
/// with `gap == 1` adjacent spans fuse as well. The sort is stable, so spans
/// with equal starts keep their input order.
pub fn fuse_within(mut spans: Vec<Span>, gap: usize) -> Vec<Span> {
    if spans.is_empty() {
        return spans;
    }

    spans.sort_by_key(|s| s.start);

    let mut fused = Vec::with_capacity(spans.len());
    let mut current = spans[0];

    for span in spans.into_iter().skip(1) {
        let distance = span.start.saturating_sub(current.end);
        if span.start < current.end || distance < gap {
            current.end = current.end.max(span.end);
        } else {
            fused.push(current);
            current = span;
        }
    }
    fused.push(current);

    fused
}
