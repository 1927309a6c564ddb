//! Adapter from flat replay spans to the nested rows the trace panel draws.

use crate::record::ReplaySpan;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceRow {
    pub depth: usize,
    pub kind: String,
    pub description: String,
    pub start_ms: u64,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceView {
    pub start_ms: u64,
    pub end_ms: u64,
    pub rows: Vec<TraceRow>,
}

impl TraceView {
    pub fn duration_ms(&self) -> u64 {
        self.end_ms.saturating_sub(self.start_ms)
    }

    pub fn max_depth(&self) -> usize {
        self.rows.iter().map(|row| row.depth).max().unwrap_or(0)
    }
}

/// Orders spans by start time (longer span first on ties) and nests every
/// span under the closest earlier span whose interval contains it.
/// Partially overlapping spans become siblings.
pub fn project_spans_into_trace(spans: &[ReplaySpan]) -> TraceView {
    let mut ordered = spans.iter().collect::<Vec<_>>();
    ordered.sort_by(|left, right| {
        left.start_ms
            .cmp(&right.start_ms)
            .then_with(|| right.end_ms.cmp(&left.end_ms))
    });

    let mut open_ends: Vec<u64> = Vec::new();
    let mut rows = Vec::with_capacity(ordered.len());
    for span in ordered {
        let end_ms = span.end_ms.max(span.start_ms);
        while open_ends.last().is_some_and(|open_end| *open_end < end_ms) {
            open_ends.pop();
        }
        rows.push(TraceRow {
            depth: open_ends.len(),
            kind: span.kind.clone(),
            description: span.description.clone(),
            start_ms: span.start_ms,
            duration_ms: span.duration_ms(),
        });
        open_ends.push(end_ms);
    }

    let start_ms = spans.iter().map(|span| span.start_ms).min().unwrap_or(0);
    let end_ms = spans
        .iter()
        .map(|span| span.end_ms.max(span.start_ms))
        .max()
        .unwrap_or(start_ms);
    TraceView {
        start_ms,
        end_ms,
        rows,
    }
}
