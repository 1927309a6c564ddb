//! Pure projections from a `ReplayRecord` into panel inputs.

use lens_dispatch::{ConfigError, DerivedInputCache};

use crate::record::{Breadcrumb, ReplayError, ReplayRecord, ReplaySpan};
use crate::tabs::{ReplayDomain, ReplayInput, ReplayInputId, TagRow};

pub fn console_breadcrumbs(record: &ReplayRecord) -> Vec<Breadcrumb> {
    let mut breadcrumbs = record
        .breadcrumbs
        .iter()
        .filter(|breadcrumb| breadcrumb.category == "console")
        .cloned()
        .collect::<Vec<_>>();
    breadcrumbs.sort_by_key(|breadcrumb| breadcrumb.offset_ms);
    breadcrumbs
}

pub fn network_spans(record: &ReplayRecord) -> Vec<ReplaySpan> {
    spans_where(record, ReplaySpan::is_network)
}

pub fn memory_spans(record: &ReplayRecord) -> Vec<ReplaySpan> {
    spans_where(record, ReplaySpan::is_memory)
}

pub fn non_memory_spans(record: &ReplayRecord) -> Vec<ReplaySpan> {
    spans_where(record, |span| !span.is_memory())
}

pub fn issue_errors(record: &ReplayRecord) -> Vec<ReplayError> {
    let mut errors = record.errors.clone();
    errors.sort_by_key(|error| error.offset_ms);
    errors
}

/// One row per tag key; values deduplicated and sorted.
pub fn tag_rows(record: &ReplayRecord) -> Vec<TagRow> {
    record
        .tags
        .iter()
        .map(|(key, values)| {
            let mut values = values.clone();
            values.sort();
            values.dedup();
            TagRow {
                key: key.clone(),
                values,
            }
        })
        .collect()
}

fn spans_where(record: &ReplayRecord, keep: impl Fn(&ReplaySpan) -> bool) -> Vec<ReplaySpan> {
    let mut spans = record
        .spans()
        .iter()
        .filter(|span| keep(*span))
        .cloned()
        .collect::<Vec<_>>();
    spans.sort_by_key(|span| span.start_ms);
    spans
}

/// Builds the cache with every replay projection registered. Span-based
/// inputs stay unavailable until the span payload has arrived.
pub fn build_replay_cache() -> Result<DerivedInputCache<ReplayDomain>, ConfigError> {
    DerivedInputCache::<ReplayDomain>::builder()
        .projection(ReplayInputId::ConsoleBreadcrumbs, |record| {
            ReplayInput::Breadcrumbs(console_breadcrumbs(record))
        })
        .projection_when(
            ReplayInputId::NetworkSpans,
            ReplayRecord::spans_loaded,
            |record| ReplayInput::Spans(network_spans(record)),
        )
        .projection_when(
            ReplayInputId::MemorySpans,
            ReplayRecord::spans_loaded,
            |record| ReplayInput::Spans(memory_spans(record)),
        )
        .projection_when(
            ReplayInputId::NonMemorySpans,
            ReplayRecord::spans_loaded,
            |record| ReplayInput::Spans(non_memory_spans(record)),
        )
        .projection(ReplayInputId::IssueErrors, |record| {
            ReplayInput::Errors(issue_errors(record))
        })
        .projection(ReplayInputId::TagRows, |record| {
            ReplayInput::Tags(tag_rows(record))
        })
        .build()
}
