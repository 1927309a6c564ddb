//! Leptos SSR markup for the replay focus-area panels.

use anyhow::Result;
use leptos::prelude::*;
use lens_dispatch::{
    ConfigError, GatheredInputs, PanelDescriptor, PanelKey, PanelRegistry, ViewOutput,
};

use crate::playback::PlaybackContext;
use crate::tabs::{ReplayDomain, ReplayInputId, ReplayTab};
use crate::trace_adapter::project_spans_into_trace;

type ReplayInputs = GatheredInputs<ReplayDomain>;

fn bool_flag(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Registers one panel per `ReplayTab`, each declaring exactly the
/// projection it reads.
pub fn build_replay_registry() -> Result<PanelRegistry<ReplayDomain>, ConfigError> {
    let mut builder = PanelRegistry::<ReplayDomain>::builder();
    builder
        .register(
            PanelDescriptor::<ReplayDomain>::new(ReplayTab::Console, render_console_panel)
                .requires(ReplayInputId::ConsoleBreadcrumbs),
        )?
        .register(
            PanelDescriptor::<ReplayDomain>::new(ReplayTab::Network, render_network_panel)
                .requires(ReplayInputId::NetworkSpans),
        )?
        .register(
            PanelDescriptor::<ReplayDomain>::new(ReplayTab::Trace, render_trace_panel)
                .requires(ReplayInputId::NonMemorySpans),
        )?
        .register(
            PanelDescriptor::<ReplayDomain>::new(ReplayTab::Issues, render_issues_panel)
                .requires(ReplayInputId::IssueErrors),
        )?
        .register(
            PanelDescriptor::<ReplayDomain>::new(ReplayTab::Tags, render_tags_panel)
                .requires(ReplayInputId::TagRows),
        )?
        .register(
            PanelDescriptor::<ReplayDomain>::new(ReplayTab::Memory, render_memory_panel)
                .requires(ReplayInputId::MemorySpans),
        )?;
    builder.build()
}

/// Final HTML for one dispatch, including the loading and empty markers.
pub fn render_view_output(output: &ViewOutput<ReplayTab, String>) -> String {
    match output {
        ViewOutput::Rendered { output, .. } => output.clone(),
        ViewOutput::Placeholder => view! {
            <section id="lens-focus-area" data-focus-state="loading" aria-busy="true">
                <p id="lens-loading-placeholder">Loading replay data</p>
            </section>
        }
        .to_html(),
        ViewOutput::Empty => view! {
            <section id="lens-focus-area" data-focus-state="empty" aria-busy="false"></section>
        }
        .to_html(),
    }
}

pub fn render_console_panel(playback: &PlaybackContext, inputs: &ReplayInputs) -> Result<String> {
    let breadcrumbs = inputs
        .require(ReplayInputId::ConsoleBreadcrumbs)?
        .as_breadcrumbs()?;
    let row_count_value = breadcrumbs.len().to_string();
    let empty_hidden = bool_flag(!breadcrumbs.is_empty());
    let panel = view! {
        <section
            id="lens-console-panel"
            data-panel=ReplayTab::Console.as_str()
            data-row-count=row_count_value
        >
            <p id="lens-console-empty" aria-hidden=empty_hidden>No console messages recorded</p>
            <ol id="lens-console-rows">
                {breadcrumbs
                    .iter()
                    .enumerate()
                    .map(|(index, breadcrumb)| {
                        let row_id = format!("lens-console-row-{index}");
                        let seek_value = breadcrumb.offset_ms.to_string();
                        let timing = playback.timing_of(breadcrumb.offset_ms).as_str();
                        let hovered = bool_flag(
                            playback.is_hovered(breadcrumb.offset_ms, breadcrumb.offset_ms),
                        );
                        view! {
                            <li
                                id=row_id
                                data-seek-ms=seek_value
                                data-timing=timing
                                data-hovered=hovered
                                data-level=breadcrumb.level.clone()
                            >
                                {breadcrumb.message.clone()}
                            </li>
                        }
                    })
                    .collect_view()}
            </ol>
        </section>
    };
    Ok(panel.to_html())
}

pub fn render_network_panel(playback: &PlaybackContext, inputs: &ReplayInputs) -> Result<String> {
    let spans = inputs.require(ReplayInputId::NetworkSpans)?.as_spans()?;
    let row_count_value = spans.len().to_string();
    let empty_hidden = bool_flag(!spans.is_empty());
    let panel = view! {
        <section
            id="lens-network-panel"
            data-panel=ReplayTab::Network.as_str()
            data-row-count=row_count_value
        >
            <p id="lens-network-empty" aria-hidden=empty_hidden>No network requests recorded</p>
            <table>
                <thead>
                    <tr>
                        <th scope="col">Kind</th>
                        <th scope="col">Description</th>
                        <th scope="col">"Duration (ms)"</th>
                    </tr>
                </thead>
                <tbody id="lens-network-rows">
                    {spans
                        .iter()
                        .enumerate()
                        .map(|(index, span)| {
                            let row_id = format!("lens-network-row-{index}");
                            let seek_value = span.start_ms.to_string();
                            let timing = playback.timing_of(span.start_ms).as_str();
                            let hovered = bool_flag(playback.is_hovered(span.start_ms, span.end_ms));
                            view! {
                                <tr
                                    id=row_id
                                    data-seek-ms=seek_value
                                    data-timing=timing
                                    data-hovered=hovered
                                    data-kind=span.kind.clone()
                                >
                                    <td>{span.kind.clone()}</td>
                                    <td>{span.description.clone()}</td>
                                    <td>{span.duration_ms()}</td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        </section>
    };
    Ok(panel.to_html())
}

pub fn render_trace_panel(playback: &PlaybackContext, inputs: &ReplayInputs) -> Result<String> {
    let spans = inputs.require(ReplayInputId::NonMemorySpans)?.as_spans()?;
    let trace = project_spans_into_trace(spans);
    let row_count_value = trace.rows.len().to_string();
    let duration_value = trace.duration_ms().to_string();
    let max_depth_value = trace.max_depth().to_string();
    let empty_hidden = bool_flag(!trace.rows.is_empty());
    let panel = view! {
        <section
            id="lens-trace-panel"
            data-panel=ReplayTab::Trace.as_str()
            data-row-count=row_count_value
            data-trace-duration-ms=duration_value
            data-trace-max-depth=max_depth_value
        >
            <p id="lens-trace-empty" aria-hidden=empty_hidden>No trace spans recorded</p>
            <ul id="lens-trace-rows">
                {trace
                    .rows
                    .iter()
                    .enumerate()
                    .map(|(index, row)| {
                        let row_id = format!("lens-trace-row-{index}");
                        let depth_value = row.depth.to_string();
                        let seek_value = row.start_ms.to_string();
                        let duration_value = row.duration_ms.to_string();
                        let timing = playback.timing_of(row.start_ms).as_str();
                        view! {
                            <li
                                id=row_id
                                data-depth=depth_value
                                data-seek-ms=seek_value
                                data-duration-ms=duration_value
                                data-timing=timing
                                data-kind=row.kind.clone()
                            >
                                {row.description.clone()}
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </section>
    };
    Ok(panel.to_html())
}

pub fn render_issues_panel(playback: &PlaybackContext, inputs: &ReplayInputs) -> Result<String> {
    let errors = inputs.require(ReplayInputId::IssueErrors)?.as_errors()?;
    let row_count_value = errors.len().to_string();
    let empty_hidden = bool_flag(!errors.is_empty());
    let panel = view! {
        <section
            id="lens-issues-panel"
            data-panel=ReplayTab::Issues.as_str()
            data-row-count=row_count_value
        >
            <p id="lens-issues-empty" aria-hidden=empty_hidden>No issues linked to this replay</p>
            <ul id="lens-issues-rows">
                {errors
                    .iter()
                    .enumerate()
                    .map(|(index, error)| {
                        let row_id = format!("lens-issues-row-{index}");
                        let seek_value = error.offset_ms.to_string();
                        let timing = playback.timing_of(error.offset_ms).as_str();
                        let hovered =
                            bool_flag(playback.is_hovered(error.offset_ms, error.offset_ms));
                        view! {
                            <li
                                id=row_id
                                data-seek-ms=seek_value
                                data-timing=timing
                                data-hovered=hovered
                                data-event-id=error.event_id.clone()
                                data-level=error.level.clone()
                            >
                                {error.title.clone()}
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </section>
    };
    Ok(panel.to_html())
}

pub fn render_tags_panel(_playback: &PlaybackContext, inputs: &ReplayInputs) -> Result<String> {
    let tags = inputs.require(ReplayInputId::TagRows)?.as_tags()?;
    let row_count_value = tags.len().to_string();
    let empty_hidden = bool_flag(!tags.is_empty());
    let panel = view! {
        <section
            id="lens-tags-panel"
            data-panel=ReplayTab::Tags.as_str()
            data-row-count=row_count_value
        >
            <p id="lens-tags-empty" aria-hidden=empty_hidden>No tags on this replay</p>
            <table>
                <tbody id="lens-tags-rows">
                    {tags
                        .iter()
                        .map(|tag| {
                            let value_count = tag.values.len().to_string();
                            view! {
                                <tr data-tag-key=tag.key.clone() data-value-count=value_count>
                                    <th scope="row">{tag.key.clone()}</th>
                                    <td>{tag.values.join(", ")}</td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        </section>
    };
    Ok(panel.to_html())
}

pub fn render_memory_panel(playback: &PlaybackContext, inputs: &ReplayInputs) -> Result<String> {
    let spans = inputs.require(ReplayInputId::MemorySpans)?.as_spans()?;
    let samples = spans
        .iter()
        .filter_map(|span| span.value.map(|value| (span.start_ms, value)))
        .collect::<Vec<_>>();
    let sample_count_value = samples.len().to_string();
    let peak_value = samples
        .iter()
        .map(|(_, value)| *value)
        .max()
        .map_or_else(|| "none".to_string(), |peak| peak.to_string());
    let empty_hidden = bool_flag(!samples.is_empty());
    let panel = view! {
        <section
            id="lens-memory-panel"
            data-panel=ReplayTab::Memory.as_str()
            data-row-count=sample_count_value.clone()
            data-sample-count=sample_count_value
            data-peak-value=peak_value
        >
            <p id="lens-memory-empty" aria-hidden=empty_hidden>No memory samples recorded</p>
            <ol id="lens-memory-rows">
                {samples
                    .iter()
                    .map(|(start_ms, value)| {
                        let seek_value = start_ms.to_string();
                        let timing = playback.timing_of(*start_ms).as_str();
                        let value_attr = value.to_string();
                        let value_text = value.to_string();
                        view! {
                            <li data-seek-ms=seek_value data-timing=timing data-value=value_attr>
                                {value_text}
                            </li>
                        }
                    })
                    .collect_view()}
            </ol>
        </section>
    };
    Ok(panel.to_html())
}
