use std::sync::Arc;

use lens_dispatch::{Availability, CacheStats, ViewOutput};
use lens_replay::{
    build_replay_dispatcher, Breadcrumb, LensConfig, PlaybackContext, ReplayDispatcher,
    ReplayInputId, ReplayNavigation, ReplayRecord, ReplaySpan, ReplayTab,
};
use proptest::prelude::*;

fn dispatcher() -> ReplayDispatcher {
    build_replay_dispatcher(&LensConfig::default()).expect("default dispatcher should build")
}

fn at_tab(tab: &str) -> ReplayNavigation {
    ReplayNavigation::new(format!("/replays/r-1/?t_main={tab}"))
}

fn breadcrumb(offset_ms: u64, category: &str, message: &str) -> Breadcrumb {
    Breadcrumb {
        offset_ms,
        category: category.to_string(),
        message: message.to_string(),
        level: "info".to_string(),
    }
}

fn span(kind: &str, start_ms: u64, value: Option<u64>) -> ReplaySpan {
    ReplaySpan {
        kind: kind.to_string(),
        description: format!("{kind} span"),
        start_ms,
        end_ms: start_ms + 10,
        value,
    }
}

fn record_with_spans(spans: Vec<ReplaySpan>) -> Arc<ReplayRecord> {
    let mut record = ReplayRecord::new("r-1");
    record.spans = Some(spans);
    Arc::new(record)
}

fn render(
    dispatcher: &mut ReplayDispatcher,
    navigation: &ReplayNavigation,
    record: &Arc<ReplayRecord>,
) -> ViewOutput<ReplayTab, String> {
    dispatcher
        .dispatch(
            navigation,
            Availability::Available(record),
            &PlaybackContext::default(),
        )
        .expect("dispatch should succeed")
}

#[test]
fn integration_console_tab_sees_only_console_breadcrumbs() {
    let mut dispatcher = dispatcher();
    let mut record = ReplayRecord::new("r-1");
    record.breadcrumbs = vec![
        breadcrumb(0, "console", "console-message-x"),
        breadcrumb(5, "network", "network-message-y"),
    ];
    let record = Arc::new(record);

    let output = render(&mut dispatcher, &at_tab("console"), &record);
    assert_eq!(output.rendered_key(), Some(ReplayTab::Console));
    let html = output.into_output().expect("console rendered");
    assert!(html.contains("data-row-count=\"1\""));
    assert!(html.contains("console-message-x"));
    assert!(!html.contains("network-message-y"));
}

#[test]
fn integration_memory_tab_sees_only_memory_spans() {
    let mut dispatcher = dispatcher();
    let record = record_with_spans(vec![span("memory", 0, Some(1)), span("http", 5, Some(2))]);

    let html = render(&mut dispatcher, &at_tab("memory"), &record)
        .into_output()
        .expect("memory rendered");
    assert!(html.contains("id=\"lens-memory-panel\""));
    assert!(html.contains("data-sample-count=\"1\""));
    assert!(html.contains("data-peak-value=\"1\""));
}

#[test]
fn integration_loading_source_renders_placeholder_for_any_tab() {
    let mut dispatcher = dispatcher();
    for tab in ["trace", "console", "unknown-tab"] {
        let output = dispatcher
            .dispatch(
                &at_tab(tab),
                Availability::Loading,
                &PlaybackContext::default(),
            )
            .expect("dispatch should succeed");
        assert_eq!(output, ViewOutput::Placeholder, "tab {tab}");
    }
    assert_eq!(dispatcher.cache().stats(), CacheStats::default());
}

#[test]
fn integration_unknown_tab_renders_empty() {
    let mut dispatcher = dispatcher();
    let record = record_with_spans(Vec::new());
    let output = render(&mut dispatcher, &at_tab("unknown-tab"), &record);
    assert_eq!(output, ViewOutput::Empty);
    assert_eq!(dispatcher.cache().stats().computations, 0);
}

#[test]
fn integration_pending_span_payload_holds_every_tab_on_placeholder() {
    let mut dispatcher = dispatcher();
    let mut record = ReplayRecord::new("r-1");
    record.spans = None;
    let record = Arc::new(record);

    let output = render(&mut dispatcher, &at_tab("console"), &record);
    assert_eq!(output, ViewOutput::Placeholder);
}

#[test]
fn integration_repeat_dispatch_is_idempotent_and_hits_cache() {
    let mut dispatcher = dispatcher();
    let record = record_with_spans(vec![span("http", 5, None), span("paint", 1, None)]);

    let first = render(&mut dispatcher, &at_tab("trace"), &record);
    let second = render(&mut dispatcher, &at_tab("trace"), &record);
    assert_eq!(first, second);
    assert_eq!(
        dispatcher.cache().stats(),
        CacheStats {
            hits: 1,
            computations: 1,
            invalidations: 0,
        }
    );
}

#[test]
fn integration_new_record_identity_recomputes_even_when_equal() {
    let mut dispatcher = dispatcher();
    let first = record_with_spans(vec![span("memory", 0, Some(7))]);
    let second = record_with_spans(vec![span("memory", 0, Some(7))]);
    assert_eq!(first, second);

    render(&mut dispatcher, &at_tab("memory"), &first);
    render(&mut dispatcher, &at_tab("memory"), &second);
    let stats = dispatcher.cache().stats();
    assert_eq!(stats.computations, 2);
    assert_eq!(stats.invalidations, 1);
    assert_eq!(stats.hits, 0);
}

#[test]
fn integration_memory_render_leaves_other_span_subsets_uncomputed() {
    let mut dispatcher = dispatcher();
    let record = record_with_spans(vec![span("memory", 0, Some(1)), span("http", 5, None)]);

    render(&mut dispatcher, &at_tab("memory"), &record);
    let cache = dispatcher.cache();
    assert!(cache.is_cached(ReplayInputId::MemorySpans));
    assert!(!cache.is_cached(ReplayInputId::NonMemorySpans));
    assert!(!cache.is_cached(ReplayInputId::NetworkSpans));
}

#[test]
fn integration_disabled_tab_renders_empty_and_default_applies() {
    let config = LensConfig::from_toml(
        "[navigation]\ndefault_tab = \"issues\"\ndisabled_tabs = [\"memory\"]\n",
    )
    .expect("config should load");
    let mut dispatcher = build_replay_dispatcher(&config).expect("dispatcher should build");
    let record = record_with_spans(vec![span("memory", 0, Some(1))]);

    let disabled = render(&mut dispatcher, &at_tab("memory"), &record);
    assert_eq!(disabled, ViewOutput::Empty);

    let fallback = render(&mut dispatcher, &ReplayNavigation::new("/replays/r-1/"), &record);
    assert_eq!(fallback.rendered_key(), Some(ReplayTab::Issues));
}

#[test]
fn integration_malformed_location_falls_back_to_default_tab() {
    let mut dispatcher = dispatcher();
    let record = record_with_spans(Vec::new());
    let output = render(
        &mut dispatcher,
        &ReplayNavigation::new("http://[::1/replays/r-1/?t_main=memory"),
        &record,
    );
    assert_eq!(output.rendered_key(), Some(ReplayTab::Console));
}

#[test]
fn integration_trace_tab_nests_non_memory_spans() {
    let mut dispatcher = dispatcher();
    let record = record_with_spans(vec![
        ReplaySpan {
            kind: "navigation.navigate".to_string(),
            description: "/checkout".to_string(),
            start_ms: 0,
            end_ms: 100,
            value: None,
        },
        span("resource.fetch", 20, None),
        span("memory", 30, Some(9)),
    ]);

    let html = render(&mut dispatcher, &at_tab("trace"), &record)
        .into_output()
        .expect("trace rendered");
    assert!(html.contains("data-row-count=\"2\""));
    assert!(html.contains("data-trace-max-depth=\"1\""));
    assert!(!html.contains("memory span"));
}

proptest! {
    #[test]
    fn property_arbitrary_tab_values_never_error(tab in ".{0,24}") {
        let mut dispatcher = dispatcher();
        let record = record_with_spans(Vec::new());
        let navigation = ReplayNavigation::new(format!("/replays/r-1/?t_main={tab}"));
        let output = dispatcher.dispatch(
            &navigation,
            Availability::Available(&record),
            &PlaybackContext::default(),
        );
        prop_assert!(output.is_ok());
        let output = output.unwrap_or(ViewOutput::Placeholder);
        prop_assert!(!output.is_placeholder());
    }

    #[test]
    fn property_loading_source_renders_placeholder_for_any_location(location in ".{0,48}") {
        let mut dispatcher = dispatcher();
        let output = dispatcher.dispatch(
            &ReplayNavigation::new(location),
            Availability::Loading,
            &PlaybackContext::default(),
        );
        prop_assert!(matches!(output, Ok(ViewOutput::Placeholder)));
        prop_assert_eq!(dispatcher.cache().stats(), CacheStats::default());
    }
}
