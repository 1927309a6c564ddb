//! Replay details focus area built on `lens-dispatch`.
//!
//! Wires the six replay tabs (console, network, trace, issues, tags, memory)
//! to projections of a `ReplayRecord` and renders them with leptos SSR.

pub mod config;
pub mod navigation;
pub mod panels;
pub mod playback;
pub mod projections;
pub mod record;
pub mod tabs;
pub mod trace_adapter;

use lens_dispatch::{Dispatcher, PanelKey};

pub use config::{LensConfig, LensConfigError, NavigationConfig};
pub use navigation::{ReplayNavigation, ReplayNavigationResolver, DEFAULT_TAB_QUERY_PARAM};
pub use panels::{build_replay_registry, render_view_output};
pub use playback::{PlaybackContext, RowTiming};
pub use projections::build_replay_cache;
pub use record::{Breadcrumb, ReplayError, ReplayRecord, ReplaySpan};
pub use tabs::{ReplayDomain, ReplayInput, ReplayInputId, ReplayTab, TagRow};
pub use trace_adapter::{project_spans_into_trace, TraceRow, TraceView};

pub type ReplayDispatcher = Dispatcher<ReplayDomain, ReplayNavigationResolver>;

/// Builds the replay dispatcher, failing on any configuration error before
/// the first render.
pub fn build_replay_dispatcher(config: &LensConfig) -> Result<ReplayDispatcher, LensConfigError> {
    let resolver = ReplayNavigationResolver::from_config(&config.navigation)?;
    let registry = build_replay_registry()?;
    let cache = build_replay_cache()?;
    tracing::debug!(
        query_param = resolver.query_param(),
        default_tab = resolver.tabs().default_key().as_str(),
        panels = registry.len(),
        "replay dispatcher ready"
    );
    Ok(Dispatcher::new(resolver, registry, cache)?)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use lens_dispatch::{Availability, ViewOutput};

    use super::{
        build_replay_dispatcher, LensConfig, PlaybackContext, ReplayNavigation, ReplayRecord,
        ReplayTab,
    };

    #[test]
    fn integration_default_dispatcher_renders_console_for_bare_location() {
        let mut dispatcher =
            build_replay_dispatcher(&LensConfig::default()).expect("dispatcher should build");
        let record = Arc::new(ReplayRecord::new("r-1"));
        let output = dispatcher
            .dispatch(
                &ReplayNavigation::new("/replays/r-1/"),
                Availability::Available(&record),
                &PlaybackContext::default(),
            )
            .expect("dispatch");
        assert_eq!(output.rendered_key(), Some(ReplayTab::Console));
        let html = output.into_output().expect("rendered");
        assert!(html.contains("id=\"lens-console-panel\""));
        assert!(html.contains("data-row-count=\"0\""));
    }

    #[test]
    fn functional_loading_source_yields_placeholder() {
        let mut dispatcher =
            build_replay_dispatcher(&LensConfig::default()).expect("dispatcher should build");
        let output = dispatcher
            .dispatch(
                &ReplayNavigation::new("/replays/r-1/?t_main=trace"),
                Availability::Loading,
                &PlaybackContext::default(),
            )
            .expect("dispatch");
        assert_eq!(output, ViewOutput::Placeholder);
    }
}
