use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use lens_dispatch::{Availability, PanelKey};
use lens_replay::{
    build_replay_dispatcher, render_view_output, LensConfig, PlaybackContext, ReplayNavigation,
    ReplayRecord, ReplayTab,
};

use crate::cli_args::RenderArgs;

pub(crate) fn load_config(path: Option<&Path>) -> Result<LensConfig> {
    match path {
        Some(path) => LensConfig::from_path(path)
            .with_context(|| format!("failed to load lens config {}", path.display())),
        None => Ok(LensConfig::default()),
    }
}

pub(crate) fn run_render(config: &LensConfig, args: &RenderArgs) -> Result<String> {
    let mut dispatcher =
        build_replay_dispatcher(config).context("failed to build replay dispatcher")?;
    let record = args
        .replay
        .as_deref()
        .map(ReplayRecord::from_path)
        .transpose()?
        .map(Arc::new);

    let playback = PlaybackContext::new(args.current_time_ms);
    playback.set_current_hover_time(args.hover_time_ms);

    let output = dispatcher
        .dispatch(
            &ReplayNavigation::new(args.url.as_str()),
            Availability::from(record.as_ref()),
            &playback,
        )
        .with_context(|| format!("failed to render replay view for {}", args.url))?;
    tracing::debug!(
        placeholder = output.is_placeholder(),
        empty = output.is_empty(),
        panel = output.rendered_key().map(ReplayTab::as_str),
        "render finished"
    );
    Ok(render_view_output(&output))
}

pub(crate) fn run_tabs(config: &LensConfig) -> Result<String> {
    let dispatcher =
        build_replay_dispatcher(config).context("failed to build replay dispatcher")?;
    let tabs = dispatcher.resolver().tabs();
    let lines = ReplayTab::all()
        .iter()
        .map(|tab| {
            let status = if tabs.is_enabled(*tab) {
                "enabled"
            } else {
                "disabled"
            };
            let default_marker = if *tab == tabs.default_key() {
                " (default)"
            } else {
                ""
            };
            format!("{}\t{}\t{status}{default_marker}", tab.as_str(), tab.label())
        })
        .collect::<Vec<_>>();
    Ok(lines.join("\n"))
}
