#![no_main]

use std::sync::Arc;

use libfuzzer_sys::fuzz_target;
use lens_dispatch::{Availability, PanelKey};
use lens_replay::{
    build_replay_dispatcher, LensConfig, PlaybackContext, ReplayNavigation, ReplayRecord,
    ReplayTab,
};

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    let Ok(record) = ReplayRecord::from_json(&raw) else {
        return;
    };
    let Ok(mut dispatcher) = build_replay_dispatcher(&LensConfig::default()) else {
        return;
    };
    let record = Arc::new(record);
    let playback = PlaybackContext::new(record.duration_ms / 2);
    for tab in ReplayTab::all() {
        let navigation = ReplayNavigation::new(format!("/replays/fuzz/?t_main={}", tab.as_str()));
        let _ = dispatcher.dispatch(&navigation, Availability::Available(&record), &playback);
    }
});
