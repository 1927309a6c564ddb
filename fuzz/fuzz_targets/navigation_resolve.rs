#![no_main]

use std::sync::Arc;

use libfuzzer_sys::fuzz_target;
use lens_dispatch::{ActiveKeyResolver, Availability, ResolvedKey};
use lens_replay::{
    build_replay_dispatcher, LensConfig, PlaybackContext, ReplayNavigation,
    ReplayNavigationResolver, ReplayRecord,
};

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    let navigation = ReplayNavigation::new(raw.into_owned());

    let resolved = ReplayNavigationResolver::default().resolve(&navigation);
    if let ResolvedKey::Unrecognized(tab) = &resolved {
        assert!(!tab.trim().is_empty());
    }

    let Ok(mut dispatcher) = build_replay_dispatcher(&LensConfig::default()) else {
        return;
    };
    let record = Arc::new(ReplayRecord::new("fuzz"));
    let output = dispatcher.dispatch(
        &navigation,
        Availability::Available(&record),
        &PlaybackContext::default(),
    );
    assert!(output.is_ok());
});
