use std::cell::Cell;

/// Playback position shared across the focus-area panels.
///
/// Owned by the replay view; panels receive `&PlaybackContext` and change it
/// only through the setters. Single render thread, so `Cell` is enough.
#[derive(Debug, Default)]
pub struct PlaybackContext {
    current_time_ms: Cell<u64>,
    current_hover_time_ms: Cell<Option<u64>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTiming {
    Past,
    Future,
}

impl RowTiming {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Past => "past",
            Self::Future => "future",
        }
    }
}

impl PlaybackContext {
    pub fn new(current_time_ms: u64) -> Self {
        Self {
            current_time_ms: Cell::new(current_time_ms),
            current_hover_time_ms: Cell::new(None),
        }
    }

    pub fn current_time_ms(&self) -> u64 {
        self.current_time_ms.get()
    }

    pub fn current_hover_time_ms(&self) -> Option<u64> {
        self.current_hover_time_ms.get()
    }

    pub fn set_current_time(&self, offset_ms: u64) {
        self.current_time_ms.set(offset_ms);
    }

    pub fn set_current_hover_time(&self, offset_ms: Option<u64>) {
        self.current_hover_time_ms.set(offset_ms);
    }

    /// A row at the playhead counts as already played.
    pub fn timing_of(&self, offset_ms: u64) -> RowTiming {
        if offset_ms <= self.current_time_ms() {
            RowTiming::Past
        } else {
            RowTiming::Future
        }
    }

    pub fn is_hovered(&self, start_ms: u64, end_ms: u64) -> bool {
        self.current_hover_time_ms()
            .is_some_and(|hover| (start_ms..=end_ms.max(start_ms)).contains(&hover))
    }
}
