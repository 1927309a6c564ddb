//! Replay payload as delivered by the replay-loading service.
//!
//! All `offset_ms` values are milliseconds since the start of the recording,
//! the same clock `PlaybackContext` uses.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayRecord {
    pub replay_id: String,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub breadcrumbs: Vec<Breadcrumb>,
    /// `None` while the span payload is still streaming in.
    #[serde(default)]
    pub spans: Option<Vec<ReplaySpan>>,
    #[serde(default)]
    pub errors: Vec<ReplayError>,
    #[serde(default)]
    pub tags: BTreeMap<String, Vec<String>>,
}

impl ReplayRecord {
    pub fn new(replay_id: impl Into<String>) -> Self {
        Self {
            replay_id: replay_id.into(),
            duration_ms: 0,
            breadcrumbs: Vec::new(),
            spans: Some(Vec::new()),
            errors: Vec::new(),
            tags: BTreeMap::new(),
        }
    }

    pub fn from_json(source: &str) -> Result<Self> {
        serde_json::from_str(source).context("failed to parse replay record JSON")
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read replay record {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("invalid replay record {}", path.display()))
    }

    pub fn spans_loaded(&self) -> bool {
        self.spans.is_some()
    }

    pub fn spans(&self) -> &[ReplaySpan] {
        self.spans.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    #[serde(default)]
    pub offset_ms: u64,
    pub category: String,
    #[serde(default)]
    pub message: String,
    #[serde(default = "default_breadcrumb_level")]
    pub level: String,
}

fn default_breadcrumb_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaySpan {
    /// Operation kind, e.g. `memory`, `resource.fetch`, `navigation.navigate`.
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub start_ms: u64,
    #[serde(default)]
    pub end_ms: u64,
    /// Sampled value for `memory` spans (used JS heap bytes).
    #[serde(default)]
    pub value: Option<u64>,
}

impl ReplaySpan {
    pub fn duration_ms(&self) -> u64 {
        self.end_ms.saturating_sub(self.start_ms)
    }

    pub fn is_memory(&self) -> bool {
        self.kind == "memory"
    }

    pub fn is_network(&self) -> bool {
        self.kind == "http"
            || self.kind.starts_with("http.")
            || self.kind.starts_with("resource.")
            || self.kind.starts_with("navigation.")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayError {
    pub event_id: String,
    pub title: String,
    #[serde(default)]
    pub offset_ms: u64,
    #[serde(default = "default_error_level")]
    pub level: String,
}

fn default_error_level() -> String {
    "error".to_string()
}
