use anyhow::{bail, Result};
use lens_dispatch::{InputKey, PanelDomain, PanelKey};

use crate::playback::PlaybackContext;
use crate::record::{Breadcrumb, ReplayError, ReplayRecord, ReplaySpan};

/// Focus-area tabs of the replay details view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReplayTab {
    Console,
    Network,
    Trace,
    Issues,
    Tags,
    Memory,
}

impl ReplayTab {
    pub fn label(self) -> &'static str {
        match self {
            Self::Console => "Console",
            Self::Network => "Network",
            Self::Trace => "Trace",
            Self::Issues => "Issues",
            Self::Tags => "Tags",
            Self::Memory => "Memory",
        }
    }
}

impl PanelKey for ReplayTab {
    fn all() -> &'static [Self] {
        &[
            Self::Console,
            Self::Network,
            Self::Trace,
            Self::Issues,
            Self::Tags,
            Self::Memory,
        ]
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Console => "console",
            Self::Network => "network",
            Self::Trace => "trace",
            Self::Issues => "issues",
            Self::Tags => "tags",
            Self::Memory => "memory",
        }
    }
}

/// Projections of a `ReplayRecord` that panels can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReplayInputId {
    ConsoleBreadcrumbs,
    NetworkSpans,
    MemorySpans,
    NonMemorySpans,
    IssueErrors,
    TagRows,
}

impl InputKey for ReplayInputId {
    fn as_str(self) -> &'static str {
        match self {
            Self::ConsoleBreadcrumbs => "console-breadcrumbs",
            Self::NetworkSpans => "network-spans",
            Self::MemorySpans => "memory-spans",
            Self::NonMemorySpans => "non-memory-spans",
            Self::IssueErrors => "issue-errors",
            Self::TagRows => "tag-rows",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRow {
    pub key: String,
    pub values: Vec<String>,
}

/// Value of any replay projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayInput {
    Breadcrumbs(Vec<Breadcrumb>),
    Spans(Vec<ReplaySpan>),
    Errors(Vec<ReplayError>),
    Tags(Vec<TagRow>),
}

impl ReplayInput {
    fn kind(&self) -> &'static str {
        match self {
            Self::Breadcrumbs(_) => "breadcrumbs",
            Self::Spans(_) => "spans",
            Self::Errors(_) => "errors",
            Self::Tags(_) => "tags",
        }
    }

    pub fn as_breadcrumbs(&self) -> Result<&[Breadcrumb]> {
        match self {
            Self::Breadcrumbs(breadcrumbs) => Ok(breadcrumbs),
            other => bail!("expected breadcrumbs, got {}", other.kind()),
        }
    }

    pub fn as_spans(&self) -> Result<&[ReplaySpan]> {
        match self {
            Self::Spans(spans) => Ok(spans),
            other => bail!("expected spans, got {}", other.kind()),
        }
    }

    pub fn as_errors(&self) -> Result<&[ReplayError]> {
        match self {
            Self::Errors(errors) => Ok(errors),
            other => bail!("expected errors, got {}", other.kind()),
        }
    }

    pub fn as_tags(&self) -> Result<&[TagRow]> {
        match self {
            Self::Tags(tags) => Ok(tags),
            other => bail!("expected tags, got {}", other.kind()),
        }
    }
}

/// Type bundle wiring the replay focus area into the dispatch engine.
pub struct ReplayDomain;

impl PanelDomain for ReplayDomain {
    type Key = ReplayTab;
    type Input = ReplayInputId;
    type Source = ReplayRecord;
    type Value = ReplayInput;
    type Context = PlaybackContext;
    type Output = String;
}
