use std::fmt::Debug;
use std::hash::Hash;

/// Closed set of panel identifiers.
///
/// Implemented by a fieldless enum; `all()` lists every variant so the
/// registry can check coverage at startup.
pub trait PanelKey: Copy + Eq + Ord + Hash + Debug + 'static {
    fn all() -> &'static [Self];

    fn as_str(self) -> &'static str;

    /// Case-insensitive match against `as_str`, ignoring surrounding whitespace.
    fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim();
        if normalized.is_empty() {
            return None;
        }
        Self::all()
            .iter()
            .copied()
            .find(|key| key.as_str().eq_ignore_ascii_case(normalized))
    }
}

/// Identifier of one derived-input projection.
pub trait InputKey: Copy + Eq + Ord + Hash + Debug + 'static {
    fn as_str(self) -> &'static str;
}

/// Bundles the types one panel family works with.
pub trait PanelDomain: 'static {
    type Key: PanelKey;
    type Input: InputKey;
    /// Raw record shared by every panel, read-only to the engine.
    type Source;
    /// Value produced by every projection.
    type Value;
    /// Cross-panel state owned by the host.
    type Context;
    /// Rendered unit handed back to the host.
    type Output;
}
