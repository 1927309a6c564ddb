use std::collections::BTreeSet;

use crate::error::ConfigError;
use crate::key::PanelKey;

/// Outcome of resolving navigation state into a panel key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedKey<K> {
    Panel(K),
    /// Tab value outside the enabled key set; dispatches to the empty output.
    Unrecognized(String),
}

impl<K: PanelKey> ResolvedKey<K> {
    pub fn panel(&self) -> Option<K> {
        match self {
            Self::Panel(key) => Some(*key),
            Self::Unrecognized(_) => None,
        }
    }
}

/// Derives the active panel key from host navigation state.
///
/// Implementations must be total: every input maps to a `ResolvedKey`.
pub trait ActiveKeyResolver<N: ?Sized> {
    type Key: PanelKey;

    fn resolve(&self, navigation: &N) -> ResolvedKey<Self::Key>;
}

/// Maps a raw tab value onto a closed key set with a default and an
/// optional set of disabled keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabNameResolver<K: PanelKey> {
    default_key: K,
    disabled: BTreeSet<K>,
}

impl<K: PanelKey> TabNameResolver<K> {
    pub fn new(default_key: K) -> Self {
        Self {
            default_key,
            disabled: BTreeSet::new(),
        }
    }

    pub fn with_disabled(
        default_key: K,
        disabled: impl IntoIterator<Item = K>,
    ) -> Result<Self, ConfigError> {
        let disabled = disabled.into_iter().collect::<BTreeSet<_>>();
        if disabled.contains(&default_key) {
            return Err(ConfigError::DisabledDefault {
                key: default_key.as_str(),
            });
        }
        Ok(Self {
            default_key,
            disabled,
        })
    }

    pub fn default_key(&self) -> K {
        self.default_key
    }

    pub fn is_enabled(&self, key: K) -> bool {
        !self.disabled.contains(&key)
    }

    /// `None` or a blank value selects the default key.
    pub fn resolve_tab(&self, raw: Option<&str>) -> ResolvedKey<K> {
        let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
            return ResolvedKey::Panel(self.default_key);
        };
        match K::parse(raw) {
            Some(key) if self.is_enabled(key) => ResolvedKey::Panel(key),
            Some(key) => {
                tracing::debug!(panel = key.as_str(), "requested panel is disabled");
                ResolvedKey::Unrecognized(raw.to_string())
            }
            None => ResolvedKey::Unrecognized(raw.to_string()),
        }
    }
}

impl<'a, K: PanelKey> ActiveKeyResolver<Option<&'a str>> for TabNameResolver<K> {
    type Key = K;

    fn resolve(&self, navigation: &Option<&'a str>) -> ResolvedKey<K> {
        self.resolve_tab(*navigation)
    }
}
