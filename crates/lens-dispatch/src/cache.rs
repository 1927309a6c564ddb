use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::error::ConfigError;
use crate::key::{InputKey, PanelDomain};

/// Whether the host has a source record for this render yet.
pub enum Availability<'a, S> {
    Loading,
    Available(&'a Arc<S>),
}

impl<S> Clone for Availability<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Availability<'_, S> {}

impl<S> fmt::Debug for Availability<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => f.write_str("Loading"),
            Self::Available(record) => write!(f, "Available({:p})", Arc::as_ptr(record)),
        }
    }
}

impl<'a, S> From<Option<&'a Arc<S>>> for Availability<'a, S> {
    fn from(value: Option<&'a Arc<S>>) -> Self {
        match value {
            Some(record) => Self::Available(record),
            None => Self::Loading,
        }
    }
}

/// A derived input, or an explicit marker that it cannot be computed yet.
///
/// `Ready` with an empty collection means "computed, nothing matched" and is
/// never used to stand in for missing data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Derived<T> {
    Unavailable,
    Ready(T),
}

impl<T> Derived<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn ready(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Unavailable => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub computations: u64,
    pub invalidations: u64,
}

type ReadyFn<S> = Box<dyn Fn(&S) -> bool>;
type ProjectFn<S, V> = Box<dyn Fn(&S) -> V>;

struct Projection<S, V> {
    ready: Option<ReadyFn<S>>,
    project: ProjectFn<S, V>,
}

impl<S, V> Projection<S, V> {
    fn is_ready(&self, record: &S) -> bool {
        self.ready.as_ref().map_or(true, |ready| ready(record))
    }
}

/// Collects projections before the cache is sealed.
pub struct DerivedInputCacheBuilder<D: PanelDomain> {
    projections: BTreeMap<D::Input, Projection<D::Source, D::Value>>,
    error: Option<ConfigError>,
}

impl<D: PanelDomain> DerivedInputCacheBuilder<D> {
    /// Registers a projection that is computable whenever a record exists.
    pub fn projection(
        self,
        input: D::Input,
        project: impl Fn(&D::Source) -> D::Value + 'static,
    ) -> Self {
        self.insert(
            input,
            Projection {
                ready: None,
                project: Box::new(project),
            },
        )
    }

    /// Registers a projection gated by a cheap readiness check. While the
    /// check returns false the input reads as `Derived::Unavailable`.
    pub fn projection_when(
        self,
        input: D::Input,
        ready: impl Fn(&D::Source) -> bool + 'static,
        project: impl Fn(&D::Source) -> D::Value + 'static,
    ) -> Self {
        self.insert(
            input,
            Projection {
                ready: Some(Box::new(ready)),
                project: Box::new(project),
            },
        )
    }

    fn insert(mut self, input: D::Input, projection: Projection<D::Source, D::Value>) -> Self {
        if self.error.is_none() && self.projections.insert(input, projection).is_some() {
            self.error = Some(ConfigError::DuplicateProjection {
                input: input.as_str(),
            });
        }
        self
    }

    pub fn build(self) -> Result<DerivedInputCache<D>, ConfigError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        Ok(DerivedInputCache {
            projections: self.projections,
            current: None,
            values: HashMap::new(),
            stats: CacheStats::default(),
        })
    }
}

/// Memoizes projections of the current source record.
///
/// Values are keyed strictly on the identity of the record `Arc`. The cache
/// holds a clone of that `Arc`, so the address it compares against stays
/// owned and cannot be handed to a different record.
pub struct DerivedInputCache<D: PanelDomain> {
    projections: BTreeMap<D::Input, Projection<D::Source, D::Value>>,
    current: Option<Arc<D::Source>>,
    values: HashMap<D::Input, Arc<D::Value>>,
    stats: CacheStats,
}

impl<D: PanelDomain> DerivedInputCache<D> {
    pub fn builder() -> DerivedInputCacheBuilder<D> {
        DerivedInputCacheBuilder {
            projections: BTreeMap::new(),
            error: None,
        }
    }

    pub fn has_projection(&self, input: D::Input) -> bool {
        self.projections.contains_key(&input)
    }

    pub fn input_ids(&self) -> impl Iterator<Item = D::Input> + '_ {
        self.projections.keys().copied()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// True when a value for `input` is held for the current record.
    pub fn is_cached(&self, input: D::Input) -> bool {
        self.values.contains_key(&input)
    }

    /// Checks readiness without computing or touching cached values.
    pub fn is_ready(
        &self,
        source: Availability<'_, D::Source>,
        input: D::Input,
    ) -> Result<bool, ConfigError> {
        let projection = self
            .projections
            .get(&input)
            .ok_or(ConfigError::UnknownInput {
                input: input.as_str(),
            })?;
        Ok(match source {
            Availability::Loading => false,
            Availability::Available(record) => projection.is_ready(record.as_ref()),
        })
    }

    pub fn get_derived(
        &mut self,
        source: Availability<'_, D::Source>,
        input: D::Input,
    ) -> Result<Derived<Arc<D::Value>>, ConfigError> {
        let projection = self
            .projections
            .get(&input)
            .ok_or(ConfigError::UnknownInput {
                input: input.as_str(),
            })?;
        let Availability::Available(record) = source else {
            return Ok(Derived::Unavailable);
        };
        let same_record = self
            .current
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, record));
        if !same_record {
            if self.current.is_some() {
                self.stats.invalidations += 1;
                tracing::debug!(
                    dropped = self.values.len(),
                    "source record changed, derived inputs invalidated"
                );
            }
            self.values.clear();
            self.current = Some(Arc::clone(record));
        }

        // A new record invalidates even when the requested input is not ready yet.
        if !projection.is_ready(record.as_ref()) {
            tracing::trace!(input = input.as_str(), "derived input not ready");
            return Ok(Derived::Unavailable);
        }

        if let Some(value) = self.values.get(&input) {
            self.stats.hits += 1;
            return Ok(Derived::Ready(Arc::clone(value)));
        }

        let value = Arc::new((projection.project)(record.as_ref()));
        self.stats.computations += 1;
        tracing::debug!(input = input.as_str(), "derived input computed");
        self.values.insert(input, Arc::clone(&value));
        Ok(Derived::Ready(value))
    }
}
