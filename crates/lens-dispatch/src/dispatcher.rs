use crate::cache::{Availability, Derived, DerivedInputCache};
use crate::error::{ConfigError, DispatchError};
use crate::key::{InputKey, PanelDomain, PanelKey};
use crate::registry::{GatheredInputs, PanelRegistry};
use crate::resolver::{ActiveKeyResolver, ResolvedKey};

/// Exactly one of these is produced per dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewOutput<K, O> {
    /// Source data (or a derived input some panel needs) is still loading.
    Placeholder,
    /// The active tab has no panel; nothing to show.
    Empty,
    Rendered { key: K, output: O },
}

impl<K: Copy, O> ViewOutput<K, O> {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn rendered_key(&self) -> Option<K> {
        match self {
            Self::Rendered { key, .. } => Some(*key),
            _ => None,
        }
    }

    pub fn into_output(self) -> Option<O> {
        match self {
            Self::Rendered { output, .. } => Some(output),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchPhase {
    Loading,
    Dispatching,
    Rendered,
}

impl DispatchPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Dispatching => "dispatching",
            Self::Rendered => "rendered",
        }
    }
}

/// Orchestrates resolver, derived-input cache and registry.
///
/// The cache is the only state carried from one dispatch to the next.
pub struct Dispatcher<D: PanelDomain, R> {
    resolver: R,
    registry: PanelRegistry<D>,
    cache: DerivedInputCache<D>,
}

impl<D: PanelDomain, R> Dispatcher<D, R> {
    /// Checks that every input a panel declares has a projection.
    pub fn new(
        resolver: R,
        registry: PanelRegistry<D>,
        cache: DerivedInputCache<D>,
    ) -> Result<Self, ConfigError> {
        registry.validate_inputs(&cache)?;
        Ok(Self {
            resolver,
            registry,
            cache,
        })
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn registry(&self) -> &PanelRegistry<D> {
        &self.registry
    }

    pub fn cache(&self) -> &DerivedInputCache<D> {
        &self.cache
    }

    pub fn dispatch<N: ?Sized>(
        &mut self,
        navigation: &N,
        source: Availability<'_, D::Source>,
        context: &D::Context,
    ) -> Result<ViewOutput<D::Key, D::Output>, DispatchError>
    where
        R: ActiveKeyResolver<N, Key = D::Key>,
    {
        if !self.required_inputs_ready(source)? {
            tracing::trace!(phase = DispatchPhase::Loading.as_str(), "panel dispatch");
            return Ok(ViewOutput::Placeholder);
        }
        tracing::trace!(phase = DispatchPhase::Dispatching.as_str(), "panel dispatch");

        let key = match self.resolver.resolve(navigation) {
            ResolvedKey::Panel(key) => key,
            ResolvedKey::Unrecognized(raw) => {
                tracing::debug!(tab = %raw, "no panel for requested tab");
                return Ok(ViewOutput::Empty);
            }
        };
        let Some(descriptor) = self.registry.lookup(key) else {
            tracing::debug!(panel = key.as_str(), "panel has no descriptor");
            return Ok(ViewOutput::Empty);
        };

        let mut inputs = GatheredInputs::new();
        for input in descriptor.required_inputs().iter().copied() {
            match self.cache.get_derived(source, input)? {
                Derived::Ready(value) => inputs.insert(input, value),
                Derived::Unavailable => {
                    tracing::warn!(
                        panel = key.as_str(),
                        input = input.as_str(),
                        "required input became unavailable during gather"
                    );
                    return Ok(ViewOutput::Placeholder);
                }
            }
        }

        let output = descriptor
            .render(context, &inputs)
            .map_err(|error| DispatchError::Render {
                panel: key.as_str(),
                source: error,
            })?;
        tracing::trace!(
            phase = DispatchPhase::Rendered.as_str(),
            panel = key.as_str(),
            inputs = inputs.len(),
            "panel dispatch"
        );
        Ok(ViewOutput::Rendered { key, output })
    }

    fn required_inputs_ready(
        &self,
        source: Availability<'_, D::Source>,
    ) -> Result<bool, ConfigError> {
        if matches!(source, Availability::Loading) {
            return Ok(false);
        }
        for input in self.registry.all_required_inputs().iter().copied() {
            if !self.cache.is_ready(source, input)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
