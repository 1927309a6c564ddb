use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use anyhow::anyhow;

use crate::cache::DerivedInputCache;
use crate::error::ConfigError;
use crate::key::{InputKey, PanelDomain, PanelKey};

type RenderFn<D> = Box<
    dyn Fn(
        &<D as PanelDomain>::Context,
        &GatheredInputs<D>,
    ) -> anyhow::Result<<D as PanelDomain>::Output>,
>;

/// The derived inputs handed to one panel render: exactly the set the
/// panel's descriptor declares.
pub struct GatheredInputs<D: PanelDomain> {
    values: BTreeMap<D::Input, Arc<D::Value>>,
}

impl<D: PanelDomain> GatheredInputs<D> {
    pub(crate) fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, input: D::Input, value: Arc<D::Value>) {
        self.values.insert(input, value);
    }

    pub fn get(&self, input: D::Input) -> Option<&D::Value> {
        self.values.get(&input).map(Arc::as_ref)
    }

    /// Like `get`, but reports an undeclared input as a render failure.
    pub fn require(&self, input: D::Input) -> anyhow::Result<&D::Value> {
        self.get(input)
            .ok_or_else(|| anyhow!("derived input '{}' was not declared", input.as_str()))
    }

    pub fn shared(&self, input: D::Input) -> Option<&Arc<D::Value>> {
        self.values.get(&input)
    }

    pub fn inputs(&self) -> impl Iterator<Item = D::Input> + '_ {
        self.values.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One panel: its key, the derived inputs it reads, and how it renders.
pub struct PanelDescriptor<D: PanelDomain> {
    key: D::Key,
    required_inputs: BTreeSet<D::Input>,
    render: RenderFn<D>,
}

impl<D: PanelDomain> PanelDescriptor<D> {
    pub fn new(
        key: D::Key,
        render: impl Fn(&D::Context, &GatheredInputs<D>) -> anyhow::Result<D::Output> + 'static,
    ) -> Self {
        Self {
            key,
            required_inputs: BTreeSet::new(),
            render: Box::new(render),
        }
    }

    pub fn requires(mut self, input: D::Input) -> Self {
        self.required_inputs.insert(input);
        self
    }

    pub fn key(&self) -> D::Key {
        self.key
    }

    pub fn required_inputs(&self) -> &BTreeSet<D::Input> {
        &self.required_inputs
    }

    pub fn render(
        &self,
        context: &D::Context,
        inputs: &GatheredInputs<D>,
    ) -> anyhow::Result<D::Output> {
        (self.render)(context, inputs)
    }
}

pub struct PanelRegistryBuilder<D: PanelDomain> {
    panels: HashMap<D::Key, PanelDescriptor<D>>,
}

impl<D: PanelDomain> PanelRegistryBuilder<D> {
    pub fn register(&mut self, descriptor: PanelDescriptor<D>) -> Result<&mut Self, ConfigError> {
        let key = descriptor.key();
        if self.panels.contains_key(&key) {
            return Err(ConfigError::DuplicatePanel { key: key.as_str() });
        }
        self.panels.insert(key, descriptor);
        Ok(self)
    }

    /// Seals the registry. Every key of the closed key set must be covered.
    pub fn build(self) -> Result<PanelRegistry<D>, ConfigError> {
        if let Some(missing) = D::Key::all()
            .iter()
            .copied()
            .find(|key| !self.panels.contains_key(key))
        {
            return Err(ConfigError::MissingPanel {
                key: missing.as_str(),
            });
        }
        let all_required_inputs = self
            .panels
            .values()
            .flat_map(|descriptor| descriptor.required_inputs.iter().copied())
            .collect();
        Ok(PanelRegistry {
            panels: self.panels,
            all_required_inputs,
        })
    }
}

/// Immutable key → descriptor table.
pub struct PanelRegistry<D: PanelDomain> {
    panels: HashMap<D::Key, PanelDescriptor<D>>,
    all_required_inputs: BTreeSet<D::Input>,
}

impl<D: PanelDomain> PanelRegistry<D> {
    pub fn builder() -> PanelRegistryBuilder<D> {
        PanelRegistryBuilder {
            panels: HashMap::new(),
        }
    }

    pub fn lookup(&self, key: D::Key) -> Option<&PanelDescriptor<D>> {
        self.panels.get(&key)
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Union of the inputs declared by every registered panel.
    pub fn all_required_inputs(&self) -> &BTreeSet<D::Input> {
        &self.all_required_inputs
    }

    /// Fails on the first declared input the cache has no projection for.
    pub fn validate_inputs(&self, cache: &DerivedInputCache<D>) -> Result<(), ConfigError> {
        let mut keys = self.panels.keys().copied().collect::<Vec<_>>();
        keys.sort();
        for key in keys {
            let descriptor = &self.panels[&key];
            if let Some(input) = descriptor
                .required_inputs
                .iter()
                .copied()
                .find(|input| !cache.has_projection(*input))
            {
                return Err(ConfigError::UnknownRequiredInput {
                    panel: key.as_str(),
                    input: input.as_str(),
                });
            }
        }
        Ok(())
    }
}
