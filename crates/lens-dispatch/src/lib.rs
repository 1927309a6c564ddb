//! Named-panel dispatch engine.
//!
//! Resolves the active panel key from navigation state, gathers the derived
//! inputs that panel declares from an identity-keyed cache, and renders
//! exactly one panel (or a loading placeholder, or nothing) per dispatch.

pub mod cache;
pub mod dispatcher;
pub mod error;
pub mod key;
pub mod registry;
pub mod resolver;

pub use cache::{Availability, CacheStats, Derived, DerivedInputCache, DerivedInputCacheBuilder};
pub use dispatcher::{DispatchPhase, Dispatcher, ViewOutput};
pub use error::{ConfigError, DispatchError};
pub use key::{InputKey, PanelDomain, PanelKey};
pub use registry::{GatheredInputs, PanelDescriptor, PanelRegistry, PanelRegistryBuilder};
pub use resolver::{ActiveKeyResolver, ResolvedKey, TabNameResolver};
