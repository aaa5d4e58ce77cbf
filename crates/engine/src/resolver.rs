use crate::cache::Cache;
use crate::config::Config;
use crate::error::EngineError;
use crate::layer::Layer;
use crate::path::extract;
use crate::registry::Registry;
use parking_lot::RwLock;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, trace};

/// Registry and cache share one lock so a resolution never observes one without the other.
#[derive(Debug, Default)]
struct State {
    registry: Registry,
    cache: Cache,
    /// Bumped on every registry write; a resolution only caches its result if the
    /// generation it started from is still current.
    generation: u64,
}

enum Lookup {
    Cached(Layer),
    Inherited(Layer, u64),
    Extract { depth: i32, generation: u64 },
}

/// Resolves module paths into layer labels.
///
/// Cloning is cheap and every clone shares the same registry and cache, so one
/// resolver built at startup can be handed to every component that logs.
///
/// # Example
///
/// ```rust
/// # fn main() -> Result<(), strata_engine::EngineError> {
/// use strata_engine::{Config, Resolver};
///
/// let resolver = Resolver::new(Config::default())?;
/// assert_eq!(resolver.resolve("shop/internal/api/handlers").as_str(), "API/HANDLERS");
///
/// resolver.set_explicit_layer("shop/internal/db", "Database");
/// assert_eq!(resolver.resolve("shop/internal/db/postgres").as_str(), "Database");
///
/// resolver.set_explicit_depth("shop/api/v1/users", 1)?;
/// assert_eq!(resolver.resolve("shop/api/v1/users").as_str(), "USERS");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Resolver {
    config: Arc<Config>,
    state: Arc<RwLock<State>>,
}

impl Resolver {
    /// Creates a resolver with an empty registry and cache.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidConfiguration`] if `config` fails [`Config::validate`].
    pub fn new(config: Config) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { config: Arc::new(config), state: Arc::new(RwLock::new(State::default())) })
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the layer label for `path`.
    ///
    /// Order of precedence: cached label, nearest explicit layer of the path or an
    /// ancestor, then extraction with the path's explicit depth or the default depth.
    /// Extraction runs without holding the lock.
    pub fn resolve(&self, path: impl AsRef<str>) -> Layer {
        let path = path.as_ref();

        let lookup = {
            let state = self.state.read();
            if let Some(label) = state.cache.get(path) {
                Lookup::Cached(label.clone())
            } else if let Some(layer) = state.registry.find_inherited_layer(path) {
                Lookup::Inherited(layer.clone(), state.generation)
            } else {
                let depth =
                    state.registry.explicit_depth(path).unwrap_or(self.config.default_depth);
                Lookup::Extract { depth, generation: state.generation }
            }
        };

        match lookup {
            Lookup::Cached(label) => {
                trace!(path, layer = %label, "Layer cache hit");
                label
            },
            Lookup::Inherited(label, generation) => {
                trace!(path, layer = %label, "Layer inherited from explicit override");
                self.store(path, &label, generation);
                label
            },
            Lookup::Extract { depth, generation } => {
                let label = Layer::verbatim(extract(path, depth, &self.config.skip_segments));
                trace!(path, depth, layer = %label, "Layer extracted from path");
                self.store(path, &label, generation);
                label
            },
        }
    }

    /// Pins a layer name to `path` and its descendants. The name is kept as given.
    ///
    /// Cached labels for `path` and for every cached descendant are dropped.
    pub fn set_explicit_layer(&self, path: impl AsRef<str>, name: impl Into<Cow<'static, str>>) {
        let path = path.as_ref();
        let layer = Layer::verbatim(name);

        let stale = {
            let mut state = self.state.write();
            state.registry.set_explicit_layer(path, layer.clone());
            state.generation = state.generation.wrapping_add(1);
            usize::from(state.cache.invalidate(path)) + state.cache.invalidate_descendants(path)
        };

        debug!(path, layer = %layer, stale, "Explicit layer registered");
    }

    /// Sets the extraction depth for `path` only; descendants keep the default depth.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidArgument`] if `depth` is negative. Neither the
    /// registry nor the cache is touched in that case.
    pub fn set_explicit_depth(&self, path: impl AsRef<str>, depth: i32) -> Result<(), EngineError> {
        let path = path.as_ref();

        {
            let mut state = self.state.write();
            state.registry.set_explicit_depth(path, depth)?;
            state.generation = state.generation.wrapping_add(1);
            state.cache.invalidate(path);
        }

        debug!(path, depth, "Explicit depth registered");
        Ok(())
    }

    /// Nearest explicit layer for `path` or one of its ancestors.
    #[must_use]
    pub fn find_inherited_layer(&self, path: impl AsRef<str>) -> Option<Layer> {
        self.state.read().registry.find_inherited_layer(path.as_ref()).cloned()
    }

    /// Explicit depth registered for exactly `path`.
    #[must_use]
    pub fn explicit_depth(&self, path: impl AsRef<str>) -> Option<i32> {
        self.state.read().registry.explicit_depth(path.as_ref())
    }

    /// Label currently cached for `path`, without resolving.
    #[must_use]
    pub fn cached(&self, path: impl AsRef<str>) -> Option<Layer> {
        self.state.read().cache.get(path.as_ref()).cloned()
    }

    /// Number of cached labels.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.state.read().cache.len()
    }

    /// Number of paths with explicit overrides.
    #[must_use]
    pub fn overrides_len(&self) -> usize {
        self.state.read().registry.len()
    }

    /// See [`Config::is_layer_allowed`].
    #[must_use]
    pub fn is_layer_allowed(&self, layer: &Layer) -> bool {
        self.config.is_layer_allowed(layer)
    }

    /// Forgets every override and cached label. Intended for tests.
    pub fn reset(&self) {
        let mut state = self.state.write();
        state.registry.clear();
        state.cache.clear();
        state.generation = state.generation.wrapping_add(1);
    }

    fn store(&self, path: &str, label: &Layer, generation: u64) {
        let mut state = self.state.write();
        if state.generation == generation {
            state.cache.set(path, label.clone());
        } else {
            trace!(path, "Overrides changed during resolution, result not cached");
        }
    }
}
