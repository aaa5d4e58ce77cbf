use crate::error::EngineError;
use crate::layer::Layer;
use crate::path::parent_path;
use fxhash::FxHashMap;

/// Overrides configured for one module path.
///
/// At least one of the two fields is always set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageConfig {
    explicit_layer: Option<Layer>,
    explicit_depth: Option<i32>,
}

impl PackageConfig {
    /// Layer pinned to this path and inherited by its descendants.
    #[must_use]
    pub const fn explicit_layer(&self) -> Option<&Layer> {
        self.explicit_layer.as_ref()
    }

    /// Extraction depth for this exact path. Never inherited.
    #[must_use]
    pub const fn explicit_depth(&self) -> Option<i32> {
        self.explicit_depth
    }
}

/// Explicit per-path overrides.
///
/// The registry holds no lock and knows nothing about cached labels; the
/// [`Resolver`](crate::Resolver) pairs every write with the matching cache invalidation.
#[derive(Debug, Default)]
pub struct Registry {
    entries: FxHashMap<String, PackageConfig>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins `layer` to `path` and, through inheritance, to every descendant of `path`.
    pub fn set_explicit_layer(&mut self, path: &str, layer: Layer) {
        self.entry(path).explicit_layer = Some(layer);
    }

    /// Sets the extraction depth used for `path` only.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidArgument`] if `depth` is negative; the registry is
    /// left unchanged.
    pub fn set_explicit_depth(&mut self, path: &str, depth: i32) -> Result<(), EngineError> {
        if depth < 0 {
            return Err(EngineError::InvalidArgument {
                message: format!("depth must be >= 0, got {depth}").into(),
                context: Some(format!("path '{path}'").into()),
            });
        }
        self.entry(path).explicit_depth = Some(depth);
        Ok(())
    }

    /// Walks from `path` towards the root and returns the nearest explicit layer,
    /// including one set on `path` itself.
    #[must_use]
    pub fn find_inherited_layer(&self, path: &str) -> Option<&Layer> {
        let mut current = path;
        while !current.is_empty() {
            if let Some(layer) = self.entries.get(current).and_then(PackageConfig::explicit_layer) {
                return Some(layer);
            }
            current = parent_path(current);
        }
        None
    }

    #[must_use]
    pub fn explicit_depth(&self, path: &str) -> Option<i32> {
        self.entries.get(path).and_then(PackageConfig::explicit_depth)
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&PackageConfig> {
        self.entries.get(path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    fn entry(&mut self, path: &str) -> &mut PackageConfig {
        self.entries.entry(path.to_owned()).or_default()
    }
}
