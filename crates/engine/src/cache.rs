use crate::layer::Layer;
use fxhash::FxHashMap;

/// Memoized `module path -> label` results.
///
/// Unbounded: keys are limited to the distinct modules of a process.
#[derive(Debug, Default)]
pub struct Cache {
    labels: FxHashMap<String, Layer>,
}

impl Cache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Layer> {
        self.labels.get(path)
    }

    pub fn set(&mut self, path: &str, label: Layer) {
        if let Some(slot) = self.labels.get_mut(path) {
            *slot = label;
        } else {
            self.labels.insert(path.to_owned(), label);
        }
    }

    /// Drops the entry for `path`. Returns `true` if one was present.
    pub fn invalidate(&mut self, path: &str) -> bool {
        self.labels.remove(path).is_some()
    }

    /// Drops every entry below `path` (not `path` itself). Returns the number removed.
    pub fn invalidate_descendants(&mut self, path: &str) -> usize {
        let prefix = format!("{path}/");
        let before = self.labels.len();
        self.labels.retain(|key, _| !key.starts_with(&prefix));
        before - self.labels.len()
    }

    pub fn clear(&mut self) {
        self.labels.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
