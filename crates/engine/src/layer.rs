use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A layer label attached to log lines.
///
/// Labels built with [`Layer::new`] are normalized to upper case. Labels produced by
/// an explicit override keep the spelling they were registered with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Layer(Cow<'static, str>);

impl Layer {
    pub const HTTP: Self = Self(Cow::Borrowed("HTTP"));
    pub const DB: Self = Self(Cow::Borrowed("DB"));
    pub const CORE: Self = Self(Cow::Borrowed("CORE"));

    /// Label used when nothing is left of a module path after filtering.
    pub const UNKNOWN: Self = Self(Cow::Borrowed(crate::path::UNKNOWN_LABEL));

    /// Registers a layer name, normalizing it to upper case.
    ///
    /// ```rust
    /// use strata_engine::Layer;
    ///
    /// assert_eq!(Layer::new("db"), Layer::DB);
    /// ```
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Cow::Owned(name.as_ref().to_uppercase()))
    }

    pub(crate) fn verbatim(label: impl Into<Cow<'static, str>>) -> Self {
        Self(label.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the upper-cased form of this label.
    #[must_use]
    pub fn normalized(&self) -> Self {
        if self.0.chars().any(char::is_lowercase) { Self::new(&self.0) } else { self.clone() }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Layer {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Layer {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&str> for Layer {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<Layer> for String {
    fn from(layer: Layer) -> Self {
        layer.0.into_owned()
    }
}
