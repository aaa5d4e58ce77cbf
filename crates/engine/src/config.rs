use crate::error::EngineError;
use crate::layer::Layer;
use fxhash::FxHashSet;
use serde::Deserialize;

/// Number of trailing path segments used for a label when no override applies.
pub const DEFAULT_DEPTH: i32 = 2;

/// Path segments that carry no meaning in a label.
pub const DEFAULT_SKIP_SEGMENTS: &[&str] =
    &["internal", "pkg", "cmd", "adapters", "primary", "secondary"];

/// Resolution policy shared by every lookup.
///
/// The struct deserializes with defaults for missing keys, so it can be embedded in an
/// application config file:
///
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use strata_engine::{Config, Layer};
///
/// let config: Config = serde_json::from_str(
///     r#"{ "default_depth": 3, "strict_mode": true, "allowed_layers": ["http", "db"] }"#,
/// )?;
/// config.validate()?;
/// assert!(config.is_layer_allowed(&Layer::HTTP));
/// assert!(!config.is_layer_allowed(&Layer::CORE));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Trailing segments kept when extracting a label. Must be `>= 0`.
    pub default_depth: i32,
    /// Segments removed from extracted labels (exact match).
    pub skip_segments: FxHashSet<String>,
    /// Only layers in `allowed_layers` may be emitted when enabled.
    pub strict_mode: bool,
    /// Permitted layers in strict mode. Ignored otherwise.
    pub allowed_layers: FxHashSet<Layer>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_depth: DEFAULT_DEPTH,
            skip_segments: DEFAULT_SKIP_SEGMENTS.iter().map(|s| (*s).to_owned()).collect(),
            strict_mode: false,
            allowed_layers: FxHashSet::default(),
        }
    }
}

impl Config {
    /// Returns a [`ConfigBuilder`] seeded with [`Config::default`].
    #[must_use = "The builder must be finished with `build` to obtain a validated config."]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder { config: Self::default() }
    }

    /// Checks the invariants the resolver relies on.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidConfiguration`] if `default_depth` is negative or if
    /// `strict_mode` is enabled with an empty `allowed_layers` set.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.default_depth < 0 {
            return Err(EngineError::InvalidConfiguration {
                message: format!("default_depth must be >= 0, got {}", self.default_depth).into(),
                context: None,
            });
        }

        if self.strict_mode && self.allowed_layers.is_empty() {
            return Err(EngineError::InvalidConfiguration {
                message: "strict_mode requires at least one allowed layer".into(),
                context: None,
            });
        }

        Ok(())
    }

    #[must_use]
    pub fn should_skip_segment(&self, segment: &str) -> bool {
        self.skip_segments.contains(segment)
    }

    /// Always `true` outside strict mode. In strict mode, membership is checked on the
    /// upper-cased label, so an override registered as `Database` matches `DATABASE`.
    #[must_use]
    pub fn is_layer_allowed(&self, layer: &Layer) -> bool {
        if !self.strict_mode {
            return true;
        }
        self.allowed_layers.contains(layer) || self.allowed_layers.contains(&layer.normalized())
    }
}

/// Builder for [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Sets the number of trailing segments used for extracted labels.
    #[must_use = "The builder must be finished with `build` to obtain a validated config."]
    pub const fn default_depth(mut self, depth: i32) -> Self {
        self.config.default_depth = depth;
        self
    }

    /// Replaces the skip segment set.
    #[must_use = "The builder must be finished with `build` to obtain a validated config."]
    pub fn skip_segments<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.skip_segments = segments.into_iter().map(Into::into).collect();
        self
    }

    /// Adds one segment to the skip set.
    #[must_use = "The builder must be finished with `build` to obtain a validated config."]
    pub fn skip_segment(mut self, segment: impl Into<String>) -> Self {
        self.config.skip_segments.insert(segment.into());
        self
    }

    /// Enables or disables strict mode.
    #[must_use = "The builder must be finished with `build` to obtain a validated config."]
    pub const fn strict_mode(mut self, enabled: bool) -> Self {
        self.config.strict_mode = enabled;
        self
    }

    /// Adds a layer to the strict-mode allow-list.
    #[must_use = "The builder must be finished with `build` to obtain a validated config."]
    pub fn allow_layer(mut self, layer: Layer) -> Self {
        self.config.allowed_layers.insert(layer.normalized());
        self
    }

    /// Validates and returns the config.
    ///
    /// # Errors
    /// See [`Config::validate`].
    pub fn build(self) -> Result<Config, EngineError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_depth, DEFAULT_DEPTH);
        assert!(!config.strict_mode);
        assert!(config.should_skip_segment("internal"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_depth() {
        let config = Config { default_depth: -1, ..Config::default() };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfiguration { .. }));
        assert!(err.to_string().contains("must be >= 0"));
    }

    #[test]
    fn test_validate_strict_mode_requires_allowed_layers() {
        let config = Config { strict_mode: true, ..Config::default() };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("at least one allowed layer"));

        let mut config = config;
        config.allowed_layers.insert(Layer::HTTP);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_should_skip_segment() {
        let config =
            Config::builder().skip_segments(["internal", "pkg", "adapters"]).build().unwrap();
        for segment in ["internal", "pkg", "adapters"] {
            assert!(config.should_skip_segment(segment), "{segment} should be skipped");
        }
        for segment in ["api", "db", "", "cmd"] {
            assert!(!config.should_skip_segment(segment), "{segment} should be kept");
        }

        let empty = Config::builder().skip_segments(Vec::<String>::new()).build().unwrap();
        assert!(!empty.should_skip_segment("internal"));
    }

    #[test]
    fn test_is_layer_allowed() {
        let strict = Config::builder()
            .strict_mode(true)
            .allow_layer(Layer::HTTP)
            .allow_layer(Layer::new("database"))
            .build()
            .unwrap();
        assert!(strict.is_layer_allowed(&Layer::HTTP));
        assert!(!strict.is_layer_allowed(&Layer::CORE));
        assert!(strict.is_layer_allowed(&Layer::verbatim("Database")));

        let relaxed = Config::builder().allow_layer(Layer::HTTP).build().unwrap();
        assert!(relaxed.is_layer_allowed(&Layer::DB));
    }

    #[test]
    fn test_builder_validates() {
        assert!(Config::builder().default_depth(-3).build().is_err());
        assert!(Config::builder().strict_mode(true).build().is_err());
        let config = Config::builder().default_depth(3).skip_segment("cmd").build().unwrap();
        assert_eq!(config.default_depth, 3);
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{ "default_depth": 4 }"#).unwrap();
        assert_eq!(config.default_depth, 4);
        assert_eq!(config.skip_segments, Config::default().skip_segments);

        let unknown = serde_json::from_str::<Config>(r#"{ "depth": 4 }"#);
        assert!(unknown.is_err());
    }
}
