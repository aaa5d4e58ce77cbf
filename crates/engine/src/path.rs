//! Module paths and the depth-based label extractor.

use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::hash::BuildHasher;

/// Label returned when a path yields no segments.
pub const UNKNOWN_LABEL: &str = "UNKNOWN";

/// Path used when the calling module cannot be determined.
pub const UNKNOWN_PATH: &str = "unknown";

const SEPARATOR: char = '/';
const RUST_SEPARATOR: &str = "::";

/// A slash-delimited identifier of the code unit that produced a log line,
/// e.g. `service.com/app/internal/db/postgres`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModulePath(Cow<'static, str>);

impl ModulePath {
    pub fn new(path: impl Into<Cow<'static, str>>) -> Self {
        Self(path.into())
    }

    /// The sentinel path for a caller that could not be identified.
    #[must_use]
    pub const fn unknown() -> Self {
        Self(Cow::Borrowed(UNKNOWN_PATH))
    }

    /// Converts a Rust module path (`crate::db::postgres`) into a module path
    /// (`crate/db/postgres`). An empty input maps to [`ModulePath::unknown`].
    ///
    /// ```rust
    /// use strata_engine::ModulePath;
    ///
    /// let path = ModulePath::from_rust_module("shop::internal::db");
    /// assert_eq!(path.as_str(), "shop/internal/db");
    /// ```
    pub fn from_rust_module(module: &str) -> Self {
        if module.is_empty() {
            return Self::unknown();
        }
        Self(Cow::Owned(module.replace(RUST_SEPARATOR, "/")))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_PATH
    }

    /// Returns the enclosing module path, or `None` at the root.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        let parent = parent_path(&self.0);
        (!parent.is_empty()).then_some(parent)
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ModulePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for ModulePath {
    fn from(path: &'static str) -> Self {
        Self(Cow::Borrowed(path))
    }
}

impl From<String> for ModulePath {
    fn from(path: String) -> Self {
        Self(Cow::Owned(path))
    }
}

/// Strips the last segment of `path`. Returns `""` for a single segment.
///
/// ```rust
/// use strata_engine::parent_path;
///
/// assert_eq!(parent_path("myapp/db/postgres"), "myapp/db");
/// assert_eq!(parent_path("main"), "");
/// ```
#[must_use]
pub fn parent_path(path: &str) -> &str {
    path.rfind(SEPARATOR).map_or("", |idx| &path[..idx])
}

/// Builds a label from the last `depth` segments of `path`.
///
/// `depth` is clamped into `0..=segments`, so the function is total. Segments listed in
/// `skip` are dropped from the retained window; the rest are joined with `/` and
/// upper-cased. Empty segments are kept, so `"app/db/"` yields `"DB/"`. Returns
/// [`UNKNOWN_LABEL`] if nothing remains.
///
/// ```rust
/// use std::collections::HashSet;
/// use strata_engine::extract;
///
/// let skip: HashSet<String> = ["internal".to_owned()].into();
/// assert_eq!(extract("myapp/internal/db/postgres", 3, &skip), "DB/POSTGRES");
/// assert_eq!(extract("myapp/db", -1, &skip), "UNKNOWN");
/// ```
#[must_use]
pub fn extract<S: BuildHasher>(path: &str, depth: i32, skip: &HashSet<String, S>) -> String {
    let segments: Vec<&str> = path.split(SEPARATOR).collect();
    let depth = usize::try_from(depth).unwrap_or(0).min(segments.len());

    let kept: Vec<&str> = segments[segments.len() - depth..]
        .iter()
        .copied()
        .filter(|segment| !skip.contains(*segment))
        .collect();

    if kept.is_empty() {
        return UNKNOWN_LABEL.to_owned();
    }

    kept.join("/").to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skip(segments: &[&str]) -> HashSet<String> {
        segments.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_extract_takes_last_segments() {
        assert_eq!(extract("a/b/c/d", 2, &skip(&[])), "C/D");
        assert_eq!(extract("github.com/user/myapp/db", 1, &skip(&[])), "DB");
        assert_eq!(extract("github.com/user/myapp/db/postgres", 2, &skip(&[])), "DB/POSTGRES");
        assert_eq!(extract("main", 1, &skip(&[])), "MAIN");
    }

    #[test]
    fn test_extract_clamps_depth() {
        assert_eq!(extract("a/b", 10, &skip(&[])), "A/B");
        assert_eq!(extract("myapp/db", -1, &skip(&[])), UNKNOWN_LABEL);
        assert_eq!(extract("myapp/db", 0, &skip(&[])), UNKNOWN_LABEL);
        assert_eq!(extract("myapp/db", i32::MIN, &skip(&[])), UNKNOWN_LABEL);
    }

    #[test]
    fn test_extract_filters_skip_segments_within_window() {
        assert_eq!(extract("github.com/user/myapp/internal/db", 2, &skip(&["internal"])), "DB");
        assert_eq!(
            extract("myapp/internal/pkg/api/handlers", 3, &skip(&["internal", "pkg"])),
            "API/HANDLERS"
        );
        assert_eq!(extract("internal/pkg", 2, &skip(&["internal", "pkg"])), UNKNOWN_LABEL);
    }

    #[test]
    fn test_extract_skip_is_exact_membership() {
        assert_eq!(extract("app/internals/db", 2, &skip(&["internal"])), "INTERNALS/DB");
        assert_eq!(extract("app/pkgs", 1, &skip(&["pkg"])), "PKGS");
    }

    #[test]
    fn test_extract_keeps_empty_segments() {
        assert_eq!(extract("app/db/", 2, &skip(&[])), "DB/");
        assert_eq!(extract("a//b", 2, &skip(&[])), "/B");
        assert_eq!(extract("", 2, &skip(&[])), "");
        assert_eq!(extract("app//", 1, &skip(&["db"])), "");
    }

    #[test]
    fn test_parent_path() {
        assert_eq!(parent_path("github.com/user/myapp/db/postgres"), "github.com/user/myapp/db");
        assert_eq!(parent_path("myapp/db"), "myapp");
        assert_eq!(parent_path("main"), "");
        assert_eq!(parent_path(""), "");
    }

    #[test]
    fn test_module_path_from_rust_module() {
        assert_eq!(ModulePath::from_rust_module("app::api::v1").as_str(), "app/api/v1");
        assert!(ModulePath::from_rust_module("").is_unknown());
        assert_eq!(ModulePath::from("app/db").parent(), Some("app"));
        assert_eq!(ModulePath::from("app").parent(), None);
    }
}
