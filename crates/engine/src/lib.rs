//! # Layer Resolution Engine
//!
//! Turns a module path (`service.com/app/internal/db/postgres`) into the layer label
//! attached to log lines (`DB/POSTGRES`), without the caller naming the layer.
//!
//! ## Overview
//!
//! * [`extract`]: pure function keeping the last `depth` segments of a path, dropping
//!   skip segments and upper-casing the result.
//! * [`Config`]: validated policy (default depth, skip segments, strict mode, allow-list).
//! * [`Registry`]: explicit per-path overrides. An explicit layer is inherited by every
//!   descendant path; an explicit depth applies to its exact path only.
//! * [`Cache`]: memoized results.
//! * [`Resolver`]: the thread-safe entry point combining the pieces above behind a single
//!   `parking_lot::RwLock`.
//!
//! ## Consistency
//!
//! Every override write drops the cached label of its path; an explicit layer also drops
//! the cached labels of all descendants. A resolution running concurrently with a write
//! may still return the previous label, but it never caches it, so the next resolution
//! observes the write.
//!
//! ## Example
//!
//! ```rust
//! # fn main() -> Result<(), strata_engine::EngineError> {
//! use strata_engine::{Config, Layer, Resolver};
//!
//! let resolver = Resolver::new(Config::builder().default_depth(2).build()?)?;
//!
//! assert_eq!(resolver.resolve("app/internal/cache/redis").as_str(), "CACHE/REDIS");
//!
//! resolver.set_explicit_layer("app/internal/db", "Database");
//! assert_eq!(resolver.resolve("app/internal/db/postgres/pool").as_str(), "Database");
//!
//! assert!(resolver.set_explicit_depth("app/api", -1).is_err());
//! assert_eq!(Layer::new("http"), Layer::HTTP);
//! # Ok(())
//! # }
//! ```

mod cache;
mod config;
mod error;
mod layer;
mod path;
mod registry;
mod resolver;

pub use cache::Cache;
pub use config::{Config, ConfigBuilder, DEFAULT_DEPTH, DEFAULT_SKIP_SEGMENTS};
pub use error::{EngineError, EngineErrorExt};
pub use layer::Layer;
pub use path::{ModulePath, UNKNOWN_LABEL, UNKNOWN_PATH, extract, parent_path};
pub use registry::{PackageConfig, Registry};
pub use resolver::Resolver;
