//! Call-site macros. Each one captures the invoking module through
//! `module_path!()`, so `crate::db::postgres` logs as `DB/POSTGRES` without
//! the caller naming a path.

/// The [`ModulePath`](crate::ModulePath) of the invoking module.
#[macro_export]
macro_rules! here {
    () => {
        $crate::ModulePath::from_rust_module(::core::module_path!())
    };
}

/// Logs at an explicit [`Level`](crate::Level) under the invoking module.
///
/// The module path is only built when the level is enabled.
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let level = $level;
        if logger.enabled(level) {
            logger.log(level, $crate::here!(), ::core::format_args!($($arg)+));
        }
    }};
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Warn, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($arg)+)
    };
}

/// Pins a layer name on the invoking module and everything below it.
#[macro_export]
macro_rules! set_layer {
    ($logger:expr, $name:expr) => {
        $logger.set_layer_for($crate::here!(), $name)
    };
}

/// Overrides the extraction depth of the invoking module. Evaluates to a `Result`.
#[macro_export]
macro_rules! set_depth {
    ($logger:expr, $depth:expr) => {
        $logger.set_depth_for($crate::here!(), $depth)
    };
}

/// A [`Scope`](crate::Scope) bound to the invoking module.
#[macro_export]
macro_rules! scope {
    ($logger:expr) => {
        $logger.scope($crate::here!())
    };
}
