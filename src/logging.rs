//! Logging abstraction layer.
//!
//! The router never talks to a logging crate directly. Every diagnostic goes
//! through the macros below, which forward to either [`log`](https://docs.rs/log)
//! or [`tracing`](https://docs.rs/tracing) depending on the enabled feature.
//! The two features are **mutually exclusive**; enable at most one. With
//! neither enabled the macros compile to nothing.
//!
//! | Feature    | Backend         | Default |
//! |------------|-----------------|---------|
//! | `log`      | `log` crate     | yes     |
//! | `tracing`  | `tracing` crate | no      |
//!
//! # Where the router logs
//!
//! | Level   | Event                                                  |
//! |---------|--------------------------------------------------------|
//! | `info`  | route registration, navigation                         |
//! | `debug` | fallback resolution, router state transitions          |
//! | `trace` | resolve-cache hits and misses, subscriber notification |
//! | `warn`  | a path matched nothing and no fallback exists          |
//! | `error` | a route pattern was rejected while building a table    |
//!
//! All macros accept `format!`-style arguments:
//!
//! ```ignore
//! use switchyard::{trace_log, debug_log, info_log, warn_log, error_log};
//!
//! trace_log!("Resolve cache hit for '{}'", path);
//! debug_log!("'{}' fell through to the fallback route", path);
//! info_log!("Registered route '{}'", pattern);
//! warn_log!("No route matched '{}' and no fallback is registered", path);
//! error_log!("Rejected route pattern: {}", err);
//! ```

#[doc(hidden)]
#[macro_export]
macro_rules! __dispatch_log {
    ($level:ident, $($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::$level!($($arg)*);
        #[cfg(feature = "log")]
        ::log::$level!($($arg)*);
        #[cfg(not(any(feature = "log", feature = "tracing")))]
        {
            let _ = ::std::format_args!($($arg)*);
        }
    };
}

/// Emit a **trace**-level log message.
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        $crate::__dispatch_log!(trace, $($arg)*)
    };
}

/// Emit a **debug**-level log message.
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        $crate::__dispatch_log!(debug, $($arg)*)
    };
}

/// Emit an **info**-level log message.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        $crate::__dispatch_log!(info, $($arg)*)
    };
}

/// Emit a **warn**-level log message.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        $crate::__dispatch_log!(warn, $($arg)*)
    };
}

/// Emit an **error**-level log message.
///
/// Reserved for conditions that abort an operation, such as an invalid
/// route pattern rejected during table construction.
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {
        $crate::__dispatch_log!(error, $($arg)*)
    };
}
