//! Call-site capture macros.
//!
//! ```ignore
//! use csvlog::{error, info, Registry};
//!
//! let log = registry.create_logger("com.example.app", "net", false);
//! info!(log, "connected to {}", addr);
//! error!(log, "send failed: {}", err);
//! ```

/// Name of the enclosing function, resolved at compile time.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __csvlog_here() {}
        fn __csvlog_type_name<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = __csvlog_type_name(__csvlog_here);
        let name = name.strip_suffix("::__csvlog_here").unwrap_or(name);
        let name = name.trim_end_matches("::{{closure}}");
        name.rsplit("::").next().unwrap_or(name)
    }};
}

/// [`SourceLocation`](crate::record::SourceLocation) of the invocation.
#[macro_export]
macro_rules! here {
    () => {
        $crate::record::SourceLocation::new(::std::file!(), ::std::line!(), $crate::function_name!())
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __emit {
    ($logger:expr, $severity:ident, $($arg:tt)+) => {
        $logger.log(
            $crate::record::Severity::$severity,
            ::std::format!($($arg)+),
            $crate::here!(),
        )
    };
}

#[macro_export]
macro_rules! verbose {
    ($logger:expr, $($arg:tt)+) => { $crate::__emit!($logger, Verbose, $($arg)+) };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => { $crate::__emit!($logger, Debug, $($arg)+) };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => { $crate::__emit!($logger, Info, $($arg)+) };
}

#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => { $crate::__emit!($logger, Warning, $($arg)+) };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => { $crate::__emit!($logger, Error, $($arg)+) };
}
