//! Call-site capture for the emitting severities.
//!
//! The macros hand `file!()`, [`function_name!`](crate::function_name), and
//! `line!()` to [`emit`](crate::emit) together with the message template, so
//! every emitted line names its true call site.

/// Expands to the name of the enclosing function, without its module path.
///
/// Inside a closure this reports `{{closure}}`, which is how the compiler
/// names the enclosing scope.
///
/// # Example
///
/// ```ignore
/// fn connect() {
///     assert_eq!(function_name!(), "connect");
/// }
/// ```
#[macro_export]
macro_rules! function_name {
    () => {{
        fn here() {}
        fn name_of<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        let full = name_of(here);
        // Drop the "::here" suffix, then everything before the last "::".
        let full = &full[..full.len() - "::here".len()];
        match full.rfind("::") {
            Some(index) => &full[index + 2..],
            None => full,
        }
    }};
}

/// Logs at [`Error`](crate::LogLevel::Error) severity.
///
/// Suppressed only when the threshold is
/// [`Quiet`](crate::LogLevel::Quiet).
///
/// # Example
///
/// ```ignore
/// log_error!("listen on {} failed: {}", addr, err);
/// ```
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::emit(
            &$crate::Record::new(
                file!(), $crate::function_name!(), line!(), $crate::LogLevel::Error
            ),
            format_args!($($arg)*),
        )
    };
}

/// Logs at [`Print`](crate::LogLevel::Print) severity, the default
/// threshold.
///
/// # Example
///
/// ```ignore
/// log_print!("accepted {} from {}", request_id, peer);
/// ```
#[macro_export]
macro_rules! log_print {
    ($($arg:tt)*) => {
        $crate::emit(
            &$crate::Record::new(
                file!(), $crate::function_name!(), line!(), $crate::LogLevel::Print
            ),
            format_args!($($arg)*),
        )
    };
}

/// Logs at [`Debug`](crate::LogLevel::Debug) severity.
///
/// Suppressed unless the threshold has been raised to `Debug`; the message
/// template is not rendered on the suppressed path.
///
/// # Example
///
/// ```ignore
/// log_debug!("frame {:?}", frame);
/// ```
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::emit(
            &$crate::Record::new(
                file!(), $crate::function_name!(), line!(), $crate::LogLevel::Debug
            ),
            format_args!($($arg)*),
        )
    };
}
