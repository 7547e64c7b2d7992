//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log operations at
//! the tracker boundary.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use refguard_core::log_op_start;
/// log_op_start!("track_value");
/// log_op_start!("track_value", ignored_paths = 2);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use refguard_core::log_op_end;
/// log_op_end!("detect_mutations", duration_ms = 3);
/// log_op_end!("detect_mutations", duration_ms = 3, mutated = false);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// # Example
///
/// ```
/// # use refguard_core::log_op_error;
/// # use refguard_core::errors::RefguardError;
/// let err = RefguardError::UnsupportedContainer { kind: "number", path: "foo".to_string() };
/// log_op_error!("track_value", &err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let err: &$crate::errors::RefguardError = $err;
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_code = err.code(),
            err = %err,
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let err: &$crate::errors::RefguardError = $err;
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_code = err.code(),
            err = %err,
            $($field)*
        );
    }};
}
