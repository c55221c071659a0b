//! Canonical logging macros
//!
//! These macros provide a structured, consistent way to log operations.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use transitops_core::log_op_start;
/// log_op_start!("update_bus");
/// log_op_start!("update_bus", entity_id = "42");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = transitops_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = transitops_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use transitops_core::log_op_end;
/// log_op_end!("update_bus", duration_ms = 42);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = transitops_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = transitops_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// # Example
///
/// ```ignore
/// # use transitops_core::{log_op_error, errors::{OpsError, OpsErrorKind}};
/// let err = OpsError::new(OpsErrorKind::NotFound).with_message("bus not found");
/// log_op_error!("get_bus", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        use $crate::errors::OpsError;
        let ops_err: OpsError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = transitops_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ops_err.kind(),
            err_code = ops_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        use $crate::errors::OpsError;
        let ops_err: OpsError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = transitops_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ops_err.kind(),
            err_code = ops_err.code(),
            $($field)*
        );
    }};
}
