//! Logging and observability
//!
//! Structured logging through `tracing`, with text or JSON output and a
//! configurable level.
//!
//! # Example
//!
//! ```no_run
//! use confbind::logging::{init_logging, LogFormat};
//!
//! init_logging("debug", LogFormat::Json).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LogFormat};

/// Log a configuration error together with the option path it occurred at
///
/// # Example
///
/// ```no_run
/// use confbind::log_binding_error;
/// use confbind::domain::{ConfigurationError, Path};
///
/// let error = ConfigurationError::missing_value(&Path::root("port"));
/// log_binding_error!(&error, "Binding failed");
/// ```
#[macro_export]
macro_rules! log_binding_error {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            path = ?$error.path().map(|p| p.to_string()),
            context = $context,
            "Configuration error"
        );
    };
}
