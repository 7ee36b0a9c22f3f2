//! Error log collaborator.

use tracing::error;

/// Target used for dashboard error log entries.
pub const ERROR_LOG_TARGET: &str = "infotrack::errors";

/// Records error messages. Best-effort: never fails the caller.
#[cfg_attr(test, mockall::automock)]
pub trait ErrorLog: Send + Sync {
    /// Writes one error entry.
    fn log_error(&self, message: &str);
}

/// Writes error entries as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingErrorLog;

impl ErrorLog for TracingErrorLog {
    fn log_error(&self, message: &str) {
        error!(target: ERROR_LOG_TARGET, "{message}");
    }
}
