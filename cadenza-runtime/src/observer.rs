use crate::error::TaskError;

/// Logging collaborator for container events.
///
/// Implementations must tolerate concurrent calls from dispatch workers.
pub trait TaskLogger: Send + Sync {
    /// Log an informational event under a short category such as `"task"`
    /// or `"dispatch"`.
    fn info(&self, category: &str, message: &str);

    /// Sink for raw output captured from a dispatch worker's stderr.
    fn raw(&self, line: &str) {
        self.info("worker", line);
    }
}

/// Error-reporting collaborator.
///
/// Receives watchdog anomalies, dispatch infrastructure failures, recovered
/// panics and task failures surfaced by the dispatcher.
pub trait ErrorHandler: Send + Sync {
    fn error(&self, err: &TaskError);
}

/// Default logger emitting through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl TaskLogger for TracingLogger {
    fn info(&self, category: &str, message: &str) {
        tracing::info!(category, "{message}");
    }
}

/// Default error handler emitting through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingErrorHandler;

impl ErrorHandler for TracingErrorHandler {
    fn error(&self, err: &TaskError) {
        tracing::error!("{err}");
    }
}
