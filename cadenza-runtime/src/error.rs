use std::process::ExitStatus;
use std::time::Duration;

/// Boxed error type tasks return from [`Runnable::run`](crate::Runnable::run).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors produced by the task container.
///
/// `NotFound` and `NotEnabled` are distinguished variants so callers can
/// tell "no such task" and "switched off" apart from a task that ran and
/// failed. `Failed` is transparent: it carries the task's own error verbatim.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// No registered task matches the requested (group, name).
    #[error("task {group}:{name} not found")]
    NotFound { group: String, name: String },

    /// The configuration gate denied execution for this task.
    #[error("task {group}:{name} is not enabled")]
    NotEnabled { group: String, name: String },

    /// The task's own `run` returned an error.
    #[error(transparent)]
    Failed(BoxError),

    /// The task was still running once its expected duration elapsed.
    #[error("task still running after expected duration: {group}:{name} {}s", .expected.as_secs())]
    Overrun {
        group: String,
        name: String,
        expected: Duration,
    },

    /// The cron engine itself could not be created or started.
    #[error("dispatch engine failure: {detail}")]
    Scheduler { detail: String },

    /// A trigger could not be registered for this task's cron expression.
    #[error("failed to schedule task {group}:{name}: {detail}")]
    Schedule {
        group: String,
        name: String,
        detail: String,
    },

    /// A dispatch worker process could not be resolved or launched.
    #[error("failed to launch worker for task {group}:{name}")]
    Launch {
        group: String,
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// A dispatch worker process exited unsuccessfully.
    #[error("worker for task {group}:{name} exited abnormally: {status}")]
    WorkerExit {
        group: String,
        name: String,
        status: ExitStatus,
    },

    /// An inline-dispatched task panicked; caught at the spawn boundary.
    #[error("task {group}:{name} panicked: {message}")]
    Panicked {
        group: String,
        name: String,
        message: String,
    },
}

/// Exit code a host binary should use for an [`execute`](crate::TaskContainer::execute) outcome.
///
/// Process termination stays with the outermost caller; the container itself
/// never exits the process.
pub fn exit_code(outcome: &Result<(), TaskError>) -> i32 {
    match outcome {
        Ok(()) => 0,
        Err(_) => 1,
    }
}
