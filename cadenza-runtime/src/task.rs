use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use crate::error::BoxError;

/// Schedule sentinel meaning "only ever run on demand".
///
/// An empty schedule string means the same thing.
pub const MANUAL_SCHEDULE: &str = "manual";

/// Trait for units of work managed by the container.
///
/// # Example
///
/// ```rust
/// use cadenza_runtime::{BoxError, Runnable};
/// use std::future::Future;
/// use std::pin::Pin;
///
/// struct WarmCache {
///     keys: Vec<String>,
/// }
///
/// impl Runnable for WarmCache {
///     fn run(&self) -> Pin<Box<dyn Future<Output = Result<(), BoxError>> + Send + '_>> {
///         Box::pin(async move {
///             for key in &self.keys {
///                 // load key into the cache
///                 let _ = key;
///             }
///             Ok(())
///         })
///     }
/// }
/// ```
pub trait Runnable: Send + Sync {
    /// Execute the task, yielding success or the task's own failure reason.
    fn run(&self) -> Pin<Box<dyn Future<Output = Result<(), BoxError>> + Send + '_>>;
}

/// Adapter turning an async closure into a [`Runnable`].
///
/// Handy for small tasks that do not warrant a dedicated type:
///
/// ```rust
/// use cadenza_runtime::TaskFn;
///
/// let task = TaskFn::new(|| async {
///     println!("ping");
///     Ok(())
/// });
/// # let _ = task;
/// ```
pub struct TaskFn<F> {
    f: F,
}

impl<F, Fut> TaskFn<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F, Fut> Runnable for TaskFn<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), BoxError>> + Send + 'static,
{
    fn run(&self) -> Pin<Box<dyn Future<Output = Result<(), BoxError>> + Send + '_>> {
        Box::pin((self.f)())
    }
}

/// A task registered with the container: identity plus capabilities.
///
/// Capabilities are explicit optional fields rather than probed interfaces:
/// a task with no `schedule` is never auto-dispatched, a task with no
/// `error_after` runs without a watchdog, and `run_inline` defaults to
/// out-of-process dispatch.
#[derive(Clone)]
pub struct RegisteredTask {
    pub group: &'static str,
    pub name: &'static str,
    /// Cron expression, or [`MANUAL_SCHEDULE`]/`""` for on-demand only.
    /// May be a `${path}` or `${path:default}` config placeholder.
    pub schedule: Option<&'static str>,
    /// Expected maximum run time; exceeding it triggers a watchdog report.
    pub error_after: Option<Duration>,
    /// Dispatch firings run as an in-process background task instead of a
    /// child process.
    pub run_inline: bool,
    pub instance: Arc<dyn Runnable>,
}

impl RegisteredTask {
    /// Create a new builder for RegisteredTask
    pub fn builder(
        group: &'static str,
        name: &'static str,
        instance: Arc<dyn Runnable>,
    ) -> RegisteredTaskBuilder {
        RegisteredTaskBuilder {
            group,
            name,
            schedule: None,
            error_after: None,
            run_inline: false,
            instance,
        }
    }
}

/// Builder for RegisteredTask
pub struct RegisteredTaskBuilder {
    group: &'static str,
    name: &'static str,
    schedule: Option<&'static str>,
    error_after: Option<Duration>,
    run_inline: bool,
    instance: Arc<dyn Runnable>,
}

impl RegisteredTaskBuilder {
    pub fn schedule(mut self, schedule: &'static str) -> Self {
        self.schedule = Some(schedule);
        self
    }

    pub fn error_after(mut self, error_after: Duration) -> Self {
        self.error_after = Some(error_after);
        self
    }

    pub fn run_inline(mut self, run_inline: bool) -> Self {
        self.run_inline = run_inline;
        self
    }

    pub fn build(self) -> RegisteredTask {
        RegisteredTask {
            group: self.group,
            name: self.name,
            schedule: self.schedule,
            error_after: self.error_after,
            run_inline: self.run_inline,
            instance: self.instance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_to_manual_out_of_process() {
        let task = RegisteredTask::builder("cache", "warm", Arc::new(TaskFn::new(|| async { Ok(()) })))
            .build();
        assert_eq!(task.group, "cache");
        assert_eq!(task.name, "warm");
        assert!(task.schedule.is_none());
        assert!(task.error_after.is_none());
        assert!(!task.run_inline);
    }

    #[test]
    fn builder_sets_capabilities() {
        let task = RegisteredTask::builder("cache", "warm", Arc::new(TaskFn::new(|| async { Ok(()) })))
            .schedule("0 0 * * * *")
            .error_after(Duration::from_secs(30))
            .run_inline(true)
            .build();
        assert_eq!(task.schedule, Some("0 0 * * * *"));
        assert_eq!(task.error_after, Some(Duration::from_secs(30)));
        assert!(task.run_inline);
    }
}
