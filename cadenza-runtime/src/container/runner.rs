use config::Config;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::{enablement_path, is_enabled, EnablementCheck};
use crate::error::TaskError;
use crate::observer::{ErrorHandler, TaskLogger};
use crate::registry::TaskRegistry;
use crate::watchdog::spawn_watchdog;

use super::builder::ContainerBuilder;
use super::dispatch::DispatchCommand;

pub(crate) struct ContainerInner {
    pub(crate) registry: TaskRegistry,
    pub(crate) config: Option<Arc<Config>>,
    pub(crate) namespace: String,
    pub(crate) logger: Arc<dyn TaskLogger>,
    pub(crate) errors: Arc<dyn ErrorHandler>,
    pub(crate) dispatch_env: Option<Vec<(String, String)>>,
    pub(crate) dispatch_command: Option<DispatchCommand>,
    pub(crate) enablement_check: EnablementCheck,
}

/// The task registry and orchestrator.
///
/// Built once via [`ContainerBuilder`]; cloning is cheap and every clone
/// shares the same task list and collaborators. Tasks are run on demand with
/// [`run_task`](TaskContainer::run_task) or [`execute`](TaskContainer::execute),
/// or continuously with [`dispatch_tasks`](TaskContainer::dispatch_tasks).
#[derive(Clone)]
pub struct TaskContainer {
    pub(crate) inner: Arc<ContainerInner>,
}

impl TaskContainer {
    /// Shorthand for [`ContainerBuilder::new`].
    pub fn builder() -> ContainerBuilder {
        ContainerBuilder::new()
    }

    /// Run a single task by identity, synchronously from the caller's view.
    ///
    /// Looks the task up by (group, name) and fails with
    /// [`TaskError::NotFound`] when nothing matches. A found task is run
    /// exactly once and its own result is returned verbatim; when the task
    /// declares an expected duration, a watchdog observes the invocation and
    /// reports an overrun through the error handler without affecting the
    /// task's outcome.
    pub async fn run_task(&self, group: &str, name: &str) -> Result<(), TaskError> {
        let inner = &self.inner;
        let Some(task) = inner.registry.find(group, name) else {
            return Err(TaskError::NotFound {
                group: group.to_string(),
                name: name.to_string(),
            });
        };

        inner
            .logger
            .info("task", &format!("running task ({}:{})", task.group, task.name));

        // Observed by the watchdog; Release/Acquire pairing keeps the store
        // visible to it.
        let running = Arc::new(AtomicBool::new(true));
        if let Some(expected) = task.error_after {
            spawn_watchdog(
                task.group,
                task.name,
                expected,
                running.clone(),
                inner.errors.clone(),
            );
        }

        let result = task.instance.run().await;
        running.store(false, Ordering::Release);

        inner.logger.info(
            "task",
            &format!("finished running task ({}:{})", task.group, task.name),
        );

        result.map_err(TaskError::Failed)
    }

    /// Run the task named by the process arguments, skipping the program
    /// name.
    ///
    /// Hosts that route through a subcommand should strip it and call
    /// [`execute_from`](TaskContainer::execute_from) directly.
    pub async fn execute(&self) -> Result<(), TaskError> {
        self.execute_from(std::env::args().skip(1)).await
    }

    /// Run the task named by `[group, name]` positional arguments.
    ///
    /// Fewer than two arguments is a logged no-op. A task denied by the
    /// enablement gate is not run and fails with [`TaskError::NotEnabled`];
    /// an unknown identity is logged and fails with [`TaskError::NotFound`];
    /// a task failure is routed through the error handler and returned.
    /// Mapping the outcome to a process exit code is the host's business,
    /// see [`exit_code`](crate::exit_code).
    pub async fn execute_from<I>(&self, args: I) -> Result<(), TaskError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        let (Some(group), Some(name)) = (args.next(), args.next()) else {
            self.inner
                .logger
                .info("task", "not enough arguments, expecting: <group> <name>");
            return Ok(());
        };

        if !self.task_enabled(&group, &name) {
            self.inner
                .logger
                .info("task", &format!("task {group}:{name} is not enabled"));
            return Err(TaskError::NotEnabled { group, name });
        }

        match self.run_task(&group, &name).await {
            Ok(()) => Ok(()),
            Err(e @ TaskError::NotFound { .. }) => {
                self.inner
                    .logger
                    .info("task", &format!("task {group}:{name} not found"));
                Err(e)
            }
            Err(e) => {
                self.inner.errors.error(&e);
                Err(e)
            }
        }
    }

    pub(crate) fn task_enabled(&self, group: &str, name: &str) -> bool {
        let path = enablement_path(&self.inner.namespace, group, name);
        is_enabled(self.inner.config.as_deref(), &path)
    }
}
