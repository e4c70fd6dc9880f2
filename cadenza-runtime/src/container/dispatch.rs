use std::path::PathBuf;
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::config::{resolve_config_value, EnablementCheck};
use crate::error::TaskError;
use crate::task::MANUAL_SCHEDULE;

use super::handle::DispatchHandle;
use super::runner::TaskContainer;

/// Command used to spawn a dispatch worker process.
///
/// By default the dispatcher re-invokes the current executable with the
/// task's group and name as arguments. Hosts without a stable self-path, or
/// ones routing through a subcommand, supply the command explicitly:
///
/// ```rust
/// use cadenza_runtime::DispatchCommand;
///
/// let command = DispatchCommand::new("/usr/local/bin/myapp").leading_arg("task");
/// // workers run as: /usr/local/bin/myapp task <group> <name>
/// # let _ = command;
/// ```
#[derive(Debug, Clone)]
pub struct DispatchCommand {
    pub program: PathBuf,
    pub leading_args: Vec<String>,
}

impl DispatchCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    /// Append a fixed argument placed before the task's group and name.
    pub fn leading_arg(mut self, arg: impl Into<String>) -> Self {
        self.leading_args.push(arg.into());
        self
    }
}

impl TaskContainer {
    /// Register every schedulable task with the cron engine and start it.
    ///
    /// Tasks without a schedule, with an empty or `"manual"` schedule, or
    /// denied by the enablement gate are skipped. A schedule that fails to
    /// resolve or parse is reported through the error handler and skips only
    /// that task. The returned handle owns the started engine; this call
    /// does not block and firings run until the handle is shut down or the
    /// process exits.
    pub async fn dispatch_tasks(&self) -> Result<DispatchHandle, TaskError> {
        let mut scheduler = JobScheduler::new().await.map_err(|e| TaskError::Scheduler {
            detail: e.to_string(),
        })?;
        let mut registered = 0usize;

        for task in self.inner.registry.tasks() {
            let Some(raw) = task.schedule else {
                continue;
            };
            let expr = match resolve_config_value(raw, self.inner.config.as_deref()) {
                Ok(expr) => expr,
                Err(e) => {
                    self.inner.errors.error(&TaskError::Schedule {
                        group: task.group.to_string(),
                        name: task.name.to_string(),
                        detail: e.to_string(),
                    });
                    continue;
                }
            };
            if expr.is_empty() || expr == MANUAL_SCHEDULE {
                continue;
            }
            if self.inner.enablement_check == EnablementCheck::AtRegistration
                && !self.task_enabled(task.group, task.name)
            {
                continue;
            }

            let container = self.clone();
            let group = task.group;
            let name = task.name;
            let run_inline = task.run_inline;

            let job = Job::new_async(expr.as_str(), move |_uuid, _lock| {
                let container = container.clone();
                Box::pin(async move {
                    container.fire(group, name, run_inline).await;
                })
            });

            let added = match job {
                Ok(job) => scheduler.add(job).await.map(|_| ()),
                Err(e) => Err(e),
            };
            match added {
                Ok(()) => registered += 1,
                Err(e) => self.inner.errors.error(&TaskError::Schedule {
                    group: group.to_string(),
                    name: name.to_string(),
                    detail: e.to_string(),
                }),
            }
        }

        scheduler
            .start()
            .await
            .map_err(|e| TaskError::Scheduler {
                detail: e.to_string(),
            })?;

        Ok(DispatchHandle::new(scheduler, registered))
    }

    /// One firing of a scheduled task.
    pub(crate) async fn fire(&self, group: &'static str, name: &'static str, run_inline: bool) {
        if self.inner.enablement_check == EnablementCheck::PerFiring
            && !self.task_enabled(group, name)
        {
            self.inner.logger.info(
                "dispatch",
                &format!("skipping disabled task ({group}:{name})"),
            );
            return;
        }

        self.inner
            .logger
            .info("dispatch", &format!("dispatching task ({group}:{name})"));

        if run_inline {
            let _ = self.fire_inline(group, name);
        } else {
            self.fire_worker(group, name).await;
        }
    }

    /// Run a firing in-process as a detached background task.
    ///
    /// The inner spawn is the panic barrier: a panicking task surfaces as a
    /// panicked `JoinError` here instead of unwinding the dispatcher.
    pub(crate) fn fire_inline(
        &self,
        group: &'static str,
        name: &'static str,
    ) -> tokio::task::JoinHandle<()> {
        let container = self.clone();
        tokio::spawn(async move {
            let guarded = tokio::spawn({
                let container = container.clone();
                async move { container.run_task(group, name).await }
            });
            match guarded.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => container.inner.errors.error(&e),
                Err(join) if join.is_panic() => {
                    let payload = join.into_panic();
                    let message = payload
                        .downcast_ref::<&str>()
                        .map(|s| s.to_string())
                        .or_else(|| payload.downcast_ref::<String>().cloned())
                        .unwrap_or_else(|| "opaque panic payload".to_string());
                    container.inner.errors.error(&TaskError::Panicked {
                        group: group.to_string(),
                        name: name.to_string(),
                        message,
                    });
                }
                Err(_) => {}
            }
        })
    }

    /// Run a firing out-of-process, blocking this worker until the child
    /// exits.
    pub(crate) async fn fire_worker(&self, group: &'static str, name: &'static str) {
        let inner = &self.inner;

        let (program, leading_args) = match &inner.dispatch_command {
            Some(command) => (command.program.clone(), command.leading_args.clone()),
            None => match std::env::current_exe() {
                Ok(path) => (path, Vec::new()),
                Err(e) => {
                    inner.errors.error(&TaskError::Launch {
                        group: group.to_string(),
                        name: name.to_string(),
                        source: e,
                    });
                    return;
                }
            },
        };

        let mut command = Command::new(&program);
        command
            .args(&leading_args)
            .arg(group)
            .arg(name)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        if let Some(envs) = &inner.dispatch_env {
            command.env_clear().envs(envs.iter().map(|(k, v)| (k, v)));
        }

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                inner.errors.error(&TaskError::Launch {
                    group: group.to_string(),
                    name: name.to_string(),
                    source: e,
                });
                return;
            }
        };

        if let Some(stderr) = child.stderr.take() {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                inner.logger.raw(&line);
            }
        }

        match child.wait().await {
            Ok(status) if status.success() => {}
            Ok(status) => inner.errors.error(&TaskError::WorkerExit {
                group: group.to_string(),
                name: name.to_string(),
                status,
            }),
            Err(e) => inner.errors.error(&TaskError::Launch {
                group: group.to_string(),
                name: name.to_string(),
                source: e,
            }),
        }
    }
}
