use config::Config;
use std::sync::Arc;
use tracing::info;

use crate::config::{load_toml_config, load_yaml_config, EnablementCheck};
use crate::observer::{ErrorHandler, TaskLogger, TracingErrorHandler, TracingLogger};
use crate::registry::{TaskRegistry, REGISTERED_TASKS};
use crate::task::RegisteredTask;

use super::dispatch::DispatchCommand;
use super::runner::{ContainerInner, TaskContainer};

/// Builder for the task container.
pub struct ContainerBuilder {
    config: Option<Arc<Config>>,
    namespace: String,
    logger: Arc<dyn TaskLogger>,
    errors: Arc<dyn ErrorHandler>,
    tasks: Vec<RegisteredTask>,
    dispatch_env: Option<Vec<(String, String)>>,
    dispatch_command: Option<DispatchCommand>,
    enablement_check: EnablementCheck,
}

impl Default for ContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerBuilder {
    /// Create a new container builder with no configuration source.
    ///
    /// Without configuration every task is unconditionally enabled.
    pub fn new() -> Self {
        Self {
            config: None,
            namespace: "cadenza".to_string(),
            logger: Arc::new(TracingLogger),
            errors: Arc::new(TracingErrorHandler),
            tasks: Vec::new(),
            dispatch_env: None,
            dispatch_command: None,
            enablement_check: EnablementCheck::default(),
        }
    }

    /// Create with TOML config file
    ///
    /// # Panics
    ///
    /// Panics if the config file cannot be loaded or parsed.
    /// This is intentional as configuration errors should be caught early during setup.
    pub fn with_toml(path: &str) -> Self {
        let config = load_toml_config(path)
            .unwrap_or_else(|e| panic!("Failed to load TOML config from '{}': {}", path, e));
        Self::with_config(config)
    }

    /// Create with YAML config file
    ///
    /// # Panics
    ///
    /// Panics if the config file cannot be loaded or parsed.
    /// This is intentional as configuration errors should be caught early during setup.
    pub fn with_yaml(path: &str) -> Self {
        let config = load_yaml_config(path)
            .unwrap_or_else(|e| panic!("Failed to load YAML config from '{}': {}", path, e));
        Self::with_config(config)
    }

    /// Create with custom config
    pub fn with_config(config: Config) -> Self {
        Self {
            config: Some(Arc::new(config)),
            ..Self::new()
        }
    }

    /// Register a task.
    ///
    /// Registration order matters only for duplicate identities: lookup
    /// returns the first match. Tasks collected from the static
    /// [`REGISTERED_TASKS`] slice come before tasks registered here.
    pub fn register(mut self, task: RegisteredTask) -> Self {
        self.tasks.push(task);
        self
    }

    /// Replace the default tracing-backed logger.
    pub fn logger(mut self, logger: Arc<dyn TaskLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Replace the default tracing-backed error handler.
    pub fn error_handler(mut self, errors: Arc<dyn ErrorHandler>) -> Self {
        self.errors = errors;
        self
    }

    /// Namespace prefix for enablement lookups, `"cadenza"` by default.
    ///
    /// The gate queries the boolean at `<namespace>.<group>.<name>`.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Environment for dispatched worker processes.
    ///
    /// When set, a worker's environment is exactly this set; when unset,
    /// workers inherit the parent environment.
    pub fn dispatch_env<I, K, V>(mut self, envs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.dispatch_env = Some(
            envs.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Explicit command for dispatched worker processes, instead of
    /// re-invoking the current executable.
    pub fn dispatch_command(mut self, command: DispatchCommand) -> Self {
        self.dispatch_command = Some(command);
        self
    }

    /// When the enablement gate is consulted for scheduled tasks.
    pub fn enablement_check(mut self, check: EnablementCheck) -> Self {
        self.enablement_check = check;
        self
    }

    /// Build the container.
    ///
    /// Collects statically registered tasks from the [`REGISTERED_TASKS`]
    /// slice, then the tasks registered on this builder, preserving order.
    pub fn build(self) -> TaskContainer {
        let mut tasks: Vec<RegisteredTask> = REGISTERED_TASKS.iter().map(|f| f()).collect();
        let static_tasks = tasks.len();
        tasks.extend(self.tasks);

        info!(
            static_tasks,
            total_tasks = tasks.len(),
            "building task container"
        );

        TaskContainer {
            inner: Arc::new(ContainerInner {
                registry: TaskRegistry::new(tasks),
                config: self.config,
                namespace: self.namespace,
                logger: self.logger,
                errors: self.errors,
                dispatch_env: self.dispatch_env,
                dispatch_command: self.dispatch_command,
                enablement_check: self.enablement_check,
            }),
        }
    }
}
