//! Cadenza Runtime - Core runtime for the grouped task registry and dispatcher
//!
//! This crate provides the registry, the synchronous runner and the cron
//! dispatch loop behind the `cadenza` facade.

mod config;
mod container;
mod error;
mod observer;
mod registry;
mod task;
mod watchdog;

// Re-export public API
pub use config::{load_toml_config, load_yaml_config, resolve_config_value, EnablementCheck};
pub use container::{ContainerBuilder, DispatchCommand, DispatchHandle, TaskContainer};
pub use error::{exit_code, BoxError, TaskError};
pub use linkme;
pub use observer::{ErrorHandler, TaskLogger, TracingErrorHandler, TracingLogger};
pub use registry::REGISTERED_TASKS;
pub use task::{RegisteredTask, RegisteredTaskBuilder, Runnable, TaskFn, MANUAL_SCHEDULE};
