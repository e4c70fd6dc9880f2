//! # Cadenza - Grouped Task Registry with Cron Dispatch
//!
//! Register named, grouped units of work once at startup, then run them on
//! demand by `(group, name)` or continuously on their cron schedules. A
//! scheduled firing either re-invokes the host executable as a worker
//! process or runs inline as a background task.
//!
//! ## Features
//!
//! - **Two-part identity**: every task is addressed as `group:name`
//! - **On-demand execution**: `execute` runs the task named by the process
//!   arguments, for `myapp <group> <name>` style hosts
//! - **Cron dispatch**: tasks with a schedule fire on the engine's clock;
//!   `"manual"` or `""` keeps a task on-demand only
//! - **Config support**: per-task enable switches at `cadenza.<group>.<name>`
//!   and `${path}` placeholders inside schedule strings
//! - **Duration watchdog**: tasks declaring an expected duration are flagged
//!   when they run long
//! - **Worker or inline**: firings spawn a child process by default, or run
//!   in-process behind a panic barrier when the task opts in
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cadenza::{exit_code, ContainerBuilder, RegisteredTask, TaskFn};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let container = ContainerBuilder::new()
//!         .register(
//!             RegisteredTask::builder(
//!                 "reports",
//!                 "daily",
//!                 Arc::new(TaskFn::new(|| async {
//!                     println!("crunching the daily numbers");
//!                     Ok(())
//!                 })),
//!             )
//!             .schedule("0 0 3 * * *")
//!             .error_after(Duration::from_secs(60))
//!             .build(),
//!         )
//!         .build();
//!
//!     // `myapp <group> <name>` runs one task and exits;
//!     // `myapp` with no arguments starts the dispatch loop.
//!     if std::env::args().len() > 1 {
//!         let outcome = container.execute().await;
//!         std::process::exit(exit_code(&outcome));
//!     }
//!
//!     let _handle = container.dispatch_tasks().await.expect("start dispatch");
//!     tokio::signal::ctrl_c().await.expect("await shutdown signal");
//! }
//! ```
//!
//! ## Configuration
//!
//! Create `config/application.toml`:
//!
//! ```toml
//! [cadenza.reports]
//! daily = true
//! weekly = false
//!
//! [tasks.reports]
//! cron = "0 0 3 * * *"
//! ```
//!
//! Load it with `ContainerBuilder::with_toml`; tasks switched off under
//! `cadenza.<group>.<name>` are skipped, and a schedule of
//! `"${tasks.reports.cron}"` reads its cron expression from the file.
//! Environment variables with the `CADENZA_` prefix override file values.

// Re-export core types
pub use cadenza_runtime::{
    exit_code, BoxError, ContainerBuilder, DispatchCommand, DispatchHandle, EnablementCheck,
    ErrorHandler, RegisteredTask, RegisteredTaskBuilder, Runnable, TaskContainer, TaskError,
    TaskFn, TaskLogger, TracingErrorHandler, TracingLogger, MANUAL_SCHEDULE,
};

// Config loading helpers
pub use cadenza_runtime::{load_toml_config, load_yaml_config};

// Static task registration
pub use cadenza_runtime::{linkme, REGISTERED_TASKS};

// Re-export commonly used types
pub use tokio_cron_scheduler::JobScheduler;
