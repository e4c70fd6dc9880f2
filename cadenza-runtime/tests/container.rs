//! End-to-end container flows through the public API.

use cadenza_runtime::linkme;
use cadenza_runtime::{
    exit_code, ContainerBuilder, ErrorHandler, RegisteredTask, TaskError, TaskFn, TaskLogger,
    REGISTERED_TASKS,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct MemoryLogger {
    lines: Mutex<Vec<String>>,
}

impl MemoryLogger {
    fn contains(&self, needle: &str) -> bool {
        self.lines.lock().unwrap().iter().any(|l| l.contains(needle))
    }
}

impl TaskLogger for MemoryLogger {
    fn info(&self, category: &str, message: &str) {
        self.lines
            .lock()
            .unwrap()
            .push(format!("{category}: {message}"));
    }
}

#[derive(Default)]
struct MemoryErrors {
    reports: Mutex<Vec<String>>,
}

impl ErrorHandler for MemoryErrors {
    fn error(&self, err: &TaskError) {
        self.reports.lock().unwrap().push(err.to_string());
    }
}

static STATIC_RUNS: AtomicUsize = AtomicUsize::new(0);

#[linkme::distributed_slice(REGISTERED_TASKS)]
static HOUSEKEEPING_SWEEP: fn() -> RegisteredTask = || {
    RegisteredTask::builder(
        "housekeeping",
        "sweep",
        Arc::new(TaskFn::new(|| async {
            STATIC_RUNS.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })),
    )
    .build()
};

#[tokio::test]
async fn statically_registered_tasks_are_runnable() {
    let container = ContainerBuilder::new().build();

    container.run_task("housekeeping", "sweep").await.unwrap();

    assert!(STATIC_RUNS.load(Ordering::SeqCst) >= 1);
}

#[tokio::test]
async fn execute_outcomes_map_to_exit_codes() {
    let logger = Arc::new(MemoryLogger::default());
    let container = ContainerBuilder::new()
        .logger(logger.clone())
        .error_handler(Arc::new(MemoryErrors::default()))
        .register(
            RegisteredTask::builder(
                "reports",
                "daily",
                Arc::new(TaskFn::new(|| async { Ok(()) })),
            )
            .build(),
        )
        .register(
            RegisteredTask::builder(
                "reports",
                "flaky",
                Arc::new(TaskFn::new(|| async { Err("boom".into()) })),
            )
            .build(),
        )
        .build();

    let ok = container.execute_from(["reports", "daily"]).await;
    assert_eq!(exit_code(&ok), 0);

    let failed = container.execute_from(["reports", "flaky"]).await;
    assert_eq!(exit_code(&failed), 1);

    let missing = container.execute_from(["reports", "monthly"]).await;
    assert!(matches!(missing, Err(TaskError::NotFound { .. })));
    assert_eq!(exit_code(&missing), 1);

    // Too few arguments is a logged no-op, not an error.
    let noop = container.execute_from(["reports"]).await;
    assert_eq!(exit_code(&noop), 0);
    assert!(logger.contains("not enough arguments"));
}

#[tokio::test]
async fn dispatch_loop_starts_and_shuts_down() {
    let container = ContainerBuilder::new()
        .error_handler(Arc::new(MemoryErrors::default()))
        .register(
            RegisteredTask::builder(
                "reports",
                "daily",
                Arc::new(TaskFn::new(|| async { Ok(()) })),
            )
            .schedule("0 0 3 * * *")
            .build(),
        )
        .register(
            RegisteredTask::builder(
                "cache",
                "warm",
                Arc::new(TaskFn::new(|| async { Ok(()) })),
            )
            .schedule(cadenza_runtime::MANUAL_SCHEDULE)
            .build(),
        )
        .build();

    let handle = container.dispatch_tasks().await.unwrap();
    assert_eq!(handle.registered(), 1);
    handle.shutdown().await.unwrap();
}
