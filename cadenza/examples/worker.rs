use cadenza::{exit_code, ContainerBuilder, RegisteredTask, TaskContainer, TaskFn};
use chrono::Local;
use std::sync::Arc;

fn build_container() -> TaskContainer {
    ContainerBuilder::new()
        .dispatch_env([("CADENZA_WORKER", "1")])
        .register(
            RegisteredTask::builder(
                "reports",
                "daily",
                Arc::new(TaskFn::new(|| async {
                    let now = Local::now().format("%H:%M:%S");
                    // Workers write to stderr; the dispatcher routes it
                    // through its logger.
                    eprintln!(
                        "[{}] 📊 [REPORTS] crunching numbers in pid {}",
                        now,
                        std::process::id()
                    );
                    Ok(())
                })),
            )
            .schedule("1/15 * * * * *")
            .build(),
        )
        .build()
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    let container = build_container();

    // Worker mode: `<exe> <group> <name>` runs one task and exits.
    if std::env::args().len() > 1 {
        let outcome = container.execute().await;
        std::process::exit(exit_code(&outcome));
    }

    // Dispatcher mode: each firing re-invokes this binary as a child
    // process with the task's group and name as arguments.
    let handle = container.dispatch_tasks().await.expect("start dispatch");
    println!(
        "dispatching {} task(s); workers spawn every 15s, watching for 40s...",
        handle.registered()
    );

    tokio::time::sleep(std::time::Duration::from_secs(40)).await;

    handle.shutdown().await.expect("shutdown");
}
