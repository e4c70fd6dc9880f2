use cadenza::{exit_code, ContainerBuilder, RegisteredTask, TaskFn};
use chrono::Local;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    let container = ContainerBuilder::new()
        .register(
            RegisteredTask::builder(
                "reports",
                "daily",
                Arc::new(TaskFn::new(|| async {
                    let now = Local::now().format("%Y-%m-%d %H:%M:%S");
                    println!("[{}] 📊 [REPORTS] crunching the daily numbers", now);
                    Ok(())
                })),
            )
            .error_after(Duration::from_secs(30))
            .build(),
        )
        .register(
            RegisteredTask::builder(
                "cache",
                "warm",
                Arc::new(TaskFn::new(|| async {
                    let now = Local::now().format("%Y-%m-%d %H:%M:%S");
                    println!("[{}] 🔥 [CACHE] warming the hot keys", now);
                    Ok(())
                })),
            )
            .build(),
        )
        .build();

    // With arguments this behaves like a task-runner binary:
    //   cargo run --example basic -- reports daily
    if std::env::args().len() > 1 {
        let outcome = container.execute().await;
        std::process::exit(exit_code(&outcome));
    }

    // Without arguments, just run both tasks once.
    container.run_task("reports", "daily").await.expect("reports:daily");
    container.run_task("cache", "warm").await.expect("cache:warm");
}
