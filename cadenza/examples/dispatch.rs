use cadenza::{ContainerBuilder, RegisteredTask, TaskFn};
use chrono::Local;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

static FIRINGS: AtomicU32 = AtomicU32::new(0);

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    let config = config::Config::builder()
        .set_override("tasks.heartbeat.cron", "1/10 * * * * *")
        .expect("override")
        .build()
        .expect("config");

    let container = ContainerBuilder::with_config(config)
        .register(
            RegisteredTask::builder(
                "monitor",
                "heartbeat",
                Arc::new(TaskFn::new(|| async {
                    let count = FIRINGS.fetch_add(1, Ordering::SeqCst) + 1;
                    let now = Local::now().format("%H:%M:%S");
                    println!("[{}] 💓 [HEARTBEAT] firing #{}", now, count);
                    Ok(())
                })),
            )
            // Cron expression read from config; inline to keep the demo
            // inside one process.
            .schedule("${tasks.heartbeat.cron}")
            .run_inline(true)
            .build(),
        )
        .register(
            RegisteredTask::builder(
                "reports",
                "adhoc",
                Arc::new(TaskFn::new(|| async {
                    println!("this one only runs on demand");
                    Ok(())
                })),
            )
            .schedule("manual")
            .build(),
        )
        .build();

    let handle = container.dispatch_tasks().await.expect("start dispatch");
    println!("dispatching {} scheduled task(s), watching for 35s...", handle.registered());

    tokio::time::sleep(std::time::Duration::from_secs(35)).await;

    handle.shutdown().await.expect("shutdown");
    println!("heartbeat fired {} times", FIRINGS.load(Ordering::SeqCst));
}
