use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::error::TaskError;
use crate::observer::ErrorHandler;

/// Granularity of the watchdog's elapsed-time polling. The watchdog is a
/// best-effort timer, accurate to one tick at most.
pub(crate) const WATCHDOG_TICK: Duration = Duration::from_secs(1);

/// Observe one task invocation and report if it outlives its expected
/// duration.
///
/// Single-shot: the observer sleeps in fixed ticks until the threshold is
/// reached, checks the running flag exactly once, reports if the task is
/// still going, and terminates either way. It never cancels the task.
pub(crate) fn spawn_watchdog(
    group: &'static str,
    name: &'static str,
    expected: Duration,
    running: Arc<AtomicBool>,
    errors: Arc<dyn ErrorHandler>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut elapsed = Duration::ZERO;
        loop {
            tokio::time::sleep(WATCHDOG_TICK).await;
            elapsed += WATCHDOG_TICK;

            if elapsed >= expected {
                if running.load(Ordering::Acquire) {
                    errors.error(&TaskError::Overrun {
                        group: group.to_string(),
                        name: name.to_string(),
                        expected,
                    });
                }
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::recording::RecordingErrors;

    #[tokio::test(start_paused = true)]
    async fn no_report_when_task_finishes_in_time() {
        let errors = Arc::new(RecordingErrors::default());
        let running = Arc::new(AtomicBool::new(true));

        let watchdog = spawn_watchdog(
            "reports",
            "daily",
            Duration::from_secs(2),
            running.clone(),
            errors.clone(),
        );

        // Task finishes after one time unit, inside the threshold.
        tokio::time::sleep(Duration::from_secs(1)).await;
        running.store(false, Ordering::Release);

        watchdog.await.unwrap();
        assert_eq!(errors.count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn exactly_one_report_when_task_overruns() {
        let errors = Arc::new(RecordingErrors::default());
        let running = Arc::new(AtomicBool::new(true));

        let watchdog = spawn_watchdog(
            "reports",
            "daily",
            Duration::from_secs(2),
            running.clone(),
            errors.clone(),
        );

        // Never cleared: the task is still running well past the threshold.
        watchdog.await.unwrap();

        assert_eq!(errors.count(), 1);
        assert!(errors.contains(
            "task still running after expected duration: reports:daily 2s"
        ));

        // Single-shot: nothing further is observed or reported.
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(errors.count(), 1);
    }
}
