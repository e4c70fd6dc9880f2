use tokio_cron_scheduler::JobScheduler;

use crate::error::TaskError;

/// Handle for a running dispatch loop.
///
/// Owns the started cron engine; firings continue until `shutdown` is called
/// or the process exits.
pub struct DispatchHandle {
    scheduler: JobScheduler,
    registered: usize,
}

impl DispatchHandle {
    pub(crate) fn new(scheduler: JobScheduler, registered: usize) -> Self {
        Self {
            scheduler,
            registered,
        }
    }

    /// Number of triggers actually registered with the cron engine.
    pub fn registered(&self) -> usize {
        self.registered
    }

    /// Stop the cron engine. In-flight firings are not cancelled.
    pub async fn shutdown(mut self) -> Result<(), TaskError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| TaskError::Scheduler {
                detail: e.to_string(),
            })
    }
}
