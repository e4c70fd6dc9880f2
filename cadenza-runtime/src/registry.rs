use crate::task::RegisteredTask;

/// Global distributed slice for collecting statically registered tasks.
///
/// Entries land here via `#[linkme::distributed_slice(REGISTERED_TASKS)]`
/// and are picked up by `ContainerBuilder::build`, ahead of tasks registered
/// explicitly with `register`.
#[linkme::distributed_slice]
pub static REGISTERED_TASKS: [fn() -> RegisteredTask] = [..];

/// Ordered collection of registered tasks.
///
/// Uniqueness of (group, name) is not enforced; lookup returns the first
/// match, so duplicates registered later are shadowed.
pub(crate) struct TaskRegistry {
    tasks: Vec<RegisteredTask>,
}

impl TaskRegistry {
    pub(crate) fn new(tasks: Vec<RegisteredTask>) -> Self {
        Self { tasks }
    }

    pub(crate) fn find(&self, group: &str, name: &str) -> Option<&RegisteredTask> {
        self.tasks
            .iter()
            .find(|t| t.group == group && t.name == name)
    }

    pub(crate) fn tasks(&self) -> &[RegisteredTask] {
        &self.tasks
    }
}
