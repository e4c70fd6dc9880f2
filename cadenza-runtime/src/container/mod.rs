mod builder;
mod dispatch;
mod handle;
mod runner;

pub use builder::ContainerBuilder;
pub use dispatch::DispatchCommand;
pub use handle::DispatchHandle;
pub use runner::TaskContainer;
