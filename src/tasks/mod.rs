//! Task model and the JSON-file store behind every command.

pub mod model;
pub mod store;

pub use model::{NewTask, Status, Task};
pub use store::{StoreError, TaskStore};
