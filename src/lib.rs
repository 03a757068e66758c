pub mod config;
pub mod shell;
pub mod tasks;

pub use config::AppConfig;
pub use tasks::{NewTask, Status, Task, TaskStore};
