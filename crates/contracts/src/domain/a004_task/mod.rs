pub mod aggregate;
pub mod status;

pub use aggregate::{count_by_status, CreateTaskDto, TaskDto};
pub use status::TaskStatus;
