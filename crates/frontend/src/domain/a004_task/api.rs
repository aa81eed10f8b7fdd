use contracts::domain::a004_task::{CreateTaskDto, TaskDto, TaskStatus};
use contracts::domain::common::StatusVocabulary;
use contracts::workflow::MutationFailure;

use crate::shared::http;

/// Tasks assigned to the signed in employee
pub async fn fetch_my_tasks() -> Result<Vec<TaskDto>, String> {
    http::get("/tasks/my-tasks").await
}

pub async fn create(dto: CreateTaskDto) -> Result<TaskDto, MutationFailure> {
    http::post("/tasks", &dto).await
}

/// The backend reads the new status from the query string
pub async fn update_status(id: String, status: TaskStatus) -> Result<TaskDto, MutationFailure> {
    http::patch::<(), _>(&status_path(&id, status), None).await
}

fn status_path(id: &str, status: TaskStatus) -> String {
    format!(
        "/tasks/{}/status?status={}",
        id,
        urlencoding::encode(status.wire_value())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_path_uses_wire_value() {
        assert_eq!(
            status_path("t1", TaskStatus::InProgress),
            "/tasks/t1/status?status=EN_PROCESO"
        );
        assert_eq!(
            status_path("t1", TaskStatus::Completed),
            "/tasks/t1/status?status=COMPLETADA"
        );
    }
}
