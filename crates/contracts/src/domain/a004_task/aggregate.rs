use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::status::TaskStatus;
use crate::domain::common::StatusVocabulary;

/// Task as returned by `/tasks` endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDto {
    pub id: String,
    pub reservation_id: String,
    #[serde(default)]
    pub reservation_event_name: Option<String>,
    #[serde(default)]
    pub reservation_location: Option<String>,
    #[serde(default)]
    pub reservation_scheduled_for: Option<String>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub employee_id: Option<String>,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(default)]
    pub service_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "status")]
    pub raw_status: Option<String>,
    #[serde(default)]
    pub start_datetime: Option<String>,
    #[serde(default)]
    pub end_datetime: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl TaskDto {
    pub fn status(&self) -> TaskStatus {
        TaskStatus::normalize(self.raw_status.as_deref())
    }
}

/// Number of tasks per canonical status, every status present
pub fn count_by_status(tasks: &[TaskDto]) -> BTreeMap<TaskStatus, usize> {
    let mut counts: BTreeMap<TaskStatus, usize> =
        TaskStatus::ALL.iter().map(|s| (*s, 0)).collect();
    for task in tasks {
        *counts.entry(task.status()).or_insert(0) += 1;
    }
    counts
}

/// Body of `POST /tasks`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskDto {
    pub reservation_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_datetime: String,
    pub end_datetime: String,
}

impl CreateTaskDto {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if self.reservation_id.trim().is_empty() {
            errors.push("El ID de reserva es obligatorio.".to_string());
        }
        let title_len = self.title.trim().chars().count();
        if title_len == 0 {
            errors.push("El título es obligatorio.".to_string());
        } else if !(3..=100).contains(&title_len) {
            errors.push("El título debe tener entre 3 y 100 caracteres.".to_string());
        }
        if self
            .description
            .as_deref()
            .is_some_and(|d| d.chars().count() > 500)
        {
            errors.push("La descripción no debe exceder los 500 caracteres.".to_string());
        }
        if self.start_datetime.trim().is_empty() {
            errors.push("La fecha de inicio es obligatoria.".to_string());
        }
        if self.end_datetime.trim().is_empty() {
            errors.push("La fecha de fin es obligatoria.".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(status: &str) -> TaskDto {
        serde_json::from_value(serde_json::json!({
            "id": "t1",
            "reservationId": "r1",
            "title": "Montaje",
            "status": status,
        }))
        .unwrap()
    }

    #[test]
    fn test_count_by_status() {
        let tasks = vec![task("PENDIENTE"), task("EN_PROCESO"), task("en proceso"), task("???")];
        let counts = count_by_status(&tasks);
        assert_eq!(counts[&TaskStatus::Pending], 2);
        assert_eq!(counts[&TaskStatus::InProgress], 2);
        assert_eq!(counts[&TaskStatus::Completed], 0);
        assert_eq!(counts.len(), TaskStatus::ALL.len());
    }

    #[test]
    fn test_create_validation() {
        let dto = CreateTaskDto {
            reservation_id: "r1".into(),
            title: "ab".into(),
            ..Default::default()
        };
        let errors = dto.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("entre 3 y 100"));

        let ok = CreateTaskDto {
            reservation_id: "r1".into(),
            title: "Montaje de luces".into(),
            start_datetime: "2024-03-15T10:00".into(),
            end_datetime: "2024-03-15T12:00".into(),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());
    }
}
