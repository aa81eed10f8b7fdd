use serde::{Deserialize, Serialize};

use super::status::ReservationStatus;
use crate::domain::a002_quote::QuoteStatus;
use crate::domain::a004_task::TaskStatus;
use crate::domain::common::StatusVocabulary;
use crate::system::users::ClientSummary;

/// Quote snapshot embedded in a reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationQuoteSnapshot {
    pub id: String,
    #[serde(default)]
    pub event_name: Option<String>,
    #[serde(default)]
    pub estimated_hours: Option<u32>,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub tax_total: f64,
    #[serde(default)]
    pub additional_costs: f64,
    #[serde(default)]
    pub total: f64,
    #[serde(default, rename = "status")]
    pub raw_status: Option<String>,
}

impl ReservationQuoteSnapshot {
    pub fn status(&self) -> QuoteStatus {
        QuoteStatus::normalize(self.raw_status.as_deref())
    }
}

/// Request snapshot embedded in a reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequestSnapshot {
    pub id: String,
    #[serde(default)]
    pub event_name: Option<String>,
    #[serde(default)]
    pub event_date: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub requested_services: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Quoted service of a reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfo {
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub unit_price: f64,
    #[serde(default)]
    pub total: f64,
}

/// Task summary embedded in a reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInfo {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "status")]
    pub raw_status: Option<String>,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(default)]
    pub start_datetime: Option<String>,
    #[serde(default)]
    pub end_datetime: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
}

impl TaskInfo {
    pub fn status(&self) -> TaskStatus {
        TaskStatus::normalize(self.raw_status.as_deref())
    }
}

/// Reservation with client, quote, services and tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDetail {
    pub id: String,
    #[serde(default)]
    pub event_name: Option<String>,
    #[serde(default)]
    pub scheduled_for: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, rename = "status")]
    pub raw_status: Option<String>,
    #[serde(default)]
    pub progress_percentage: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub client: Option<ClientSummary>,
    #[serde(default)]
    pub quote: Option<ReservationQuoteSnapshot>,
    #[serde(default)]
    pub request: Option<ReservationRequestSnapshot>,
    #[serde(default)]
    pub services: Vec<ServiceInfo>,
    #[serde(default)]
    pub tasks: Vec<TaskInfo>,
}

impl ReservationDetail {
    pub fn status(&self) -> ReservationStatus {
        ReservationStatus::normalize(self.raw_status.as_deref())
    }

    pub fn has_tasks(&self) -> bool {
        !self.tasks.is_empty()
    }

    pub fn completed_tasks(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.status() == TaskStatus::Completed)
            .count()
    }

    /// Completed tasks over all tasks, in percent. Falls back to the server
    /// value when the reservation has no tasks.
    pub fn progress(&self) -> f64 {
        if self.tasks.is_empty() {
            return self.progress_percentage.unwrap_or(0.0).clamp(0.0, 100.0);
        }
        (self.completed_tasks() as f64 / self.tasks.len() as f64 * 100.0).round()
    }

    /// Tasks are only shown to clients once the reservation is published
    pub fn tasks_visible_to_client(&self) -> bool {
        self.status() != ReservationStatus::Planning
    }

    pub fn display_name(&self) -> &str {
        self.event_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("Sin nombre")
    }
}

/// Body of `POST /api/reservations`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationDto {
    pub quote_id: String,
    pub event_name: String,
    pub scheduled_for: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CreateReservationDto {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if self.quote_id.trim().is_empty() {
            errors.push("La cotización es obligatoria.".to_string());
        }
        if self.event_name.trim().is_empty() {
            errors.push("El nombre del evento es obligatorio.".to_string());
        }
        if self.scheduled_for.trim().is_empty() {
            errors.push("La fecha programada es obligatoria.".to_string());
        }
        if self.location.trim().is_empty() {
            errors.push("La ubicación es obligatoria.".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Body of `PATCH /api/reservations/{id}/status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateReservationStatusDto {
    pub status: String,
}

impl UpdateReservationStatusDto {
    pub fn new(status: ReservationStatus) -> Self {
        Self {
            status: status.wire_value().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_reservation_requires_location() {
        let dto = CreateReservationDto {
            quote_id: "q1".into(),
            event_name: "Boda".into(),
            scheduled_for: "2025-06-01T16:00".into(),
            location: " ".into(),
            notes: None,
        };
        assert_eq!(dto.validate(), Err(vec!["La ubicación es obligatoria.".to_string()]));
    }

    fn detail(status: &str, tasks: &[&str]) -> ReservationDetail {
        let tasks: Vec<_> = tasks
            .iter()
            .enumerate()
            .map(|(i, s)| serde_json::json!({"id": i.to_string(), "title": "t", "status": s}))
            .collect();
        serde_json::from_value(serde_json::json!({
            "id": "r1",
            "eventName": "Boda García",
            "status": status,
            "progressPercentage": 10.0,
            "tasks": tasks,
        }))
        .unwrap()
    }

    #[test]
    fn test_progress_from_tasks() {
        let r = detail("ENCURSO", &["COMPLETADA", "EN_PROCESO", "PENDIENTE", "COMPLETADA"]);
        assert_eq!(r.status(), ReservationStatus::InProgress);
        assert_eq!(r.completed_tasks(), 2);
        assert_eq!(r.progress(), 50.0);
    }

    #[test]
    fn test_progress_without_tasks_uses_server_value() {
        let r = detail("EN_PLANEACION", &[]);
        assert!(!r.has_tasks());
        assert_eq!(r.progress(), 10.0);
        assert!(!r.tasks_visible_to_client());
    }

    #[test]
    fn test_status_body() {
        let body = UpdateReservationStatusDto::new(ReservationStatus::Cancelled);
        assert_eq!(body.status, "CANCELADA");
    }
}
