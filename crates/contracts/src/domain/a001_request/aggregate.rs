use serde::{Deserialize, Serialize};

use super::status::RequestStatus;
use crate::domain::common::StatusVocabulary;
use crate::system::users::ClientSummary;

/// Event request submitted by a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDto {
    pub id: String,
    #[serde(default)]
    pub event_name: Option<String>,
    pub event_date: String,
    pub location: String,
    #[serde(default)]
    pub requested_services: String,
    #[serde(default)]
    pub notes: Option<String>,
    /// Raw backend status, see [`RequestDto::status`]
    #[serde(default, rename = "status")]
    pub raw_status: Option<String>,
    #[serde(default)]
    pub client: Option<ClientSummary>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl RequestDto {
    pub fn status(&self) -> RequestStatus {
        RequestStatus::normalize(self.raw_status.as_deref())
    }

    /// Name shown in lists; requests created without a name use the location
    pub fn display_name(&self) -> String {
        match self.event_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Evento en {}", self.location),
        }
    }
}

/// Body of `POST /api/requests`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestDto {
    pub event_date: String,
    pub location: String,
    pub requested_services: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CreateRequestDto {
    /// Client side validation, mirrors the backend messages
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if self.event_date.trim().is_empty() {
            errors.push("La fecha del evento es requerida".to_string());
        }
        if self.location.trim().is_empty() {
            errors.push("La ubicación es requerida".to_string());
        }
        if self.requested_services.iter().all(|s| s.trim().is_empty()) {
            errors.push("Los servicios son requeridos".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Body of `PATCH /api/requests/{id}/status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateRequestStatusDto {
    pub status: String,
}

impl UpdateRequestStatusDto {
    pub fn new(status: RequestStatus) -> Self {
        Self {
            status: status.wire_value().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_status_from_wire() {
        let json = r#"{
            "id": "7b1c",
            "eventDate": "2025-05-10",
            "location": "San Salvador",
            "requestedServices": "Catering, Sonido",
            "status": "Activo"
        }"#;
        let dto: RequestDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.status(), RequestStatus::Active);
        assert_eq!(dto.display_name(), "Evento en San Salvador");
    }

    #[test]
    fn test_missing_status_is_active() {
        let json = r#"{"id": "1", "eventDate": "2025-05-10", "location": "X"}"#;
        let dto: RequestDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.status(), RequestStatus::Active);
    }

    #[test]
    fn test_create_request_validation() {
        let dto = CreateRequestDto::default();
        let errors = dto.validate().unwrap_err();
        assert_eq!(errors.len(), 3);

        let dto = CreateRequestDto {
            event_date: "2025-05-10".into(),
            location: "Santa Ana".into(),
            requested_services: vec!["Decoración".into()],
            notes: None,
        };
        assert!(dto.validate().is_ok());
        let body = serde_json::to_value(&dto).unwrap();
        assert_eq!(body["requestedServices"][0], "Decoración");
        assert!(body.get("notes").is_none());
    }

    #[test]
    fn test_update_status_uses_wire_value() {
        let dto = UpdateRequestStatusDto::new(RequestStatus::Inactive);
        assert_eq!(dto.status, "Inactivo");
    }
}
