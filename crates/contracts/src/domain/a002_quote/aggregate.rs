use serde::{Deserialize, Serialize};

use super::status::QuoteStatus;
use crate::domain::common::StatusVocabulary;
use crate::system::users::ClientSummary;

/// Quote line as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteItemResponse {
    pub id: String,
    #[serde(default)]
    pub service_id: Option<String>,
    #[serde(default)]
    pub service_name: Option<String>,
    pub description: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub unit_price: f64,
    #[serde(default)]
    pub tax_rate: f64,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub total: f64,
}

/// Quote with its items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDto {
    pub id: String,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub client: Option<ClientSummary>,
    #[serde(default)]
    pub event_name: Option<String>,
    #[serde(default)]
    pub estimated_hours: Option<u32>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
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
    #[serde(default)]
    pub items: Vec<QuoteItemResponse>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl QuoteDto {
    pub fn status(&self) -> QuoteStatus {
        QuoteStatus::normalize(self.raw_status.as_deref())
    }

    pub fn display_name(&self) -> &str {
        self.event_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("Sin nombre")
    }

    /// Date shown in lists: start date, or creation date for drafts
    pub fn event_date(&self) -> Option<&str> {
        self.start_date.as_deref().or(self.created_at.as_deref())
    }
}

/// `true` when at least one quote of the slice is approved
pub fn has_approved_quote(quotes: &[QuoteDto]) -> bool {
    quotes.iter().any(|q| q.status() == QuoteStatus::Approved)
}

/// Quote line sent on creation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteItemDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
}

/// Body of `POST /api/quotes`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuoteDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub client_id: String,
    pub event_name: String,
    pub estimated_hours: u32,
    /// YYYY-MM-DD
    pub start_date: String,
    /// YYYY-MM-DD
    pub end_date: String,
    pub additional_costs: f64,
    pub items: Vec<QuoteItemDto>,
}

impl CreateQuoteDto {
    /// Client side validation, mirrors the backend messages
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        if self.client_id.trim().is_empty() {
            errors.push("El cliente es obligatorio.".to_string());
        }
        if self.event_name.trim().is_empty() {
            errors.push("El nombre del evento es obligatorio.".to_string());
        }
        if self.estimated_hours == 0 {
            errors.push("Las horas deben ser mayores que 0.".to_string());
        }
        if self.start_date.trim().is_empty() {
            errors.push("La fecha de inicio es obligatoria.".to_string());
        }
        if self.end_date.trim().is_empty() {
            errors.push("La fecha de fin es obligatoria.".to_string());
        }
        // ISO dates compare lexicographically
        if !self.start_date.is_empty()
            && !self.end_date.is_empty()
            && self.start_date >= self.end_date
        {
            errors.push("La fecha de inicio debe ser anterior a la fecha de fin.".to_string());
        }
        if self.additional_costs < 0.0 {
            errors.push("El costo adicional no puede ser negativo.".to_string());
        }
        if self.items.is_empty() {
            errors.push("Debe incluir al menos un servicio.".to_string());
        }
        for item in &self.items {
            if item.description.trim().is_empty() {
                errors.push("La descripción del servicio es obligatoria.".to_string());
            }
            if item.quantity <= 0.0 {
                errors.push("La cantidad debe ser mayor que 0.".to_string());
            }
            if item.unit_price < 0.0 {
                errors.push("El precio unitario no puede ser negativo.".to_string());
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Pre-tax amount of the items plus additional costs
    pub fn estimated_subtotal(&self) -> f64 {
        self.items
            .iter()
            .map(|i| i.quantity * i.unit_price)
            .sum::<f64>()
            + self.additional_costs
    }
}

/// Client decision on a quote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteAction {
    #[serde(rename = "APROBAR")]
    Approve,
    #[serde(rename = "RECHAZAR")]
    Reject,
}

/// Body of `POST /api/quotes/{id}/action`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteActionDto {
    pub action: QuoteAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(status: &str) -> QuoteDto {
        serde_json::from_value(serde_json::json!({
            "id": "q1",
            "eventName": "Boda",
            "total": 1800.5,
            "status": status,
        }))
        .unwrap()
    }

    #[test]
    fn test_has_approved_quote() {
        assert!(!has_approved_quote(&[]));
        assert!(!has_approved_quote(&[quote("PENDIENTE"), quote("Rechazada")]));
        assert!(has_approved_quote(&[quote("PENDIENTE"), quote("Aprobada")]));
    }

    #[test]
    fn test_action_body() {
        let body = QuoteActionDto {
            action: QuoteAction::Approve,
            notes: Some("Todo correcto".into()),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["action"], "APROBAR");
        assert_eq!(json["notes"], "Todo correcto");

        let body = QuoteActionDto {
            action: QuoteAction::Reject,
            notes: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["action"], "RECHAZAR");
        assert!(json.get("notes").is_none());
    }

    #[test]
    fn test_create_quote_validation() {
        let mut dto = CreateQuoteDto {
            request_id: Some("r1".into()),
            client_id: "c1".into(),
            event_name: "Quince años".into(),
            estimated_hours: 6,
            start_date: "2025-06-01".into(),
            end_date: "2025-06-02".into(),
            additional_costs: 50.0,
            items: vec![QuoteItemDto {
                service_id: None,
                description: "Mobiliario".into(),
                quantity: 2.0,
                unit_price: 75.0,
            }],
        };
        assert!(dto.validate().is_ok());
        assert_eq!(dto.estimated_subtotal(), 200.0);

        dto.end_date = "2025-05-30".into();
        dto.items.clear();
        let errors = dto.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.contains("anterior")));
        assert!(errors.iter().any(|e| e.contains("al menos un servicio")));
    }
}
