use serde::{Deserialize, Serialize};

/// Field level validation error returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiFieldError {
    #[serde(default)]
    pub field: Option<String>,
    pub message: String,
}

impl ApiFieldError {
    /// "field: message", or just the message when the error is not tied to a field
    pub fn display_text(&self) -> String {
        match self.field.as_deref().map(str::trim) {
            Some(field) if !field.is_empty() => format!("{}: {}", field, self.message),
            _ => self.message.clone(),
        }
    }
}

/// Envelope wrapping every backend response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<ApiFieldError>>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            errors: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            errors: None,
        }
    }

    pub fn with_errors(mut self, errors: Vec<ApiFieldError>) -> Self {
        self.errors = Some(errors);
        self
    }

    /// Structured field errors, empty when the backend sent none
    pub fn field_errors(&self) -> &[ApiFieldError] {
        self.errors.as_deref().unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_success_envelope() {
        let json = r#"{"success":true,"message":"ok","data":[1,2,3]}"#;
        let resp: ApiResponse<Vec<i32>> = serde_json::from_str(json).unwrap();
        assert!(resp.success);
        assert_eq!(resp.data, Some(vec![1, 2, 3]));
        assert!(resp.field_errors().is_empty());
    }

    #[test]
    fn test_deserialize_error_envelope_with_fields() {
        let json = r#"{
            "success": false,
            "message": "Datos inválidos",
            "data": null,
            "errors": [
                {"field": "eventName", "message": "El nombre del evento es obligatorio."},
                {"field": null, "message": "Debe incluir al menos un servicio."}
            ]
        }"#;
        let resp: ApiResponse<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert!(!resp.success);
        assert!(resp.data.is_none());
        let texts: Vec<String> = resp.field_errors().iter().map(|e| e.display_text()).collect();
        assert_eq!(
            texts,
            vec![
                "eventName: El nombre del evento es obligatorio.".to_string(),
                "Debe incluir al menos un servicio.".to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_fields_default() {
        let resp: ApiResponse<String> = serde_json::from_str("{}").unwrap();
        assert!(!resp.success);
        assert_eq!(resp.message, "");
        assert!(resp.data.is_none());
    }
}
