use thiserror::Error;

use crate::shared::{ApiFieldError, ApiResponse};

use super::action::ActionId;

/// Shown when the backend rejected a write without saying why
pub const GENERIC_FAILURE: &str = "No se pudo completar la operación";

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("acción '{action}' no disponible: {reason}")]
    EligibilityDenied { action: ActionId, reason: String },

    #[error(transparent)]
    MutationFailed(#[from] MutationFailure),

    #[error(transparent)]
    RefetchFailed(#[from] RefetchFailure),
}

/// Backend rejected a write, or the write never reached it
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct MutationFailure {
    pub message: String,
    pub field_errors: Vec<ApiFieldError>,
}

impl MutationFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field_errors: Vec::new(),
        }
    }

    pub fn from_response<T>(response: &ApiResponse<T>) -> Self {
        Self {
            message: response.message.clone(),
            field_errors: response.field_errors().to_vec(),
        }
    }

    /// Network or decoding error
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::new(format!("Error de conexión: {}", err))
    }

    /// One line per field error, else the backend message, else a generic line.
    /// Never empty.
    pub fn user_messages(&self) -> Vec<String> {
        let fields: Vec<String> = self
            .field_errors
            .iter()
            .map(ApiFieldError::display_text)
            .filter(|m| !m.trim().is_empty())
            .collect();
        if !fields.is_empty() {
            return fields;
        }
        if !self.message.trim().is_empty() {
            return vec![self.message.clone()];
        }
        vec![GENERIC_FAILURE.to_string()]
    }

    pub fn summary(&self) -> String {
        self.user_messages().join("; ")
    }
}

impl std::fmt::Display for MutationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.summary())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefetchTarget {
    Detail,
    List,
}

impl RefetchTarget {
    pub fn display_name(&self) -> &'static str {
        match self {
            RefetchTarget::Detail => "el detalle",
            RefetchTarget::List => "la lista",
        }
    }
}

/// Refetch after a successful write failed; the write itself stands
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no se pudo actualizar {}: {message}", .target.display_name())]
pub struct RefetchFailure {
    pub target: RefetchTarget,
    pub message: String,
}

impl RefetchFailure {
    pub const WARNING: &'static str =
        "Tu cambio fue guardado, pero la vista puede estar desactualizada. Actualiza para confirmar.";

    pub fn warning_text(&self) -> &'static str {
        Self::WARNING
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_are_listed_individually() {
        let response: ApiResponse<()> = ApiResponse::error("Datos inválidos").with_errors(vec![
            ApiFieldError {
                field: Some("eventDate".into()),
                message: "La fecha es obligatoria".into(),
            },
            ApiFieldError {
                field: None,
                message: "La ubicación es obligatoria".into(),
            },
        ]);
        let failure = MutationFailure::from_response(&response);
        assert_eq!(
            failure.user_messages(),
            vec![
                "eventDate: La fecha es obligatoria".to_string(),
                "La ubicación es obligatoria".to_string()
            ]
        );
    }

    #[test]
    fn test_message_and_generic_fallback() {
        let failure = MutationFailure::new("Solo se pueden aprobar cotizaciones pendientes");
        assert_eq!(failure.user_messages().len(), 1);
        assert_eq!(
            failure.to_string(),
            "Solo se pueden aprobar cotizaciones pendientes"
        );

        let empty = MutationFailure::new("  ");
        assert_eq!(empty.user_messages(), vec![GENERIC_FAILURE.to_string()]);
    }

    #[test]
    fn test_workflow_error_wraps() {
        let err: WorkflowError = RefetchFailure {
            target: RefetchTarget::List,
            message: "timeout".into(),
        }
        .into();
        assert_eq!(err.to_string(), "no se pudo actualizar la lista: timeout");
    }
}
