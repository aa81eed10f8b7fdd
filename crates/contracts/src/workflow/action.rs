use serde::{Deserialize, Serialize};

/// Transition a viewer may trigger from a detail or list view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionId {
    Approve,
    Reject,
    Publish,
    Cancel,
    Start,
    Complete,
    Convert,
    AddTask,
    CreateQuote,
    Deactivate,
    /// Client submits a new request; never offered by the resolver
    Submit,
    // User administration, outside the workflow table
    Create,
    Edit,
    Activate,
    Delete,
}

impl ActionId {
    pub fn code(&self) -> &'static str {
        match self {
            ActionId::Approve => "approve",
            ActionId::Reject => "reject",
            ActionId::Publish => "publish",
            ActionId::Cancel => "cancel",
            ActionId::Start => "start",
            ActionId::Complete => "complete",
            ActionId::Convert => "convert",
            ActionId::AddTask => "addTask",
            ActionId::CreateQuote => "createQuote",
            ActionId::Deactivate => "deactivate",
            ActionId::Submit => "submit",
            ActionId::Create => "create",
            ActionId::Edit => "edit",
            ActionId::Activate => "activate",
            ActionId::Delete => "delete",
        }
    }

    /// Button caption
    pub fn label(&self) -> &'static str {
        match self {
            ActionId::Approve => "Aprobar",
            ActionId::Reject => "Rechazar",
            ActionId::Publish => "Publicar",
            ActionId::Cancel => "Cancelar",
            ActionId::Start => "Iniciar",
            ActionId::Complete => "Completar",
            ActionId::Convert => "Convertir en reserva",
            ActionId::AddTask => "Agregar tarea",
            ActionId::CreateQuote => "Crear cotización",
            ActionId::Deactivate => "Desactivar",
            ActionId::Submit => "Enviar solicitud",
            ActionId::Create => "Crear",
            ActionId::Edit => "Editar",
            ActionId::Activate => "Activar",
            ActionId::Delete => "Eliminar",
        }
    }

    /// Prompt shown before irreversible actions
    pub fn confirmation(&self) -> Option<&'static str> {
        match self {
            ActionId::Approve => Some("¿Aprobar esta cotización?"),
            ActionId::Reject => Some("¿Rechazar esta cotización?"),
            ActionId::Publish => Some("¿Publicar la reserva? El cliente podrá ver sus tareas."),
            ActionId::Cancel => Some("¿Seguro que deseas cancelar?"),
            ActionId::Deactivate => Some("¿Seguro que deseas desactivar?"),
            ActionId::Delete => Some("¿Eliminar definitivamente? Esta acción no se puede deshacer."),
            _ => None,
        }
    }

    pub fn is_destructive(&self) -> bool {
        matches!(
            self,
            ActionId::Reject | ActionId::Cancel | ActionId::Deactivate | ActionId::Delete
        )
    }

    pub fn all() -> Vec<ActionId> {
        vec![
            ActionId::Approve,
            ActionId::Reject,
            ActionId::Publish,
            ActionId::Cancel,
            ActionId::Start,
            ActionId::Complete,
            ActionId::Convert,
            ActionId::AddTask,
            ActionId::CreateQuote,
            ActionId::Deactivate,
            ActionId::Submit,
            ActionId::Create,
            ActionId::Edit,
            ActionId::Activate,
            ActionId::Delete,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|a| a.code() == code)
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for action in ActionId::all() {
            assert_eq!(ActionId::from_code(action.code()), Some(action));
        }
        assert_eq!(ActionId::from_code("delete"), Some(ActionId::Delete));
        assert_eq!(ActionId::from_code("archive"), None);
    }

    #[test]
    fn test_serde_matches_code() {
        let json = serde_json::to_string(&ActionId::CreateQuote).unwrap();
        assert_eq!(json, "\"createQuote\"");
    }
}
