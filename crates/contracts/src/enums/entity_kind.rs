use serde::{Deserialize, Serialize};

/// Entity kinds that carry a workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Request,
    Quote,
    Reservation,
    Task,
}

impl EntityKind {
    /// Stable code of the kind
    pub fn code(&self) -> &'static str {
        match self {
            EntityKind::Request => "request",
            EntityKind::Quote => "quote",
            EntityKind::Reservation => "reservation",
            EntityKind::Task => "task",
        }
    }

    /// Human readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            EntityKind::Request => "Solicitud",
            EntityKind::Quote => "Cotización",
            EntityKind::Reservation => "Reservación",
            EntityKind::Task => "Tarea",
        }
    }

    pub fn all() -> Vec<EntityKind> {
        vec![
            EntityKind::Request,
            EntityKind::Quote,
            EntityKind::Reservation,
            EntityKind::Task,
        ]
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
