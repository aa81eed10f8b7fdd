use crate::domain::common::{ColorTag, StatusVocabulary};
use crate::enums::EntityKind;

/// Status of a task assigned to an employee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl StatusVocabulary for TaskStatus {
    const KIND: EntityKind = EntityKind::Task;
    const FALLBACK: Self = TaskStatus::Pending;
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("PENDIENTE", TaskStatus::Pending),
        ("PENDING", TaskStatus::Pending),
        ("ENPROCESO", TaskStatus::InProgress),
        ("INPROGRESS", TaskStatus::InProgress),
        ("COMPLETADA", TaskStatus::Completed),
        ("COMPLETED", TaskStatus::Completed),
        ("CANCELADA", TaskStatus::Cancelled),
        ("CANCELLED", TaskStatus::Cancelled),
    ];
    const ALL: &'static [Self] = &[
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Cancelled,
    ];

    fn code(self) -> &'static str {
        match self {
            TaskStatus::Pending => "task.pending",
            TaskStatus::InProgress => "task.in_progress",
            TaskStatus::Completed => "task.completed",
            TaskStatus::Cancelled => "task.cancelled",
        }
    }

    fn wire_value(self) -> &'static str {
        match self {
            TaskStatus::Pending => "PENDIENTE",
            TaskStatus::InProgress => "EN_PROCESO",
            TaskStatus::Completed => "COMPLETADA",
            TaskStatus::Cancelled => "CANCELADA",
        }
    }

    fn label(self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pendiente",
            TaskStatus::InProgress => "En Proceso",
            TaskStatus::Completed => "Completada",
            TaskStatus::Cancelled => "Cancelada",
        }
    }

    fn color_tag(self) -> ColorTag {
        match self {
            TaskStatus::Pending => ColorTag::Orange,
            TaskStatus::InProgress => ColorTag::Blue,
            TaskStatus::Completed => ColorTag::Green,
            TaskStatus::Cancelled => ColorTag::Red,
        }
    }

    fn is_terminal(self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Cancelled)
    }
}
