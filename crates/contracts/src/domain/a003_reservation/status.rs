use crate::domain::common::{ColorTag, StatusVocabulary};
use crate::enums::EntityKind;

/// Status of a reservation
///
/// Older backend builds reused the generic `ACTIVO`/`INACTIVO` values for
/// reservations; they map to `Scheduled` and `Finished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReservationStatus {
    Planning,
    Scheduled,
    InProgress,
    Finished,
    Cancelled,
}

impl StatusVocabulary for ReservationStatus {
    const KIND: EntityKind = EntityKind::Reservation;
    const FALLBACK: Self = ReservationStatus::Planning;
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("ENPLANEACION", ReservationStatus::Planning),
        ("PLANNING", ReservationStatus::Planning),
        ("PROGRAMADA", ReservationStatus::Scheduled),
        ("ACTIVO", ReservationStatus::Scheduled),
        ("SCHEDULED", ReservationStatus::Scheduled),
        ("ENCURSO", ReservationStatus::InProgress),
        ("INPROGRESS", ReservationStatus::InProgress),
        ("FINALIZADA", ReservationStatus::Finished),
        ("INACTIVO", ReservationStatus::Finished),
        ("FINISHED", ReservationStatus::Finished),
        ("CANCELADA", ReservationStatus::Cancelled),
        ("CANCELLED", ReservationStatus::Cancelled),
    ];
    const ALL: &'static [Self] = &[
        ReservationStatus::Planning,
        ReservationStatus::Scheduled,
        ReservationStatus::InProgress,
        ReservationStatus::Finished,
        ReservationStatus::Cancelled,
    ];

    fn code(self) -> &'static str {
        match self {
            ReservationStatus::Planning => "reservation.planning",
            ReservationStatus::Scheduled => "reservation.scheduled",
            ReservationStatus::InProgress => "reservation.in_progress",
            ReservationStatus::Finished => "reservation.finished",
            ReservationStatus::Cancelled => "reservation.cancelled",
        }
    }

    fn wire_value(self) -> &'static str {
        match self {
            ReservationStatus::Planning => "EN_PLANEACION",
            ReservationStatus::Scheduled => "PROGRAMADA",
            ReservationStatus::InProgress => "ENCURSO",
            ReservationStatus::Finished => "FINALIZADA",
            ReservationStatus::Cancelled => "CANCELADA",
        }
    }

    fn label(self) -> &'static str {
        match self {
            ReservationStatus::Planning => "En Planeación",
            ReservationStatus::Scheduled => "Programada",
            ReservationStatus::InProgress => "En Curso",
            ReservationStatus::Finished => "Finalizada",
            ReservationStatus::Cancelled => "Cancelada",
        }
    }

    fn color_tag(self) -> ColorTag {
        match self {
            ReservationStatus::Planning => ColorTag::Cyan,
            ReservationStatus::Scheduled => ColorTag::Blue,
            ReservationStatus::InProgress => ColorTag::Orange,
            ReservationStatus::Finished => ColorTag::Green,
            ReservationStatus::Cancelled => ColorTag::Red,
        }
    }

    fn is_terminal(self) -> bool {
        matches!(self, ReservationStatus::Finished | ReservationStatus::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_generic_statuses() {
        assert_eq!(ReservationStatus::normalize(Some("ACTIVO")), ReservationStatus::Scheduled);
        assert_eq!(ReservationStatus::normalize(Some("INACTIVO")), ReservationStatus::Finished);
        assert_eq!(ReservationStatus::normalize(Some("ENCURSO")), ReservationStatus::InProgress);
    }
}
