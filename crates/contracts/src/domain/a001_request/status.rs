use crate::domain::common::{ColorTag, StatusVocabulary};
use crate::enums::EntityKind;

/// Status of an event request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RequestStatus {
    Active,
    Inactive,
}

impl StatusVocabulary for RequestStatus {
    const KIND: EntityKind = EntityKind::Request;
    const FALLBACK: Self = RequestStatus::Active;
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("ACTIVO", RequestStatus::Active),
        ("ACTIVA", RequestStatus::Active),
        ("ACTIVE", RequestStatus::Active),
        ("INACTIVO", RequestStatus::Inactive),
        ("INACTIVA", RequestStatus::Inactive),
        ("INACTIVE", RequestStatus::Inactive),
    ];
    const ALL: &'static [Self] = &[RequestStatus::Active, RequestStatus::Inactive];

    fn code(self) -> &'static str {
        match self {
            RequestStatus::Active => "request.active",
            RequestStatus::Inactive => "request.inactive",
        }
    }

    fn wire_value(self) -> &'static str {
        match self {
            RequestStatus::Active => "Activo",
            RequestStatus::Inactive => "Inactivo",
        }
    }

    fn label(self) -> &'static str {
        match self {
            RequestStatus::Active => "Activa",
            RequestStatus::Inactive => "Inactiva",
        }
    }

    fn color_tag(self) -> ColorTag {
        match self {
            RequestStatus::Active => ColorTag::Green,
            RequestStatus::Inactive => ColorTag::Red,
        }
    }

    fn is_terminal(self) -> bool {
        false
    }
}
