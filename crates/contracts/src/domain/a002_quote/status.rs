use crate::domain::common::{ColorTag, StatusVocabulary};
use crate::enums::EntityKind;

/// Status of a quote
///
/// `CANCELADA` quotes are folded into `Rejected`: both are closed and
/// cannot be approved any more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QuoteStatus {
    Pending,
    InProgress,
    Approved,
    Rejected,
}

impl StatusVocabulary for QuoteStatus {
    const KIND: EntityKind = EntityKind::Quote;
    const FALLBACK: Self = QuoteStatus::Pending;
    const VARIANTS: &'static [(&'static str, Self)] = &[
        ("PENDIENTE", QuoteStatus::Pending),
        ("PENDING", QuoteStatus::Pending),
        ("ENPROCESO", QuoteStatus::InProgress),
        ("INPROGRESS", QuoteStatus::InProgress),
        ("APROBADA", QuoteStatus::Approved),
        ("APPROVED", QuoteStatus::Approved),
        ("RECHAZADA", QuoteStatus::Rejected),
        ("REJECTED", QuoteStatus::Rejected),
        ("CANCELADA", QuoteStatus::Rejected),
        ("CANCELLED", QuoteStatus::Rejected),
    ];
    const ALL: &'static [Self] = &[
        QuoteStatus::Pending,
        QuoteStatus::InProgress,
        QuoteStatus::Approved,
        QuoteStatus::Rejected,
    ];

    fn code(self) -> &'static str {
        match self {
            QuoteStatus::Pending => "quote.pending",
            QuoteStatus::InProgress => "quote.in_progress",
            QuoteStatus::Approved => "quote.approved",
            QuoteStatus::Rejected => "quote.rejected",
        }
    }

    fn wire_value(self) -> &'static str {
        match self {
            QuoteStatus::Pending => "Pendiente",
            QuoteStatus::InProgress => "EnProceso",
            QuoteStatus::Approved => "Aprobada",
            QuoteStatus::Rejected => "Rechazada",
        }
    }

    fn label(self) -> &'static str {
        match self {
            QuoteStatus::Pending => "Pendiente",
            QuoteStatus::InProgress => "En Proceso",
            QuoteStatus::Approved => "Aprobada",
            QuoteStatus::Rejected => "Rechazada",
        }
    }

    fn color_tag(self) -> ColorTag {
        match self {
            QuoteStatus::Pending => ColorTag::Orange,
            QuoteStatus::InProgress => ColorTag::Blue,
            QuoteStatus::Approved => ColorTag::Green,
            QuoteStatus::Rejected => ColorTag::Red,
        }
    }

    fn is_terminal(self) -> bool {
        matches!(self, QuoteStatus::Approved | QuoteStatus::Rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_spellings() {
        assert_eq!(QuoteStatus::normalize(Some("Aprobada")), QuoteStatus::Approved);
        assert_eq!(QuoteStatus::normalize(Some("APROBADA")), QuoteStatus::Approved);
        assert_eq!(QuoteStatus::normalize(Some("EN_PROCESO")), QuoteStatus::InProgress);
        assert_eq!(QuoteStatus::normalize(Some("EnProceso")), QuoteStatus::InProgress);
        assert_eq!(QuoteStatus::normalize(Some("Cancelada")), QuoteStatus::Rejected);
        assert_eq!(QuoteStatus::normalize(None), QuoteStatus::Pending);
    }
}
