//! Status normalization
//!
//! The backend returns status strings in several spellings for the same
//! value (`"EN_PLANEACION"`, `"ENPLANEACION"`, `"Aprobada"`, `"APROBADA"`...).
//! Every raw string is folded into a normalization key and looked up in the
//! vocabulary of its entity kind. Unknown values fall back to the kind's
//! default status and are reported through [`StatusDiagnostics`].

use crate::domain::a001_request::RequestStatus;
use crate::domain::a002_quote::QuoteStatus;
use crate::domain::a003_reservation::ReservationStatus;
use crate::domain::a004_task::TaskStatus;
use crate::enums::EntityKind;
use serde::{Deserialize, Serialize};

/// Display color of a status badge. Rendering only, never used in logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    Green,
    Red,
    Orange,
    Blue,
    Cyan,
}

impl ColorTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorTag::Green => "green",
            ColorTag::Red => "red",
            ColorTag::Orange => "orange",
            ColorTag::Blue => "blue",
            ColorTag::Cyan => "cyan",
        }
    }
}

/// Sink for normalization misses
pub trait StatusDiagnostics {
    fn normalization_miss(&self, kind: EntityKind, raw: &str, fallback: CanonicalStatus);
}

/// Default sink: writes a warning through the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl StatusDiagnostics for LogDiagnostics {
    fn normalization_miss(&self, kind: EntityKind, raw: &str, fallback: CanonicalStatus) {
        log::warn!(
            "unmapped {} status {:?}, falling back to {}",
            kind,
            raw,
            fallback.id()
        );
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDiagnostics;

impl StatusDiagnostics for NoopDiagnostics {
    fn normalization_miss(&self, _kind: EntityKind, _raw: &str, _fallback: CanonicalStatus) {}
}

/// Fold a raw status into its lookup key.
///
/// Uppercases, drops `_`, `-` and whitespace, and strips Spanish accents:
/// `"En Planeación"` -> `"ENPLANEACION"`.
pub fn normalization_key(raw: &str) -> String {
    raw.chars()
        .flat_map(char::to_uppercase)
        .filter_map(|c| match c {
            '_' | '-' => None,
            c if c.is_whitespace() => None,
            'Á' | 'À' | 'Ä' => Some('A'),
            'É' | 'È' | 'Ë' => Some('E'),
            'Í' | 'Ì' | 'Ï' => Some('I'),
            'Ó' | 'Ò' | 'Ö' => Some('O'),
            'Ú' | 'Ù' | 'Ü' => Some('U'),
            'Ñ' => Some('N'),
            c => Some(c),
        })
        .collect()
}

/// Closed status vocabulary of one entity kind
pub trait StatusVocabulary: Copy + Eq + std::fmt::Debug + Into<CanonicalStatus> + 'static {
    const KIND: EntityKind;

    /// Value used for empty, missing and unmapped raw statuses
    const FALLBACK: Self;

    /// Every known spelling, already folded with [`normalization_key`]
    const VARIANTS: &'static [(&'static str, Self)];

    const ALL: &'static [Self];

    /// Stable identifier, e.g. `"reservation.planning"`
    fn code(self) -> &'static str;

    /// Spelling the backend expects when the status is sent back
    fn wire_value(self) -> &'static str;

    fn label(self) -> &'static str;

    fn color_tag(self) -> ColorTag;

    fn is_terminal(self) -> bool;

    fn from_key(key: &str) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .find(|(variant, _)| *variant == key)
            .map(|(_, status)| *status)
    }

    fn normalize(raw: Option<&str>) -> Self {
        Self::normalize_with(raw, &LogDiagnostics)
    }

    fn normalize_with(raw: Option<&str>, diagnostics: &dyn StatusDiagnostics) -> Self {
        let raw = raw.map(str::trim).unwrap_or_default();
        if raw.is_empty() {
            return Self::FALLBACK;
        }
        match Self::from_key(&normalization_key(raw)) {
            Some(status) => status,
            None => {
                diagnostics.normalization_miss(Self::KIND, raw, Self::FALLBACK.into());
                Self::FALLBACK
            }
        }
    }
}

/// Canonical status of any workflow entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalStatus {
    Request(RequestStatus),
    Quote(QuoteStatus),
    Reservation(ReservationStatus),
    Task(TaskStatus),
}

impl CanonicalStatus {
    pub fn kind(&self) -> EntityKind {
        match self {
            CanonicalStatus::Request(_) => EntityKind::Request,
            CanonicalStatus::Quote(_) => EntityKind::Quote,
            CanonicalStatus::Reservation(_) => EntityKind::Reservation,
            CanonicalStatus::Task(_) => EntityKind::Task,
        }
    }

    pub fn id(&self) -> &'static str {
        match *self {
            CanonicalStatus::Request(s) => s.code(),
            CanonicalStatus::Quote(s) => s.code(),
            CanonicalStatus::Reservation(s) => s.code(),
            CanonicalStatus::Task(s) => s.code(),
        }
    }

    pub fn label(&self) -> &'static str {
        match *self {
            CanonicalStatus::Request(s) => s.label(),
            CanonicalStatus::Quote(s) => s.label(),
            CanonicalStatus::Reservation(s) => s.label(),
            CanonicalStatus::Task(s) => s.label(),
        }
    }

    pub fn color_tag(&self) -> ColorTag {
        match *self {
            CanonicalStatus::Request(s) => s.color_tag(),
            CanonicalStatus::Quote(s) => s.color_tag(),
            CanonicalStatus::Reservation(s) => s.color_tag(),
            CanonicalStatus::Task(s) => s.color_tag(),
        }
    }

    pub fn wire_value(&self) -> &'static str {
        match *self {
            CanonicalStatus::Request(s) => s.wire_value(),
            CanonicalStatus::Quote(s) => s.wire_value(),
            CanonicalStatus::Reservation(s) => s.wire_value(),
            CanonicalStatus::Task(s) => s.wire_value(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        match *self {
            CanonicalStatus::Request(s) => s.is_terminal(),
            CanonicalStatus::Quote(s) => s.is_terminal(),
            CanonicalStatus::Reservation(s) => s.is_terminal(),
            CanonicalStatus::Task(s) => s.is_terminal(),
        }
    }

    /// Fallback status of a kind
    pub fn fallback(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Request => RequestStatus::FALLBACK.into(),
            EntityKind::Quote => QuoteStatus::FALLBACK.into(),
            EntityKind::Reservation => ReservationStatus::FALLBACK.into(),
            EntityKind::Task => TaskStatus::FALLBACK.into(),
        }
    }

    /// All canonical statuses of a kind, in workflow order
    pub fn all_of(kind: EntityKind) -> Vec<Self> {
        fn collect<S: StatusVocabulary>() -> Vec<CanonicalStatus> {
            S::ALL.iter().map(|s| (*s).into()).collect()
        }
        match kind {
            EntityKind::Request => collect::<RequestStatus>(),
            EntityKind::Quote => collect::<QuoteStatus>(),
            EntityKind::Reservation => collect::<ReservationStatus>(),
            EntityKind::Task => collect::<TaskStatus>(),
        }
    }
}

impl std::fmt::Display for CanonicalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl From<RequestStatus> for CanonicalStatus {
    fn from(s: RequestStatus) -> Self {
        CanonicalStatus::Request(s)
    }
}

impl From<QuoteStatus> for CanonicalStatus {
    fn from(s: QuoteStatus) -> Self {
        CanonicalStatus::Quote(s)
    }
}

impl From<ReservationStatus> for CanonicalStatus {
    fn from(s: ReservationStatus) -> Self {
        CanonicalStatus::Reservation(s)
    }
}

impl From<TaskStatus> for CanonicalStatus {
    fn from(s: TaskStatus) -> Self {
        CanonicalStatus::Task(s)
    }
}

/// Normalize a raw backend status of the given kind
pub fn normalize(kind: EntityKind, raw: Option<&str>) -> CanonicalStatus {
    normalize_with(kind, raw, &LogDiagnostics)
}

pub fn normalize_with(
    kind: EntityKind,
    raw: Option<&str>,
    diagnostics: &dyn StatusDiagnostics,
) -> CanonicalStatus {
    match kind {
        EntityKind::Request => RequestStatus::normalize_with(raw, diagnostics).into(),
        EntityKind::Quote => QuoteStatus::normalize_with(raw, diagnostics).into(),
        EntityKind::Reservation => ReservationStatus::normalize_with(raw, diagnostics).into(),
        EntityKind::Task => TaskStatus::normalize_with(raw, diagnostics).into(),
    }
}

pub fn label(status: CanonicalStatus) -> &'static str {
    status.label()
}

pub fn color_tag(status: CanonicalStatus) -> ColorTag {
    status.color_tag()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingDiagnostics {
        misses: RefCell<Vec<(EntityKind, String, CanonicalStatus)>>,
    }

    impl StatusDiagnostics for RecordingDiagnostics {
        fn normalization_miss(&self, kind: EntityKind, raw: &str, fallback: CanonicalStatus) {
            self.misses
                .borrow_mut()
                .push((kind, raw.to_string(), fallback));
        }
    }

    #[test]
    fn test_normalization_key() {
        assert_eq!(normalization_key("EN_PLANEACION"), "ENPLANEACION");
        assert_eq!(normalization_key("enplaneacion"), "ENPLANEACION");
        assert_eq!(normalization_key("En Planeación"), "ENPLANEACION");
        assert_eq!(normalization_key("en-curso"), "ENCURSO");
        assert_eq!(normalization_key(""), "");
    }

    #[test]
    fn test_reservation_spellings_collapse() {
        let diag = RecordingDiagnostics::default();
        for raw in ["EN_PLANEACION", "enplaneacion", "ENPLANEACION", "En Planeación"] {
            assert_eq!(
                normalize_with(EntityKind::Reservation, Some(raw), &diag),
                CanonicalStatus::Reservation(ReservationStatus::Planning),
                "raw = {raw}"
            );
        }
        for raw in ["EN_CURSO", "ENCURSO", "En curso"] {
            assert_eq!(
                normalize_with(EntityKind::Reservation, Some(raw), &diag),
                CanonicalStatus::Reservation(ReservationStatus::InProgress)
            );
        }
        assert!(diag.misses.borrow().is_empty());
    }

    #[test]
    fn test_every_variant_is_case_and_separator_insensitive() {
        fn check<S: StatusVocabulary>() {
            let diag = RecordingDiagnostics::default();
            for (key, expected) in S::VARIANTS {
                let lower = key.to_lowercase();
                let padded = format!(" {key} ");
                assert_eq!(S::normalize_with(Some(*key), &diag), *expected);
                assert_eq!(S::normalize_with(Some(lower.as_str()), &diag), *expected);
                assert_eq!(S::normalize_with(Some(padded.as_str()), &diag), *expected);
            }
            assert!(diag.misses.borrow().is_empty());
        }
        check::<RequestStatus>();
        check::<QuoteStatus>();
        check::<ReservationStatus>();
        check::<TaskStatus>();
    }

    #[test]
    fn test_variant_keys_are_already_folded() {
        fn check<S: StatusVocabulary>() {
            for (key, _) in S::VARIANTS {
                assert_eq!(normalization_key(key), *key);
            }
        }
        check::<RequestStatus>();
        check::<QuoteStatus>();
        check::<ReservationStatus>();
        check::<TaskStatus>();
    }

    #[test]
    fn test_empty_and_missing_fall_back_silently() {
        let diag = RecordingDiagnostics::default();
        for kind in EntityKind::all() {
            assert_eq!(normalize_with(kind, None, &diag), CanonicalStatus::fallback(kind));
            assert_eq!(normalize_with(kind, Some(""), &diag), CanonicalStatus::fallback(kind));
            assert_eq!(normalize_with(kind, Some("   "), &diag), CanonicalStatus::fallback(kind));
        }
        assert!(diag.misses.borrow().is_empty());
    }

    #[test]
    fn test_unmapped_value_reports_diagnostic() {
        let diag = RecordingDiagnostics::default();
        let status = normalize_with(EntityKind::Reservation, Some("ARCHIVADA"), &diag);
        assert_eq!(status, CanonicalStatus::Reservation(ReservationStatus::Planning));

        let status = normalize_with(EntityKind::Quote, Some("???"), &diag);
        assert_eq!(status, CanonicalStatus::Quote(QuoteStatus::Pending));

        let misses = diag.misses.borrow();
        assert_eq!(misses.len(), 2);
        assert_eq!(misses[0].0, EntityKind::Reservation);
        assert_eq!(misses[0].1, "ARCHIVADA");
        assert_eq!(misses[1].2, CanonicalStatus::Quote(QuoteStatus::Pending));
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(
            CanonicalStatus::fallback(EntityKind::Request),
            CanonicalStatus::Request(RequestStatus::Active)
        );
        assert_eq!(
            CanonicalStatus::fallback(EntityKind::Quote),
            CanonicalStatus::Quote(QuoteStatus::Pending)
        );
        assert_eq!(
            CanonicalStatus::fallback(EntityKind::Reservation),
            CanonicalStatus::Reservation(ReservationStatus::Planning)
        );
        assert_eq!(
            CanonicalStatus::fallback(EntityKind::Task),
            CanonicalStatus::Task(TaskStatus::Pending)
        );
    }

    #[test]
    fn test_ids_are_unique_and_labels_non_empty() {
        let mut ids = std::collections::HashSet::new();
        for kind in EntityKind::all() {
            for status in CanonicalStatus::all_of(kind) {
                assert_eq!(status.kind(), kind);
                assert!(ids.insert(status.id()), "duplicate id {}", status.id());
                assert!(!label(status).is_empty());
                let _ = color_tag(status);
            }
        }
    }

    #[test]
    fn test_wire_value_round_trips() {
        let diag = RecordingDiagnostics::default();
        for kind in EntityKind::all() {
            for status in CanonicalStatus::all_of(kind) {
                assert_eq!(normalize_with(kind, Some(status.wire_value()), &diag), status);
            }
        }
        assert!(diag.misses.borrow().is_empty());
    }
}
