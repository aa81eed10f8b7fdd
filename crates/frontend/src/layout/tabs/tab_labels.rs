//! Tab titles, one place for every tab key.

use contracts::enums::EntityKind;

pub const REQUEST_DETAIL: &str = "a001_request_detail_";
pub const QUOTE_DETAIL: &str = "a002_quote_detail_";
pub const RESERVATION_DETAIL: &str = "a003_reservation_detail_";

/// Readable title for a list or system tab key; empty when unknown
pub fn tab_label_for_key(key: &str) -> &'static str {
    match key {
        "a001_request" => "Solicitudes",
        "a002_quote" => "Cotizaciones",
        "a003_reservation" => "Reservaciones",
        "a004_task" => "Mis tareas",
        "sys_users" => "Usuarios",
        _ => "",
    }
}

/// Key of the detail tab for one record; tasks have none and open their list
pub fn detail_tab_key(kind: EntityKind, id: &str) -> String {
    let prefix = match kind {
        EntityKind::Request => REQUEST_DETAIL,
        EntityKind::Quote => QUOTE_DETAIL,
        EntityKind::Reservation => RESERVATION_DETAIL,
        EntityKind::Task => return "a004_task".to_string(),
    };
    format!("{prefix}{id}")
}

/// First non-empty identifier, falling back to the id
pub fn pick_identifier<'a>(name: Option<&'a str>, id: &'a str) -> &'a str {
    name.filter(|s| !s.trim().is_empty()).unwrap_or(id)
}

/// Detail tab title: «<entity> · <identifier>»
pub fn detail_tab_label(kind: EntityKind, identifier: &str) -> String {
    format!("{} · {}", kind.display_name(), identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_keys_round_trip_through_prefix() {
        let key = detail_tab_key(EntityKind::Reservation, "r-9");
        assert_eq!(key.strip_prefix(RESERVATION_DETAIL), Some("r-9"));
        assert_eq!(detail_tab_key(EntityKind::Task, "t1"), "a004_task");
        assert_eq!(tab_label_for_key("a004_task"), "Mis tareas");
        assert_eq!(tab_label_for_key("unknown"), "");
    }

    #[test]
    fn test_identifier_fallback() {
        assert_eq!(pick_identifier(Some("Boda"), "q1"), "Boda");
        assert_eq!(pick_identifier(Some("  "), "q1"), "q1");
        assert_eq!(pick_identifier(None, "q1"), "q1");
    }
}
