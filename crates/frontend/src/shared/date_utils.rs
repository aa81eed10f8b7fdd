/// Utilities for date, time and amount formatting
///
/// Dates are shown in the business locale ("15 de marzo del 2024").
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike};

const MONTH_NAMES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Parse the date and time formats the backend emits
fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn month_name(dt: &NaiveDateTime) -> &'static str {
    MONTH_NAMES[dt.month0() as usize]
}

/// "2024-03-15" -> "15 de marzo del 2024"; unparseable input is returned as is
pub fn format_date_es(value: &str) -> String {
    match parse_datetime(value) {
        Some(dt) => format!("{} de {} del {}", dt.day(), month_name(&dt), dt.year()),
        None => value.to_string(),
    }
}

/// "2024-03-15T09:05:00" -> "15 de marzo del 2024 a las 09:05"
pub fn format_datetime_es(value: &str) -> String {
    match parse_datetime(value) {
        Some(dt) => format!(
            "{} de {} del {} a las {:02}:{:02}",
            dt.day(),
            month_name(&dt),
            dt.year(),
            dt.hour(),
            dt.minute()
        ),
        None => value.to_string(),
    }
}

/// Optional date with a dash placeholder
pub fn format_date_opt(value: Option<&str>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .map(format_date_es)
        .unwrap_or_else(|| "—".to_string())
}

/// "$1,234.50"
pub fn format_money(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_es() {
        assert_eq!(format_date_es("2024-03-15"), "15 de marzo del 2024");
        assert_eq!(format_date_es("2024-12-01T14:02:26.123Z"), "1 de diciembre del 2024");
        assert_eq!(format_date_es("2024-01-07T10:00:00"), "7 de enero del 2024");
    }

    #[test]
    fn test_format_datetime_es() {
        assert_eq!(
            format_datetime_es("2024-03-15T09:05:00"),
            "15 de marzo del 2024 a las 09:05"
        );
        assert_eq!(
            format_datetime_es("2024-03-15T18:30"),
            "15 de marzo del 2024 a las 18:30"
        );
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_date_es("invalid"), "invalid");
        assert_eq!(format_datetime_es(""), "");
        assert_eq!(format_date_opt(None), "—");
        assert_eq!(format_date_opt(Some("  ")), "—");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(1234.5), "$1,234.50");
        assert_eq!(format_money(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_money(-15.5), "-$15.50");
        assert_eq!(format_money(999.999), "$1,000.00");
    }
}
