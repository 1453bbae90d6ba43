//! Text formatting for report cells and cards.

use chrono::NaiveDateTime;

/// Placeholder for absent values.
pub const EMPTY: &str = "-";

/// Formats a percentage with exactly one decimal, e.g. `20.0%`.
///
/// Non-finite input renders as `0.0%`.
pub fn format_percent(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    // Avoid "-0.0%" for tiny negative inputs.
    let rounded = (value * 10.0).round() / 10.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:.1}%", rounded)
}

pub fn format_count(value: u64) -> String {
    value.to_string()
}

/// `dd/mm/yyyy`, or `-` when absent.
pub fn format_date(value: Option<NaiveDateTime>) -> String {
    value
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| EMPTY.to_string())
}

/// `dd/mm/yyyy HH:MM`, or `-` when absent.
pub fn format_datetime(value: Option<NaiveDateTime>) -> String {
    value
        .map(|d| d.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|| EMPTY.to_string())
}

/// Falls back to `-` for empty or whitespace-only text.
pub fn or_dash(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        EMPTY.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_percent_has_one_decimal() {
        assert_eq!(format_percent(20.0), "20.0%");
        assert_eq!(format_percent(33.333), "33.3%");
        assert_eq!(format_percent(100.0), "100.0%");
        assert_eq!(format_percent(-0.01), "0.0%");
        assert_eq!(format_percent(f64::NAN), "0.0%");
    }

    #[test]
    fn test_dates() {
        let d = at(2024, 3, 7, 9, 5);
        assert_eq!(format_date(Some(d)), "07/03/2024");
        assert_eq!(format_datetime(Some(d)), "07/03/2024 09:05");
        assert_eq!(format_date(None), "-");
        assert_eq!(format_datetime(None), "-");
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash("  "), "-");
        assert_eq!(or_dash(" TI "), "TI");
    }
}
