//! Total scalar parsers for worksheet cell text.
//!
//! Sheet exports mix locale formats freely: percentages written with a
//! decimal comma and a trailing `%`, elapsed times as `HH:MM:SS` or as
//! `1h 30m` tokens, placeholders like `-` and `#N/A` where no data was
//! recorded. Every parser here is total. Malformed input yields the
//! type's zero instead of an error, so one bad cell cannot take down a
//! whole refresh; only the transport layer is allowed to fail loudly.

/// True for cells that mean "no data recorded": empty or whitespace,
/// `-`, `#N/A`, and the `nan` text that pandas-style exports leave
/// behind (any case).
pub fn is_marker(cell: &str) -> bool {
    let t = cell.trim();
    t.is_empty() || t == "-" || t == "#N/A" || t.eq_ignore_ascii_case("nan")
}

/// Decimal number with an optional comma decimal separator.
///
/// `"5,5"` parses as 5.5; markers and non-numeric text parse as 0.0.
pub fn parse_decimal(cell: &str) -> f64 {
    let t = cell.trim();
    if is_marker(t) {
        return 0.0;
    }
    // f64's FromStr accepts "inf"/"infinity"; those are garbage cells
    // here, not numbers.
    t.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Percentage cell: strips one trailing `%` and keeps the magnitude as
/// written, so `"98,5%"` is 98.5. Values stay on the 0..=100 scale end
/// to end; nothing downstream divides by 100.
pub fn parse_percent(cell: &str) -> f64 {
    let t = cell.trim();
    if is_marker(t) {
        return 0.0;
    }
    parse_decimal(t.strip_suffix('%').unwrap_or(t))
}

/// Elapsed time in minutes.
///
/// Accepts `HH:MM:SS`, `MM:SS`, unit tokens (`"1h 30m"`, `"45s"`), and
/// plain comma decimals already denominated in minutes. Anything else,
/// including markers, is 0.0.
pub fn parse_duration_minutes(cell: &str) -> f64 {
    let t = cell.trim();
    if is_marker(t) {
        return 0.0;
    }
    if t.contains(':') {
        return colon_minutes(t);
    }
    if let Some(minutes) = token_minutes(t) {
        return minutes;
    }
    parse_decimal(t)
}

/// Whole count: markers are 0, everything else parses as a comma
/// decimal and truncates toward zero.
pub fn parse_count(cell: &str) -> i64 {
    parse_decimal(cell).trunc() as i64
}

/// Zero-padded `HH:MM:SS` for a minutes value. Rounding happens on the
/// total seconds, so a seconds field can never display as 60.
pub fn format_hms(minutes: f64) -> String {
    let total = (minutes * 60.0).round().max(0.0) as u64;
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

/// `H:MM:SS` or `M:SS` with all fields numeric; any other shape is 0.0.
fn colon_minutes(t: &str) -> f64 {
    let fields: Vec<f64> = t
        .split(':')
        .map(|f| f.trim().replace(',', ".").parse::<f64>().unwrap_or(f64::NAN))
        .collect();
    if fields.iter().any(|n| !n.is_finite()) {
        return 0.0;
    }
    match fields.as_slice() {
        [h, m, s] => h * 60.0 + m + s / 60.0,
        [m, s] => m + s / 60.0,
        _ => 0.0,
    }
}

/// `XhYmZs` token format some exports emit: any subset of hour, minute
/// and second tokens, in order, digits only. `None` when the cell is
/// not in this shape at all.
fn token_minutes(t: &str) -> Option<f64> {
    let mut seconds = 0.0f64;
    let mut digits = String::new();
    let mut matched = false;
    for ch in t.chars() {
        match ch {
            '0'..='9' => digits.push(ch),
            'h' | 'm' | 's' => {
                if digits.is_empty() {
                    return None;
                }
                let n: f64 = digits.parse().ok()?;
                seconds += match ch {
                    'h' => n * 3600.0,
                    'm' => n * 60.0,
                    _ => n,
                };
                digits.clear();
                matched = true;
            }
            c if c.is_whitespace() => {
                // A digit run must end in a unit letter, not a space.
                if !digits.is_empty() {
                    return None;
                }
            }
            _ => return None,
        }
    }
    if !digits.is_empty() {
        return None;
    }
    if matched {
        Some(seconds / 60.0)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers() {
        for cell in ["", "  ", "-", "#N/A", "nan", "NaN", "NAN"] {
            assert!(is_marker(cell), "{cell:?} should be a marker");
        }
        assert!(!is_marker("0"));
        assert!(!is_marker("-2"));
        assert!(!is_marker("n/a"));
    }

    #[test]
    fn percent_comma_decimal() {
        assert_eq!(parse_percent("98,5%"), 98.5);
        assert_eq!(parse_percent("100%"), 100.0);
        assert_eq!(parse_percent("73.2%"), 73.2);
        assert_eq!(parse_percent(" 98,5% "), 98.5);
    }

    #[test]
    fn percent_markers_and_garbage_are_zero() {
        assert_eq!(parse_percent(""), 0.0);
        assert_eq!(parse_percent("-"), 0.0);
        assert_eq!(parse_percent("#N/A"), 0.0);
        assert_eq!(parse_percent("abc"), 0.0);
        assert_eq!(parse_percent("%"), 0.0);
        assert_eq!(parse_percent("inf"), 0.0);
        assert_eq!(parse_percent("-infinity"), 0.0);
    }

    #[test]
    fn percent_scale_is_preserved() {
        // 0..=100 as written; no hidden /100.
        assert_eq!(parse_percent("90,0"), 90.0);
        assert_eq!(parse_percent("0,5%"), 0.5);
    }

    #[test]
    fn duration_colon_forms() {
        assert_eq!(parse_duration_minutes("01:30:00"), 90.0);
        assert_eq!(parse_duration_minutes("2:30"), 2.5);
        assert_eq!(parse_duration_minutes("0:00:30"), 0.5);
        assert_eq!(parse_duration_minutes("10:00:00"), 600.0);
    }

    #[test]
    fn duration_plain_decimal_is_minutes() {
        assert_eq!(parse_duration_minutes("5,5"), 5.5);
        assert_eq!(parse_duration_minutes("90"), 90.0);
    }

    #[test]
    fn duration_unit_tokens() {
        assert_eq!(parse_duration_minutes("1h 30m"), 90.0);
        assert_eq!(parse_duration_minutes("1h30m"), 90.0);
        assert_eq!(parse_duration_minutes("45s"), 0.75);
        assert_eq!(parse_duration_minutes("2h"), 120.0);
        assert_eq!(parse_duration_minutes("1h 2m 30s"), 62.5);
    }

    #[test]
    fn duration_malformed_is_zero() {
        assert_eq!(parse_duration_minutes(""), 0.0);
        assert_eq!(parse_duration_minutes("-"), 0.0);
        assert_eq!(parse_duration_minutes("abc"), 0.0);
        assert_eq!(parse_duration_minutes("1:2:3:4"), 0.0);
        assert_eq!(parse_duration_minutes("1:xx"), 0.0);
        assert_eq!(parse_duration_minutes("1 h"), 0.0);
        assert_eq!(parse_duration_minutes("hm"), 0.0);
    }

    #[test]
    fn count_truncates_toward_zero() {
        assert_eq!(parse_count("7"), 7);
        assert_eq!(parse_count("3,7"), 3);
        assert_eq!(parse_count("-2,5"), -2);
        assert_eq!(parse_count("-"), 0);
        assert_eq!(parse_count("x"), 0);
    }

    #[test]
    fn hms_formatting() {
        assert_eq!(format_hms(90.0), "01:30:00");
        assert_eq!(format_hms(0.5), "00:00:30");
        assert_eq!(format_hms(0.0), "00:00:00");
        assert_eq!(format_hms(600.25), "10:00:15");
        // Rounds on total seconds: 59.7 min is 3582s, not xx:59:60.
        assert_eq!(format_hms(59.999), "01:00:00");
    }

    #[test]
    fn hms_negative_clamps_to_zero() {
        assert_eq!(format_hms(-5.0), "00:00:00");
    }
}
