use chrono::{DateTime, NaiveDate};

/// End label for open-ended entries.
pub const PRESENT: &str = "Present";

/// Formats an editor date for display.
///
/// `2021-03-15`, `2021-03` and RFC 3339 timestamps render as `Mar 2021`; a bare year
/// renders as-is. Anything unparseable is echoed verbatim so free-form input ("Summer
/// 2019") still shows up.
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();

    let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d").ok())
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()));

    match parsed {
        Some(date) => date.format("%b %Y").to_string(),
        None => raw.to_string(),
    }
}

/// Builds a "start – end" label. An entry flagged `current`, or with a start but no end,
/// ends in [`PRESENT`]. Returns `None` when there is nothing to show.
pub fn date_range(
    start: Option<&str>,
    end: Option<&str>,
    current: bool,
    separator: &str,
) -> Option<String> {
    let start = start.map(format_date);
    let end = if current {
        Some(PRESENT.to_string())
    } else {
        end.map(format_date)
    };

    match (start, end) {
        (Some(start), Some(end)) => Some(format!("{start}{separator}{end}")),
        (Some(start), None) => Some(format!("{start}{separator}{PRESENT}")),
        (None, Some(end)) => Some(end),
        (None, None) => None,
    }
}

/// Issue date with an optional expiry; a certification without expiry never reads "Present".
pub fn issued_range(issued: Option<&str>, expires: Option<&str>, separator: &str) -> Option<String> {
    match (issued.map(format_date), expires.map(format_date)) {
        (Some(issued), Some(expires)) => Some(format!("{issued}{separator}{expires}")),
        (Some(issued), None) => Some(issued),
        (None, Some(expires)) => Some(format!("Expires {expires}")),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_full_date() {
        assert_eq!(format_date("2021-03-15"), "Mar 2021");
    }

    #[test]
    fn test_format_month_precision() {
        assert_eq!(format_date("2019-11"), "Nov 2019");
    }

    #[test]
    fn test_format_rfc3339_timestamp() {
        assert_eq!(format_date("2020-01-15T00:00:00.000Z"), "Jan 2020");
    }

    #[test]
    fn test_unparseable_is_echoed() {
        assert_eq!(format_date("2018"), "2018");
        assert_eq!(format_date(" Summer 2019 "), "Summer 2019");
    }

    #[test]
    fn test_current_flag_wins_over_end_date() {
        assert_eq!(
            date_range(Some("2020-01"), Some("2022-05"), true, " - ").as_deref(),
            Some("Jan 2020 - Present")
        );
    }

    #[test]
    fn test_missing_end_is_present() {
        assert_eq!(
            date_range(Some("2020-01"), None, false, " – ").as_deref(),
            Some("Jan 2020 – Present")
        );
    }

    #[test]
    fn test_closed_range() {
        assert_eq!(
            date_range(Some("2016-09"), Some("2020-06"), false, " - ").as_deref(),
            Some("Sep 2016 - Jun 2020")
        );
    }

    #[test]
    fn test_empty_range_is_none() {
        assert_eq!(date_range(None, None, false, " - "), None);
    }

    #[test]
    fn test_issued_range_without_expiry() {
        assert_eq!(
            issued_range(Some("2023-02"), None, " - ").as_deref(),
            Some("Feb 2023")
        );
        assert_eq!(
            issued_range(Some("2023-02"), Some("2026-02"), " - ").as_deref(),
            Some("Feb 2023 - Feb 2026")
        );
    }
}
