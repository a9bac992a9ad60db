use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use utoipa::IntoParams;

/// Raw listing parameters as received from the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase", default)]
#[into_params(parameter_in = Query)]
pub struct GetEventsQuery {
    /// 1-based page number, clamped to at least 1.
    pub page_number: Option<i64>,
    /// Page size, clamped to 1..=100 (defaults to 10).
    pub page_size: Option<i64>,
    /// Exact category name, compared case-insensitively.
    pub category_name_filter: Option<String>,
    /// Substring matched against name, description and category.
    pub search_term: Option<String>,
    /// One of thisweek, thismonth, thisyear, upcoming, past. Takes
    /// priority over the explicit date range.
    pub date_filter: Option<String>,
    /// Inclusive lower bound on the start date. A timestamp is truncated
    /// to its calendar day.
    #[serde(deserialize_with = "deserialize_calendar_date")]
    #[param(value_type = Option<String>, example = "2025-07-01")]
    pub specific_date_from: Option<NaiveDate>,
    /// Inclusive upper bound on the start date (the whole day counts).
    #[serde(deserialize_with = "deserialize_calendar_date")]
    #[param(value_type = Option<String>, example = "2025-07-31")]
    pub specific_date_to: Option<NaiveDate>,
}

/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.f]` (or with a space) and
/// a bare `YYYY-MM-DD`. Blank is treated as absent.
fn deserialize_calendar_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => {
            parse_calendar_date(s).map(Some).ok_or_else(|| {
                serde::de::Error::custom(format!("invalid date: {s}"))
            })
        }
        _ => Ok(None),
    }
}

fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    if let Ok(at) = DateTime::parse_from_rfc3339(s) {
        return Some(at.with_timezone(&Utc).date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|at| at.date())
        .or_else(|| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn parse(json: &str) -> GetEventsQuery {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn bare_dates_are_accepted() {
        let query = parse(
            r#"{"specificDateFrom": "2025-07-01", "specificDateTo": "2025-07-31"}"#,
        );

        assert_eq!(query.specific_date_from, date(2025, 7, 1));
        assert_eq!(query.specific_date_to, date(2025, 7, 31));
    }

    #[test]
    fn timestamps_are_truncated_to_their_day() {
        let query = parse(
            r#"{"specificDateFrom": "2025-07-01T12:00:00",
                "specificDateTo": "2025-07-03 23:59:59.5"}"#,
        );

        assert_eq!(query.specific_date_from, date(2025, 7, 1));
        assert_eq!(query.specific_date_to, date(2025, 7, 3));
    }

    #[test]
    fn offset_timestamps_use_the_utc_day() {
        let query = parse(r#"{"specificDateFrom": "2025-07-01T23:30:00-02:00"}"#);

        assert_eq!(query.specific_date_from, date(2025, 7, 2));
    }

    #[test]
    fn blank_date_is_absent() {
        let query = parse(r#"{"specificDateFrom": "  "}"#);

        assert_eq!(query.specific_date_from, None);
        assert_eq!(query.specific_date_to, None);
    }

    #[test]
    fn garbage_date_is_rejected() {
        let result: Result<GetEventsQuery, _> =
            serde_json::from_str(r#"{"specificDateTo": "next tuesday"}"#);

        assert!(result.is_err());
    }
}
