use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};

/// Relative date keywords accepted by the `dateFilter` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    ThisWeek,
    ThisMonth,
    ThisYear,
    Upcoming,
    Past,
}

impl DateFilter {
    /// Case-insensitive keyword lookup. Unknown keywords yield `None`.
    pub fn parse(keyword: &str) -> Option<Self> {
        match keyword.trim().to_ascii_lowercase().as_str() {
            "thisweek" => Some(Self::ThisWeek),
            "thismonth" => Some(Self::ThisMonth),
            "thisyear" => Some(Self::ThisYear),
            "upcoming" => Some(Self::Upcoming),
            "past" => Some(Self::Past),
            _ => None,
        }
    }

    /// `(inclusive lower, exclusive upper)` start-date bounds relative to
    /// `today`.
    pub fn bounds(
        &self, today: NaiveDate,
    ) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        let from = start_of_day(today);
        let ahead = |days: u64| {
            today.checked_add_days(Days::new(days)).map(start_of_day)
        };

        match self {
            Self::ThisWeek => (Some(from), ahead(7)),
            Self::ThisMonth => (Some(from), ahead(30)),
            Self::ThisYear => (Some(from), ahead(365)),
            Self::Upcoming => (Some(from), None),
            Self::Past => (None, Some(from)),
        }
    }
}

/// Midnight UTC at the start of `day`.
pub fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}
