use chrono::{Local, NaiveDate, NaiveDateTime};

pub type AppInstant = std::time::Instant;

pub struct TimeUtils;

impl TimeUtils {
    pub const STANDARD_DATE_FORMAT: &str = "%Y-%m-%d";

    /// Today's calendar date in local time.
    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Wall-clock stamp recorded on every analysis result.
    pub fn now_local() -> NaiveDateTime {
        Local::now().naive_local()
    }

    pub fn format_date(date: NaiveDate) -> String {
        date.format(Self::STANDARD_DATE_FORMAT).to_string()
    }

    pub fn parse_date(text: &str) -> chrono::ParseResult<NaiveDate> {
        NaiveDate::parse_from_str(text, Self::STANDARD_DATE_FORMAT)
    }
}

pub fn format_duration(ms: i64) -> String {
    let secs = ms / 1000;
    if secs < 60 {
        return format!("{}.{:03}s", secs, ms % 1000);
    }
    let mins = secs / 60;
    if mins < 60 {
        return format!("{}m {}s", mins, secs % 60);
    }
    let hours = mins / 60;
    format!("{}h {}m", hours, mins % 60)
}
