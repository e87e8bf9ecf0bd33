//! Best-effort extraction of a calendar date from free text such as the
//! contents of an infobox row ("(1879-03-14) 14 March 1879 Ulm, Germany").

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

const MONTHS: &str = "january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sep|sept|oct|nov|dec";

struct DatePatterns {
    iso: Regex,
    day_month_year: Regex,
    month_day_year: Regex,
    month_year: Regex,
}

fn patterns() -> &'static DatePatterns {
    static PATTERNS: OnceLock<DatePatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| DatePatterns {
        iso: Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b").expect("static regex"),
        day_month_year: Regex::new(&format!(r"(?i)\b(\d{{1,2}})\s+({MONTHS})\.?\s+(\d{{3,4}})\b"))
            .expect("static regex"),
        month_day_year: Regex::new(&format!(
            r"(?i)\b({MONTHS})\.?\s+(\d{{1,2}}),?\s+(\d{{3,4}})\b"
        ))
        .expect("static regex"),
        month_year: Regex::new(&format!(r"(?i)\b({MONTHS})\.?\s+(\d{{3,4}})\b"))
            .expect("static regex"),
    })
}

fn month_number(name: &str) -> Option<u32> {
    let month = match name.to_ascii_lowercase().get(..3)? {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn ymd(year: &str, month: u32, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, day.parse().ok()?)
}

/// Parses the first recognisable date in `text`.
///
/// Tried in order: ISO `YYYY-MM-DD`, `14 March 1879`, `March 14, 1879` and
/// `March 1879` (which resolves to the first of the month).
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let p = patterns();

    if let Some(caps) = p.iso.captures(text) {
        let month = caps[2].parse().ok()?;
        if let Some(date) = ymd(&caps[1], month, &caps[3]) {
            return Some(date);
        }
    }

    if let Some(caps) = p.day_month_year.captures(text) {
        return ymd(&caps[3], month_number(&caps[2])?, &caps[1]);
    }

    if let Some(caps) = p.month_day_year.captures(text) {
        return ymd(&caps[3], month_number(&caps[1])?, &caps[2]);
    }

    if let Some(caps) = p.month_year.captures(text) {
        return ymd(&caps[2], month_number(&caps[1])?, "1");
    }

    None
}
