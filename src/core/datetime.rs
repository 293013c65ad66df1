//! Natural language date resolution.
//!
//! Turns free-form due text like "tomorrow", "next friday" or "March 3rd"
//! into a calendar date relative to a caller-supplied moment. Text that
//! cannot be interpreted resolves to `None`; that is an ordinary outcome,
//! not an error.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::ResolveDate;

/// A calendar date rendered as `YYYY-MM-DD`.
///
/// This is the only representation of a resolved due date that is ever
/// persisted or printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalDate(NaiveDate);

impl CanonicalDate {
    /// Wrap a calendar date.
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The underlying calendar date.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for CanonicalDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for CanonicalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for CanonicalDate {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map(Self)
    }
}

impl Serialize for CanonicalDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CanonicalDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// "in 3 days", "in a week"
static RELATIVE_IN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^in (\d+|an?|one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve) (day|week|fortnight|month|year)s?$")
        .unwrap_or_else(|e| panic!("Invalid relative offset regex: {e}"))
});

// "3 days from now", "2 weeks ago"
static RELATIVE_FROM_NOW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+|an?|one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve) (day|week|fortnight|month|year)s? (from now|from today|later|ago)$")
        .unwrap_or_else(|e| panic!("Invalid relative offset regex: {e}"))
});

/// Resolves natural language date text against a reference moment.
///
/// Resolution is a pure function of the text and `now`; the resolver holds
/// no state between calls beyond its configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateResolver {
    prefer_future: bool,
}

impl Default for DateResolver {
    fn default() -> Self {
        Self::new(true)
    }
}

impl DateResolver {
    /// Create a resolver.
    ///
    /// With `prefer_future` set, a month/day without a year that has already
    /// passed this year is moved to next year.
    #[must_use]
    pub const fn new(prefer_future: bool) -> Self {
        Self { prefer_future }
    }

    /// Resolve `text` to a calendar date, relative to `now`.
    ///
    /// Supports patterns like:
    /// - `today`, `tomorrow`, `yesterday`
    /// - `monday`, `next friday`, `this sat`, `last tuesday`
    /// - `next week`, `next month`, `end of month`
    /// - `in 3 days`, `2 weeks from now`, `a month ago`
    /// - `dec 15`, `15th december`, `the 3rd of march 2027`
    /// - `2024-12-15`, `12/15`, `12/15/2024`, `15.12.2024`
    ///
    /// A trailing time of day (`3pm`, `at noon`) is accepted and dropped.
    ///
    /// Returns `None` if the text cannot be interpreted.
    #[must_use]
    pub fn resolve(&self, text: &str, now: NaiveDateTime) -> Option<CanonicalDate> {
        let today = now.date();
        let input = normalize_input(text);
        let input = strip_prefix_words(&input);

        let (date_part, time) = extract_time(input);
        let resolved = if date_part.is_empty() {
            time.map(|_| today)
        } else {
            self.parse_date(&date_part, today)
        };

        if resolved.is_none() {
            log::trace!("Date text '{text}' did not resolve");
        }
        resolved.map(CanonicalDate)
    }

    fn parse_date(&self, input: &str, today: NaiveDate) -> Option<NaiveDate> {
        match input {
            "today" | "now" | "tonight" => return Some(today),
            "tomorrow" | "tmrw" | "tmr" => return today.succ_opt(),
            "yesterday" => return today.pred_opt(),
            "day after tomorrow" => return today.checked_add_signed(Duration::days(2)),
            "day before yesterday" => return today.checked_sub_signed(Duration::days(2)),
            "next week" => {
                let ahead = days_ahead(today.weekday(), Weekday::Mon);
                let days = if ahead == 0 { 7 } else { ahead };
                return today.checked_add_signed(Duration::days(days));
            },
            "end of week" | "end of the week" => {
                let ahead = days_ahead(today.weekday(), Weekday::Sun);
                return today.checked_add_signed(Duration::days(ahead));
            },
            "next month" => {
                return today
                    .with_day(1)
                    .and_then(|first| first.checked_add_months(Months::new(1)));
            },
            "end of month" | "end of the month" => {
                return today
                    .with_day(1)
                    .and_then(|first| first.checked_add_months(Months::new(1)))
                    .and_then(|next| next.pred_opt());
            },
            "next year" => return NaiveDate::from_ymd_opt(today.year() + 1, 1, 1),
            _ => {},
        }

        parse_relative_offset(input, today)
            .or_else(|| parse_weekday(input, today))
            .or_else(|| self.parse_month_day(input, today))
            .or_else(|| self.parse_numeric_date(input, today))
    }

    /// Parse month and day in either order with an optional year, or a bare
    /// day of the month.
    fn parse_month_day(&self, input: &str, today: NaiveDate) -> Option<NaiveDate> {
        let words: Vec<&str> = input
            .split_whitespace()
            .filter(|w| !matches!(*w, "of" | "the"))
            .collect();

        match words.as_slice() {
            [day] => self.day_of_month(parse_day(day)?, today),
            [a, b] => {
                let (month, day) = month_and_day(a, b)?;
                self.without_year(month, day, today)
            },
            [a, b, year] => {
                let (month, day) = month_and_day(a, b)?;
                let year = parse_year(year)?;
                NaiveDate::from_ymd_opt(year, month, day)
            },
            _ => None,
        }
    }

    /// ISO (`2024-12-15`, `2024/12/15`), dotted (`15.12.2024`) and US
    /// (`12/15`, `12/15/2024`) numeric dates.
    fn parse_numeric_date(&self, input: &str, today: NaiveDate) -> Option<NaiveDate> {
        let year_first = input.split(['-', '/']).next().is_some_and(|y| y.len() == 4);
        if year_first {
            for format in ["%Y-%m-%d", "%Y/%m/%d"] {
                if let Ok(date) = NaiveDate::parse_from_str(input, format) {
                    return Some(date);
                }
            }
        }
        if let Ok(date) = NaiveDate::parse_from_str(input, "%d.%m.%Y") {
            return Some(date);
        }

        let parts: Vec<&str> = input.split('/').collect();
        match parts.as_slice() {
            [month, day] => {
                let month: u32 = month.parse().ok()?;
                let day: u32 = day.parse().ok()?;
                self.without_year(month, day, today)
            },
            [month, day, year] => {
                let month: u32 = month.parse().ok()?;
                let day: u32 = day.parse().ok()?;
                let year: i32 = year.parse().ok()?;

                // Handle 2-digit years
                let year = if year < 100 { 2000 + year } else { year };

                NaiveDate::from_ymd_opt(year, month, day)
            },
            _ => None,
        }
    }

    /// Place a month/day in the first year from now where it exists.
    ///
    /// With `prefer_future`, a date that has passed moves on to a later year,
    /// so Feb 29 lands on the next leap year.
    fn without_year(&self, month: u32, day: u32, today: NaiveDate) -> Option<NaiveDate> {
        (0..=8)
            .filter_map(|offset| NaiveDate::from_ymd_opt(today.year() + offset, month, day))
            .find(|date| !self.prefer_future || *date >= today)
    }

    /// Place a bare day of the month in the first month from now that has it.
    ///
    /// With `prefer_future`, a day that has passed moves on to a later month.
    fn day_of_month(&self, day: u32, today: NaiveDate) -> Option<NaiveDate> {
        let first = today.with_day(1)?;
        (0..12)
            .filter_map(|offset| first.checked_add_months(Months::new(offset)))
            .filter_map(|month| month.with_day(day))
            .find(|date| !self.prefer_future || *date >= today)
    }
}

impl ResolveDate for DateResolver {
    fn resolve(&self, text: &str, now: NaiveDateTime) -> Option<CanonicalDate> {
        // Inherent method
        Self::resolve(self, text, now)
    }
}

/// Resolve date text with the default resolver.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use marktask::core::resolve_date;
///
/// let now = NaiveDate::from_ymd_opt(2024, 1, 15)
///     .and_then(|d| d.and_hms_opt(9, 0, 0))
///     .unwrap();
///
/// assert_eq!(resolve_date("tomorrow", now).unwrap().to_string(), "2024-01-16");
/// assert!(resolve_date("asdkjasd", now).is_none());
/// ```
#[must_use]
pub fn resolve_date(text: &str, now: NaiveDateTime) -> Option<CanonicalDate> {
    DateResolver::default().resolve(text, now)
}

/// Lowercase, drop commas and a trailing period, collapse whitespace.
fn normalize_input(text: &str) -> String {
    text.to_lowercase()
        .replace(',', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end_matches('.')
        .to_string()
}

fn strip_prefix_words(input: &str) -> &str {
    ["by ", "on ", "due "]
        .iter()
        .find_map(|prefix| input.strip_prefix(prefix))
        .unwrap_or(input)
}

/// Parse "in X days" and "X days from now / ago".
fn parse_relative_offset(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    if let Some(caps) = RELATIVE_IN.captures(input) {
        let amount = parse_amount(caps.get(1)?.as_str())?;
        return offset(today, amount, caps.get(2)?.as_str(), false);
    }

    if let Some(caps) = RELATIVE_FROM_NOW.captures(input) {
        let amount = parse_amount(caps.get(1)?.as_str())?;
        let backwards = caps.get(3)?.as_str() == "ago";
        return offset(today, amount, caps.get(2)?.as_str(), backwards);
    }

    None
}

fn parse_amount(input: &str) -> Option<u32> {
    match input {
        "a" | "an" | "one" => Some(1),
        "two" => Some(2),
        "three" => Some(3),
        "four" => Some(4),
        "five" => Some(5),
        "six" => Some(6),
        "seven" => Some(7),
        "eight" => Some(8),
        "nine" => Some(9),
        "ten" => Some(10),
        "eleven" => Some(11),
        "twelve" => Some(12),
        digits => digits.parse().ok(),
    }
}

fn offset(today: NaiveDate, amount: u32, unit: &str, backwards: bool) -> Option<NaiveDate> {
    let days = match unit {
        "day" => i64::from(amount),
        "week" => i64::from(amount) * 7,
        "fortnight" => i64::from(amount) * 14,
        "month" | "year" => {
            let months = if unit == "year" {
                amount.checked_mul(12)?
            } else {
                amount
            };
            return if backwards {
                today.checked_sub_months(Months::new(months))
            } else {
                today.checked_add_months(Months::new(months))
            };
        },
        _ => return None,
    };

    let delta = Duration::try_days(days)?;
    if backwards {
        today.checked_sub_signed(delta)
    } else {
        today.checked_add_signed(delta)
    }
}

/// Days from `from` forward to the next `to` (0 when they are the same day).
fn days_ahead(from: Weekday, to: Weekday) -> i64 {
    (i64::from(to.num_days_from_sunday()) - i64::from(from.num_days_from_sunday()) + 7) % 7
}

/// Parse weekday names with an optional `next`/`this`/`last` modifier.
fn parse_weekday(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let (modifier, day_str) = match input.split_once(' ') {
        Some((m @ ("next" | "this" | "last" | "coming"), rest)) => (Some(m), rest),
        _ => (None, input),
    };

    let target = parse_weekday_name(day_str)?;
    let ahead = days_ahead(today.weekday(), target);

    let days = match modifier {
        Some("this") => ahead,
        Some("next") => ahead + 7,
        Some("last") => -(if ahead == 0 { 7 } else { 7 - ahead }),
        // Bare weekday: the next occurrence, never today
        _ => {
            if ahead == 0 {
                7
            } else {
                ahead
            }
        },
    };

    today.checked_add_signed(Duration::days(days))
}

fn parse_weekday_name(input: &str) -> Option<Weekday> {
    match input {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" | "tues" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" | "thur" | "thurs" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Accept `<month> <day>` or `<day> <month>`.
fn month_and_day(a: &str, b: &str) -> Option<(u32, u32)> {
    parse_month_name(a).map_or_else(
        || Some((parse_month_name(b)?, parse_day(a)?)),
        |month| Some((month, parse_day(b)?)),
    )
}

/// Parse month name to number.
fn parse_month_name(input: &str) -> Option<u32> {
    match input.trim_end_matches('.') {
        "jan" | "january" => Some(1),
        "feb" | "february" => Some(2),
        "mar" | "march" => Some(3),
        "apr" | "april" => Some(4),
        "may" => Some(5),
        "jun" | "june" => Some(6),
        "jul" | "july" => Some(7),
        "aug" | "august" => Some(8),
        "sep" | "sept" | "september" => Some(9),
        "oct" | "october" => Some(10),
        "nov" | "november" => Some(11),
        "dec" | "december" => Some(12),
        _ => None,
    }
}

/// Day of month, with an optional ordinal suffix ("3rd").
fn parse_day(input: &str) -> Option<u32> {
    let digits = ["st", "nd", "rd", "th"]
        .iter()
        .find_map(|suffix| input.strip_suffix(suffix))
        .unwrap_or(input);
    let day: u32 = digits.parse().ok()?;
    (1..=31).contains(&day).then_some(day)
}

fn parse_year(input: &str) -> Option<i32> {
    if input.len() != 4 {
        return None;
    }
    input.parse().ok()
}

/// Split a trailing time of day off the input.
///
/// Returns the remaining date text and the parsed time.
fn extract_time(input: &str) -> (String, Option<NaiveTime>) {
    let mut words: Vec<&str> = input.split_whitespace().collect();
    let mut time = None;

    if let Some(last) = words.last().copied() {
        if let Some(parsed) = parse_time(last) {
            time = Some(parsed);
            words.pop();
        } else if matches!(last, "am" | "pm") && words.len() >= 2 {
            // "3 pm"
            let joined = format!("{}{last}", words[words.len() - 2]);
            if let Some(parsed) = parse_time(&joined) {
                time = Some(parsed);
                words.truncate(words.len() - 2);
            }
        }
    }

    if time.is_some() && matches!(words.last(), Some(&("at" | "@"))) {
        words.pop();
    }

    (words.join(" "), time)
}

/// Parse a time string.
fn parse_time(input: &str) -> Option<NaiveTime> {
    match input {
        "morning" => return NaiveTime::from_hms_opt(9, 0, 0),
        "noon" | "midday" => return NaiveTime::from_hms_opt(12, 0, 0),
        "afternoon" => return NaiveTime::from_hms_opt(14, 0, 0),
        "evening" => return NaiveTime::from_hms_opt(18, 0, 0),
        "night" | "midnight" => return NaiveTime::from_hms_opt(21, 0, 0),
        _ => {},
    }

    // 24-hour format (15:00, 15:30)
    if let Ok(time) = NaiveTime::parse_from_str(input, "%H:%M") {
        return Some(time);
    }

    // 12-hour format (3pm, 3:30pm)
    let (time_str, is_pm) = if let Some(stripped) = input.strip_suffix("pm") {
        (stripped, true)
    } else if let Some(stripped) = input.strip_suffix("am") {
        (stripped, false)
    } else {
        return None;
    };

    let (hour, minute) = match time_str.split_once(':') {
        Some((h, m)) => (h.parse::<u32>().ok()?, m.parse::<u32>().ok()?),
        None => (time_str.parse::<u32>().ok()?, 0),
    };
    if !(1..=12).contains(&hour) {
        return None;
    }

    let hour = match (hour, is_pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, true) => h + 12,
        (h, false) => h,
    };

    NaiveTime::from_hms_opt(hour, minute, 0)
}
