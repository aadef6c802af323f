//! Reminder time phrases
//!
//! Relative phrases ("5 minutes", "in 2 hours") are added to the current time.
//! Absolute phrases ("at 5pm", "tomorrow at 9am", "14:30", "dec 25 at 3pm",
//! "2025-07-04 18:00") are read as wall-clock times in the bot timezone.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.3.0
//!
//! ## Changelog
//! - 1.1.0: Month-name and ISO dates, trailing "today"/"tomorrow"
//! - 1.0.0: Relative units and clock times

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;
use log::debug;
use regex::Regex;
use std::sync::OnceLock;

fn relative_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:in\s+)?(\d+)\s*([a-z]+)$").expect("relative time regex is valid")
    })
}

fn clock_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{1,2})(?::(\d{2}))?\s*(am|pm|a\.m\.?|p\.m\.?)?$")
            .expect("clock regex is valid")
    })
}

fn iso_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})(?:\s+|$)").expect("iso date regex is valid")
    })
}

fn month_day_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(jan|january|feb|february|mar|march|apr|april|may|jun|june|jul|july|aug|august|sep|sept|september|oct|october|nov|november|dec|december)\.?\s+(\d{1,2})(?:st|nd|rd|th)?(?:,?\s+(\d{4}))?,?(?:\s+|$)",
        )
        .expect("month day regex is valid")
    })
}

/// Seconds per unit word, or `None` for an unknown unit
fn unit_seconds(unit: &str) -> Option<i64> {
    match unit {
        "s" | "sec" | "secs" | "second" | "seconds" => Some(1),
        "m" | "min" | "mins" | "minute" | "minutes" => Some(60),
        "h" | "hr" | "hrs" | "hour" | "hours" => Some(3_600),
        "d" | "day" | "days" => Some(86_400),
        "w" | "week" | "weeks" => Some(604_800),
        _ => None,
    }
}

fn month_number(name: &str) -> Option<u32> {
    let month = match &name[..name.len().min(3)] {
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

fn normalize(input: &str) -> String {
    input
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end_matches(['.', ',', '!', '?'])
        .to_string()
}

/// Parse a time phrase relative to `now`
pub fn parse_time(input: &str, now: DateTime<Tz>) -> Option<DateTime<Tz>> {
    let text = normalize(input);
    if text.is_empty() {
        return None;
    }

    if let Some(time) = parse_relative(&text, now) {
        debug!("Parsed '{input}' as relative time: {time}");
        return Some(time);
    }
    if let Some(time) = parse_absolute(&text, now) {
        debug!("Parsed '{input}' as absolute time: {time}");
        return Some(time);
    }

    debug!("Failed to parse time: '{input}'");
    None
}

fn parse_relative(text: &str, now: DateTime<Tz>) -> Option<DateTime<Tz>> {
    let caps = relative_re().captures(text)?;
    let amount: i64 = caps[1].parse().ok()?;
    let seconds = amount.checked_mul(unit_seconds(&caps[2])?)?;
    now.checked_add_signed(Duration::try_seconds(seconds)?)
}

/// Day named by the phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DayPart {
    /// "today" / "tomorrow": needs a clock time to mean anything
    Keyword(NaiveDate),
    /// A calendar date; midnight when no clock time follows
    Calendar(NaiveDate),
}

fn strip_word<'a>(text: &'a str, word: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(word)?;
    if rest.is_empty() {
        Some(rest)
    } else {
        rest.strip_prefix(' ')
    }
}

fn strip_trailing_word<'a>(text: &'a str, word: &str) -> Option<&'a str> {
    text.strip_suffix(word)?.strip_suffix(' ')
}

fn parse_day_keyword(text: &str, today: NaiveDate) -> Option<(NaiveDate, &str)> {
    if let Some(rest) = strip_word(text, "tomorrow") {
        return Some((today.succ_opt()?, rest));
    }
    if let Some(rest) = strip_word(text, "today").or_else(|| strip_word(text, "tonight")) {
        return Some((today, rest));
    }
    None
}

fn parse_calendar_date(text: &str, today: NaiveDate) -> Option<(NaiveDate, &str)> {
    if let Some(caps) = iso_date_re().captures(text) {
        let date = NaiveDate::from_ymd_opt(
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
            caps[3].parse().ok()?,
        )?;
        return Some((date, &text[caps[0].len()..]));
    }

    if let Some(caps) = month_day_re().captures(text) {
        let month = month_number(&caps[1])?;
        let day: u32 = caps[2].parse().ok()?;
        let date = match caps.get(3) {
            Some(year) => NaiveDate::from_ymd_opt(year.as_str().parse().ok()?, month, day)?,
            None => {
                // A month and day already behind us this year means next year
                let this_year = NaiveDate::from_ymd_opt(today.year(), month, day)?;
                if this_year < today {
                    NaiveDate::from_ymd_opt(today.year() + 1, month, day)?
                } else {
                    this_year
                }
            }
        };
        return Some((date, &text[caps[0].len()..]));
    }

    None
}

/// Parse a clock time. A bare hour ("5") is only accepted after "at".
fn parse_clock(text: &str, after_at: bool) -> Option<NaiveTime> {
    match text {
        "noon" => return NaiveTime::from_hms_opt(12, 0, 0),
        "midnight" => return NaiveTime::from_hms_opt(0, 0, 0),
        _ => {}
    }

    let caps = clock_re().captures(text)?;
    let mut hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    let meridiem = caps.get(3).map(|m| m.as_str().replace('.', ""));

    if caps.get(2).is_none() && meridiem.is_none() && !after_at {
        return None;
    }

    if let Some(meridiem) = meridiem {
        if !(1..=12).contains(&hour) {
            return None;
        }
        hour = match (meridiem.as_str(), hour) {
            ("am", 12) => 0,
            ("pm", 12) => 12,
            ("pm", h) => h + 12,
            (_, h) => h,
        };
    }

    NaiveTime::from_hms_opt(hour, minute, 0)
}

fn parse_absolute(text: &str, now: DateTime<Tz>) -> Option<DateTime<Tz>> {
    let today = now.date_naive();
    let mut rest = text;
    let mut day: Option<DayPart> = None;

    // "5pm tomorrow"
    if let Some(stripped) = strip_trailing_word(rest, "tomorrow") {
        day = Some(DayPart::Keyword(today.succ_opt()?));
        rest = stripped;
    } else if let Some(stripped) =
        strip_trailing_word(rest, "today").or_else(|| strip_trailing_word(rest, "tonight"))
    {
        day = Some(DayPart::Keyword(today));
        rest = stripped;
    }

    if day.is_none() {
        if let Some((date, stripped)) = parse_day_keyword(rest, today) {
            day = Some(DayPart::Keyword(date));
            rest = stripped;
        } else if let Some((date, stripped)) = parse_calendar_date(rest, today) {
            day = Some(DayPart::Calendar(date));
            rest = stripped;
        }
    }

    let rest = rest.trim();
    let (rest, after_at) = match strip_word(rest, "at").or_else(|| strip_word(rest, "@")) {
        Some(stripped) => (stripped.trim(), true),
        None => (rest, false),
    };

    let clock = if rest.is_empty() {
        None
    } else {
        Some(parse_clock(rest, after_at)?)
    };

    let naive = match (day, clock) {
        (None, Some(time)) => {
            let candidate = localize(now.timezone(), today.and_time(time))?;
            if candidate < now {
                return localize(now.timezone(), today.succ_opt()?.and_time(time));
            }
            return Some(candidate);
        }
        (Some(DayPart::Keyword(date)), Some(time)) | (Some(DayPart::Calendar(date)), Some(time)) => {
            date.and_time(time)
        }
        (Some(DayPart::Calendar(date)), None) => date.and_hms_opt(0, 0, 0)?,
        (Some(DayPart::Keyword(_)), None) | (None, None) => return None,
    };

    localize(now.timezone(), naive)
}

/// Attach the timezone; times skipped by a DST jump move forward an hour
fn localize(tz: Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
}

/// "jan 2, 2026 at 8am" is the longest phrase we read
const MAX_TIME_WORDS: usize = 5;

fn is_meridiem(word: &str) -> bool {
    matches!(word.to_lowercase().as_str(), "am" | "pm" | "a.m." | "p.m.")
}

/// Split command words into a due time and the reminder text.
///
/// The longest run of up to five leading words that reads as a time wins,
/// so "dec 25 at 3pm" is not cut short at midnight on "dec 25". Whatever
/// follows is the message. A detached "am"/"pm" stays with its number.
pub fn split_time_and_message(words: &[&str], now: DateTime<Tz>) -> Option<(DateTime<Tz>, String)> {
    let mut merged: Vec<String> = Vec::with_capacity(words.len());
    for word in words {
        match merged.last_mut() {
            Some(prev) if is_meridiem(word) && prev.chars().any(|c| c.is_ascii_digit()) => {
                prev.push(' ');
                prev.push_str(word);
            }
            _ => merged.push(word.to_string()),
        }
    }

    let (take, time) = (1..=merged.len().min(MAX_TIME_WORDS))
        .rev()
        .find_map(|take| parse_time(&merged[..take].join(" "), now).map(|time| (take, time)))?;
    Some((time, merged[take..].join(" ")))
}
