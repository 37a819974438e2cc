//! Calendar arithmetic for the start / end / work-days triangle.
//!
//! Every function here is total: malformed text degrades to a documented
//! fallback (today's date, a one-day span, or [`NOT_AVAILABLE`]) instead of
//! returning an error. Day counts are inclusive, so a one-day item starts and
//! ends on the same date.

use crate::item::WorkItem;
use chrono::{DateTime, Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Canonical storage format.
pub const ISO_FORMAT: &str = "%Y-%m-%d";
/// Human display format, e.g. `Jan 5, 2025`.
pub const DISPLAY_FORMAT: &str = "%b %-d, %Y";
/// Shown in place of a date that cannot be parsed.
pub const NOT_AVAILABLE: &str = "N/A";

/// Visible-window padding around observed dates.
pub const PAD_BEFORE_DAYS: u64 = 30;
pub const PAD_AFTER_DAYS: u64 = 60;
/// Window used when there are no dates at all, centred on today.
pub const EMPTY_BEFORE_DAYS: u64 = 30;
pub const EMPTY_AFTER_DAYS: u64 = 90;

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse an ISO date (`2025-01-31`) or an RFC 3339 timestamp.
pub fn parse(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, ISO_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(input).ok().map(|d| d.date_naive()))
}

pub fn iso(date: NaiveDate) -> String {
    date.format(ISO_FORMAT).to_string()
}

pub fn display(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Human display string for `input`, or [`NOT_AVAILABLE`].
pub fn format(input: &str) -> String {
    parse(input).map_or_else(|| NOT_AVAILABLE.to_string(), display)
}

// ---------------------------------------------------------------------------
// Typed triangle
// ---------------------------------------------------------------------------

fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX)
}

fn sub_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN)
}

/// `start + (work_days - 1)`; zero work days behaves like one.
pub fn end_from(start: NaiveDate, work_days: u32) -> NaiveDate {
    add_days(start, u64::from(work_days.saturating_sub(1)))
}

/// `end - (work_days - 1)`; the inverse of [`end_from`].
pub fn start_from(end: NaiveDate, work_days: u32) -> NaiveDate {
    sub_days(end, u64::from(work_days.saturating_sub(1)))
}

/// Inclusive day count between two dates, never below 1.
pub fn work_days_in(start: NaiveDate, end: NaiveDate) -> u32 {
    let span = (end - start).num_days() + 1;
    u32::try_from(span.max(1)).unwrap_or(u32::MAX)
}

pub fn next_day(date: NaiveDate) -> NaiveDate {
    add_days(date, 1)
}

// ---------------------------------------------------------------------------
// Text triangle
// ---------------------------------------------------------------------------

fn span_from_count(work_days: i64) -> u32 {
    u32::try_from(work_days.max(1)).unwrap_or(u32::MAX)
}

/// ISO end date for an ISO start; falls back to today when `start` is unparseable.
pub fn end_from_start(start: &str, work_days: i64) -> String {
    match parse(start) {
        Some(start) => iso(end_from(start, span_from_count(work_days))),
        None => iso(today()),
    }
}

/// ISO start date for an ISO end; falls back to today when `end` is unparseable.
pub fn start_from_end(end: &str, work_days: i64) -> String {
    match parse(end) {
        Some(end) => iso(start_from(end, span_from_count(work_days))),
        None => iso(today()),
    }
}

/// Inclusive day count between two ISO dates; 1 if either side is unparseable.
pub fn work_days_between(start: &str, end: &str) -> u32 {
    match (parse(start), parse(end)) {
        (Some(start), Some(end)) => work_days_in(start, end),
        _ => 1,
    }
}

// ---------------------------------------------------------------------------
// Visible window
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn days(&self) -> u32 {
        work_days_in(self.start, self.end)
    }
}

/// Window a timeline should show for `items`.
pub fn date_range(items: &[WorkItem]) -> DateRange {
    date_range_on(items, today())
}

/// [`date_range`] with an explicit "today" for the empty-plan fallback.
pub fn date_range_on(items: &[WorkItem], today: NaiveDate) -> DateRange {
    let observed = items.iter().flat_map(|item| [item.start, item.end]);
    let bounds = observed.fold(None, |acc: Option<(NaiveDate, NaiveDate)>, d| match acc {
        None => Some((d, d)),
        Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
    });

    match bounds {
        Some((lo, hi)) => DateRange {
            start: sub_days(lo, PAD_BEFORE_DAYS),
            end: add_days(hi, PAD_AFTER_DAYS),
        },
        None => DateRange {
            start: sub_days(today, EMPTY_BEFORE_DAYS),
            end: add_days(today, EMPTY_AFTER_DAYS),
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
