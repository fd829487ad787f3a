//! Core trip schedule models and calculator
//!
//! This module contains the data types describing a trip request and the
//! day-by-day schedule produced for it: travel days, stay days, and the
//! turnaround days appended after the trip.

pub mod calculator;
pub mod lookup;

pub use calculator::{compute_schedule, round_half_up, turnaround_percent, DEFAULT_MAX_TRIP_DAYS};
pub use lookup::{DayNameLookup, LookupError, MAX_LOOKUP_DAYS};

use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Three-letter weekday abbreviation as shown in the schedule table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DayName {
    Sun,
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
}

impl DayName {
    /// Returns the weekday of a calendar date
    pub fn of(date: NaiveDate) -> Self {
        date.weekday().into()
    }

    /// Returns the three-letter abbreviation ("Sun" through "Sat")
    pub fn abbrev(&self) -> &'static str {
        match self {
            DayName::Sun => "Sun",
            DayName::Mon => "Mon",
            DayName::Tue => "Tue",
            DayName::Wed => "Wed",
            DayName::Thu => "Thu",
            DayName::Fri => "Fri",
            DayName::Sat => "Sat",
        }
    }

    /// Saturday and Sunday count as weekend days
    pub fn is_weekend(&self) -> bool {
        matches!(self, DayName::Sat | DayName::Sun)
    }

    /// Parses a weekday name.
    ///
    /// Matching is case-insensitive and accepts both the abbreviation
    /// ("sat") and the full name ("saturday").
    ///
    /// Returns `None` if the input doesn't name a weekday.
    pub fn parse(s: &str) -> Option<DayName> {
        match s.trim().to_lowercase().as_str() {
            "sun" | "sunday" => Some(DayName::Sun),
            "mon" | "monday" => Some(DayName::Mon),
            "tue" | "tuesday" => Some(DayName::Tue),
            "wed" | "wednesday" => Some(DayName::Wed),
            "thu" | "thursday" => Some(DayName::Thu),
            "fri" | "friday" => Some(DayName::Fri),
            "sat" | "saturday" => Some(DayName::Sat),
            _ => None,
        }
    }
}

impl From<Weekday> for DayName {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sun => DayName::Sun,
            Weekday::Mon => DayName::Mon,
            Weekday::Tue => DayName::Tue,
            Weekday::Wed => DayName::Wed,
            Weekday::Thu => DayName::Thu,
            Weekday::Fri => DayName::Fri,
            Weekday::Sat => DayName::Sat,
        }
    }
}

impl fmt::Display for DayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbrev())
    }
}

/// Classification of a single schedule day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayCode {
    /// First or last day of the trip, spent in transit
    #[serde(rename = "T")]
    Travel,
    /// Interior day of the trip
    #[serde(rename = "S")]
    Stay,
    /// Recovery day appended after the trip
    #[serde(rename = "O")]
    Turnaround,
}

impl DayCode {
    /// Single-letter code used in the schedule table
    pub fn letter(&self) -> &'static str {
        match self {
            DayCode::Travel => "T",
            DayCode::Stay => "S",
            DayCode::Turnaround => "O",
        }
    }

    /// Full name shown in schedule legends
    pub fn label(&self) -> &'static str {
        match self {
            DayCode::Travel => "Travel",
            DayCode::Stay => "Stay",
            DayCode::Turnaround => "Turnaround",
        }
    }
}

impl fmt::Display for DayCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

/// One row of the schedule table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Calendar date, serialized as "YYYY-MM-DD"
    pub date: NaiveDate,
    /// Weekday abbreviation for the date
    pub day_of_week: DayName,
    /// Travel, stay, or turnaround
    pub code: DayCode,
}

/// Derived statistics for a computed schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    /// Number of days in the trip segment, both endpoints included
    pub day_count: u32,
    /// Saturdays and Sundays within the trip segment
    pub weekend_count: u32,
    /// Number of turnaround days appended after the trip
    pub turnaround_days_rounded: u32,
    /// Turnaround rate for the trip length tier (0.25, 0.28 or 0.3333)
    pub turnaround_percent: f64,
    /// `day_count * turnaround_percent`
    pub turnaround_days_initial: f64,
    /// Extra turnaround time contributed by weekend days
    pub weekend_contribution: f64,
    /// `turnaround_days_initial + weekend_contribution`, before rounding
    pub turnaround_days_exact: f64,
    /// Display-only bonus rate: 25 when the trip has weekend days, else 0
    pub weekend_bonus_rate: u32,
    /// Share of the exact turnaround days due to weekends, in percent (2 decimals)
    pub weekend_bonus_contribution_percent: f64,
}

/// A computed schedule: the trip segment followed by the turnaround block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub entries: Vec<ScheduleEntry>,
    pub summary: ScheduleSummary,
}

impl ScheduleResult {
    /// Rows coded `T` or `S`
    pub fn trip_days(&self) -> &[ScheduleEntry] {
        let split = (self.summary.day_count as usize).min(self.entries.len());
        &self.entries[..split]
    }

    /// Rows coded `O`
    pub fn turnaround_days(&self) -> &[ScheduleEntry] {
        let split = (self.summary.day_count as usize).min(self.entries.len());
        &self.entries[split..]
    }
}

/// Validation failures reported before any computation happens
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// One or both dates were not supplied
    #[error("Please enter both Start Date and End Date.")]
    MissingInput,

    /// A supplied date string is not a valid ISO calendar date
    #[error("Invalid date '{0}'. Expected format: YYYY-MM-DD")]
    InvalidDate(String),

    /// The start date falls after the end date
    #[error("Start Date cannot be after End Date.")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// The trip spans more days than the configured maximum
    #[error("Trip of {days} days exceeds the maximum of {max} days")]
    TripTooLong { days: i64, max: i64 },

    /// The trip or its turnaround days run past the last representable date
    #[error("Schedule after {end} runs past the supported calendar range")]
    OutOfCalendarRange { end: NaiveDate },
}

/// Input to the schedule calculator
///
/// Dates are optional so that missing form input surfaces as
/// [`ScheduleError::MissingInput`] rather than being rejected earlier.
#[derive(Debug, Clone)]
pub struct TripRequest<'a> {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Optional weekday table consulted ahead of the calendar
    pub day_name_lookup: Option<&'a DayNameLookup>,
    /// Upper bound on the trip segment length
    pub max_trip_days: i64,
}

impl<'a> TripRequest<'a> {
    pub fn new(start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> Self {
        Self {
            start_date,
            end_date,
            day_name_lookup: None,
            max_trip_days: DEFAULT_MAX_TRIP_DAYS,
        }
    }

    /// Builds a request from "YYYY-MM-DD" strings.
    ///
    /// Absent or blank strings are treated as missing input, which is
    /// reported before any parse failure.
    pub fn from_iso(start: Option<&str>, end: Option<&str>) -> Result<Self, ScheduleError> {
        let start = start.map(str::trim).filter(|s| !s.is_empty());
        let end = end.map(str::trim).filter(|s| !s.is_empty());

        match (start, end) {
            (Some(start), Some(end)) => Ok(Self::new(
                Some(parse_iso_date(start)?),
                Some(parse_iso_date(end)?),
            )),
            _ => Err(ScheduleError::MissingInput),
        }
    }

    pub fn with_lookup(mut self, lookup: &'a DayNameLookup) -> Self {
        self.day_name_lookup = Some(lookup);
        self
    }

    pub fn with_max_trip_days(mut self, max_trip_days: i64) -> Self {
        self.max_trip_days = max_trip_days;
        self
    }

    /// Runs the calculator for this request
    pub fn compute(&self) -> Result<ScheduleResult, ScheduleError> {
        compute_schedule(self)
    }
}

/// Parses a "YYYY-MM-DD" calendar date
pub fn parse_iso_date(s: &str) -> Result<NaiveDate, ScheduleError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| ScheduleError::InvalidDate(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_name_of_known_dates() {
        assert_eq!(DayName::of(date(2025, 6, 1)), DayName::Sun);
        assert_eq!(DayName::of(date(2025, 6, 2)), DayName::Mon);
        assert_eq!(DayName::of(date(2025, 6, 7)), DayName::Sat);
        assert_eq!(DayName::of(date(2024, 2, 29)), DayName::Thu);
    }

    #[test]
    fn test_day_name_weekend() {
        assert!(DayName::Sat.is_weekend());
        assert!(DayName::Sun.is_weekend());
        assert!(!DayName::Mon.is_weekend());
        assert!(!DayName::Fri.is_weekend());
    }

    #[test]
    fn test_day_name_parse_aliases() {
        assert_eq!(DayName::parse("Sat"), Some(DayName::Sat));
        assert_eq!(DayName::parse("sat"), Some(DayName::Sat));
        assert_eq!(DayName::parse("Saturday"), Some(DayName::Sat));
        assert_eq!(DayName::parse(" tue "), Some(DayName::Tue));
        assert_eq!(DayName::parse("Caturday"), None);
    }

    #[test]
    fn test_day_name_serializes_as_abbreviation() {
        let json = serde_json::to_string(&DayName::Wed).unwrap();
        assert_eq!(json, "\"Wed\"");
    }

    #[test]
    fn test_day_code_serializes_as_letter() {
        assert_eq!(serde_json::to_string(&DayCode::Travel).unwrap(), "\"T\"");
        assert_eq!(serde_json::to_string(&DayCode::Stay).unwrap(), "\"S\"");
        assert_eq!(serde_json::to_string(&DayCode::Turnaround).unwrap(), "\"O\"");
    }

    #[test]
    fn test_schedule_entry_json_shape() {
        let entry = ScheduleEntry {
            date: date(2025, 6, 9),
            day_of_week: DayName::Mon,
            code: DayCode::Turnaround,
        };

        let json = serde_json::to_string(&entry).unwrap();

        assert_eq!(
            json,
            r#"{"date":"2025-06-09","day_of_week":"Mon","code":"O"}"#
        );
    }

    #[test]
    fn test_from_iso_parses_dates() {
        let request = TripRequest::from_iso(Some("2025-06-02"), Some("2025-06-08")).unwrap();
        assert_eq!(request.start_date, Some(date(2025, 6, 2)));
        assert_eq!(request.end_date, Some(date(2025, 6, 8)));
        assert_eq!(request.max_trip_days, DEFAULT_MAX_TRIP_DAYS);
        assert!(request.day_name_lookup.is_none());
    }

    #[test]
    fn test_from_iso_missing_input() {
        assert_eq!(
            TripRequest::from_iso(None, Some("2025-06-08")).unwrap_err(),
            ScheduleError::MissingInput
        );
        assert_eq!(
            TripRequest::from_iso(Some("2025-06-02"), Some("  ")).unwrap_err(),
            ScheduleError::MissingInput
        );
    }

    #[test]
    fn test_missing_input_reported_before_parse_errors() {
        let err = TripRequest::from_iso(Some("not-a-date"), None).unwrap_err();
        assert_eq!(err, ScheduleError::MissingInput);
    }

    #[test]
    fn test_from_iso_invalid_date() {
        let err = TripRequest::from_iso(Some("2025-02-30"), Some("2025-03-01")).unwrap_err();
        assert_eq!(err, ScheduleError::InvalidDate("2025-02-30".to_string()));
        assert!(err.to_string().contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ScheduleError::MissingInput.to_string(),
            "Please enter both Start Date and End Date."
        );
        let err = ScheduleError::InvalidRange {
            start: date(2025, 6, 8),
            end: date(2025, 6, 2),
        };
        assert_eq!(err.to_string(), "Start Date cannot be after End Date.");
    }
}
