//! Precomputed weekday table keyed by ISO date
//!
//! The table is a JSON object such as `{"2025-06-01": "Sun", ...}`. It is
//! consulted ahead of the calendar, but the calendar stays authoritative:
//! an entry that names the wrong weekday is reported and ignored.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{Days, NaiveDate};
use thiserror::Error;

use super::DayName;

/// Longest range `generate` will build, a little over a century
pub const MAX_LOOKUP_DAYS: i64 = 36_600;

/// Errors that can occur when loading or building a weekday table
#[derive(Debug, Error)]
pub enum LookupError {
    /// Reading the table file failed
    #[error("Failed to read lookup file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a JSON object of strings
    #[error("Failed to parse lookup JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A key is not a "YYYY-MM-DD" date
    #[error("Invalid date key in lookup: '{0}'")]
    InvalidKey(String),

    /// A value is not a weekday name
    #[error("Invalid weekday '{value}' for {date} in lookup")]
    InvalidDayName { date: NaiveDate, value: String },

    /// Generation range is reversed
    #[error("Invalid lookup range: {from} is after {to}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },

    /// Generation range covers more days than allowed
    #[error("Lookup range of {days} days exceeds the maximum of {max} days")]
    RangeTooLong { days: i64, max: i64 },
}

/// Immutable mapping from calendar date to weekday name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayNameLookup {
    entries: BTreeMap<NaiveDate, DayName>,
}

impl DayNameLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the table for every date in `from..=to` from the calendar
    pub fn generate(from: NaiveDate, to: NaiveDate) -> Result<Self, LookupError> {
        if from > to {
            return Err(LookupError::InvalidRange { from, to });
        }

        let days = to.signed_duration_since(from).num_days() + 1;
        if days > MAX_LOOKUP_DAYS {
            return Err(LookupError::RangeTooLong {
                days,
                max: MAX_LOOKUP_DAYS,
            });
        }

        let entries = (0..days as u64)
            .map_while(|offset| from.checked_add_days(Days::new(offset)))
            .map(|date| (date, DayName::of(date)))
            .collect();

        Ok(Self { entries })
    }

    /// Parses a JSON object of `"YYYY-MM-DD": "Sun"` pairs
    pub fn from_json_str(json: &str) -> Result<Self, LookupError> {
        let raw: BTreeMap<String, String> = serde_json::from_str(json)?;
        let mut entries = BTreeMap::new();

        for (key, value) in raw {
            let date = NaiveDate::parse_from_str(&key, "%Y-%m-%d")
                .map_err(|_| LookupError::InvalidKey(key.clone()))?;
            let day = DayName::parse(&value)
                .ok_or(LookupError::InvalidDayName { date, value })?;
            entries.insert(date, day);
        }

        Ok(Self { entries })
    }

    /// Reads and parses a table file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LookupError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let lookup = Self::from_json_str(&content)?;
        log::info!("Loaded {} weekday entries from {}", lookup.len(), path.display());
        Ok(lookup)
    }

    /// Serializes the table in date order, in the same format it is read from
    pub fn to_json_pretty(&self) -> Result<String, LookupError> {
        let raw: BTreeMap<String, &str> = self
            .entries
            .iter()
            .map(|(date, day)| (date.format("%Y-%m-%d").to_string(), day.abbrev()))
            .collect();
        Ok(serde_json::to_string_pretty(&raw)?)
    }

    pub fn insert(&mut self, date: NaiveDate, day: DayName) -> Option<DayName> {
        self.entries.insert(date, day)
    }

    /// Raw table entry, without checking it against the calendar
    pub fn get(&self, date: NaiveDate) -> Option<DayName> {
        self.entries.get(&date).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the weekday for `date`.
    ///
    /// Uses the table entry when it agrees with the calendar and the
    /// calendar-derived weekday otherwise.
    pub fn resolve(&self, date: NaiveDate) -> DayName {
        let actual = DayName::of(date);
        match self.get(date) {
            Some(listed) if listed != actual => {
                log::warn!(
                    "Lookup lists {} as {}, but it is a {}; using the calendar",
                    date,
                    listed,
                    actual
                );
                actual
            }
            Some(listed) => listed,
            None => actual,
        }
    }

    /// Entries whose weekday disagrees with the calendar, as (date, listed, actual)
    pub fn mismatches(&self) -> Vec<(NaiveDate, DayName, DayName)> {
        self.entries
            .iter()
            .filter_map(|(date, listed)| {
                let actual = DayName::of(*date);
                (actual != *listed).then_some((*date, *listed, actual))
            })
            .collect()
    }
}
