//! Turnaround schedule calculator
//!
//! Turns a validated date range into the day-by-day schedule and the
//! turnaround summary. Everything here is a pure function of its inputs.

use chrono::{Days, NaiveDate};

use super::{
    DayCode, DayName, DayNameLookup, ScheduleEntry, ScheduleError, ScheduleResult,
    ScheduleSummary, TripRequest,
};

/// Default cap on the trip segment length, roughly ten years
pub const DEFAULT_MAX_TRIP_DAYS: i64 = 3650;

/// Turnaround days added per weekend day in the trip
const WEEKEND_DAY_WEIGHT: f64 = 0.25;

/// Bonus rate shown when the trip contains at least one weekend day
const WEEKEND_BONUS_RATE: u32 = 25;

/// Returns the turnaround rate for a trip of `day_count` days.
///
/// | Trip days | Rate   |
/// |-----------|--------|
/// | 1-7       | 0.25   |
/// | 8-13      | 0.28   |
/// | 14+       | 0.3333 |
pub fn turnaround_percent(day_count: u32) -> f64 {
    match day_count {
        0..=7 => 0.25,
        8..=13 => 0.28,
        _ => 0.3333,
    }
}

/// Rounds to the nearest integer with halves going up (2.5 -> 3)
pub fn round_half_up(value: f64) -> u32 {
    (value + 0.5).floor().max(0.0) as u32
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Computes the turnaround figures for a trip length and weekend-day count
pub fn summarize(day_count: u32, weekend_count: u32) -> ScheduleSummary {
    let turnaround_percent = turnaround_percent(day_count);
    let turnaround_days_initial = f64::from(day_count) * turnaround_percent;
    let weekend_contribution = WEEKEND_DAY_WEIGHT * f64::from(weekend_count);
    let turnaround_days_exact = turnaround_days_initial + weekend_contribution;

    let weekend_bonus_rate = if weekend_count > 0 { WEEKEND_BONUS_RATE } else { 0 };
    let weekend_bonus_contribution_percent = if turnaround_days_exact > 0.0 {
        round_to_hundredths(weekend_contribution / turnaround_days_exact * 100.0)
    } else {
        0.0
    };

    ScheduleSummary {
        day_count,
        weekend_count,
        turnaround_days_rounded: round_half_up(turnaround_days_exact),
        turnaround_percent,
        turnaround_days_initial,
        weekend_contribution,
        turnaround_days_exact,
        weekend_bonus_rate,
        weekend_bonus_contribution_percent,
    }
}

/// Returns `base` moved forward `offset` days, or an error past the calendar end
fn nth_day(base: NaiveDate, offset: u32, end: NaiveDate) -> Result<NaiveDate, ScheduleError> {
    base.checked_add_days(Days::new(u64::from(offset)))
        .ok_or(ScheduleError::OutOfCalendarRange { end })
}

fn day_name(date: NaiveDate, lookup: Option<&DayNameLookup>) -> DayName {
    match lookup {
        Some(lookup) => lookup.resolve(date),
        None => DayName::of(date),
    }
}

/// Validates the request and returns the inclusive trip span in days
fn validate(request: &TripRequest<'_>) -> Result<(NaiveDate, NaiveDate, u32), ScheduleError> {
    let (start, end) = match (request.start_date, request.end_date) {
        (Some(start), Some(end)) => (start, end),
        _ => return Err(ScheduleError::MissingInput),
    };

    if start > end {
        return Err(ScheduleError::InvalidRange { start, end });
    }

    let days = end.signed_duration_since(start).num_days() + 1;
    if days > request.max_trip_days {
        return Err(ScheduleError::TripTooLong {
            days,
            max: request.max_trip_days,
        });
    }

    let day_count = u32::try_from(days).map_err(|_| ScheduleError::TripTooLong {
        days,
        max: i64::from(u32::MAX),
    })?;

    Ok((start, end, day_count))
}

/// Computes the travel/stay/turnaround schedule for a trip.
///
/// The first and last trip days are coded `T` and the days between them `S`.
/// Weekend days inside the trip raise the turnaround allowance, and the
/// rounded number of `O` days is appended starting the day after the trip ends.
///
/// # Returns
/// * `Ok(ScheduleResult)` with the trip rows, the turnaround rows and the summary
/// * `Err(ScheduleError)` if the request fails validation
pub fn compute_schedule(request: &TripRequest<'_>) -> Result<ScheduleResult, ScheduleError> {
    let (start, end, day_count) = validate(request)?;
    let lookup = request.day_name_lookup;
    let last = day_count - 1;

    let mut entries = Vec::with_capacity(day_count as usize);
    let mut weekend_count = 0;

    for i in 0..day_count {
        let date = nth_day(start, i, end)?;
        let day_of_week = day_name(date, lookup);
        if day_of_week.is_weekend() {
            weekend_count += 1;
        }

        let code = if i == 0 || i == last {
            DayCode::Travel
        } else {
            DayCode::Stay
        };

        entries.push(ScheduleEntry {
            date,
            day_of_week,
            code,
        });
    }

    let summary = summarize(day_count, weekend_count);

    for offset in 1..=summary.turnaround_days_rounded {
        let date = nth_day(end, offset, end)?;
        entries.push(ScheduleEntry {
            date,
            day_of_week: day_name(date, lookup),
            code: DayCode::Turnaround,
        });
    }

    log::debug!(
        "Computed schedule {}..{}: {} trip days, {} weekend days, {} turnaround days",
        start,
        end,
        summary.day_count,
        summary.weekend_count,
        summary.turnaround_days_rounded
    );

    Ok(ScheduleResult { entries, summary })
}
