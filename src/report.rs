//! Plain-text and JSON rendering of computed schedules
//!
//! The summary uses the same labels and number formats as the calculator's
//! results panel so that the CLI output and the interactive view agree.

use std::fmt::Write;

use crate::schedule::{DayCode, ScheduleResult, ScheduleSummary};

/// Formats a fraction as a percentage with two decimals (0.28 -> "28.00%")
pub fn format_fraction_percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

/// Label/value pairs of the results summary, in display order
pub fn summary_rows(summary: &ScheduleSummary) -> Vec<(&'static str, String)> {
    vec![
        ("Total Trip Days", summary.day_count.to_string()),
        ("Total Weekend Days", summary.weekend_count.to_string()),
        (
            "Total Turnaround Days",
            summary.turnaround_days_rounded.to_string(),
        ),
        (
            "Turnaround Percent",
            format_fraction_percent(summary.turnaround_percent),
        ),
        ("Weekend Days", summary.weekend_count.to_string()),
        ("Trip Days", summary.day_count.to_string()),
        (
            "Turnaround Days (Initial)",
            format!("{:.2}", summary.turnaround_days_initial),
        ),
        (
            "Turnaround Days (Not Rounded)",
            format!("{:.2}", summary.turnaround_days_exact),
        ),
        ("Weekend Bonus Rate", format!("{}%", summary.weekend_bonus_rate)),
        (
            "Weekend Bonus Contribution",
            format!("{:.2}%", summary.weekend_bonus_contribution_percent),
        ),
        (
            "Turnaround Days (Rounded)",
            summary.turnaround_days_rounded.to_string(),
        ),
    ]
}

/// Renders the schedule as a three-column table: Day, Date, Code
pub fn render_schedule(result: &ScheduleResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<5}{:<12}{}", "Day", "Date", "Code");
    let _ = writeln!(out, "{:<5}{:<12}{}", "---", "----------", "----");

    for entry in &result.entries {
        let _ = writeln!(
            out,
            "{:<5}{:<12}{}",
            entry.day_of_week.abbrev(),
            entry.date.format("%Y-%m-%d").to_string(),
            entry.code.letter()
        );
    }

    let _ = writeln!(out, "{}", code_legend());

    out
}

/// One-line key for the schedule codes, e.g. "T = Travel  S = Stay  O = Turnaround"
pub fn code_legend() -> String {
    [DayCode::Travel, DayCode::Stay, DayCode::Turnaround]
        .iter()
        .map(|code| format!("{} = {}", code.letter(), code.label()))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Renders the results summary with labels aligned
pub fn render_summary(result: &ScheduleResult) -> String {
    let rows = summary_rows(&result.summary);
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

    let mut out = String::new();
    for (label, value) in rows {
        let _ = writeln!(out, "{:<width$}  {}", format!("{}:", label), value, width = width + 1);
    }

    out
}

/// Pretty JSON of the full result
pub fn to_json(result: &ScheduleResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::TripRequest;
    use chrono::NaiveDate;

    fn week_result() -> ScheduleResult {
        TripRequest::new(
            NaiveDate::from_ymd_opt(2025, 6, 2),
            NaiveDate::from_ymd_opt(2025, 6, 8),
        )
        .compute()
        .unwrap()
    }

    #[test]
    fn test_format_fraction_percent() {
        assert_eq!(format_fraction_percent(0.25), "25.00%");
        assert_eq!(format_fraction_percent(0.28), "28.00%");
        assert_eq!(format_fraction_percent(0.3333), "33.33%");
    }

    #[test]
    fn test_render_schedule_lists_every_entry() {
        let table = render_schedule(&week_result());
        let lines: Vec<&str> = table.lines().collect();

        // Header, separator, 7 trip days, 2 turnaround days, legend
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[2], "Mon  2025-06-02  T");
        assert_eq!(lines[3], "Tue  2025-06-03  S");
        assert_eq!(lines[8], "Sun  2025-06-08  T");
        assert_eq!(lines[9], "Mon  2025-06-09  O");
        assert_eq!(lines[10], "Tue  2025-06-10  O");
        assert_eq!(lines[11], "T = Travel  S = Stay  O = Turnaround");
    }

    #[test]
    fn test_render_summary_values() {
        let summary = render_summary(&week_result());

        assert!(summary.contains("Total Trip Days:"));
        assert!(summary.contains("Turnaround Percent:"));
        assert!(summary.contains("25.00%"));
        assert!(summary.contains("1.75"));
        assert!(summary.contains("2.25"));
        assert!(summary.contains("22.22%"));
        assert_eq!(summary.lines().count(), 11);
    }

    #[test]
    fn test_summary_rows_without_weekends() {
        let result = TripRequest::new(
            NaiveDate::from_ymd_opt(2025, 6, 3),
            NaiveDate::from_ymd_opt(2025, 6, 6),
        )
        .compute()
        .unwrap();

        let rows = summary_rows(&result.summary);
        let value = |label: &str| {
            rows.iter()
                .find(|(l, _)| *l == label)
                .map(|(_, v)| v.clone())
                .unwrap()
        };

        assert_eq!(value("Weekend Bonus Rate"), "0%");
        assert_eq!(value("Weekend Bonus Contribution"), "0.00%");
        assert_eq!(value("Turnaround Days (Rounded)"), "1");
    }

    #[test]
    fn test_to_json_shape() {
        let json = to_json(&week_result()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["entries"].as_array().unwrap().len(), 9);
        assert_eq!(value["entries"][0]["date"], "2025-06-02");
        assert_eq!(value["entries"][0]["day_of_week"], "Mon");
        assert_eq!(value["entries"][8]["code"], "O");
        assert_eq!(value["summary"]["day_count"], 7);
        assert_eq!(value["summary"]["turnaround_days_rounded"], 2);
    }
}
