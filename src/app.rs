//! Application state for the interactive calculator
//!
//! This module holds the calculator form state, handles keyboard input and
//! recomputes the schedule when the user asks for it.

use chrono::{Duration, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::cli::StartupConfig;
use crate::schedule::{DayNameLookup, ScheduleError, ScheduleResult, TripRequest};

/// Date input that arrow keys currently adjust
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Start,
    End,
}

impl Field {
    fn toggle(self) -> Self {
        match self {
            Field::Start => Field::End,
            Field::End => Field::Start,
        }
    }
}

/// Main application struct managing the calculator form
pub struct App {
    /// Start date input, empty until set
    pub start_date: Option<NaiveDate>,
    /// End date input, empty until set
    pub end_date: Option<NaiveDate>,
    /// Which date input has focus
    pub focus: Field,
    /// Result of the last calculation, if one has run since the last reset
    pub outcome: Option<Result<ScheduleResult, ScheduleError>>,
    /// First visible schedule row
    pub schedule_scroll: u16,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Date an empty input starts from when adjusted
    today: NaiveDate,
    lookup: Option<DayNameLookup>,
    max_trip_days: i64,
}

impl App {
    /// Creates an empty calculator
    pub fn new(today: NaiveDate, lookup: Option<DayNameLookup>, max_trip_days: i64) -> Self {
        Self {
            start_date: None,
            end_date: None,
            focus: Field::Start,
            outcome: None,
            schedule_scroll: 0,
            show_help: false,
            should_quit: false,
            today,
            lookup,
            max_trip_days,
        }
    }

    /// Creates a calculator pre-filled from CLI arguments.
    ///
    /// When both dates are given the schedule is calculated immediately.
    pub fn with_startup_config(
        config: &StartupConfig,
        lookup: Option<DayNameLookup>,
        today: NaiveDate,
    ) -> Self {
        let mut app = Self::new(today, lookup, config.max_trip_days);
        app.start_date = config.start;
        app.end_date = config.end;

        if app.start_date.is_some() && app.end_date.is_some() {
            app.calculate();
        }

        app
    }

    /// The last successful result, if any
    pub fn result(&self) -> Option<&ScheduleResult> {
        self.outcome.as_ref().and_then(|outcome| outcome.as_ref().ok())
    }

    /// The last validation error, if the last calculation failed
    pub fn error(&self) -> Option<&ScheduleError> {
        self.outcome.as_ref().and_then(|outcome| outcome.as_ref().err())
    }

    /// Recomputes the schedule from the current inputs
    pub fn calculate(&mut self) {
        let mut request = TripRequest::new(self.start_date, self.end_date)
            .with_max_trip_days(self.max_trip_days);
        if let Some(lookup) = &self.lookup {
            request = request.with_lookup(lookup);
        }

        let outcome = request.compute();
        if let Err(err) = &outcome {
            log::debug!("Calculation rejected: {}", err);
        }

        self.outcome = Some(outcome);
        self.schedule_scroll = 0;
    }

    /// Clears both inputs and the last result
    pub fn reset(&mut self) {
        self.start_date = None;
        self.end_date = None;
        self.focus = Field::Start;
        self.outcome = None;
        self.schedule_scroll = 0;
    }

    /// Moves the focused date by `days`; an empty input starts from today
    pub fn shift_focused(&mut self, days: i64) {
        let today = self.today;
        let slot = match self.focus {
            Field::Start => &mut self.start_date,
            Field::End => &mut self.end_date,
        };

        *slot = match *slot {
            None => Some(today),
            Some(date) => Some(date.checked_add_signed(Duration::days(days)).unwrap_or(date)),
        };
    }

    /// Number of rows in the current schedule
    fn schedule_len(&self) -> usize {
        self.result().map(|r| r.entries.len()).unwrap_or(0)
    }

    pub fn scroll_down(&mut self) {
        let max = u16::try_from(self.schedule_len().saturating_sub(1)).unwrap_or(u16::MAX);
        if self.schedule_scroll < max {
            self.schedule_scroll += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.schedule_scroll = self.schedule_scroll.saturating_sub(1);
    }

    /// Handles a key press
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Help overlay intercepts all keys when shown
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        let shifted = key_event.modifiers.contains(KeyModifiers::SHIFT);

        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = self.focus.toggle();
            }
            KeyCode::Left if shifted => self.shift_focused(-7),
            KeyCode::Right if shifted => self.shift_focused(7),
            KeyCode::Left | KeyCode::Char('h') => self.shift_focused(-1),
            KeyCode::Right | KeyCode::Char('l') => self.shift_focused(1),
            KeyCode::Char('H') => self.shift_focused(-7),
            KeyCode::Char('L') => self.shift_focused(7),
            KeyCode::Enter | KeyCode::Char('c') => {
                self.calculate();
            }
            KeyCode::Char('r') => {
                self.reset();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll_up();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll_down();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn shift_key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            modifiers: KeyModifiers::SHIFT,
            ..key(code)
        }
    }

    fn test_app() -> App {
        App::new(date(2025, 6, 2), None, 3650)
    }

    fn startup(start: Option<NaiveDate>, end: Option<NaiveDate>) -> StartupConfig {
        StartupConfig {
            start,
            end,
            lookup_path: None,
            max_trip_days: 3650,
        }
    }

    #[test]
    fn test_new_app_is_empty() {
        let app = test_app();
        assert!(app.start_date.is_none());
        assert!(app.end_date.is_none());
        assert!(app.outcome.is_none());
        assert_eq!(app.focus, Field::Start);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_startup_with_both_dates_calculates() {
        let config = startup(Some(date(2025, 6, 2)), Some(date(2025, 6, 8)));
        let app = App::with_startup_config(&config, None, date(2025, 1, 1));

        let result = app.result().expect("Should have calculated");
        assert_eq!(result.summary.day_count, 7);
    }

    #[test]
    fn test_startup_with_one_date_waits() {
        let config = startup(Some(date(2025, 6, 2)), None);
        let app = App::with_startup_config(&config, None, date(2025, 1, 1));

        assert_eq!(app.start_date, Some(date(2025, 6, 2)));
        assert!(app.outcome.is_none());
    }

    #[test]
    fn test_calculate_with_missing_input_sets_error() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.error(), Some(&ScheduleError::MissingInput));
        assert!(app.result().is_none());
    }

    #[test]
    fn test_arrow_keys_fill_and_shift_dates() {
        let mut app = test_app();

        // First press fills the empty input with today
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.start_date, Some(date(2025, 6, 2)));

        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Char('l')));
        assert_eq!(app.start_date, Some(date(2025, 6, 4)));

        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.start_date, Some(date(2025, 6, 3)));
    }

    #[test]
    fn test_shift_moves_by_week() {
        let mut app = test_app();
        app.start_date = Some(date(2025, 6, 2));

        app.handle_key(shift_key(KeyCode::Right));
        assert_eq!(app.start_date, Some(date(2025, 6, 9)));

        app.handle_key(key(KeyCode::Char('H')));
        assert_eq!(app.start_date, Some(date(2025, 6, 2)));
    }

    #[test]
    fn test_tab_switches_focus() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus, Field::End);

        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.end_date, Some(date(2025, 6, 2)));
        assert!(app.start_date.is_none());

        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus, Field::Start);
    }

    #[test]
    fn test_calculate_reports_invalid_range() {
        let mut app = test_app();
        app.start_date = Some(date(2025, 6, 8));
        app.end_date = Some(date(2025, 6, 2));

        app.handle_key(key(KeyCode::Char('c')));

        assert!(matches!(app.error(), Some(ScheduleError::InvalidRange { .. })));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut app = test_app();
        app.start_date = Some(date(2025, 6, 2));
        app.end_date = Some(date(2025, 6, 8));
        app.focus = Field::End;
        app.calculate();
        app.scroll_down();

        app.handle_key(key(KeyCode::Char('r')));

        assert!(app.start_date.is_none());
        assert!(app.end_date.is_none());
        assert!(app.outcome.is_none());
        assert_eq!(app.focus, Field::Start);
        assert_eq!(app.schedule_scroll, 0);
    }

    #[test]
    fn test_scroll_is_bounded_by_schedule_length() {
        let mut app = test_app();
        app.start_date = Some(date(2025, 6, 2));
        app.end_date = Some(date(2025, 6, 3));
        app.calculate();
        // Two trip days and one turnaround day
        assert_eq!(app.result().unwrap().entries.len(), 3);

        for _ in 0..10 {
            app.handle_key(key(KeyCode::Down));
        }
        assert_eq!(app.schedule_scroll, 2);

        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.schedule_scroll, 1);
    }

    #[test]
    fn test_scroll_on_long_schedule_is_not_truncated() {
        // 60000 trip days plus 20000 turnaround days overflows u16
        let mut app = App::new(date(2025, 6, 2), None, 100_000);
        app.start_date = Some(date(2025, 1, 1));
        app.end_date = Some(date(2025, 1, 1) + Duration::days(59_999));
        app.calculate();
        assert!(app.result().unwrap().entries.len() > usize::from(u16::MAX));

        app.schedule_scroll = u16::MAX - 1;
        app.scroll_down();
        assert_eq!(app.schedule_scroll, u16::MAX);

        app.scroll_down();
        assert_eq!(app.schedule_scroll, u16::MAX);
    }

    #[test]
    fn test_help_overlay_intercepts_keys() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Char('?')));
        assert!(app.show_help);

        app.handle_key(key(KeyCode::Char('r')));
        app.handle_key(key(KeyCode::Char('q')));
        assert!(!app.show_help);
        assert!(!app.should_quit);

        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_lookup_is_applied() {
        let lookup = DayNameLookup::generate(date(2025, 6, 1), date(2025, 6, 30)).unwrap();
        let mut app = App::new(date(2025, 6, 2), Some(lookup), 3650);
        app.start_date = Some(date(2025, 6, 2));
        app.end_date = Some(date(2025, 6, 8));

        app.calculate();

        assert_eq!(app.result().unwrap().summary.weekend_count, 2);
    }

    #[test]
    fn test_max_trip_days_is_enforced() {
        let mut app = App::new(date(2025, 6, 2), None, 5);
        app.start_date = Some(date(2025, 6, 2));
        app.end_date = Some(date(2025, 6, 8));

        app.calculate();

        assert_eq!(
            app.error(),
            Some(&ScheduleError::TripTooLong { days: 7, max: 5 })
        );
    }
}
