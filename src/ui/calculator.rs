//! Calculator screen UI
//!
//! Renders the two date inputs, the day-by-day schedule with colored codes,
//! and the results summary panel.

use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Field};
use crate::report::summary_rows;
use crate::schedule::{DayCode, ScheduleResult};

/// Color scheme for the calculator screen
mod colors {
    use ratatui::style::Color;

    /// Section headers and borders
    pub const HEADER: Color = Color::Cyan;
    /// Primary text
    pub const PRIMARY: Color = Color::White;
    /// Secondary/dimmed text
    pub const SECONDARY: Color = Color::Gray;
    /// Focused input
    pub const FOCUSED: Color = Color::Yellow;
    /// Validation errors
    pub const ERROR: Color = Color::Red;
    /// Travel day code
    pub const TRAVEL: Color = Color::LightBlue;
    /// Stay day code
    pub const STAY: Color = Color::Green;
    /// Turnaround day code
    pub const TURNAROUND: Color = Color::LightRed;
}

fn code_color(code: DayCode) -> Color {
    match code {
        DayCode::Travel => colors::TRAVEL,
        DayCode::Stay => colors::STAY,
        DayCode::Turnaround => colors::TURNAROUND,
    }
}

/// Renders the calculator screen
///
/// # Arguments
/// * `frame` - The ratatui frame to render into
/// * `app` - The application state
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let main_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::HEADER))
        .title(Span::styled(
            " Turnaround Time Calculator ",
            Style::default()
                .fg(colors::PRIMARY)
                .add_modifier(Modifier::BOLD),
        ));

    let inner_area = main_block.inner(area);
    frame.render_widget(main_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Date inputs
            Constraint::Length(1), // Error message
            Constraint::Min(5),    // Schedule and summary
            Constraint::Length(1), // Key hints
        ])
        .split(inner_area);

    render_inputs(frame, app, chunks[0]);
    render_error(frame, app, chunks[1]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(30)])
        .split(chunks[2]);

    render_schedule(frame, app, body[0]);
    render_summary(frame, app.result(), body[1]);
    render_hints(frame, chunks[3]);
}

/// Renders one date input as "Label: value"
fn input_spans(label: &str, value: Option<NaiveDate>, focused: bool) -> Vec<Span<'static>> {
    let value_text = value
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "----------".to_string());

    let value_style = if focused {
        Style::default()
            .fg(colors::FOCUSED)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default().fg(colors::PRIMARY)
    };

    vec![
        Span::styled(format!("{}: ", label), Style::default().fg(colors::SECONDARY)),
        Span::styled(value_text, value_style),
    ]
}

fn render_inputs(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = input_spans("Start Date", app.start_date, app.focus == Field::Start);
    spans.push(Span::raw("    "));
    spans.extend(input_spans("End Date", app.end_date, app.focus == Field::End));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_error(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(err) = app.error() {
        let line = Line::from(Span::styled(
            err.to_string(),
            Style::default().fg(colors::ERROR),
        ));
        frame.render_widget(Paragraph::new(line), area);
    }
}

fn render_schedule(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Schedule ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::HEADER));

    let mut lines = vec![Line::from(Span::styled(
        format!("{:<5}{:<12}{}", "Day", "Date", "Code"),
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    match app.result() {
        Some(result) => {
            let visible = result.entries.iter().skip(app.schedule_scroll as usize);
            lines.extend(visible.map(|entry| {
                Line::from(vec![
                    Span::raw(format!("{:<5}", entry.day_of_week.abbrev())),
                    Span::raw(format!("{:<12}", entry.date.to_string())),
                    Span::styled(
                        entry.code.letter(),
                        Style::default()
                            .fg(code_color(entry.code))
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            }));
        }
        None => {
            lines.push(Line::from(Span::styled(
                "Pick dates and press Enter",
                Style::default().fg(colors::SECONDARY),
            )));
        }
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_summary(frame: &mut Frame, result: Option<&ScheduleResult>, area: Rect) {
    let block = Block::default()
        .title(" Results Summary ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::HEADER));

    let lines: Vec<Line> = match result {
        Some(result) => summary_rows(&result.summary)
            .into_iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(
                        format!("{:<31}", format!("{}:", label)),
                        Style::default().fg(colors::SECONDARY),
                    ),
                    Span::styled(
                        value,
                        Style::default()
                            .fg(colors::PRIMARY)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            })
            .collect(),
        None => vec![Line::from(Span::styled(
            "No calculation yet",
            Style::default().fg(colors::SECONDARY),
        ))],
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_hints(frame: &mut Frame, area: Rect) {
    let hint = Line::from(Span::styled(
        "Tab: switch date  \u{2190}/\u{2192}: \u{00b1}1 day  H/L: \u{00b1}1 week  Enter: calculate  r: reset  ?: help  q: quit",
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(hint), area);
}
