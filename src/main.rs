//! tripcalc - Plan trips with travel, stay, and turnaround days
//!
//! Computes a day-by-day trip schedule from the command line, or opens an
//! interactive terminal calculator.

use std::io::{self, Stdout};
use std::panic;
use std::process::ExitCode;
use std::time::Duration;

use chrono::Local;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use tripcalc::app::App;
use tripcalc::cli::{Cli, CliError, Command, ScheduleOptions, StartupConfig};
use tripcalc::commands::{load_lookup, run_config, run_lookup, run_schedule};
use tripcalc::config::{Settings, SettingsStore};
use tripcalc::schedule::DayNameLookup;
use tripcalc::ui;

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Renders the calculator and, when open, the help overlay
fn render_ui(frame: &mut ratatui::Frame, app: &App) {
    ui::render_calculator(frame, app);
    if app.show_help {
        ui::render_help_overlay(frame);
    }
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Runs the interactive calculator until the user quits
fn run_tui(config: &StartupConfig, lookup: Option<DayNameLookup>) -> io::Result<()> {
    setup_panic_hook();

    // Log lines on stderr would corrupt the alternate screen
    let log_level = log::max_level();
    log::set_max_level(log::LevelFilter::Off);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::with_startup_config(config, lookup, Local::now().date_naive());
    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    log::set_max_level(log_level);

    result
}

fn run(cli: Cli) -> Result<(), CliError> {
    let store = match &cli.config {
        Some(path) => Some(SettingsStore::with_path(path.clone())),
        None => SettingsStore::new(),
    };
    let settings = match &store {
        Some(store) => store.load()?,
        None => {
            log::warn!("No settings directory available, using default settings");
            Settings::default()
        }
    };

    match &cli.command {
        Command::Schedule(args) => {
            let options = ScheduleOptions::from_args(args, &settings);
            run_schedule(&options, &mut io::stdout().lock())
        }
        Command::Lookup(args) => run_lookup(args, &mut io::stdout().lock()),
        Command::Config(args) => {
            let store = store.ok_or(CliError::NoConfigDir)?;
            run_config(&store, args.init, &mut io::stdout().lock())
        }
        Command::Tui(args) => {
            let config = StartupConfig::from_args(args, &settings)?;
            let lookup = load_lookup(config.lookup_path.as_deref())?;
            run_tui(&config, lookup)?;
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
