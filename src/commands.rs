//! Non-interactive commands
//!
//! Each command writes its output to the given writer so the binary can pass
//! stdout and tests can pass a buffer.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::cli::{parse_date_arg, CliError, LookupArgs, ScheduleOptions};
use crate::config::{OutputFormat, SettingsStore};
use crate::report;
use crate::schedule::{DayNameLookup, LookupError, TripRequest};

/// Loads the weekday table at `path`, if one is configured
pub fn load_lookup(path: Option<&Path>) -> Result<Option<DayNameLookup>, LookupError> {
    let Some(path) = path else {
        return Ok(None);
    };

    let lookup = DayNameLookup::from_path(path)?;
    let mismatches = lookup.mismatches();
    if !mismatches.is_empty() {
        log::warn!(
            "{} entries in {} disagree with the calendar and will be ignored",
            mismatches.len(),
            path.display()
        );
    }

    Ok(Some(lookup))
}

/// Computes a schedule and prints it in the requested format
pub fn run_schedule<W: Write>(options: &ScheduleOptions, out: &mut W) -> Result<(), CliError> {
    let lookup = load_lookup(options.lookup_path.as_deref())?;

    let mut request = TripRequest::from_iso(options.start.as_deref(), options.end.as_deref())?
        .with_max_trip_days(options.max_trip_days);
    if let Some(lookup) = &lookup {
        request = request.with_lookup(lookup);
    }

    let result = request.compute()?;

    match options.format {
        OutputFormat::Table => {
            write!(out, "{}", report::render_schedule(&result))?;
            writeln!(out)?;
            write!(out, "{}", report::render_summary(&result))?;
        }
        OutputFormat::Json => {
            let json = report::to_json(&result)?;
            writeln!(out, "{}", json)?;
        }
    }

    Ok(())
}

/// Generates a weekday table and writes it to a file or `out`
pub fn run_lookup<W: Write>(args: &LookupArgs, out: &mut W) -> Result<(), CliError> {
    let from = parse_date_arg(&args.from)?;
    let to = parse_date_arg(&args.to)?;

    let lookup = DayNameLookup::generate(from, to)?;
    let json = lookup.to_json_pretty()?;

    match &args.out {
        Some(path) => {
            fs::write(path, json)?;
            writeln!(out, "Wrote {} entries to {}", lookup.len(), path.display())?;
        }
        None => writeln!(out, "{}", json)?,
    }

    Ok(())
}

/// Prints the settings location and effective settings, optionally creating the file
pub fn run_config<W: Write>(
    store: &SettingsStore,
    init: bool,
    out: &mut W,
) -> Result<(), CliError> {
    if init && !store.path().exists() {
        store.save(&Default::default())?;
        writeln!(out, "Created {}", store.path().display())?;
    }

    let settings = store.load()?;
    let json = serde_json::to_string_pretty(&settings)?;

    writeln!(out, "Settings file: {}", store.path().display())?;
    writeln!(out, "{}", json)?;

    Ok(())
}
