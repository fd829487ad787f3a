//! Command-line interface parsing for tripcalc
//!
//! This module handles parsing of CLI arguments using clap and merging them
//! with the stored settings into the options each command runs with.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use crate::config::{ConfigError, OutputFormat, Settings};
use crate::schedule::{LookupError, ScheduleError};

/// Error types for running a CLI command
#[derive(Debug, Error)]
pub enum CliError {
    /// A date argument is not a valid ISO calendar date
    #[error("Invalid date '{0}'. Expected format: YYYY-MM-DD")]
    InvalidDate(String),

    /// The schedule request failed validation
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    /// The weekday table could not be loaded or written
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Settings could not be loaded or saved
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Writing command output failed
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing command output failed
    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    /// No config directory and no --config flag
    #[error("Could not determine the settings directory; pass --config <FILE>")]
    NoConfigDir,
}

/// tripcalc - Plan trips with travel, stay, and turnaround days
#[derive(Parser, Debug)]
#[command(name = "tripcalc")]
#[command(about = "Trip schedule and turnaround day calculator")]
#[command(version)]
pub struct Cli {
    /// Settings file to use instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the schedule for a trip and print it
    ///
    /// Examples:
    ///   tripcalc schedule --start 2025-06-02 --end 2025-06-08
    ///   tripcalc schedule --start 2025-06-02 --end 2025-06-08 --format json
    Schedule(ScheduleArgs),

    /// Generate a weekday lookup table for a date range
    ///
    /// Examples:
    ///   tripcalc lookup 2025-01-01 2025-12-31 --out date-mapping.json
    Lookup(LookupArgs),

    /// Open the interactive calculator
    Tui(TuiArgs),

    /// Show the settings file location and effective settings
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct ScheduleArgs {
    /// First day of the trip (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub start: Option<String>,

    /// Last day of the trip (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub end: Option<String>,

    /// Weekday lookup table (JSON) consulted before the calendar
    #[arg(long, value_name = "FILE")]
    pub lookup: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Longest trip, in days, to accept
    #[arg(long, value_name = "DAYS", value_parser = clap::value_parser!(i64).range(1..))]
    pub max_days: Option<i64>,
}

#[derive(Args, Debug)]
pub struct LookupArgs {
    /// First date of the table (YYYY-MM-DD)
    pub from: String,

    /// Last date of the table (YYYY-MM-DD)
    pub to: String,

    /// Write the table to this file instead of stdout
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct TuiArgs {
    /// Pre-filled start date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub start: Option<String>,

    /// Pre-filled end date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub end: Option<String>,

    /// Weekday lookup table (JSON) consulted before the calendar
    #[arg(long, value_name = "FILE")]
    pub lookup: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Write a settings file with default values if none exists
    #[arg(long)]
    pub init: bool,
}

/// Parses a "YYYY-MM-DD" command-line argument.
///
/// # Returns
/// * `Ok(NaiveDate)` if the string is a valid calendar date
/// * `Err(CliError::InvalidDate)` otherwise
pub fn parse_date_arg(s: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Options for the `schedule` command after applying stored settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleOptions {
    /// Raw start date; validated by the calculator
    pub start: Option<String>,
    /// Raw end date; validated by the calculator
    pub end: Option<String>,
    pub lookup_path: Option<PathBuf>,
    pub format: OutputFormat,
    pub max_trip_days: i64,
}

impl ScheduleOptions {
    /// Merges `schedule` arguments over the stored settings; flags win.
    pub fn from_args(args: &ScheduleArgs, settings: &Settings) -> Self {
        Self {
            start: args.start.clone(),
            end: args.end.clone(),
            lookup_path: args.lookup.clone().or_else(|| settings.lookup_path.clone()),
            format: args.format.unwrap_or(settings.output),
            max_trip_days: args.max_days.unwrap_or(settings.max_trip_days),
        }
    }
}

/// Configuration for starting the interactive calculator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    /// Pre-filled start date
    pub start: Option<NaiveDate>,
    /// Pre-filled end date
    pub end: Option<NaiveDate>,
    pub lookup_path: Option<PathBuf>,
    pub max_trip_days: i64,
}

impl StartupConfig {
    /// Creates a StartupConfig from `tui` arguments and stored settings.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with the pre-filled dates
    /// * `Err(CliError::InvalidDate)` if a date argument doesn't parse
    pub fn from_args(args: &TuiArgs, settings: &Settings) -> Result<Self, CliError> {
        Ok(StartupConfig {
            start: args.start.as_deref().map(parse_date_arg).transpose()?,
            end: args.end.as_deref().map(parse_date_arg).transpose()?,
            lookup_path: args.lookup.clone().or_else(|| settings.lookup_path.clone()),
            max_trip_days: settings.max_trip_days,
        })
    }
}
