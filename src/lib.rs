//! tripcalc library
//!
//! Trip schedule calculator with travel, stay, and turnaround days. The
//! binary is a thin layer over these modules, which are also used by the
//! integration tests.

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod report;
pub mod schedule;
pub mod ui;
