//! UI rendering module for tripcalc
//!
//! This module contains the rendering logic for the interactive calculator,
//! using the ratatui library for TUI components.

pub mod calculator;
pub mod help_overlay;

pub use calculator::render as render_calculator;
pub use help_overlay::render as render_help_overlay;
