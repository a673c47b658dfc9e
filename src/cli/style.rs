//! Console styling shared by CLI output
//!
//! Colors are written unconditionally; `anstream` strips them when the
//! output isn't a terminal.

use indicatif::ProgressStyle;
use owo_colors::OwoColorize;
use std::fmt::Display;

/// Check mark
pub const CHECK: &str = "✓";

/// Semantic text styles
pub trait Stylize: Display + Sized {
    /// De-emphasized text
    fn muted(&self) -> String {
        self.dimmed().to_string()
    }

    /// Headings and labels
    fn emphasis(&self) -> String {
        self.bold().to_string()
    }

    /// Names and counts
    fn accent(&self) -> String {
        self.cyan().to_string()
    }

    /// Success messages
    fn success(&self) -> String {
        self.green().to_string()
    }

    /// Warnings
    fn warn(&self) -> String {
        self.yellow().to_string()
    }

    /// Errors
    fn error(&self) -> String {
        self.red().bold().to_string()
    }
}

impl<T: Display> Stylize for T {}

/// Styled check mark
pub fn check() -> String {
    CHECK.success()
}

/// Styled list arrow
pub fn arrow() -> String {
    "→".muted()
}

/// Style for spinners
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
}
