//! Spinner and score bar helpers for CLI output

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const SCORE_BAR_WIDTH: usize = 40;

/// Create a spinner for indeterminate operations
pub fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Spinner without a terminal, used for `--json` runs
pub fn hidden_spinner() -> ProgressBar {
    ProgressBar::hidden()
}

pub fn finish_spinner_success(spinner: &ProgressBar, message: &str) {
    finish_with_prefix(spinner, "{prefix:.green} {msg}", "✓", message);
}

pub fn finish_spinner_error(spinner: &ProgressBar, message: &str) {
    finish_with_prefix(spinner, "{prefix:.red} {msg}", "✗", message);
}

fn finish_with_prefix(spinner: &ProgressBar, template: &str, prefix: &str, message: &str) {
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template(template)
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_prefix(prefix.to_string());
    spinner.finish_with_message(message.to_string());
}

/// Number of filled cells for a 0-100 score
pub fn filled_cells(score: u8, width: usize) -> usize {
    (usize::from(score.min(100)) * width + 50) / 100
}

/// Fixed-width readiness bar, colored by band
pub fn score_bar(score: u8) -> String {
    let filled = filled_cells(score, SCORE_BAR_WIDTH);
    let bar = format!(
        "{}{}",
        "█".repeat(filled),
        "░".repeat(SCORE_BAR_WIDTH - filled)
    );

    match score {
        80..=u8::MAX => bar.green().to_string(),
        40..=79 => bar.yellow().to_string(),
        _ => bar.red().to_string(),
    }
}
