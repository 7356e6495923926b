// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display helpers for stage summaries.
//!
//! Everything goes to stderr so stdout stays free for pipelines. Colors are
//! plain 16-color ANSI, disabled by `NO_COLOR` or when stderr is not a TTY.

use std::path::Path;
use std::time::Duration;

pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
}

pub use colors::*;

/// Check if colors should be used (TTY detection)
pub fn use_colors() -> bool {
    // Respect NO_COLOR standard
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stderr)
}

/// Apply color if TTY, otherwise return plain text
pub fn color(c: &str, text: &str) -> String {
    if use_colors() {
        format!("{}{}{}", c, text, RESET)
    } else {
        text.to_string()
    }
}

/// Apply multiple styles if TTY
pub fn styled(styles: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}", styles.join(""), text, RESET)
    } else {
        text.to_string()
    }
}

/// "✓ <what>" on stderr.
pub fn success(what: &str) {
    eprintln!("{} {}", color(GREEN, "✓"), what);
}

/// "✓ wrote <label> to <path>" on stderr.
pub fn wrote(label: &str, path: &Path) {
    success(&format!(
        "wrote {} to {}",
        label,
        styled(&[BOLD], &path.display().to_string())
    ));
}

/// "✗ <stage>: <error>" on stderr, once per failed stage.
pub fn failure(stage: &str, error: &anyhow::Error) {
    eprintln!("{} {}: {:#}", color(RED, "✗"), stage, error);
}

pub fn warning(message: &str) {
    eprintln!("{} {}", color(YELLOW, "!"), message);
}

/// Human-readable elapsed time: milliseconds below a second, seconds above.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs < 1.0 {
        format!("{:.1}ms", secs * 1000.0)
    } else {
        format!("{:.3}s", secs)
    }
}

pub fn elapsed(elapsed: Duration) {
    eprintln!(
        "{} {}",
        color(DIM, "elapsed"),
        color(CYAN, &format_elapsed(elapsed))
    );
}
