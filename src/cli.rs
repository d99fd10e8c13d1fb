//! Shared CLI output helpers for Verax binaries.

use std::time::Instant;

use colored::Colorize;

use crate::findings::{Severity, ValidationFinding};
use crate::perf;

pub fn banner(subtitle: &str) {
    eprintln!();
    eprintln!("{} {}", "Verax".bold().cyan(), subtitle.dimmed());
    eprintln!();
}

pub fn section(title: &str) {
    let bar = "─".repeat(50);
    eprintln!("{} {}", title.bold().blue(), bar.dimmed());
}

pub fn kv(key: &str, value: &str) {
    eprintln!("  {:<22} {}", key.dimmed(), value);
}

pub fn success(msg: &str) {
    eprintln!("  {} {}", "✓".green().bold(), msg);
}

/// Print one finding, colored by severity.
pub fn finding(f: &ValidationFinding) {
    let line = f.to_string();
    match f.severity() {
        Severity::Warning => eprintln!("  {} {}", "⚠".yellow(), line.yellow()),
        Severity::Error => eprintln!("  {} {}", "✗".red(), line),
        Severity::Fatal => eprintln!("  {} {}", "✗".red().bold(), line.red().bold()),
    }
}

pub fn print_summary(start: Instant) {
    let elapsed = start.elapsed();
    eprintln!();
    eprintln!(
        "{}  {}\n{}  {}",
        "Time".dimmed(),
        perf::format_elapsed(elapsed).bold(),
        "Peak memory".dimmed(),
        perf::peak_memory_bytes()
            .map(perf::format_bytes)
            .unwrap_or_else(|| "N/A".to_string())
            .bold(),
    );
    eprintln!();
}
