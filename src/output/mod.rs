//! Output formatting for simulation results

use colored::*;
use serde::Serialize;

use crate::bruteforce::BruteforceResult;
use crate::catalog::{classify_password, Severity};
use crate::scanner::ScanResult;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub colored: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            colored: true,
        }
    }
}

/// Renders simulation results for the terminal
pub struct OutputManager {
    config: OutputConfig,
}

impl OutputManager {
    pub fn new(config: OutputConfig) -> Self {
        if !config.colored {
            colored::control::set_override(false);
        }
        Self { config }
    }

    pub fn format(&self) -> OutputFormat {
        self.config.format
    }

    /// Render the reports of one or more scans of `target`.
    ///
    /// JSON output is a single document: an object for one result, an array
    /// otherwise.
    pub fn render_scans(&self, target: &str, results: &[ScanResult]) -> serde_json::Result<String> {
        match self.config.format {
            OutputFormat::Json => batch_json(results),
            OutputFormat::Text => Ok(join_reports(results.iter().map(|r| scan_text(target, r)))),
        }
    }

    /// Render the outcomes of one or more cracks of `target`
    pub fn render_cracks(&self, target: &str, results: &[BruteforceResult]) -> serde_json::Result<String> {
        match self.config.format {
            OutputFormat::Json => batch_json(results),
            OutputFormat::Text => Ok(join_reports(results.iter().map(|r| crack_text(target, r)))),
        }
    }
}

fn batch_json<T: Serialize>(results: &[T]) -> serde_json::Result<String> {
    match results {
        [single] => serde_json::to_string_pretty(single),
        _ => serde_json::to_string_pretty(results),
    }
}

fn join_reports(reports: impl Iterator<Item = String>) -> String {
    reports.collect::<Vec<_>>().join("\n\n")
}

fn detection_label(level: u8) -> ColoredString {
    let text = format!("{}%", level);
    match level {
        0..=39 => text.bright_green(),
        40..=69 => text.bright_yellow(),
        _ => text.bright_red(),
    }
}

fn severity_label(severity: Severity) -> ColoredString {
    let text = severity.to_string();
    match severity {
        Severity::Low => text.bright_white(),
        Severity::Medium => text.bright_yellow(),
        Severity::High => text.bright_red(),
        Severity::Critical => text.red().bold(),
    }
}

fn scan_text(target: &str, result: &ScanResult) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Scan report for {}", target.bright_cyan()));
    lines.push(format!("OS: {}", result.os_info.bright_white()));
    lines.push(format!(
        "{:<10} {:<8} {}",
        "PORT".bright_white().bold(),
        "STATE".bright_white().bold(),
        "SERVICE".bright_white().bold()
    ));
    for (port, service) in &result.services {
        lines.push(format!(
            "{:<10} {:<8} {}",
            format!("{}/tcp", port),
            "open".bright_green(),
            service.bright_yellow()
        ));
    }

    lines.push("Vulnerabilities:".to_string());
    for vuln in &result.vulnerabilities {
        lines.push(format!(
            "  - {} [{}] {}",
            vuln.name.bright_white(),
            severity_label(vuln.severity),
            vuln.description
        ));
    }

    lines.push(format!(
        "Scan time: {:.2}s, detection level: {}",
        result.scan_time,
        detection_label(result.detection_level)
    ));
    lines.join("\n")
}

fn crack_text(target: &str, result: &BruteforceResult) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Bruteforce against {}", target.bright_cyan()));

    match &result.password {
        Some(password) => {
            lines.push(format!("{} password recovered: {}", "[✓]".bright_green(), password.bright_green().bold()));
            if let Some(pattern) = classify_password(password) {
                lines.push(format!("    complexity: {}", pattern));
            }
        }
        None => lines.push(format!("{} no password recovered", "[!]".bright_red())),
    }

    lines.push(format!(
        "Method: {}, attempts: {}, time: {:.2}s, detection level: {}",
        result.method_used,
        result.attempts,
        result.time_elapsed,
        detection_label(result.detection_level)
    ));
    lines.join("\n")
}
