//! Utility modules shared by the library and the CLI

pub mod target;

use crate::bruteforce::BruteforceResult;
use crate::scanner::ScanResult;

/// Logging utilities
pub struct Logger;

impl Logger {
    /// Initialize logger with specified level
    pub fn init(level: log::LevelFilter) {
        env_logger::Builder::from_default_env()
            .filter_level(level)
            .format_timestamp_secs()
            .init();
    }

    /// Pick the log level from the CLI verbosity flag
    pub fn level_for(verbose: bool) -> log::LevelFilter {
        if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        }
    }

    /// Log scan completion
    pub fn log_scan_complete(target: &str, result: &ScanResult) {
        log::info!(
            "Scan of {} completed in {:.2}s - {} ports open, {} findings, detection {}%",
            target,
            result.scan_time,
            result.open_ports.len(),
            result.vulnerabilities.len(),
            result.detection_level
        );
    }

    /// Log crack completion
    pub fn log_crack_complete(target: &str, result: &BruteforceResult) {
        log::info!(
            "Crack of {} finished in {:.2}s - success={} after {} attempts ({}), detection {}%",
            target,
            result.time_elapsed,
            result.success,
            result.attempts,
            result.method_used,
            result.detection_level
        );
    }
}
