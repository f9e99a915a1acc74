//! Simulated network reconnaissance
//!
//! Produces a plausible scan report for any target without sending a single
//! packet. Stealth trades a longer simulated scan for a lower detection level.

use std::collections::BTreeMap;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::catalog::{self, Vulnerability};
use crate::utils::target::validate_scan_target;

pub use crate::catalog::Severity;

/// Simulated scan duration in seconds without stealth
pub const NORMAL_DELAY_RANGE: (f64, f64) = (0.5, 2.0);
/// Simulated scan duration in seconds with stealth
pub const STEALTH_DELAY_RANGE: (f64, f64) = (2.0, 5.0);
/// Bounds on the number of ports reported open
pub const OPEN_PORT_RANGE: (usize, usize) = (3, 8);
/// Bounds on the number of findings reported
pub const VULNERABILITY_RANGE: (usize, usize) = (1, 3);

/// Outcome of one simulated scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub open_ports: Vec<u16>,
    pub os_info: String,
    pub vulnerabilities: Vec<Vulnerability>,
    pub services: BTreeMap<u16, String>,
    pub detection_level: u8,
    pub scan_time: f64,
}

impl ScanResult {
    /// Simulated duration as a `Duration`
    pub fn scan_duration(&self) -> Duration {
        Duration::from_secs_f64(self.scan_time)
    }
}

/// Detection level of a scan: `min(100, base + 5*ports + 10*findings)`
pub fn scan_detection_level(stealth: bool, open_ports: usize, vulnerabilities: usize) -> u8 {
    let base = if stealth { 20 } else { 40 };
    let level = base + open_ports * 5 + vulnerabilities * 10;
    level.min(100) as u8
}

/// Network scan simulator
#[derive(Debug, Clone)]
pub struct ScanSimulator {
    common_ports: &'static [u16],
    os_signatures: &'static [&'static str],
    vulnerabilities: &'static [Vulnerability],
}

impl Default for ScanSimulator {
    fn default() -> Self {
        Self {
            common_ports: catalog::get_common_ports(),
            os_signatures: catalog::get_os_signatures(),
            vulnerabilities: catalog::get_vulnerabilities(),
        }
    }
}

impl ScanSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan a target with a freshly seeded generator
    pub async fn scan(&self, target: &str, stealth: bool) -> crate::Result<ScanResult> {
        let mut rng = StdRng::from_entropy();
        self.scan_with_rng(target, stealth, &mut rng).await
    }

    /// Scan a target, drawing every random choice from `rng`.
    ///
    /// Suspends for the simulated scan time without blocking the runtime.
    pub async fn scan_with_rng<R>(&self, target: &str, stealth: bool, rng: &mut R) -> crate::Result<ScanResult>
    where
        R: Rng + Send + ?Sized,
    {
        let result = self.simulate(target, stealth, rng)?;
        tokio::time::sleep(result.scan_duration()).await;
        Ok(result)
    }

    /// Compute a scan report without waiting out the simulated delay
    pub fn simulate<R>(&self, target: &str, stealth: bool, rng: &mut R) -> crate::Result<ScanResult>
    where
        R: Rng + ?Sized,
    {
        validate_scan_target(target)?;

        let (min_delay, max_delay) = if stealth { STEALTH_DELAY_RANGE } else { NORMAL_DELAY_RANGE };
        let scan_time = rng.gen_range(min_delay..=max_delay);

        let port_count = rng.gen_range(OPEN_PORT_RANGE.0..=OPEN_PORT_RANGE.1);
        let mut open_ports: Vec<u16> = self
            .common_ports
            .choose_multiple(rng, port_count)
            .copied()
            .collect();
        open_ports.sort_unstable();

        let os_info = self
            .os_signatures
            .choose(rng)
            .copied()
            .unwrap_or("Unknown")
            .to_string();

        let vuln_count = rng.gen_range(VULNERABILITY_RANGE.0..=VULNERABILITY_RANGE.1);
        let vulnerabilities: Vec<Vulnerability> = self
            .vulnerabilities
            .choose_multiple(rng, vuln_count)
            .cloned()
            .collect();

        let services = open_ports
            .iter()
            .map(|&port| (port, catalog::service_name(port).to_string()))
            .collect();

        let detection_level = scan_detection_level(stealth, open_ports.len(), vulnerabilities.len());

        Ok(ScanResult {
            open_ports,
            os_info,
            vulnerabilities,
            services,
            detection_level,
            scan_time,
        })
    }
}
