//! Simulated password cracking
//!
//! `BruteforceSimulator::crack` is the game-facing operation: it invents an
//! outcome whose odds, attempt count and noise depend on stealth and hints.
//! The submodules hold the offline helpers (wordlists, hash cracking, live
//! credential probing) that are not part of the simulated request path.

pub mod hash;
pub mod hints;
pub mod prober;
pub mod wordlist;

use std::fmt;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::utils::target::validate_url_target;

pub use hash::{crack_hash, hash_password, HashCrackOutcome, HashCracker};
pub use hints::generate_password_from_hints;
pub use prober::{ApiAuth, AuthMethod, BasicAuth, CredentialProber, Credentials, FormAuth};
pub use wordlist::{Complexity, Wordlist};

/// Simulated crack duration in seconds without stealth
pub const NORMAL_DELAY_RANGE: (f64, f64) = (1.0, 4.0);
/// Simulated crack duration in seconds with stealth
pub const STEALTH_DELAY_RANGE: (f64, f64) = (3.0, 8.0);
/// Attempt count bounds without stealth
pub const NORMAL_ATTEMPTS: (u32, u32) = (1000, 10000);
/// Attempt count bounds with stealth
pub const STEALTH_ATTEMPTS: (u32, u32) = (100, 1000);

/// Success chance with and without hints, before the stealth penalty
const HINTED_CHANCE: f64 = 0.4;
const BLIND_CHANCE: f64 = 0.2;
const STEALTH_CHANCE_FACTOR: f64 = 0.7;

/// How the reported password was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttackMethod {
    Dictionary,
    Smart,
}

impl fmt::Display for AttackMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttackMethod::Dictionary => f.write_str("dictionary"),
            AttackMethod::Smart => f.write_str("smart"),
        }
    }
}

/// Outcome of one simulated crack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BruteforceResult {
    pub success: bool,
    pub password: Option<String>,
    pub attempts: u32,
    pub time_elapsed: f64,
    pub method_used: AttackMethod,
    pub detection_level: u8,
}

/// Probability that a crack succeeds
pub fn success_chance(stealth: bool, has_hints: bool) -> f64 {
    let base = if has_hints { HINTED_CHANCE } else { BLIND_CHANCE };
    if stealth {
        base * STEALTH_CHANCE_FACTOR
    } else {
        base
    }
}

/// Detection level of a crack: `min(100, base + attempts / (max_attempts / 100))`
pub fn crack_detection_level(stealth: bool, attempts: u32) -> u8 {
    let (base, max_attempts) = if stealth {
        (30.0, STEALTH_ATTEMPTS.1)
    } else {
        (60.0, NORMAL_ATTEMPTS.1)
    };
    let modifier = f64::from(attempts) / (f64::from(max_attempts) / 100.0);
    let level = (base + modifier) as u32;
    level.min(100) as u8
}

/// Password cracking simulator
#[derive(Debug, Clone)]
pub struct BruteforceSimulator {
    common_passwords: &'static [&'static str],
}

impl Default for BruteforceSimulator {
    fn default() -> Self {
        Self {
            common_passwords: catalog::get_common_passwords(),
        }
    }
}

impl BruteforceSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Crack a target with a freshly seeded generator
    pub async fn crack(&self, target: &str, stealth: bool, hints: Option<&[String]>) -> crate::Result<BruteforceResult> {
        let mut rng = StdRng::from_entropy();
        self.crack_with_rng(target, stealth, hints, &mut rng).await
    }

    /// Crack a target, drawing every random choice from `rng`.
    ///
    /// `time_elapsed` is the measured duration of the call, which is the
    /// simulated delay plus scheduling noise.
    pub async fn crack_with_rng<R>(
        &self,
        target: &str,
        stealth: bool,
        hints: Option<&[String]>,
        rng: &mut R,
    ) -> crate::Result<BruteforceResult>
    where
        R: Rng + Send + ?Sized,
    {
        let start = tokio::time::Instant::now();
        let mut result = self.simulate(target, stealth, hints, rng)?;
        tokio::time::sleep(Duration::from_secs_f64(result.time_elapsed)).await;
        result.time_elapsed = start.elapsed().as_secs_f64();
        Ok(result)
    }

    /// Compute a crack outcome without waiting; `time_elapsed` holds the
    /// simulated delay.
    pub fn simulate<R>(
        &self,
        target: &str,
        stealth: bool,
        hints: Option<&[String]>,
        rng: &mut R,
    ) -> crate::Result<BruteforceResult>
    where
        R: Rng + ?Sized,
    {
        validate_url_target(target)?;

        let (min_delay, max_delay) = if stealth { STEALTH_DELAY_RANGE } else { NORMAL_DELAY_RANGE };
        let delay = rng.gen_range(min_delay..=max_delay);

        let hints = hints.filter(|h| !h.is_empty());
        let chance = success_chance(stealth, hints.is_some());

        let (min_attempts, max_attempts) = if stealth { STEALTH_ATTEMPTS } else { NORMAL_ATTEMPTS };
        let attempts = rng.gen_range(min_attempts..=max_attempts);

        let success = rng.gen_bool(chance);

        let (password, method_used) = match (success, hints) {
            (false, _) => (None, AttackMethod::Dictionary),
            (true, Some(hints)) => (Some(generate_password_from_hints(hints, rng)), AttackMethod::Smart),
            (true, None) => {
                let word = self.common_passwords.choose(rng).copied().unwrap_or("password");
                (Some(word.to_string()), AttackMethod::Dictionary)
            }
        };

        Ok(BruteforceResult {
            success,
            password,
            attempts,
            time_elapsed: delay,
            method_used,
            detection_level: crack_detection_level(stealth, attempts),
        })
    }

    /// Crack a salted SHA-256 hash offline using the numeric wordlist
    pub fn crack_hash(&self, target_hash: &str, salt: &str, limit: Option<u64>) -> HashCrackOutcome {
        HashCracker::new(salt)
            .with_limit(limit)
            .crack(target_hash, Wordlist::with_words(Complexity::Numeric, self.common_passwords))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    fn hints(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_success_chance() {
        assert!((success_chance(false, false) - 0.2).abs() < 1e-9);
        assert!((success_chance(false, true) - 0.4).abs() < 1e-9);
        assert!((success_chance(true, false) - 0.14).abs() < 1e-9);
        assert!((success_chance(true, true) - 0.28).abs() < 1e-9);
    }

    #[test]
    fn test_detection_formula() {
        assert_eq!(crack_detection_level(true, 100), 40);
        assert_eq!(crack_detection_level(true, 555), 85);
        assert_eq!(crack_detection_level(true, 1000), 100);
        assert_eq!(crack_detection_level(false, 1000), 70);
        assert_eq!(crack_detection_level(false, 3999), 99);
        assert_eq!(crack_detection_level(false, 10000), 100);
    }

    #[test]
    fn test_attempt_ranges() {
        let simulator = BruteforceSimulator::new();
        for seed in 0..200 {
            let stealthy = simulator.simulate("https://example.com/login", true, None, &mut seeded(seed)).unwrap();
            assert!((100..=1000).contains(&stealthy.attempts));
            assert!((3.0..=8.0).contains(&stealthy.time_elapsed));

            let loud = simulator.simulate("https://example.com/login", false, None, &mut seeded(seed)).unwrap();
            assert!((1000..=10000).contains(&loud.attempts));
            assert!((1.0..=4.0).contains(&loud.time_elapsed));
        }
    }

    #[test]
    fn test_password_iff_success() {
        let simulator = BruteforceSimulator::new();
        let with_hints = hints(&["pet name", "birth year"]);
        for seed in 0..300 {
            let hinted = seed % 2 == 0;
            let result = simulator
                .simulate("https://example.com/login", seed % 3 == 0, hinted.then_some(with_hints.as_slice()), &mut seeded(seed))
                .unwrap();
            assert_eq!(result.password.is_some(), result.success);
            assert_eq!(result.method_used == AttackMethod::Smart, hinted && result.success);
            assert!(result.detection_level <= 100);
        }
    }

    #[test]
    fn test_dictionary_success_uses_common_password() {
        let simulator = BruteforceSimulator::new();
        let mut successes = 0;
        for seed in 0..200 {
            let result = simulator.simulate("https://example.com/login", false, None, &mut seeded(seed)).unwrap();
            if let Some(password) = result.password {
                successes += 1;
                assert!(catalog::get_common_passwords().contains(&password.as_str()));
                assert_eq!(result.method_used, AttackMethod::Dictionary);
            }
        }
        assert!(successes > 0);
    }

    #[test]
    fn test_empty_hint_list_counts_as_no_hints() {
        let simulator = BruteforceSimulator::new();
        let empty: Vec<String> = Vec::new();
        for seed in 0..100 {
            let result = simulator
                .simulate("https://example.com/login", false, Some(&empty), &mut seeded(seed))
                .unwrap();
            assert_eq!(result.method_used, AttackMethod::Dictionary);
        }
    }

    #[test]
    fn test_invalid_targets() {
        let simulator = BruteforceSimulator::new();
        assert!(simulator.simulate("", false, None, &mut seeded(0)).unwrap_err().is_invalid_target());
        assert!(simulator.simulate("not_a_url", false, None, &mut seeded(0)).unwrap_err().is_invalid_target());
    }

    #[test]
    fn test_method_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&AttackMethod::Smart).unwrap(), "\"smart\"");
        assert_eq!(AttackMethod::Dictionary.to_string(), "dictionary");
    }

    #[test]
    fn test_failed_crack_serializes_null_password() {
        let result = BruteforceResult {
            success: false,
            password: None,
            attempts: 1234,
            time_elapsed: 1.5,
            method_used: AttackMethod::Dictionary,
            detection_level: 72,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["password"].is_null());
        assert_eq!(json["method_used"], "dictionary");
    }

    #[test]
    fn test_crack_hash_with_simulator_dictionary() {
        let simulator = BruteforceSimulator::new();
        let outcome = simulator.crack_hash(&hash_password("hunter299", "s"), "s", None);
        assert_eq!(outcome.password.as_deref(), Some("hunter299"));

        let limited = simulator.crack_hash(&hash_password("hunter299", "s"), "s", Some(10));
        assert_eq!(limited.password, None);
        assert_eq!(limited.attempts, 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_crack_reports_measured_time() {
        let simulator = BruteforceSimulator::new();
        let result = simulator.crack("https://example.com/login", true, None).await.unwrap();
        assert!(result.time_elapsed >= 3.0 && result.time_elapsed <= 8.1);
    }
}
