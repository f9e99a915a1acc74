//! Configuration module for the simulators

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Name of the per-user config file looked up in the home directory
pub const DEFAULT_CONFIG_FILE: &str = ".hackersim.toml";

/// Longest stealth login pause accepted, in seconds
pub const MAX_STEALTH_LOGIN_DELAY: f64 = 3600.0;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Fixed seed for reproducible runs; entropy when absent
    pub seed: Option<u64>,

    /// Timeout for credential prober requests in milliseconds
    pub http_timeout_ms: u64,

    /// User agent sent by the credential prober
    pub user_agent: String,

    /// Pause range (seconds) before a stealthy login trial
    pub stealth_login_delay: (f64, f64),

    /// Maximum candidates a hash crack may try
    pub hash_attempt_limit: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: None,
            http_timeout_ms: 5000,
            user_agent: format!("hackersim/{}", env!("CARGO_PKG_VERSION")),
            stealth_login_delay: (0.5, 2.0),
            hash_attempt_limit: None,
        }
    }
}

impl SimConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the HTTP timeout
    pub fn with_http_timeout(mut self, timeout_ms: u64) -> Self {
        self.http_timeout_ms = timeout_ms;
        self
    }

    /// Set the stealth login pause range
    pub fn with_stealth_login_delay(mut self, min_secs: f64, max_secs: f64) -> Self {
        self.stealth_login_delay = (min_secs, max_secs);
        self
    }

    /// Cap the number of candidates tried by hash cracking
    pub fn with_hash_attempt_limit(mut self, limit: u64) -> Self {
        self.hash_attempt_limit = Some(limit);
        self
    }

    /// Get timeout as Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http_timeout_ms)
    }

    /// Random generator for the `offset`-th simulation of a run.
    ///
    /// With a seed every offset gets its own reproducible stream, without one
    /// each call draws fresh entropy.
    pub fn rng(&self, offset: u64) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(offset)),
            None => StdRng::from_entropy(),
        }
    }

    /// Load configuration from TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;

        let config: SimConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load_default_config() -> Self {
        let home_dir = dirs::home_dir().unwrap_or_else(|| std::path::PathBuf::from("."));
        let config_path = home_dir.join(DEFAULT_CONFIG_FILE);

        if config_path.exists() {
            match Self::from_toml_file(&config_path) {
                Ok(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    return config;
                }
                Err(e) => log::warn!("Ignoring {}: {}", config_path.display(), e),
            }
        }

        Self::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> crate::Result<()> {
        if self.http_timeout_ms == 0 {
            return Err(crate::SimError::ConfigError(
                "HTTP timeout must be greater than 0".to_string(),
            ));
        }

        let (min, max) = self.stealth_login_delay;
        if !(min.is_finite() && max.is_finite()) || min < 0.0 || min > max || max > MAX_STEALTH_LOGIN_DELAY {
            return Err(crate::SimError::ConfigError(format!(
                "Invalid stealth login delay range: {}..{}",
                min, max
            )));
        }

        if self.hash_attempt_limit == Some(0) {
            return Err(crate::SimError::ConfigError(
                "Hash attempt limit must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.http_timeout(), Duration::from_secs(5));
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_validation_failures() {
        assert!(SimConfig::new().with_http_timeout(0).validate().is_err());
        assert!(SimConfig::new().with_stealth_login_delay(2.0, 1.0).validate().is_err());
        assert!(SimConfig::new().with_stealth_login_delay(-1.0, 1.0).validate().is_err());
        assert!(SimConfig::new().with_hash_attempt_limit(0).validate().is_err());
    }

    #[test]
    fn test_stealth_delay_upper_bound() {
        assert!(SimConfig::new().with_stealth_login_delay(0.0, MAX_STEALTH_LOGIN_DELAY).validate().is_ok());
        assert!(SimConfig::new().with_stealth_login_delay(0.0, 1e20).validate().is_err());
        assert!(SimConfig::new().with_stealth_login_delay(0.0, f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = SimConfig::new().with_seed(42);
        let a: u64 = config.rng(3).gen();
        let b: u64 = config.rng(3).gen();
        let c: u64 = config.rng(4).gen();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed = 7").unwrap();
        writeln!(file, "http_timeout_ms = 1500").unwrap();
        writeln!(file, "stealth_login_delay = [0.1, 0.2]").unwrap();

        let config = SimConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.http_timeout_ms, 1500);
        assert_eq!(config.stealth_login_delay, (0.1, 0.2));
        // Missing keys fall back to defaults
        assert!(config.hash_attempt_limit.is_none());
    }

    #[test]
    fn test_from_toml_file_rejects_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "http_timeout_ms = 0").unwrap();
        assert!(SimConfig::from_toml_file(file.path()).is_err());

        let missing = SimConfig::from_toml_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(missing, crate::SimError::IoError(_)));
    }
}
