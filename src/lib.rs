//! Hackersim - recon and cracking outcomes for terminal hacking games
//!
//! Nothing here touches a real network on the simulated paths: scans and
//! cracks are invented from fixed catalogs and an injectable random source.

pub mod bruteforce;
pub mod catalog;
pub mod config;
pub mod error;
pub mod output;
pub mod scanner;
pub mod utils;

// Re-export commonly used types
pub use bruteforce::{AttackMethod, BruteforceResult, BruteforceSimulator};
pub use config::SimConfig;
pub use error::{SimError, SimResult};
pub use scanner::{ScanResult, ScanSimulator, Severity};
pub use catalog::Vulnerability;

pub type Result<T> = std::result::Result<T, SimError>;
