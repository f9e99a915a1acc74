//! Fixed reference data shared by the simulators
//!
//! Everything here is built once on first access and never mutated, so the
//! tables can be read from any number of concurrent simulations.

use std::collections::HashMap;
use std::fmt;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Label reported for an open port missing from the service table
pub const UNKNOWN_SERVICE: &str = "Unknown Service";

/// Severity of a simulated finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        };
        f.write_str(label)
    }
}

/// A vulnerability record as reported by a scan
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vulnerability {
    pub name: String,
    pub severity: Severity,
    pub description: String,
}

impl Vulnerability {
    fn new(name: &str, severity: Severity, description: &str) -> Self {
        Self {
            name: name.to_string(),
            severity,
            description: description.to_string(),
        }
    }
}

/// Password complexity descriptor
#[derive(Debug)]
pub struct PasswordPattern {
    pub name: &'static str,
    pub regex: Regex,
}

/// Ports the scan simulator may report as open
pub fn get_common_ports() -> &'static [u16] {
    &[
        20, 21, 22, 23, 25,      // FTP data, FTP, SSH, Telnet, SMTP
        53, 80, 110, 143, 443,   // DNS, HTTP, POP3, IMAP, HTTPS
        465, 587, 993, 995,      // SMTPS, submission, IMAPS, POP3S
        3306, 3389, 5432,        // MySQL, RDP, PostgreSQL
        8080, 8443, 27017,       // Alt web, MongoDB
    ]
}

/// Port -> service label table
static SERVICE_TABLE: Lazy<HashMap<u16, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (21, "FTP"),
        (22, "SSH"),
        (23, "Telnet"),
        (25, "SMTP"),
        (53, "DNS"),
        (80, "HTTP"),
        (110, "POP3"),
        (143, "IMAP"),
        (443, "HTTPS"),
        (445, "SMB"),
        (3306, "MySQL"),
        (3389, "RDP"),
        (5432, "PostgreSQL"),
        (8080, "HTTP-Proxy"),
        (27017, "MongoDB"),
    ])
});

/// Look up the service label of a port
pub fn service_name(port: u16) -> &'static str {
    SERVICE_TABLE.get(&port).copied().unwrap_or(UNKNOWN_SERVICE)
}

/// OS signature strings a scan may report
pub fn get_os_signatures() -> &'static [&'static str] {
    &[
        "Linux 5.15.0-generic",
        "Windows Server 2019",
        "FreeBSD 13.0-RELEASE",
        "Ubuntu 22.04 LTS",
        "CentOS 8.5",
    ]
}

static VULNERABILITIES: Lazy<Vec<Vulnerability>> = Lazy::new(|| {
    vec![
        Vulnerability::new(
            "SQL Injection",
            Severity::High,
            "Web application vulnerable to SQL injection attacks",
        ),
        Vulnerability::new(
            "Weak Password Policy",
            Severity::Medium,
            "System allows weak passwords that can be easily cracked",
        ),
        Vulnerability::new(
            "Outdated OpenSSL",
            Severity::Critical,
            "System using vulnerable version of OpenSSL",
        ),
        Vulnerability::new(
            "Default Credentials",
            Severity::High,
            "Service using default manufacturer credentials",
        ),
        Vulnerability::new(
            "Open SMB Shares",
            Severity::Medium,
            "Unsecured SMB file shares accessible",
        ),
    ]
});

/// Vulnerability catalog
pub fn get_vulnerabilities() -> &'static [Vulnerability] {
    &VULNERABILITIES
}

/// Dictionary used by plain cracks and level 1/2 wordlists
pub fn get_common_passwords() -> &'static [&'static str] {
    &[
        "password", "123456", "qwerty", "admin",
        "letmein", "welcome", "monkey", "dragon",
        "baseball", "football", "master", "hello",
        "shadow", "superman", "trustno1", "hunter2",
    ]
}

/// Names a "name" hint can expand to
pub const HINT_NAMES: [&str; 4] = ["john", "alice", "bob", "admin"];

/// Symbols a "special" hint can expand to
pub const HINT_SYMBOLS: [char; 4] = ['!', '@', '#', '$'];

static PASSWORD_PATTERNS: Lazy<Vec<PasswordPattern>> = Lazy::new(|| {
    [
        ("Simple lowercase", r"^[a-z]{6,8}$"),
        ("Alphanumeric", r"^[a-z0-9]{8,10}$"),
        ("Mixed case alphanumeric", r"^[A-Za-z0-9]{8,12}$"),
        ("Complex", r"^[A-Za-z0-9!@#$%^&*()]{10,16}$"),
    ]
    .into_iter()
    .filter_map(|(name, pattern)| Regex::new(pattern).ok().map(|regex| PasswordPattern { name, regex }))
    .collect()
});

/// Complexity descriptors, simplest first
pub fn get_password_patterns() -> &'static [PasswordPattern] {
    &PASSWORD_PATTERNS
}

/// Name of the first complexity descriptor a password satisfies
pub fn classify_password(password: &str) -> Option<&'static str> {
    PASSWORD_PATTERNS
        .iter()
        .find(|pattern| pattern.regex.is_match(password))
        .map(|pattern| pattern.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_common_ports_are_distinct() {
        let ports = get_common_ports();
        assert_eq!(ports.len(), 20);
        let unique: HashSet<_> = ports.iter().collect();
        assert_eq!(unique.len(), ports.len());
    }

    #[test]
    fn test_service_lookup() {
        assert_eq!(service_name(22), "SSH");
        assert_eq!(service_name(27017), "MongoDB");
        // 465 is a common port without a table entry
        assert_eq!(service_name(465), UNKNOWN_SERVICE);
    }

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(get_os_signatures().len(), 5);
        assert_eq!(get_vulnerabilities().len(), 5);
        assert_eq!(get_common_passwords().len(), 16);
        assert_eq!(get_password_patterns().len(), 4);
    }

    #[test]
    fn test_classify_password() {
        assert_eq!(classify_password("shadow"), Some("Simple lowercase"));
        assert_eq!(classify_password("trustno1"), Some("Alphanumeric"));
        assert_eq!(classify_password("Alice1984x"), Some("Mixed case alphanumeric"));
        assert_eq!(classify_password("Alice1984!@#"), Some("Complex"));
        assert_eq!(classify_password("abc"), None);
    }

    #[test]
    fn test_severity_serializes_as_label() {
        let json = serde_json::to_string(&Severity::Critical).unwrap();
        assert_eq!(json, "\"Critical\"");
        assert_eq!(Severity::Medium.to_string(), "Medium");
    }
}
