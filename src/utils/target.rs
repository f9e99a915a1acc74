//! Target validation for the simulators
//!
//! Scans accept any non-empty identifier (the game invents hosts freely),
//! cracks need something that looks like a URL. `describe_target` is only
//! informational and never rejects anything a validator accepted.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use reqwest::Url;

use crate::error::{SimError, SimResult};

/// Kind of target identifier supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetType {
    Ipv4,
    Ipv6,
    Url,
    Hostname,
}

/// Target identifier with its detected type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTarget {
    pub original: String,
    pub target_type: TargetType,
}

/// Validate a scan target: anything non-blank is accepted
pub fn validate_scan_target(target: &str) -> SimResult<&str> {
    let trimmed = target.trim();
    if trimmed.is_empty() {
        return Err(SimError::InvalidTarget("Target cannot be empty".to_string()));
    }
    Ok(trimmed)
}

/// Validate a crack target: must be an absolute URL with a host
pub fn validate_url_target(target: &str) -> SimResult<Url> {
    let trimmed = validate_scan_target(target)?;
    let url = Url::parse(trimmed)
        .map_err(|e| SimError::InvalidTarget(format!("{}: {}", trimmed, e)))?;

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(SimError::InvalidTarget(format!("{}: URL has no host", trimmed))),
    }
}

/// Classify a target string without rejecting it
pub fn describe_target(target: &str) -> ParsedTarget {
    let trimmed = target.trim();
    let target_type = if Ipv4Addr::from_str(trimmed).is_ok() {
        TargetType::Ipv4
    } else if Ipv6Addr::from_str(trimmed).is_ok() {
        TargetType::Ipv6
    } else if validate_url_target(trimmed).is_ok() {
        TargetType::Url
    } else {
        TargetType::Hostname
    };

    ParsedTarget {
        original: trimmed.to_string(),
        target_type,
    }
}
