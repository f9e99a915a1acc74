//! Salted hash comparison over a candidate sequence

use std::fmt::Write;

use openssl::sha::sha256;

use super::wordlist::{Complexity, Wordlist};

/// Hex SHA-256 of `password` followed by `salt`
pub fn hash_password(password: &str, salt: &str) -> String {
    let digest = sha256(format!("{}{}", password, salt).as_bytes());
    digest.iter().fold(String::with_capacity(64), |mut hex, byte| {
        let _ = write!(hex, "{:02x}", byte);
        hex
    })
}

/// Outcome of a hash crack walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashCrackOutcome {
    pub password: Option<String>,
    pub attempts: u64,
}

/// Walks candidate passwords looking for a salted SHA-256 match
#[derive(Debug, Clone)]
pub struct HashCracker {
    salt: String,
    limit: Option<u64>,
}

impl HashCracker {
    pub fn new(salt: impl Into<String>) -> Self {
        Self {
            salt: salt.into(),
            limit: None,
        }
    }

    /// Stop after `limit` candidates
    pub fn with_limit(mut self, limit: Option<u64>) -> Self {
        self.limit = limit;
        self
    }

    /// Try every candidate until one hashes to `target_hash` or the sequence
    /// (or the attempt limit) runs out
    pub fn crack<I>(&self, target_hash: &str, candidates: I) -> HashCrackOutcome
    where
        I: IntoIterator<Item = String>,
    {
        let target = target_hash.trim().to_ascii_lowercase();
        let limit = self.limit.unwrap_or(u64::MAX);
        let mut attempts = 0u64;

        for candidate in candidates {
            if attempts >= limit {
                log::debug!("Hash crack stopped at attempt limit {}", limit);
                break;
            }
            attempts += 1;
            if hash_password(&candidate, &self.salt) == target {
                log::debug!("Hash matched after {} candidates", attempts);
                return HashCrackOutcome {
                    password: Some(candidate),
                    attempts,
                };
            }
        }

        log::debug!("No candidate matched after {} attempts", attempts);
        HashCrackOutcome {
            password: None,
            attempts,
        }
    }
}

/// Crack a salted hash with the numeric (level 2) wordlist
pub fn crack_hash(target_hash: &str, salt: &str) -> Option<String> {
    HashCracker::new(salt)
        .crack(target_hash, Wordlist::new(Complexity::Numeric))
        .password
}
