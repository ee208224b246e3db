//! Mock electronic authorization codes (CAE).
//!
//! Codes are placeholders, not issued by any tax authority: 14 random
//! decimal digits with no uniqueness check across invoices.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Smallest 14-digit code.
pub const CODE_MIN: u64 = 10_000_000_000_000;
/// Largest 14-digit code.
pub const CODE_MAX: u64 = 99_999_999_999_999;

/// Days an authorization code stays valid after issue.
pub const AUTHORIZATION_VALIDITY_DAYS: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorizationCode(String);

impl AuthorizationCode {
    pub fn from_value(value: u64) -> Self {
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for AuthorizationCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Expiry of a code issued at `issued_at`.
pub fn authorization_expiry(issued_at: DateTime<Utc>) -> DateTime<Utc> {
    issued_at + Duration::days(AUTHORIZATION_VALIDITY_DAYS)
}

/// Uniformly sample a code in `[CODE_MIN, CODE_MAX]`.
pub fn generate_authorization_code() -> AuthorizationCode {
    let value = rand::thread_rng().gen_range(CODE_MIN..=CODE_MAX);
    AuthorizationCode::from_value(value)
}

/// Source of authorization codes used by the ledger.
pub trait AuthorizationCodeSource: Send + Sync {
    fn next_code(&self) -> AuthorizationCode;
}

/// Pseudo-random codes (default).
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCodeSource;

impl AuthorizationCodeSource for RandomCodeSource {
    fn next_code(&self) -> AuthorizationCode {
        generate_authorization_code()
    }
}

/// Deterministic codes counting up from a starting value (tests/dev).
#[derive(Debug)]
pub struct SequentialCodeSource {
    next: AtomicU64,
}

impl SequentialCodeSource {
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl Default for SequentialCodeSource {
    fn default() -> Self {
        Self::starting_at(CODE_MIN)
    }
}

impl AuthorizationCodeSource for SequentialCodeSource {
    fn next_code(&self) -> AuthorizationCode {
        AuthorizationCode::from_value(self.next.fetch_add(1, Ordering::Relaxed))
    }
}
