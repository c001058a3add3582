//! PIN credentials and the lockout state machine.
//!
//! Stored credential format: `pbkdf2_sha256$<iterations>$<salt>$<digest>`
//! with base64-encoded 16-byte salt and 32-byte digest. Credentials below
//! the iteration floor are treated as invalid even if they parse, so a
//! downgraded hash can never authenticate. No plaintext PIN is ever logged.

use crate::db::attempts::failed_attempts_since;
use crate::db::employees::active_credentials;
use crate::db::settings::PunchPolicy;
use crate::errors::AppResult;
use crate::utils::time::{format_utc, parse_utc};
use base64::prelude::*;
use chrono::{DateTime, Duration, Utc};
use hmac::Hmac;
use rand::RngCore;
use rand::rngs::OsRng;
use rusqlite::Connection;
use sha2::Sha256;
use subtle::ConstantTimeEq;

const SCHEME: &str = "pbkdf2_sha256";
const DEFAULT_ITERATIONS: u32 = 200_000;
const MIN_ITERATIONS: u32 = 150_000;
const SALT_LEN: usize = 16;
const DIGEST_LEN: usize = 32;

pub fn make_pin_hash(pin: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);

    let mut digest = [0u8; DIGEST_LEN];
    pbkdf2::pbkdf2::<Hmac<Sha256>>(pin.as_bytes(), &salt, DEFAULT_ITERATIONS, &mut digest);

    format!(
        "{}${}${}${}",
        SCHEME,
        DEFAULT_ITERATIONS,
        BASE64_STANDARD.encode(salt),
        BASE64_STANDARD.encode(digest)
    )
}

fn parse_stored(stored: &str) -> Option<(u32, Vec<u8>, Vec<u8>)> {
    let mut parts = stored.split('$');
    let scheme = parts.next()?;
    let iterations: u32 = parts.next()?.parse().ok()?;
    let salt = BASE64_STANDARD.decode(parts.next()?).ok()?;
    let digest = BASE64_STANDARD.decode(parts.next()?).ok()?;
    if parts.next().is_some() {
        return None;
    }

    if scheme != SCHEME || iterations < MIN_ITERATIONS || salt.len() != SALT_LEN {
        return None;
    }
    Some((iterations, salt, digest))
}

/// Constant-time verification of a plaintext PIN against a stored credential.
/// Any malformed or below-floor credential simply fails to verify.
pub fn verify_pin(pin: &str, stored: &str) -> bool {
    let Some((iterations, salt, expected)) = parse_stored(stored) else {
        return false;
    };

    let mut computed = [0u8; DIGEST_LEN];
    pbkdf2::pbkdf2::<Hmac<Sha256>>(pin.as_bytes(), &salt, iterations, &mut computed);

    computed.ct_eq(expected.as_slice()).into()
}

/// Scan all active employees for a credential matching `pin`. Disabled
/// employees are never considered, even with the correct underlying PIN.
pub fn verify_employee_pin(conn: &Connection, pin: &str) -> AppResult<Option<i64>> {
    for (emp_id, pin_hash) in active_credentials(conn)? {
        if verify_pin(pin, &pin_hash) {
            return Ok(Some(emp_id));
        }
    }
    Ok(None)
}

/// Lockout check for `source` at instant `now`.
///
/// Counts failed attempts within the sliding window `[now − window, now]`;
/// at or above the threshold the lockout runs from the most recent failure,
/// not the oldest, so it expires `lockout_minutes` after the last failure.
/// Returns the `locked_until` timestamp while locked.
pub fn check_lockout(
    conn: &Connection,
    policy: &PunchPolicy,
    source: &str,
    now: DateTime<Utc>,
) -> AppResult<Option<String>> {
    let window_start = format_utc(now - Duration::seconds(policy.pin_attempt_window_seconds));
    let failures = failed_attempts_since(conn, source, &window_start)?;

    if failures.is_empty() || failures.len() < policy.pin_max_attempts_per_window {
        return Ok(None);
    }

    let most_recent = parse_utc(&failures[0])?;
    let locked_until = most_recent + Duration::minutes(policy.lockout_minutes);
    if now < locked_until {
        Ok(Some(format_utc(locked_until)))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let stored = make_pin_hash("1234");
        assert!(stored.starts_with("pbkdf2_sha256$200000$"));
        assert!(verify_pin("1234", &stored));
        assert!(!verify_pin("4321", &stored));
    }

    #[test]
    fn salts_are_unique_per_credential() {
        assert_ne!(make_pin_hash("1234"), make_pin_hash("1234"));
    }

    #[test]
    fn below_floor_iterations_are_rejected() {
        let salt = BASE64_STANDARD.encode([7u8; SALT_LEN]);
        let digest = BASE64_STANDARD.encode([0u8; DIGEST_LEN]);
        let stored = format!("pbkdf2_sha256$1000${salt}${digest}");
        assert!(parse_stored(&stored).is_none());
        assert!(!verify_pin("1234", &stored));
    }

    #[test]
    fn malformed_credentials_never_verify() {
        assert!(!verify_pin("1234", ""));
        assert!(!verify_pin("1234", "plaintext"));
        assert!(!verify_pin("1234", "md5$1$x$y"));
        assert!(!verify_pin("1234", "pbkdf2_sha256$200000$notb64$$"));
    }
}
