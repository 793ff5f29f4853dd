//! `SAPISIDHASH` request signing.
//!
//! The web client authorizes `youtubei` calls with
//!
//! ```text
//! Authorization: SAPISIDHASH {ts}_{sha1_hex("{ts} {SAPISID} {origin}")}
//! ```
//!
//! where `ts` is the current Unix time in seconds. The server rejects stale
//! timestamps, so a fresh one is taken for every request.

use sha1::{Digest, Sha1};

/// Compute the `Authorization` header value for a given timestamp.
///
/// Pure function: identical inputs always give identical output.
pub fn sapisid_hash(timestamp: i64, signing_key: &str, origin: &str) -> String {
    let digest = Sha1::digest(format!("{timestamp} {signing_key} {origin}").as_bytes());
    format!("SAPISIDHASH {timestamp}_{digest:x}")
}

/// Compute the `Authorization` header value using the current wall clock.
pub fn sapisid_hash_now(signing_key: &str, origin: &str) -> String {
    sapisid_hash(chrono::Utc::now().timestamp(), signing_key, origin)
}
