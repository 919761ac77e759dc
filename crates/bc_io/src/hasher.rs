//! crates/bc_io/src/hasher.rs
//!
//! Deterministic hashing and id builders over canonical JSON.
//!
//! - Use `sha256_canonical(..)` for JSON values/structs (goes through canonical_json).
//! - Use `sha256_hex(..)` for raw bytes.
//! - Hex digests are lowercase.

#![forbid(unsafe_code)]

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::canonical_json::to_canonical_bytes;
use crate::IoError;

/// Prefix of estimate record ids.
pub const ESTIMATE_ID_PREFIX: &str = "EST:";
/// Number of hex characters kept in an estimate id.
pub const ESTIMATE_ID_HEX_LEN: usize = 16;

/// SHA-256 over raw bytes, lowercase hex.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// SHA-256 over the canonical JSON bytes of any serializable value.
pub fn sha256_canonical<T: Serialize>(value: &T) -> Result<String, IoError> {
    let bytes = to_canonical_bytes(value)?;
    Ok(sha256_hex(&bytes))
}

/// `EST:<first 16 hex>` of the canonical bytes of an id-less record.
pub fn estimate_id_from_canonical<T: Serialize>(value: &T) -> Result<String, IoError> {
    let hex64 = sha256_canonical(value)?;
    Ok(format!("{ESTIMATE_ID_PREFIX}{}", short_hex(&hex64, ESTIMATE_ID_HEX_LEN)?))
}

/// Lowercase 64-hex check.
pub fn is_hex64(s: &str) -> bool {
    s.len() == 64 && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

fn short_hex(hex64: &str, n: usize) -> Result<&str, IoError> {
    if !is_hex64(hex64) {
        return Err(IoError::Hash(format!("expected lowercase 64-hex, got {hex64}")));
    }
    Ok(&hex64[..n.min(64)])
}
