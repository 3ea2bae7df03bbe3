//! crates/bolao_io/src/hasher.rs
//!
//! Deterministic hashing and ID builders for canonical artifacts.
//!
//! - Canonical JSON hashing: UTF-8, **sorted object keys**, array order preserved.
//! - `PLAN:<hex>` ids derive from the canonical bytes of the plan document
//!   (the document is hashed *without* its own id field).
//! - Hex digests are **lowercase**.
//!
//! Use `sha256_canonical(..)` for JSON values/structs and `sha256_hex(..)` for raw bytes.

#![forbid(unsafe_code)]

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::canonical_json::to_canonical_bytes;
use crate::IoResult;

/// SHA-256 over raw bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// SHA-256 over **canonical JSON bytes** of any serializable value.
pub fn sha256_canonical<T: Serialize>(value: &T) -> IoResult<String> {
    let bytes = to_canonical_bytes(value)?;
    Ok(sha256_hex(&bytes))
}

/// `PLAN:<hex>` from the canonical bytes of `value`.
pub fn plan_id_from_canonical<T: Serialize>(value: &T) -> IoResult<String> {
    let hex = sha256_canonical(value)?;
    Ok(format!("PLAN:{hex}"))
}

/// True for a well-formed `PLAN:` id (64 lowercase hex after the prefix).
pub fn is_plan_id(s: &str) -> bool {
    s.strip_prefix("PLAN:")
        .map(|h| h.len() == 64 && h.bytes().all(|c| matches!(c, b'0'..=b'9' | b'a'..=b'f')))
        .unwrap_or(false)
}
