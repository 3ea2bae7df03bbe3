//! crates/bolao_io/src/lib.rs
//! Minimal I/O crate for the bolão engine.
//!
//! - Shared error type (`IoError`) with `From` conversions used across modules.
//! - Plan files and price tables are read from local JSON only (no network).
//! - Canonical JSON bytes feed both the artifact writer and the SHA-256 ids.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for bolao_io (used by canonical_json/hasher/loader).
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors (open, create_dir_all, rename, fsync).
    #[error("io/path error: {0}")]
    Path(String),

    /// JSON serialization/deserialization errors with a JSON Pointer hint.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// Hashing-related errors.
    #[error("hash error: {0}")]
    Hash(String),

    /// Plan/config shape errors (missing funding, both funding kinds, URL paths).
    #[error("config error: {0}")]
    Config(String),

    /// Domain validation (price table rows, ticket/tier consistency).
    #[error("invalid: {0}")]
    Invalid(String),
}

pub type IoResult<T> = Result<T, IoError>;

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json keeps no pointer; report root and let callers enrich it.
        IoError::Json { pointer: "/".to_string(), msg: e.to_string() }
    }
}

impl From<bolao_core::CoreError> for IoError {
    fn from(e: bolao_core::CoreError) -> Self {
        IoError::Invalid(e.to_string())
    }
}

pub mod canonical_json;
pub mod hasher;
pub mod loader;

/// Returns true if `s` looks like a URL: any `<scheme>://`, or a bare
/// `http:` / `https:` / `file:` prefix (case-insensitive).
#[inline]
pub fn looks_like_url_strict(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    lower.contains("://") || ["http:", "https:", "file:"].iter().any(|p| lower.starts_with(p))
}

pub mod prelude {
    pub use crate::{looks_like_url_strict, IoError, IoResult};

    pub use crate::canonical_json;
    pub use crate::hasher;
    pub use crate::loader;

    pub use crate::canonical_json::{to_canonical_bytes, write_canonical_file};
    pub use crate::hasher::{plan_id_from_canonical, sha256_canonical, sha256_hex};
    pub use crate::loader::{load_plan, load_price_table, LoadedPlan, PlanFile, TicketSpec};
}
