//! Canonical text form of a record
//!
//! The record is serialized as JSON in declaration order, then the structural
//! punctuation is stripped. What remains is the attribute names and values run
//! together, e.g. `{"language":"en-US","cookieEnabled":true}` becomes
//! `languageen-UScookieEnabledtrue`. Array brackets are kept.

use serde::Serialize;
use tracing::error;

/// Characters removed from the serialized record.
pub const STRIPPED: [char; 9] = ['{', '}', '"', ':', ';', ',', '(', ')', ' '];

/// Serializes `record` and strips it. Falls back to the empty string if the
/// record cannot be serialized.
pub fn canonicalize<T: Serialize + ?Sized>(record: &T) -> String {
    match serde_json::to_string(record) {
        Ok(json) => strip(&json),
        Err(e) => {
            error!(error = %e, "record serialization failed, encoding empty text");
            String::new()
        }
    }
}

pub fn strip(text: &str) -> String {
    text.chars().filter(|c| !STRIPPED.contains(c)).collect()
}
