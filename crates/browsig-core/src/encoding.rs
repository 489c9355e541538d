//! Token alphabet
//!
//! Signatures use the standard RFC 4648 base64 alphabet with `=` padding,
//! the same output a browser's `btoa` produces for ASCII input:
//!
//! - `A-Z`, `a-z`, `0-9`, `+`, `/`
//! - `=` only as trailing padding
//!
//! The alphabet is fixed. Changing it would change every issued token.
//!
//! ## Examples
//! ```
//! use browsig_core::encoding;
//!
//! let encoded = encoding::encode("platformWin32");
//! assert_eq!(encoded, "cGxhdGZvcm1XaW4zMg==");
//! assert_eq!(encoding::decode(&encoded).unwrap(), b"platformWin32");
//! ```

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::error::Result;

/// Encode bytes to a standard base64 string with padding
///
/// # Example
/// ```
/// use browsig_core::encoding;
///
/// assert_eq!(encoding::encode(b"Hello, World!"), "SGVsbG8sIFdvcmxkIQ==");
/// ```
pub fn encode<T: AsRef<[u8]>>(data: T) -> String {
    STANDARD.encode(data)
}

/// Decode a standard base64 string to bytes
///
/// Expects the padded form produced by [`encode`].
pub fn decode<T: AsRef<[u8]>>(encoded: T) -> Result<Vec<u8>> {
    Ok(STANDARD.decode(encoded)?)
}

/// Whether `token` consists only of the token alphabet, with padding (if any)
/// confined to the end.
pub fn is_token_alphabet(token: &str) -> bool {
    let body = token.trim_end_matches('=');
    token.len() - body.len() <= 2
        && body
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/')
}
