use std::fmt;

use serde::Serialize;

use crate::{canonical, encoding, error::Result, record::EnvironmentRecord};

/// The encoded token derived from one [`EnvironmentRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Signature(String);

impl Signature {
    pub fn from_record(record: &EnvironmentRecord) -> Self {
        Self::from_canonical(&canonical::canonicalize(record))
    }

    /// Encodes already-canonical text.
    pub fn from_canonical(text: &str) -> Self {
        Self(encoding::encode(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Recovers the stripped canonical text. Useful for debugging only; the
    /// original punctuation is gone.
    pub fn decode(&self) -> Result<String> {
        decode_token(&self.0)
    }
}

/// Decodes any token string back to its canonical text.
pub fn decode_token(token: &str) -> Result<String> {
    let bytes = encoding::decode(token.trim())?;
    Ok(String::from_utf8(bytes)?)
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Signature {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Signature> for String {
    fn from(signature: Signature) -> Self {
        signature.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_recovers_canonical_text() {
        let signature = Signature::from_canonical("languageen-USplatformWin32");
        assert_eq!(signature.decode().unwrap(), "languageen-USplatformWin32");
    }

    #[test]
    fn test_decode_token_trims_whitespace() {
        assert_eq!(decode_token(" Zm9v\n").unwrap(), "foo");
    }

    #[test]
    fn test_decode_token_rejects_non_utf8() {
        // 0xff 0xfe
        assert!(decode_token("//4=").is_err());
    }
}
