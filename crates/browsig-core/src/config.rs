//! Builder configuration
//!
//! ```toml
//! probe_timeout_ms = 1500
//! canvas = false
//! ```

use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 1500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignatureConfig {
    /// Upper bound on each asynchronous probe.
    #[serde(alias = "probeTimeoutMs")]
    pub probe_timeout_ms: u64,
    /// Run the optional WebGL vendor/renderer probe.
    pub canvas: bool,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            probe_timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
            canvas: false,
        }
    }
}

impl SignatureConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn with_canvas(mut self, canvas: bool) -> Self {
        self.canvas = canvas;
        self
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(self) -> Result<Self> {
        if self.probe_timeout_ms == 0 {
            return Err(Error::Config(
                "probe_timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = SignatureConfig::from_toml_str("").unwrap();
        assert_eq!(config, SignatureConfig::default());
        assert_eq!(config.probe_timeout(), Duration::from_millis(1500));
    }

    #[test]
    fn test_partial_override() {
        let config = SignatureConfig::from_toml_str("canvas = true").unwrap();
        assert!(config.canvas);
        assert_eq!(config.probe_timeout_ms, DEFAULT_PROBE_TIMEOUT_MS);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = SignatureConfig::from_toml_str("probe_timeout_ms = 0").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let err = SignatureConfig::from_toml_str("probe_timeout_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "probe_timeout_ms = 250").unwrap();

        let config = SignatureConfig::load(file.path()).unwrap();
        assert_eq!(config.probe_timeout(), Duration::from_millis(250));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SignatureConfig::load("/nonexistent/browsig.toml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
