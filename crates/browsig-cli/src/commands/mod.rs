pub mod build;
pub mod decode;
pub mod inspect;

use std::path::Path;

use browsig_core::{fixture::FixtureHost, BrowserSignature, SignatureConfig};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Loads the fixture and optional config into a ready-to-run builder.
pub fn load_builder(
    fixture: &Path,
    config: Option<&Path>,
) -> CliResult<BrowserSignature<FixtureHost>> {
    if !fixture.exists() {
        return Err(CliError::FileNotFound(fixture.display().to_string()));
    }
    let host = FixtureHost::load(fixture)?;

    let config = match config {
        Some(path) if !path.exists() => {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        Some(path) => SignatureConfig::load(path)?,
        None => SignatureConfig::default(),
    };
    debug!(
        fixture = %fixture.display(),
        probe_timeout_ms = config.probe_timeout_ms,
        canvas = config.canvas,
        "loaded fixture"
    );

    Ok(BrowserSignature::with_config(host, config))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_missing_fixture() {
        let err = load_builder(Path::new("/nonexistent/fixture.toml"), None).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_fixture_with_config() {
        let mut fixture = NamedTempFile::new().unwrap();
        writeln!(fixture, "[navigator]\nplatform = \"Linux x86_64\"").unwrap();
        let mut config = NamedTempFile::new().unwrap();
        writeln!(config, "probe_timeout_ms = 200\ncanvas = true").unwrap();

        let builder = load_builder(fixture.path(), Some(config.path())).unwrap();
        assert!(builder.config().canvas);
        assert_eq!(builder.config().probe_timeout_ms, 200);
        assert_eq!(
            builder.host().navigator.platform.as_deref(),
            Some("Linux x86_64")
        );
    }
}
