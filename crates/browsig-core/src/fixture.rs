//! Static host for tests and offline tooling
//!
//! A [`FixtureHost`] describes one browser environment as plain data, usually
//! loaded from TOML using the browser's own property names:
//!
//! ```toml
//! bluetooth = true
//! keyboard = 48
//! fail = ["plugins"]
//!
//! [navigator]
//! language = "en-US"
//! languages = ["en-US", "en"]
//! platform = "Win32"
//! cookieEnabled = true
//! hardwareConcurrency = 4
//!
//! [screen]
//! width = 1920
//! height = 1080
//! colorDepth = 24
//! pixelDepth = 24
//! ```
//!
//! Probes listed in `fail` answer with an error; asynchronous probes listed
//! in `hang` never resolve.

use std::{path::Path, time::Duration};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    host::{
        ConnectionInfo, HidInfo, Host, HostError, HostResult, MediaCapabilitiesInfo,
        NavigatorInfo, PluginInfo, PresentationInfo, WebGlInfo,
    },
    probes::Probe,
    record::ScreenRecord,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FixtureHost {
    pub navigator: NavigatorInfo,
    pub screen: ScreenRecord,
    pub connection: Option<ConnectionInfo>,
    /// Availability reported by the bluetooth object, `None` for no object.
    pub bluetooth: Option<bool>,
    pub clipboard: bool,
    pub credentials: bool,
    pub geolocation: bool,
    pub hid: Option<HidInfo>,
    /// Layout map size, `None` for no keyboard API.
    pub keyboard: Option<u32>,
    pub locks: bool,
    pub media_capabilities: Option<MediaCapabilitiesInfo>,
    pub permissions: bool,
    pub plugins: Option<Vec<PluginInfo>>,
    pub presentation: Option<PresentationInfo>,
    pub webgl: Option<WebGlInfo>,
    pub fail: Vec<Probe>,
    pub hang: Vec<Probe>,
}

impl FixtureHost {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Makes `probe` throw.
    pub fn failing(mut self, probe: Probe) -> Self {
        self.fail.push(probe);
        self
    }

    /// Makes an asynchronous `probe` never resolve.
    pub fn hanging(mut self, probe: Probe) -> Self {
        self.hang.push(probe);
        self
    }

    fn check(&self, probe: Probe) -> HostResult<()> {
        if self.fail.contains(&probe) {
            return Err(HostError::new(format!("{probe} threw")));
        }
        Ok(())
    }

    async fn stall(&self, probe: Probe) {
        if self.hang.contains(&probe) {
            futures::future::pending::<()>().await;
        }
    }
}

#[async_trait(?Send)]
impl Host for FixtureHost {
    fn navigator(&self) -> NavigatorInfo {
        self.navigator.clone()
    }

    fn screen(&self) -> ScreenRecord {
        self.screen
    }

    fn connection(&self) -> HostResult<Option<ConnectionInfo>> {
        self.check(Probe::Connection)?;
        Ok(self.connection.clone())
    }

    async fn bluetooth_availability(&self) -> HostResult<Option<bool>> {
        self.stall(Probe::Bluetooth).await;
        self.check(Probe::Bluetooth)?;
        Ok(self.bluetooth)
    }

    fn clipboard_type(&self) -> HostResult<String> {
        self.check(Probe::Clipboard)?;
        let kind = if self.clipboard { "object" } else { "undefined" };
        Ok(kind.to_string())
    }

    fn has_credentials(&self) -> HostResult<bool> {
        self.check(Probe::Credentials)?;
        Ok(self.credentials)
    }

    fn has_geolocation(&self) -> HostResult<bool> {
        self.check(Probe::Geolocation)?;
        Ok(self.geolocation)
    }

    fn hid(&self) -> HostResult<Option<HidInfo>> {
        self.check(Probe::Hid)?;
        Ok(self.hid)
    }

    async fn keyboard_layout_size(&self) -> HostResult<Option<u32>> {
        self.stall(Probe::Keyboard).await;
        self.check(Probe::Keyboard)?;
        Ok(self.keyboard)
    }

    fn has_locks(&self) -> HostResult<bool> {
        self.check(Probe::Locks)?;
        Ok(self.locks)
    }

    fn media_capabilities(&self) -> HostResult<Option<MediaCapabilitiesInfo>> {
        self.check(Probe::MediaCapabilities)?;
        Ok(self.media_capabilities)
    }

    fn has_permissions(&self) -> HostResult<bool> {
        self.check(Probe::Permissions)?;
        Ok(self.permissions)
    }

    fn plugins(&self) -> HostResult<Option<Vec<PluginInfo>>> {
        self.check(Probe::Plugins)?;
        Ok(self.plugins.clone())
    }

    fn presentation(&self) -> HostResult<Option<PresentationInfo>> {
        self.check(Probe::Presentation)?;
        Ok(self.presentation)
    }

    fn hardware_concurrency(&self) -> HostResult<Option<u32>> {
        self.check(Probe::HardwareConcurrency)?;
        Ok(self.navigator.hardware_concurrency)
    }

    fn webgl_info(&self) -> HostResult<Option<WebGlInfo>> {
        self.check(Probe::Canvas)?;
        Ok(self.webgl.clone())
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    const DESKTOP: &str = r#"
        bluetooth = true
        keyboard = 48
        clipboard = true
        fail = ["plugins"]
        hang = ["keyboard"]

        [navigator]
        language = "en-US"
        languages = ["en-US", "en"]
        platform = "Win32"
        cookieEnabled = true
        hardwareConcurrency = 4

        [screen]
        width = 1920
        height = 1080
        colorDepth = 24
        pixelDepth = 24

        [connection]
        effectiveType = "4g"
        rtt = 50
        downlink = 10.0
    "#;

    #[test]
    fn test_parse_fixture() {
        let host = FixtureHost::from_toml_str(DESKTOP).unwrap();

        assert_eq!(host.navigator.platform.as_deref(), Some("Win32"));
        assert_eq!(host.navigator.hardware_concurrency, Some(4));
        assert_eq!(host.screen.color_depth, 24);
        assert_eq!(host.bluetooth, Some(true));
        assert_eq!(host.keyboard, Some(48));
        assert_eq!(host.fail, vec![Probe::Plugins]);
        assert_eq!(host.hang, vec![Probe::Keyboard]);

        let connection = host.connection.unwrap();
        assert_eq!(connection.effective_type.as_deref(), Some("4g"));
        assert_eq!(connection.save_data, None);
    }

    #[test]
    fn test_bundled_fixture_parses() {
        let host =
            FixtureHost::from_toml_str(include_str!("../../../fixtures/windows-desktop.toml"))
                .unwrap();

        let plugins = host.plugins.unwrap();
        assert_eq!(plugins.len(), 1);
        assert_eq!(plugins[0].mime_types[1].mime_type, "text/pdf");
        assert!(host.webgl.is_some());
        assert!(host.fail.is_empty());
    }

    #[test]
    fn test_injected_failure() {
        let host = FixtureHost::default().failing(Probe::Hid);
        assert!(host.hid().is_err());
        assert!(host.has_locks().is_ok());
    }

    #[test]
    fn test_clipboard_typeof() {
        let mut host = FixtureHost::default();
        assert_eq!(host.clipboard_type().unwrap(), "undefined");
        host.clipboard = true;
        assert_eq!(host.clipboard_type().unwrap(), "object");
    }

    #[tokio::test]
    async fn test_async_capabilities() {
        let host = FixtureHost::from_toml_str(DESKTOP).unwrap();
        assert_eq!(host.bluetooth_availability().await.unwrap(), Some(true));
    }

    #[test]
    fn test_unknown_probe_name_rejected() {
        assert!(FixtureHost::from_toml_str(r#"fail = ["gamepad"]"#).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(DESKTOP.as_bytes()).unwrap();

        let host = FixtureHost::load(file.path()).unwrap();
        assert_eq!(host.navigator.language.as_deref(), Some("en-US"));
    }
}
