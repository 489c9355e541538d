//! Capability probes
//!
//! Each probe maps one host API surface to one entry of the [`FeatureSet`].
//! Probes are independent and never propagate host failures: an absent
//! capability becomes `false`, a throwing one becomes the `"-"` placeholder.
//!
//! Asynchronous probes (bluetooth availability, keyboard layout map) are
//! joined before the set is returned, each bounded by the configured timeout.

pub mod canvas;
mod result;

use std::{fmt, future::Future, time::Duration};

use futures::future::{select, Either};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use result::FeatureResult;

use crate::{
    host::{Host, HostError, HostResult},
    record::{BluetoothRecord, FeatureSet, KeyboardRecord, PluginRecord},
};

/// Value recorded for a probe whose host API threw or timed out.
pub const PLACEHOLDER: &str = "-";

/// Identifies a capability probe by the record key it writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Probe {
    Connection,
    Bluetooth,
    Clipboard,
    Credentials,
    Geolocation,
    Hid,
    Keyboard,
    Locks,
    MediaCapabilities,
    Permissions,
    Plugins,
    Presentation,
    HardwareConcurrency,
    Canvas,
}

impl Probe {
    /// Probes run on every build, in record order.
    pub const MANDATORY: [Probe; 13] = [
        Probe::Connection,
        Probe::Bluetooth,
        Probe::Clipboard,
        Probe::Credentials,
        Probe::Geolocation,
        Probe::Hid,
        Probe::Keyboard,
        Probe::Locks,
        Probe::MediaCapabilities,
        Probe::Permissions,
        Probe::Plugins,
        Probe::Presentation,
        Probe::HardwareConcurrency,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Probe::Connection => "connection",
            Probe::Bluetooth => "bluetooth",
            Probe::Clipboard => "clipboard",
            Probe::Credentials => "credentials",
            Probe::Geolocation => "geolocation",
            Probe::Hid => "hid",
            Probe::Keyboard => "keyboard",
            Probe::Locks => "locks",
            Probe::MediaCapabilities => "mediaCapabilities",
            Probe::Permissions => "permissions",
            Probe::Plugins => "plugins",
            Probe::Presentation => "presentation",
            Probe::HardwareConcurrency => "hardwareConcurrency",
            Probe::Canvas => "canvas",
        }
    }

    /// Whether the probe awaits a host promise.
    pub fn is_async(self) -> bool {
        matches!(self, Probe::Bluetooth | Probe::Keyboard)
    }
}

impl fmt::Display for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The fixed set of mandatory capability probes.
#[derive(Debug, Clone, Copy)]
pub struct FeatureProbeSet {
    timeout: Duration,
}

impl FeatureProbeSet {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs every mandatory probe against `host`.
    ///
    /// The asynchronous probes are driven concurrently and all of them resolve
    /// (or time out) before this returns.
    pub async fn collect<H: Host + ?Sized>(&self, host: &H) -> FeatureSet {
        let (bluetooth, keyboard) = futures::join!(self.bluetooth(host), self.keyboard(host));

        FeatureSet {
            connection: FeatureResult::from_host(Probe::Connection, host.connection()),
            bluetooth,
            clipboard: FeatureResult::from_host(
                Probe::Clipboard,
                host.clipboard_type().map(Some),
            ),
            credentials: FeatureResult::from_presence(Probe::Credentials, host.has_credentials()),
            geolocation: FeatureResult::from_presence(Probe::Geolocation, host.has_geolocation()),
            hid: FeatureResult::from_host(Probe::Hid, host.hid()),
            keyboard,
            locks: FeatureResult::from_presence(Probe::Locks, host.has_locks()),
            media_capabilities: FeatureResult::from_host(
                Probe::MediaCapabilities,
                host.media_capabilities(),
            ),
            permissions: FeatureResult::from_presence(Probe::Permissions, host.has_permissions()),
            plugins: FeatureResult::from_host(Probe::Plugins, host.plugins())
                .map(|plugins| plugins.into_iter().map(PluginRecord::from).collect()),
            presentation: FeatureResult::from_host(Probe::Presentation, host.presentation()),
            hardware_concurrency: hardware_concurrency(host),
        }
    }

    async fn bluetooth<H: Host + ?Sized>(&self, host: &H) -> FeatureResult<BluetoothRecord> {
        let outcome = bounded(
            host,
            self.timeout,
            Probe::Bluetooth,
            host.bluetooth_availability(),
        )
        .await;
        FeatureResult::from_host(Probe::Bluetooth, outcome)
            .map(|has_bluetooth| BluetoothRecord { has_bluetooth })
    }

    async fn keyboard<H: Host + ?Sized>(&self, host: &H) -> FeatureResult<KeyboardRecord> {
        let outcome =
            bounded(host, self.timeout, Probe::Keyboard, host.keyboard_layout_size()).await;
        FeatureResult::from_host(Probe::Keyboard, outcome).map(|size| KeyboardRecord { size })
    }
}

/// Races `probe` against the host timer. A probe that loses the race is
/// reported as failed.
async fn bounded<H, T, F>(host: &H, timeout: Duration, probe: Probe, fut: F) -> HostResult<T>
where
    H: Host + ?Sized,
    F: Future<Output = HostResult<T>>,
{
    let sleep = host.sleep(timeout);
    futures::pin_mut!(fut, sleep);

    match select(fut, sleep).await {
        Either::Left((outcome, _)) => outcome,
        Either::Right(((), _)) => {
            debug!(
                probe = probe.key(),
                timeout_ms = timeout.as_millis() as u64,
                "probe timed out"
            );
            Err(HostError::new(format!(
                "{} did not resolve within {} ms",
                probe,
                timeout.as_millis()
            )))
        }
    }
}

fn hardware_concurrency<H: Host + ?Sized>(host: &H) -> u32 {
    match host.hardware_concurrency() {
        Ok(count) => count.unwrap_or(0),
        Err(e) => {
            warn!(probe = Probe::HardwareConcurrency.key(), error = %e, "probe failed, using 0");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mandatory_probes_exclude_canvas() {
        assert!(!Probe::MANDATORY.contains(&Probe::Canvas));
        assert_eq!(Probe::MANDATORY.iter().filter(|p| p.is_async()).count(), 2);
    }

    #[test]
    fn test_probe_names_round_trip_through_serde() {
        for probe in Probe::MANDATORY {
            let json = serde_json::to_string(&probe).unwrap();
            assert_eq!(json, format!("\"{}\"", probe.key()));
            let back: Probe = serde_json::from_str(&json).unwrap();
            assert_eq!(back, probe);
        }
    }
}
