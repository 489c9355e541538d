//! Optional WebGL vendor/renderer probe
//!
//! Not part of the mandatory set; the builder runs it only when
//! [`SignatureConfig::canvas`](crate::SignatureConfig) is enabled.

use tracing::{debug, warn};

use super::{FeatureResult, Probe};
use crate::{host::Host, record::CanvasRecord};

/// Reads the rendering context strings. A throwing context yields a record of
/// placeholders rather than a bare failure marker.
pub fn probe<H: Host + ?Sized>(host: &H) -> FeatureResult<CanvasRecord> {
    match host.webgl_info() {
        Ok(Some(info)) => {
            debug!(probe = Probe::Canvas.key(), "webgl context available");
            FeatureResult::Present(CanvasRecord::from(info))
        }
        Ok(None) => {
            debug!(probe = Probe::Canvas.key(), "no webgl context");
            FeatureResult::Absent
        }
        Err(e) => {
            warn!(probe = Probe::Canvas.key(), error = %e, "webgl probe failed");
            FeatureResult::Present(CanvasRecord::placeholder())
        }
    }
}
