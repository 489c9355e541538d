use serde::{Serialize, Serializer};
use tracing::{debug, warn};

use super::{Probe, PLACEHOLDER};
use crate::host::HostResult;

/// Outcome of a single capability probe.
///
/// Serializes as `false` when the capability is absent, as the observed value
/// when present, and as the `"-"` placeholder when the probe failed.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureResult<T> {
    Absent,
    Present(T),
    Failed,
}

impl<T> FeatureResult<T> {
    /// Folds a host answer into a result, logging the outcome under the
    /// probe's key.
    pub(crate) fn from_host(probe: Probe, outcome: HostResult<Option<T>>) -> Self {
        match outcome {
            Ok(Some(value)) => {
                debug!(probe = probe.key(), "capability present");
                FeatureResult::Present(value)
            }
            Ok(None) => {
                debug!(probe = probe.key(), "capability absent");
                FeatureResult::Absent
            }
            Err(e) => {
                warn!(probe = probe.key(), error = %e, "probe failed, using placeholder");
                FeatureResult::Failed
            }
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, FeatureResult::Present(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, FeatureResult::Absent)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FeatureResult::Failed)
    }

    pub fn present(&self) -> Option<&T> {
        match self {
            FeatureResult::Present(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> FeatureResult<U> {
        match self {
            FeatureResult::Absent => FeatureResult::Absent,
            FeatureResult::Present(value) => FeatureResult::Present(f(value)),
            FeatureResult::Failed => FeatureResult::Failed,
        }
    }
}

impl FeatureResult<bool> {
    /// Presence-only probes record `true` or `false`.
    pub(crate) fn from_presence(probe: Probe, outcome: HostResult<bool>) -> Self {
        Self::from_host(probe, outcome.map(|present| present.then_some(true)))
    }
}

impl<T: Serialize> Serialize for FeatureResult<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FeatureResult::Absent => serializer.serialize_bool(false),
            FeatureResult::Present(value) => value.serialize(serializer),
            FeatureResult::Failed => serializer.serialize_str(PLACEHOLDER),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HostError;

    #[test]
    fn test_serialized_forms() {
        let absent: FeatureResult<u32> = FeatureResult::Absent;
        let present = FeatureResult::Present(7u32);
        let failed: FeatureResult<u32> = FeatureResult::Failed;

        assert_eq!(serde_json::to_string(&absent).unwrap(), "false");
        assert_eq!(serde_json::to_string(&present).unwrap(), "7");
        assert_eq!(serde_json::to_string(&failed).unwrap(), "\"-\"");
    }

    #[test]
    fn test_from_host() {
        assert!(FeatureResult::from_host(Probe::Hid, Ok(Some(1))).is_present());
        assert!(FeatureResult::<u8>::from_host(Probe::Hid, Ok(None)).is_absent());
        assert!(
            FeatureResult::<u8>::from_host(Probe::Hid, Err(HostError::new("SecurityError")))
                .is_failed()
        );
    }

    #[test]
    fn test_from_presence() {
        assert_eq!(
            FeatureResult::from_presence(Probe::Locks, Ok(true)),
            FeatureResult::Present(true)
        );
        assert_eq!(
            FeatureResult::from_presence(Probe::Locks, Ok(false)),
            FeatureResult::Absent
        );
    }
}
