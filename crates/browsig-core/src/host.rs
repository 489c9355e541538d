//! Host environment access
//!
//! Everything the pipeline learns about the visiting browser comes through the
//! [`Host`] trait. The browser binding implements it over the real navigator
//! and screen objects; tests and the CLI use a static fixture instead.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::ScreenRecord;

/// An exception raised by a host API that exists but misbehaved.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("host error: {0}")]
pub struct HostError(String);

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

pub type HostResult<T> = std::result::Result<T, HostError>;

/// Navigator attributes as reported by the host. `None` means the property is
/// undefined.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavigatorInfo {
    pub app_code_name: Option<String>,
    pub app_name: Option<String>,
    pub app_version: Option<String>,
    pub cookie_enabled: Option<bool>,
    pub language: Option<String>,
    pub languages: Option<Vec<String>>,
    pub platform: Option<String>,
    pub product: Option<String>,
    pub product_sub: Option<String>,
    pub user_agent: Option<String>,
    pub vendor: Option<String>,
    pub do_not_track: Option<String>,
    pub hardware_concurrency: Option<u32>,
}

/// Network information. Sub-fields the host leaves undefined are omitted from
/// the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectionInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rtt: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downlink: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_data: Option<bool>,
}

/// Whether the HID connect/disconnect callback slots hold a handler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HidInfo {
    pub onconnect: bool,
    pub ondisconnect: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MediaCapabilitiesInfo {
    pub decoding_info: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PresentationInfo {
    pub default_request: bool,
    pub receiver: bool,
}

/// One installed plugin and the MIME types it handles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PluginInfo {
    pub description: String,
    pub name: String,
    pub filename: String,
    pub mime_types: Vec<MimeTypeInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MimeTypeInfo {
    pub description: String,
    /// Number of entries in the enabling plugin, `0` when none is attached.
    pub enabled_plugin: u32,
    pub suffixes: String,
    #[serde(rename = "type")]
    pub mime_type: String,
}

/// Strings read from a WebGL context and its debug renderer extension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WebGlInfo {
    pub vendor: Option<String>,
    pub version: Option<String>,
    pub unmasked_vendor: Option<String>,
    pub unmasked_renderer: Option<String>,
}

/// Environment access interface
///
/// Capability getters return `Ok(None)` (or `Ok(false)`) when the capability
/// is absent and `Err` when the host API threw. Implementations must not have
/// side effects on the host beyond reading.
#[async_trait(?Send)]
pub trait Host {
    /// Static navigator attributes. Never fails; missing values are `None`.
    fn navigator(&self) -> NavigatorInfo;

    /// Display surface attributes. The host is assumed to always expose one.
    fn screen(&self) -> ScreenRecord;

    fn connection(&self) -> HostResult<Option<ConnectionInfo>>;

    /// Resolves the bluetooth availability query, `None` when the host has no
    /// bluetooth object at all.
    async fn bluetooth_availability(&self) -> HostResult<Option<bool>>;

    /// The `typeof` string of the clipboard object (`"undefined"` when absent).
    fn clipboard_type(&self) -> HostResult<String>;

    fn has_credentials(&self) -> HostResult<bool>;

    fn has_geolocation(&self) -> HostResult<bool>;

    fn hid(&self) -> HostResult<Option<HidInfo>>;

    /// Size of the keyboard layout map, `None` when there is no keyboard API.
    async fn keyboard_layout_size(&self) -> HostResult<Option<u32>>;

    fn has_locks(&self) -> HostResult<bool>;

    fn media_capabilities(&self) -> HostResult<Option<MediaCapabilitiesInfo>>;

    fn has_permissions(&self) -> HostResult<bool>;

    fn plugins(&self) -> HostResult<Option<Vec<PluginInfo>>>;

    fn presentation(&self) -> HostResult<Option<PresentationInfo>>;

    fn hardware_concurrency(&self) -> HostResult<Option<u32>>;

    /// Only consulted when the canvas probe is enabled.
    fn webgl_info(&self) -> HostResult<Option<WebGlInfo>> {
        Ok(None)
    }

    /// Completes after `duration` on the host's own timer. Bounds every
    /// asynchronous probe.
    async fn sleep(&self, duration: Duration);
}
