//! The fixed-schema environment record
//!
//! Field declaration order is the canonical serialization order, so fields
//! must never be reordered without accepting that every signature changes.

use serde::{Deserialize, Serialize};

use crate::{
    host::{ConnectionInfo, HidInfo, MediaCapabilitiesInfo, PluginInfo, PresentationInfo, WebGlInfo},
    probes::FeatureResult,
};

/// Everything collected by one build, in canonical order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvironmentRecord {
    #[serde(flatten)]
    pub base: BaseAttributes,
    #[serde(flatten)]
    pub features: FeatureSet,
    pub screen: ScreenRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canvas: Option<FeatureResult<CanvasRecord>>,
}

/// Navigator attributes after defaulting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseAttributes {
    pub app_code_name: String,
    pub app_name: String,
    pub app_version: String,
    pub cookie_enabled: bool,
    pub language: String,
    /// Accepted languages joined with `;` in host order.
    pub languages: String,
    pub platform: String,
    pub product: String,
    pub product_sub: String,
    pub user_agent: String,
    pub vendor: String,
    pub do_not_track: String,
}

/// One entry per capability probe.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureSet {
    pub connection: FeatureResult<ConnectionInfo>,
    pub bluetooth: FeatureResult<BluetoothRecord>,
    pub clipboard: FeatureResult<String>,
    pub credentials: FeatureResult<bool>,
    pub geolocation: FeatureResult<bool>,
    pub hid: FeatureResult<HidInfo>,
    pub keyboard: FeatureResult<KeyboardRecord>,
    pub locks: FeatureResult<bool>,
    pub media_capabilities: FeatureResult<MediaCapabilitiesInfo>,
    pub permissions: FeatureResult<bool>,
    pub plugins: FeatureResult<Vec<PluginRecord>>,
    pub presentation: FeatureResult<PresentationInfo>,
    pub hardware_concurrency: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BluetoothRecord {
    pub has_bluetooth: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeyboardRecord {
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginRecord {
    pub description: String,
    pub name: String,
    pub length: u32,
    pub filename: String,
    /// MIME type entries, keyed `plugins` to match the browser's own shape.
    pub plugins: Vec<MimeTypeRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MimeTypeRecord {
    pub description: String,
    pub enabled_plugin: u32,
    pub suffixes: String,
    #[serde(rename = "type")]
    pub mime_type: String,
}

impl From<PluginInfo> for PluginRecord {
    fn from(plugin: PluginInfo) -> Self {
        let plugins: Vec<MimeTypeRecord> = plugin
            .mime_types
            .into_iter()
            .map(|mime| MimeTypeRecord {
                description: mime.description,
                enabled_plugin: mime.enabled_plugin,
                suffixes: mime.suffixes,
                mime_type: mime.mime_type,
            })
            .collect();

        Self {
            description: plugin.description,
            name: plugin.name,
            length: plugins.len() as u32,
            filename: plugin.filename,
            plugins,
        }
    }
}

/// Display attributes, taken verbatim from the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScreenRecord {
    pub width: u32,
    pub height: u32,
    pub color_depth: u32,
    pub pixel_depth: u32,
}

/// Output of the optional canvas probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanvasRecord {
    pub vendor: String,
    pub version: String,
    pub renderer: String,
}

impl CanvasRecord {
    /// Substituted when reading the WebGL context throws.
    pub fn placeholder() -> Self {
        Self {
            vendor: crate::probes::PLACEHOLDER.to_string(),
            version: crate::probes::PLACEHOLDER.to_string(),
            renderer: crate::probes::PLACEHOLDER.to_string(),
        }
    }
}

impl From<WebGlInfo> for CanvasRecord {
    fn from(info: WebGlInfo) -> Self {
        let placeholder = || crate::probes::PLACEHOLDER.to_string();
        Self {
            vendor: info.unmasked_vendor.or(info.vendor).unwrap_or_else(placeholder),
            version: info.version.unwrap_or_else(placeholder),
            renderer: info.unmasked_renderer.unwrap_or_else(placeholder),
        }
    }
}
