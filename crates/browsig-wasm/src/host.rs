//! `Host` implementation over the browser globals
//!
//! Properties are read reflectively so that APIs missing from a given browser
//! simply read as `undefined` instead of failing to link.

use std::time::Duration;

use async_trait::async_trait;
use browsig_core::{
    host::{
        ConnectionInfo, HidInfo, Host, HostError, HostResult, MediaCapabilitiesInfo, MimeTypeInfo,
        NavigatorInfo, PluginInfo, PresentationInfo, WebGlInfo,
    },
    record::ScreenRecord,
};
use js_sys::{Array, Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

// WebGL parameter names
const GL_VENDOR: u32 = 0x1F00;
const GL_VERSION: u32 = 0x1F02;

/// Reads from `globalThis.navigator` and `globalThis.screen`.
pub struct JsHost {
    global: JsValue,
    navigator: JsValue,
}

impl JsHost {
    pub fn new() -> Self {
        let global: JsValue = js_sys::global().into();
        let navigator = get(&global, "navigator").unwrap_or(JsValue::UNDEFINED);
        Self { global, navigator }
    }

    /// The named navigator capability, `None` when it is falsy.
    fn capability(&self, name: &str) -> HostResult<Option<JsValue>> {
        Ok(truthy(get(&self.navigator, name)?))
    }
}

impl Default for JsHost {
    fn default() -> Self {
        Self::new()
    }
}

fn js_error(err: JsValue) -> HostError {
    let message = err
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| "unknown exception".to_string());
    HostError::new(message)
}

fn get(target: &JsValue, key: &str) -> HostResult<JsValue> {
    Reflect::get(target, &JsValue::from_str(key)).map_err(js_error)
}

fn truthy(value: JsValue) -> Option<JsValue> {
    value.is_truthy().then_some(value)
}

fn string_prop(target: &JsValue, key: &str) -> Option<String> {
    get(target, key).ok().and_then(|v| v.as_string())
}

fn number_prop(target: &JsValue, key: &str) -> Option<f64> {
    get(target, key).ok().and_then(|v| v.as_f64())
}

fn bool_prop(target: &JsValue, key: &str) -> Option<bool> {
    get(target, key).ok().and_then(|v| v.as_bool())
}

fn count_prop(target: &JsValue, key: &str) -> u32 {
    number_prop(target, key).map(|n| n as u32).unwrap_or(0)
}

fn method(target: &JsValue, name: &str) -> HostResult<Function> {
    get(target, name)?
        .dyn_into::<Function>()
        .map_err(|_| HostError::new(format!("{name} is not a function")))
}

/// Calls a promise-returning method and waits for it to settle.
async fn call_async(target: &JsValue, name: &str) -> HostResult<JsValue> {
    let promise = method(target, name)?
        .call0(target)
        .map_err(js_error)?
        .dyn_into::<Promise>()
        .map_err(|_| HostError::new(format!("{name} did not return a promise")))?;
    JsFuture::from(promise).await.map_err(js_error)
}

fn read_plugin(item: &JsValue) -> HostResult<PluginInfo> {
    let count = count_prop(item, "length");
    let mut mime_types = Vec::with_capacity(count as usize);
    for j in 0..count {
        let mime = Reflect::get(item, &JsValue::from(j)).map_err(js_error)?;
        let enabled_plugin = truthy(get(&mime, "enabledPlugin")?)
            .map(|plugin| count_prop(&plugin, "length"))
            .unwrap_or(0);
        mime_types.push(MimeTypeInfo {
            description: string_prop(&mime, "description").unwrap_or_default(),
            enabled_plugin,
            suffixes: string_prop(&mime, "suffixes").unwrap_or_default(),
            mime_type: string_prop(&mime, "type").unwrap_or_default(),
        });
    }

    Ok(PluginInfo {
        description: string_prop(item, "description").unwrap_or_default(),
        name: string_prop(item, "name").unwrap_or_default(),
        filename: string_prop(item, "filename").unwrap_or_default(),
        mime_types,
    })
}

#[async_trait(?Send)]
impl Host for JsHost {
    fn navigator(&self) -> NavigatorInfo {
        let nav = &self.navigator;
        let languages = get(nav, "languages").ok().and_then(truthy).map(|list| {
            Array::from(&list)
                .iter()
                .filter_map(|lang| lang.as_string())
                .collect()
        });

        NavigatorInfo {
            app_code_name: string_prop(nav, "appCodeName"),
            app_name: string_prop(nav, "appName"),
            app_version: string_prop(nav, "appVersion"),
            cookie_enabled: bool_prop(nav, "cookieEnabled"),
            language: string_prop(nav, "language"),
            languages,
            platform: string_prop(nav, "platform"),
            product: string_prop(nav, "product"),
            product_sub: string_prop(nav, "productSub"),
            user_agent: string_prop(nav, "userAgent"),
            vendor: string_prop(nav, "vendor"),
            do_not_track: string_prop(nav, "doNotTrack"),
            hardware_concurrency: number_prop(nav, "hardwareConcurrency").map(|n| n as u32),
        }
    }

    fn screen(&self) -> ScreenRecord {
        let screen = get(&self.global, "screen").unwrap_or(JsValue::UNDEFINED);
        ScreenRecord {
            width: count_prop(&screen, "width"),
            height: count_prop(&screen, "height"),
            color_depth: count_prop(&screen, "colorDepth"),
            pixel_depth: count_prop(&screen, "pixelDepth"),
        }
    }

    fn connection(&self) -> HostResult<Option<ConnectionInfo>> {
        Ok(self.capability("connection")?.map(|conn| ConnectionInfo {
            effective_type: string_prop(&conn, "effectiveType"),
            rtt: number_prop(&conn, "rtt").map(|n| n as u32),
            downlink: number_prop(&conn, "downlink"),
            save_data: bool_prop(&conn, "saveData"),
        }))
    }

    async fn bluetooth_availability(&self) -> HostResult<Option<bool>> {
        let Some(bluetooth) = self.capability("bluetooth")? else {
            return Ok(None);
        };
        let available = call_async(&bluetooth, "getAvailability").await?;
        Ok(Some(available.is_truthy()))
    }

    fn clipboard_type(&self) -> HostResult<String> {
        let clipboard = get(&self.navigator, "clipboard")?;
        Ok(clipboard
            .js_typeof()
            .as_string()
            .unwrap_or_else(|| "undefined".to_string()))
    }

    fn has_credentials(&self) -> HostResult<bool> {
        Ok(self.capability("credentials")?.is_some())
    }

    fn has_geolocation(&self) -> HostResult<bool> {
        Ok(self.capability("geolocation")?.is_some())
    }

    fn hid(&self) -> HostResult<Option<HidInfo>> {
        let Some(hid) = self.capability("hid")? else {
            return Ok(None);
        };
        Ok(Some(HidInfo {
            onconnect: get(&hid, "onconnect")?.is_truthy(),
            ondisconnect: get(&hid, "ondisconnect")?.is_truthy(),
        }))
    }

    async fn keyboard_layout_size(&self) -> HostResult<Option<u32>> {
        let Some(keyboard) = self.capability("keyboard")? else {
            return Ok(None);
        };
        let layout = call_async(&keyboard, "getLayoutMap").await?;
        Ok(Some(count_prop(&layout, "size")))
    }

    fn has_locks(&self) -> HostResult<bool> {
        Ok(self.capability("locks")?.is_some())
    }

    fn media_capabilities(&self) -> HostResult<Option<MediaCapabilitiesInfo>> {
        let Some(media) = self.capability("mediaCapabilities")? else {
            return Ok(None);
        };
        Ok(Some(MediaCapabilitiesInfo {
            decoding_info: get(&media, "decodingInfo")?.is_truthy(),
        }))
    }

    fn has_permissions(&self) -> HostResult<bool> {
        Ok(self.capability("permissions")?.is_some())
    }

    fn plugins(&self) -> HostResult<Option<Vec<PluginInfo>>> {
        let Some(list) = self.capability("plugins")? else {
            return Ok(None);
        };
        (0..count_prop(&list, "length"))
            .map(|i| {
                let item = Reflect::get(&list, &JsValue::from(i)).map_err(js_error)?;
                read_plugin(&item)
            })
            .collect::<HostResult<Vec<_>>>()
            .map(Some)
    }

    fn presentation(&self) -> HostResult<Option<PresentationInfo>> {
        let Some(presentation) = self.capability("presentation")? else {
            return Ok(None);
        };
        Ok(Some(PresentationInfo {
            default_request: get(&presentation, "defaultRequest")?.is_truthy(),
            receiver: get(&presentation, "receiver")?.is_truthy(),
        }))
    }

    fn hardware_concurrency(&self) -> HostResult<Option<u32>> {
        Ok(get(&self.navigator, "hardwareConcurrency")?
            .as_f64()
            .map(|n| n as u32))
    }

    fn webgl_info(&self) -> HostResult<Option<WebGlInfo>> {
        let Some(document) = truthy(get(&self.global, "document")?) else {
            return Ok(None);
        };
        let canvas = method(&document, "createElement")?
            .call1(&document, &JsValue::from_str("canvas"))
            .map_err(js_error)?;
        let get_context = method(&canvas, "getContext")?;
        let mut context = None;
        for kind in ["webgl", "experimental-webgl"] {
            context = truthy(
                get_context
                    .call1(&canvas, &JsValue::from_str(kind))
                    .map_err(js_error)?,
            );
            if context.is_some() {
                break;
            }
        }
        let Some(gl) = context else {
            return Ok(None);
        };

        let get_parameter = method(&gl, "getParameter")?;
        let parameter = |name: u32| -> HostResult<Option<String>> {
            Ok(truthy(
                get_parameter
                    .call1(&gl, &JsValue::from(name))
                    .map_err(js_error)?,
            )
            .and_then(|v| v.as_string()))
        };

        let debug_info = truthy(
            method(&gl, "getExtension")?
                .call1(&gl, &JsValue::from_str("WEBGL_debug_renderer_info"))
                .map_err(js_error)?,
        )
        .ok_or_else(|| HostError::new("WEBGL_debug_renderer_info unavailable"))?;
        let unmasked = |key: &str| -> HostResult<Option<String>> {
            let name = get(&debug_info, key)?
                .as_f64()
                .ok_or_else(|| HostError::new(format!("{key} missing")))?;
            parameter(name as u32)
        };

        Ok(Some(WebGlInfo {
            vendor: parameter(GL_VENDOR)?,
            version: parameter(GL_VERSION)?,
            unmasked_vendor: unmasked("UNMASKED_VENDOR_WEBGL")?,
            unmasked_renderer: unmasked("UNMASKED_RENDERER_WEBGL")?,
        }))
    }

    async fn sleep(&self, duration: Duration) {
        let millis = duration.as_millis().min(i32::MAX as u128) as f64;
        let global = self.global.clone();
        // Without setTimeout the promise never settles and probes run unbounded.
        let promise = Promise::new(&mut |resolve, _reject| {
            if let Ok(set_timeout) = method(&global, "setTimeout") {
                let _ = set_timeout.call2(&global, &resolve, &JsValue::from_f64(millis));
            }
        });
        let _ = JsFuture::from(promise).await;
    }
}
