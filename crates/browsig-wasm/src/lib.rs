mod host;

use std::{cell::RefCell, rc::Rc};

use browsig_core::{EnvironmentRecord, SignatureConfig};
use js_sys::Promise;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

pub use host::JsHost;

#[derive(Default)]
struct Snapshot {
    /// Bumped by every `init()`; only the latest one may publish.
    generation: u64,
    signature: Option<String>,
    record: Option<EnvironmentRecord>,
}

/// Browser signature for the current page
///
/// ```js
/// const sig = new BrowserSignature();
/// await sig.init();
/// console.log(sig.getSignature());
/// ```
#[wasm_bindgen]
pub struct BrowserSignature {
    config: SignatureConfig,
    snapshot: Rc<RefCell<Snapshot>>,
}

#[wasm_bindgen]
impl BrowserSignature {
    #[wasm_bindgen(constructor)]
    pub fn new() -> BrowserSignature {
        Self::from_config(SignatureConfig::default())
    }

    /// Creates a builder from an options object, e.g. `{ probeTimeoutMs: 500, canvas: true }`
    #[wasm_bindgen(js_name = withOptions)]
    pub fn with_options(options: JsValue) -> Result<BrowserSignature, JsError> {
        let config: SignatureConfig = serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))?;
        let config = config.validate().map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Self::from_config(config))
    }

    /// Collects the environment and computes the signature. Always resolves.
    pub fn init(&self) -> Promise {
        let snapshot = Rc::clone(&self.snapshot);
        let config = self.config.clone();
        let generation = {
            let mut current = snapshot.borrow_mut();
            current.generation += 1;
            current.signature = None;
            current.record = None;
            current.generation
        };

        future_to_promise(async move {
            let mut builder = browsig_core::BrowserSignature::with_config(JsHost::new(), config);
            builder.build().await;

            let mut current = snapshot.borrow_mut();
            if current.generation != generation {
                return Ok(JsValue::UNDEFINED);
            }
            current.signature = builder.get_signature().map(str::to_owned);
            current.record = builder.record().cloned();
            Ok(JsValue::UNDEFINED)
        })
    }

    /// The token, or `undefined` before `init()` has resolved.
    #[wasm_bindgen(js_name = getSignature)]
    pub fn get_signature(&self) -> Option<String> {
        self.snapshot.borrow().signature.clone()
    }

    /// The collected record as a plain object, or `undefined` before `init()`.
    #[wasm_bindgen(js_name = getRecord)]
    pub fn get_record(&self) -> Result<JsValue, JsError> {
        let snapshot = self.snapshot.borrow();
        let Some(record) = snapshot.record.as_ref() else {
            return Ok(JsValue::UNDEFINED);
        };
        record
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| JsError::new(&e.to_string()))
    }
}

impl BrowserSignature {
    fn from_config(config: SignatureConfig) -> BrowserSignature {
        BrowserSignature {
            config,
            snapshot: Rc::new(RefCell::new(Snapshot::default())),
        }
    }
}

impl Default for BrowserSignature {
    fn default() -> Self {
        Self::new()
    }
}

/// Decodes a token back to its canonical text, for debugging.
#[wasm_bindgen(js_name = decodeSignature)]
pub fn decode_signature(token: &str) -> Result<String, JsError> {
    browsig_core::decode_token(token).map_err(|e| JsError::new(&e.to_string()))
}

/// Crate version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
