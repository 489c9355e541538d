//! # browsig
//!
//! Stateless browser environment signatures
//!
//! ## Crates
//!
//! - `browsig_core` - collection pipeline, canonicalization and encoding
//! - `browsig-wasm` - bindings for running inside a browser
//! - `browsig-cli` - offline tooling over fixture environments

// Re-export the core crate
pub use browsig_core;
pub use browsig_core::{
    decode_token, BrowserSignature, BuildStage, EnvironmentRecord, Error, Host, Result, Signature,
    SignatureConfig,
};
