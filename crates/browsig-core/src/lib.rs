//! Browser environment signatures
//!
//! This library samples navigator, screen and capability attributes from a
//! [`Host`], merges them into a fixed-schema [`EnvironmentRecord`] and encodes
//! the punctuation-stripped record as a base64 [`Signature`].
//!
//! ```no_run
//! # #[cfg(feature = "fixture")]
//! # async fn demo() -> browsig_core::Result<()> {
//! use browsig_core::{fixture::FixtureHost, BrowserSignature};
//!
//! let host = FixtureHost::load("fixtures/windows-desktop.toml")?;
//! let mut builder = BrowserSignature::new(host);
//! let token = builder.build().await;
//! println!("{token}");
//! # Ok(())
//! # }
//! ```

pub mod error;

pub mod attributes;
pub mod builder;
pub mod canonical;
pub mod config;
pub mod encoding;
pub mod host;
pub mod probes;
pub mod record;
pub mod screen;
pub mod signature;

#[cfg(feature = "fixture")]
pub mod fixture;

pub use attributes::AttributeReader;
pub use builder::{BrowserSignature, BuildStage};
pub use config::SignatureConfig;
pub use error::{Error, Result};
pub use host::{Host, HostError, HostResult};
pub use probes::{FeatureProbeSet, FeatureResult, Probe, PLACEHOLDER};
pub use record::EnvironmentRecord;
pub use screen::ScreenReader;
pub use signature::{decode_token, Signature};
