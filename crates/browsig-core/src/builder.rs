//! Signature builder
//!
//! Orchestrates the readers and probes into one [`EnvironmentRecord`] and
//! encodes it. A builder moves through three stages:
//!
//! - `Idle`: nothing built, [`BrowserSignature::signature`] returns `None`.
//! - `Collecting`: attributes and probes are running.
//! - `Ready`: the record is merged and the signature readable.
//!
//! Every call to [`BrowserSignature::build`] re-runs all probes from scratch.

use tracing::{debug, info};

use crate::{
    attributes::AttributeReader,
    config::SignatureConfig,
    host::Host,
    probes::{canvas, FeatureProbeSet},
    record::EnvironmentRecord,
    screen::ScreenReader,
    signature::Signature,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStage {
    Idle,
    Collecting,
    Ready,
}

/// Collects a browser environment from `H` and derives its signature.
///
/// `build` borrows the builder mutably, so one instance can never run two
/// overlapping builds.
#[derive(Debug)]
pub struct BrowserSignature<H> {
    host: H,
    config: SignatureConfig,
    stage: BuildStage,
    record: Option<EnvironmentRecord>,
    signature: Option<Signature>,
}

impl<H: Host> BrowserSignature<H> {
    pub fn new(host: H) -> Self {
        Self::with_config(host, SignatureConfig::default())
    }

    pub fn with_config(host: H, config: SignatureConfig) -> Self {
        Self {
            host,
            config,
            stage: BuildStage::Idle,
            record: None,
            signature: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn config(&self) -> &SignatureConfig {
        &self.config
    }

    pub fn stage(&self) -> BuildStage {
        self.stage
    }

    /// Runs the full pipeline and returns the new signature.
    ///
    /// Never fails: absent capabilities and failing probes are folded into the
    /// record as placeholders. If the returned future is dropped before it
    /// completes, the builder stays in `Collecting` without a signature.
    pub async fn build(&mut self) -> &Signature {
        self.stage = BuildStage::Collecting;
        self.record = None;
        self.signature = None;

        let base = AttributeReader::read(&self.host);
        debug!(platform = %base.platform, language = %base.language, "attributes read");

        let features = FeatureProbeSet::new(self.config.probe_timeout())
            .collect(&self.host)
            .await;

        let screen = ScreenReader::read(&self.host);
        let canvas = self.config.canvas.then(|| canvas::probe(&self.host));

        let record = EnvironmentRecord {
            base,
            features,
            screen,
            canvas,
        };
        let signature = Signature::from_record(&record);
        info!(len = signature.len(), "browser signature ready");

        self.record = Some(record);
        self.stage = BuildStage::Ready;
        self.signature.insert(signature)
    }

    /// Same as [`build`](Self::build), discarding the returned reference.
    pub async fn init(&mut self) {
        self.build().await;
    }

    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    /// The token as a string slice, `None` before the first completed build.
    pub fn get_signature(&self) -> Option<&str> {
        self.signature.as_ref().map(Signature::as_str)
    }

    pub fn record(&self) -> Option<&EnvironmentRecord> {
        self.record.as_ref()
    }

    pub fn into_signature(self) -> Option<Signature> {
        self.signature
    }
}
