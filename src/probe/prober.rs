//! Existence probing against the vendor download host
//!
//! A probe is one HEAD request for a single canonical platform artifact of a
//! version. 200 means the release exists; any other status means it does not.
//! Transport failures are errors and must never be cached as "missing".

use crate::config::schema::SourceConfig;
use crate::error::{RelscoutError, RelscoutResult};
use crate::platform::{self, Platform};
use std::time::Duration;
use tracing::debug;

/// Anything that can tell whether a version has been published
pub trait ExistenceProbe {
    /// `Ok(true)` if the version exists, `Ok(false)` if not, `Err` if unknown
    fn probe(&self, version: &str) -> RelscoutResult<bool>;
}

impl<P: ExistenceProbe + ?Sized> ExistenceProbe for &P {
    fn probe(&self, version: &str) -> RelscoutResult<bool> {
        (**self).probe(version)
    }
}

/// HEAD-request prober using a blocking `ureq` agent
pub struct HttpProber {
    agent: ureq::Agent,
    host: String,
    artifact: String,
}

impl HttpProber {
    /// Build a prober for the configured host and probe platform
    pub fn new(source: &SourceConfig) -> RelscoutResult<Self> {
        let platform = platform::by_name(&source.probe_platform)?;
        Ok(Self::with_platform(
            &source.host,
            &source.product,
            platform,
            Duration::from_secs(source.probe_timeout_secs),
        ))
    }

    pub fn with_platform(host: &str, product: &str, platform: Platform, timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .user_agent(concat!("relscout/", env!("CARGO_PKG_VERSION")))
            .build();

        Self {
            agent: ureq::Agent::new_with_config(config),
            host: host.trim_end_matches('/').to_string(),
            artifact: platform.artifact_name(product),
        }
    }

    /// URL checked for `version`
    pub fn url_for(&self, version: &str) -> String {
        platform::release_url(&self.host, version, &self.artifact)
    }
}

impl ExistenceProbe for HttpProber {
    fn probe(&self, version: &str) -> RelscoutResult<bool> {
        let url = self.url_for(version);
        debug!("HEAD {}", url);

        let response = self
            .agent
            .head(&url)
            .call()
            .map_err(|e| RelscoutError::network(&url, e))?;

        let status = response.status().as_u16();
        debug!("{} -> {}", url, status);
        Ok(status == 200)
    }
}
