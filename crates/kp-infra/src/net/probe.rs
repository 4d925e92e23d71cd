use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::net::lookup_host;
use tracing::trace;

use kp_core::ports::{ConnectivityProbePort, ContentProbePort};

const DNS_TIMEOUT: Duration = Duration::from_secs(4);
const HTTP_TIMEOUT: Duration = Duration::from_secs(15);

/// Reachability by name resolution only. No packets go to the host itself.
pub struct DnsConnectivityProbe {
    timeout: Duration,
}

impl Default for DnsConnectivityProbe {
    fn default() -> Self {
        Self {
            timeout: DNS_TIMEOUT,
        }
    }
}

impl DnsConnectivityProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl ConnectivityProbePort for DnsConnectivityProbe {
    async fn is_reachable(&self, host: &str) -> bool {
        match tokio::time::timeout(self.timeout, lookup_host((host, 443))).await {
            Ok(Ok(mut addrs)) => addrs.next().is_some(),
            Ok(Err(err)) => {
                trace!(host, error = %err, "dns lookup failed");
                false
            }
            Err(_) => {
                trace!(host, "dns lookup timed out");
                false
            }
        }
    }
}

/// GET preflight: the URL must answer at the transport level. Any HTTP
/// status counts as an answer, including 4xx and 5xx.
pub struct HttpContentProbe {
    client: reqwest::Client,
}

impl HttpContentProbe {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .context("build http client failed")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ContentProbePort for HttpContentProbe {
    async fn check(&self, url: &str) -> Result<()> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("request failed: {url}"))?;
        trace!(url, status = %response.status(), "preflight answered");
        Ok(())
    }
}
