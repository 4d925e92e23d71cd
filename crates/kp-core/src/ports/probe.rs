use async_trait::async_trait;

/// Reachability check used by the connectivity monitor.
#[async_trait]
pub trait ConnectivityProbePort: Send + Sync {
    /// `true` when `host` resolves. Errors count as unreachable.
    async fn is_reachable(&self, host: &str) -> bool;
}

/// Preflight of remote content before the kiosk window navigates to it.
#[async_trait]
pub trait ContentProbePort: Send + Sync {
    async fn check(&self, url: &str) -> anyhow::Result<()>;
}
