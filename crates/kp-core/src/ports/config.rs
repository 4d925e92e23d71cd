use async_trait::async_trait;

use crate::config::{ConfigPatch, KioskConfig};

/// Persistent configuration store.
///
/// 持久化配置存储。
#[async_trait]
pub trait ConfigPort: Send + Sync {
    /// Never fails: unreadable or corrupt storage yields the defaults.
    ///
    /// 不会失败：读取或解析出错时返回默认配置。
    async fn load(&self) -> KioskConfig;

    /// Shallow-merge `patch` over what is stored and write it back.
    ///
    /// 将补丁浅合并到已存储的配置并写回。
    async fn save(&self, patch: &ConfigPatch) -> anyhow::Result<()>;
}
