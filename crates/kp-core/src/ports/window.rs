use std::path::PathBuf;

use anyhow::Result;

use crate::display::Rect;
use crate::input::InputPolicy;
use crate::page::PageRequest;

/// The fullscreen kiosk window.
///
/// 全屏展示窗口。
pub trait KioskWindowPort: Send + Sync {
    /// Displays in OS enumeration order.
    fn displays(&self) -> Result<Vec<Rect>>;

    /// Build the window covering `bounds`: undecorated, fullscreen,
    /// always-on-top.
    ///
    /// 创建覆盖 `bounds` 的窗口。
    fn create(&self, bounds: Rect) -> Result<()>;

    /// Current outer bounds of the window.
    fn bounds(&self) -> Result<Rect>;

    /// Move and resize the window to exactly `bounds`.
    fn place(&self, bounds: Rect) -> Result<()>;

    fn load_page(&self, request: &PageRequest) -> Result<()>;

    fn apply_presentation(&self, policy: &InputPolicy) -> Result<()>;

    /// Hand the local playlist to the page.
    fn push_videos(&self, videos: &[PathBuf]) -> Result<()>;
}
