use std::time::Duration;

use crate::display::Direction;

/// Fixed delay before a failed load is attempted again.
pub const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Side effects produced by transitions.
///
/// 状态迁移产生的副作用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KioskAction {
    /// Resolve content and navigate the window.
    ///
    /// 解析内容并导航窗口。
    LoadContent { generation: u64 },
    /// Hide cursor, re-assert always-on-top, apply input policy, push videos.
    ///
    /// 应用展示设置。
    ApplyPresentation { generation: u64 },
    ScheduleRetry { generation: u64, delay: Duration },
    /// Save the index of the display the window is on.
    ///
    /// 保存窗口所在显示器索引。
    PersistDisplay,
    MoveToAdjacent(Direction),
    ReleaseFolderWatch,
    Exit,
}
