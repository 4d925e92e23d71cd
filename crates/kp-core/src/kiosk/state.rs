/// Lifecycle state of the kiosk window.
///
/// 展示窗口的生命周期状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KioskState {
    /// No window yet.
    ///
    /// 尚未创建窗口。
    #[default]
    Uninitialized,
    /// Window created and placed on a display, nothing loaded.
    ///
    /// 窗口已创建并放置到显示器上。
    Placed,
    /// A load with this generation is in flight.
    ///
    /// 正在加载指定代次的内容。
    Loading { generation: u64 },
    /// The load with this generation finished and is on screen.
    ///
    /// 指定代次的内容已显示。
    Displaying { generation: u64 },
    /// Quit accepted, waiting for the window to go away.
    ///
    /// 已确认退出，等待窗口关闭。
    Closing,
    Closed,
}

impl KioskState {
    /// Generation of the current or last load, 0 before the first one.
    pub fn generation(&self) -> u64 {
        match self {
            KioskState::Loading { generation } | KioskState::Displaying { generation } => {
                *generation
            }
            _ => 0,
        }
    }

    /// Placed, loading or displaying: the window exists and is serving.
    pub fn is_live(&self) -> bool {
        matches!(
            self,
            KioskState::Placed | KioskState::Loading { .. } | KioskState::Displaying { .. }
        )
    }
}
