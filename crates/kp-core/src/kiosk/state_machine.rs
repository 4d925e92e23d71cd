//! Pure kiosk lifecycle transitions.

use super::action::{KioskAction, RETRY_DELAY};
use super::event::KioskEvent;
use super::state::KioskState;

/// Pure kiosk state machine.
///
/// 纯状态机：不包含副作用。
pub struct KioskStateMachine;

impl KioskStateMachine {
    pub fn transition(state: KioskState, event: KioskEvent) -> (KioskState, Vec<KioskAction>) {
        match (state, event) {
            (KioskState::Uninitialized, KioskEvent::WindowPlaced) => {
                (KioskState::Placed, Vec::new())
            }

            (live, KioskEvent::ReloadRequested(_)) if live.is_live() => {
                let generation = live.generation() + 1;
                (
                    KioskState::Loading { generation },
                    vec![KioskAction::LoadContent { generation }],
                )
            }

            (
                KioskState::Loading { generation } | KioskState::Displaying { generation },
                KioskEvent::LoadFinished { generation: finished },
            ) if finished == generation => (
                KioskState::Displaying { generation },
                vec![KioskAction::ApplyPresentation { generation }],
            ),

            (KioskState::Loading { generation }, KioskEvent::LoadFailed { generation: failed, .. })
                if failed == generation =>
            {
                (
                    KioskState::Loading { generation },
                    vec![KioskAction::ScheduleRetry {
                        generation,
                        delay: RETRY_DELAY,
                    }],
                )
            }

            (KioskState::Loading { generation }, KioskEvent::RetryElapsed { generation: due })
                if due == generation =>
            {
                let generation = generation + 1;
                (
                    KioskState::Loading { generation },
                    vec![KioskAction::LoadContent { generation }],
                )
            }

            (
                live,
                KioskEvent::CloseRequested | KioskEvent::WindowMoved | KioskEvent::WindowResized,
            ) if live.is_live() => (live, vec![KioskAction::PersistDisplay]),

            (live, KioskEvent::MoveRequested(direction)) if live.is_live() => {
                (live, vec![KioskAction::MoveToAdjacent(direction)])
            }

            (live, KioskEvent::QuitRequested) if live.is_live() => (
                KioskState::Closing,
                vec![
                    KioskAction::PersistDisplay,
                    KioskAction::ReleaseFolderWatch,
                    KioskAction::Exit,
                ],
            ),
            (KioskState::Uninitialized, KioskEvent::QuitRequested) => {
                (KioskState::Closing, vec![KioskAction::Exit])
            }

            (KioskState::Closing, KioskEvent::CloseRequested | KioskEvent::WindowDestroyed) => {
                (KioskState::Closed, Vec::new())
            }

            (state, _event) => (state, Vec::new()),
        }
    }
}
