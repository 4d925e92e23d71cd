//! Input gating for the kiosk page.
//!
//! The page-side interceptor is JavaScript, but the rule it applies lives
//! here so it can be tested and so the element ids stay in one place.

pub const NAV_LEFT_ID: &str = "nav-btn-left";
pub const NAV_RIGHT_ID: &str = "nav-btn-right";
pub const CLICK_BLOCKER_ID: &str = "click-blocker";
pub const BLOCK_CLICKS_CLASS: &str = "block-clicks";
pub const STRICT_LOCK_CLASS: &str = "strict-lock";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Click,
    PointerDown,
    KeyDown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputPolicy {
    pub block_clicks: bool,
    pub strict_lock: bool,
}

impl InputPolicy {
    pub fn new(block_clicks: bool, strict_lock: bool) -> Self {
        Self {
            block_clicks,
            strict_lock,
        }
    }

    pub fn blocks_clicks(&self) -> bool {
        self.block_clicks || self.strict_lock
    }

    /// Whether an event should be swallowed.
    ///
    /// `target_path` lists the ids of the event target followed by its
    /// ancestors, innermost first. Elements without an id may be given as
    /// empty strings.
    pub fn suppresses(&self, kind: InputKind, target_path: &[&str]) -> bool {
        if self.strict_lock {
            return true;
        }
        match kind {
            InputKind::Click => self.block_clicks && !is_navigation(target_path),
            InputKind::PointerDown | InputKind::KeyDown => false,
        }
    }

    /// Script evaluated in the kiosk page to apply this policy to the
    /// blocker element.
    pub fn presentation_script(&self) -> String {
        format!(
            "(function(){{var el=document.getElementById('{blocker}');if(!el)return;\
el.classList.toggle('{block}',{block_on});\
el.classList.toggle('{strict}',{strict_on});\
document.body.style.cursor='none';}})();",
            blocker = CLICK_BLOCKER_ID,
            block = BLOCK_CLICKS_CLASS,
            block_on = self.blocks_clicks(),
            strict = STRICT_LOCK_CLASS,
            strict_on = self.strict_lock,
        )
    }
}

fn is_navigation(target_path: &[&str]) -> bool {
    target_path
        .iter()
        .any(|id| *id == NAV_LEFT_ID || *id == NAV_RIGHT_ID)
}
