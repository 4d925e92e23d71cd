/// Application-level UI operations outside the kiosk window.
pub trait UiPort: Send + Sync {
    fn close_settings(&self);
    fn exit(&self);
}
