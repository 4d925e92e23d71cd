//! System tray: the operator's only way to reach settings or quit.

use kp_app::KioskRuntimeHandle;
use kp_core::kiosk::KioskEvent;
use tauri::menu::{Menu, MenuEvent, MenuItem};
use tauri::tray::TrayIconBuilder;
use tauri::{AppHandle, Manager};
use tracing::{info, warn};

use crate::settings_window::open_settings_window;

const TRAY_ID: &str = "kiosk-tray";
const MENU_SETTINGS: &str = "settings";
const MENU_QUIT: &str = "quit";

pub fn init_tray(app: &AppHandle) -> tauri::Result<()> {
    let settings = MenuItem::with_id(app, MENU_SETTINGS, "Settings", true, None::<&str>)?;
    let quit = MenuItem::with_id(app, MENU_QUIT, "Quit", true, None::<&str>)?;
    let menu = Menu::with_items(app, &[&settings, &quit])?;

    let mut builder = TrayIconBuilder::with_id(TRAY_ID)
        .tooltip("Kiosk Player")
        .menu(&menu)
        .show_menu_on_left_click(true)
        .on_menu_event(handle_menu_event);
    if let Some(icon) = app.default_window_icon() {
        builder = builder.icon(icon.clone());
    }
    builder.build(app)?;
    Ok(())
}

fn handle_menu_event(app: &AppHandle, event: MenuEvent) {
    match event.id().as_ref() {
        MENU_SETTINGS => {
            if let Err(err) = open_settings_window(app) {
                warn!(error = %err, "open settings window failed");
            }
        }
        MENU_QUIT => {
            info!("quit requested from tray");
            match app.try_state::<KioskRuntimeHandle>() {
                Some(runtime) => runtime.post(KioskEvent::QuitRequested),
                None => app.exit(0),
            }
        }
        other => warn!(id = other, "unknown tray menu item"),
    }
}
