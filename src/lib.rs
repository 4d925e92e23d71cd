//! Kiosk Player
//!
//! Fullscreen signage player: one kiosk window, a tray menu and a settings
//! window, driven by the kiosk runtime in `kp-app`.

use std::sync::Arc;

use kp_app::KioskRuntime;
use kp_tauri::bootstrap::{tracing::init_tracing_subscriber, wire_dependencies};
use kp_tauri::{commands, lifecycle, tray, TauriKioskWindow, KIOSK_WINDOW_LABEL};
use tauri::Manager;
use tauri_plugin_autostart::MacosLauncher;
use tracing::{error, info, info_span, warn, Instrument};

pub fn run() {
    if let Err(err) = init_tracing_subscriber() {
        eprintln!("Failed to initialize tracing: {err}");
    }
    info!(version = env!("CARGO_PKG_VERSION"), "starting kiosk player");

    // Single instance must be registered first.
    let app = tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app, args, _cwd| {
            info!(?args, "second instance launched, focusing kiosk window");
            if let Some(window) = app.get_webview_window(KIOSK_WINDOW_LABEL) {
                if let Err(err) = window.set_focus() {
                    warn!(error = %err, "focus kiosk window failed");
                }
            }
        }))
        .plugin(tauri_plugin_autostart::init(
            MacosLauncher::LaunchAgent,
            Some(vec![]),
        ))
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            let app_handle = app.handle().clone();

            let window = Arc::new(TauriKioskWindow::new(app_handle.clone()));
            let deps = wire_dependencies(&app_handle, Arc::clone(&window))?;
            let (runtime, handle) = KioskRuntime::new(deps);
            window.attach(handle.clone());
            app.manage(handle);

            tray::init_tray(&app_handle)?;

            tauri::async_runtime::spawn(async move {
                if let Err(err) = runtime.run().instrument(info_span!("kiosk.runtime")).await {
                    error!(error = %format!("{err:#}"), "kiosk runtime failed");
                    app_handle.exit(1);
                }
            });

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::config::get_config,
            commands::config::save_config,
            commands::dialog::select_folder,
            commands::window::move_window,
            commands::window::request_video_list,
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    app.run(lifecycle::on_run_event);
}
