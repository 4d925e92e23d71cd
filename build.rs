fn main() {
    // Registering the app commands generates `allow-<command>` permissions,
    // so each window's capability can grant only the commands it needs.
    tauri_build::try_build(tauri_build::Attributes::new().app_manifest(
        tauri_build::AppManifest::new().commands(&[
            "get_config",
            "save_config",
            "select_folder",
            "move_window",
            "request_video_list",
        ]),
    ))
    .expect("failed to run tauri-build");
}
