use std::path::PathBuf;

const CONFIG_FILE_NAME: &str = "config.json";
const LOGS_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    pub app_data_root: PathBuf,
}

impl AppDirs {
    pub fn config_file(&self) -> PathBuf {
        self.app_data_root.join(CONFIG_FILE_NAME)
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.app_data_root.join(LOGS_DIR_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_paths_live_under_data_root() {
        let dirs = AppDirs {
            app_data_root: PathBuf::from("/tmp/kiosk-player"),
        };
        assert_eq!(dirs.config_file(), PathBuf::from("/tmp/kiosk-player/config.json"));
        assert_eq!(dirs.logs_dir(), PathBuf::from("/tmp/kiosk-player/logs"));
    }
}
