use dirs::home_dir;
use std::{env, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".academy_billing";
const HISTORY_FILE: &str = "history.txt";

/// Returns the application data directory, defaulting to `~/.academy_billing`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("ACADEMY_BILLING_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Interactive shell history file.
pub fn history_file() -> PathBuf {
    app_data_dir().join(HISTORY_FILE)
}
