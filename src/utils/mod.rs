use std::sync::Once;
use std::{env, fs, io, path::Path, path::PathBuf};

use dirs::home_dir;

const DEFAULT_DIR_NAME: &str = ".expense_core";

/// File name of the persisted tracker snapshot.
pub const STATE_FILE: &str = "tracker.json";
/// File name of the app configuration.
pub const CONFIG_FILE: &str = "config.json";
/// Directory name holding rolling backups of the state file.
pub const BACKUP_DIR: &str = "backups";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("expense_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}

/// Returns the application-specific data directory, defaulting to `~/.expense_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("EXPENSE_CORE_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Path to the configuration file.
pub fn config_file() -> PathBuf {
    app_data_dir().join(CONFIG_FILE)
}

/// Creates the directory (and its parents) when missing.
pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
