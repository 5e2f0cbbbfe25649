use chrono::{DateTime, NaiveDateTime, Utc};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::TrackerError;
use crate::ledger::{Ledger, CURRENT_SCHEMA_VERSION};
use crate::utils::{self, BACKUP_DIR, STATE_FILE};

use super::{Result, StorageBackend};

const BACKUP_EXTENSION: &str = "json";
const BACKUP_PREFIX: &str = "tracker_";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

/// Stores the tracker state as pretty-printed JSON under a root directory,
/// keeping timestamped backups of every overwritten file.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    state_file: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            state_file: root.join(STATE_FILE),
            backups_dir: root.join(BACKUP_DIR),
            retention: DEFAULT_RETENTION,
        }
    }

    /// Storage rooted at the app data directory.
    pub fn new_default() -> Self {
        Self::new(utils::app_data_dir())
    }

    pub fn with_retention(mut self, retention: usize) -> Self {
        self.retention = retention.max(1);
        self
    }

    pub fn state_file(&self) -> &Path {
        &self.state_file
    }

    /// Backup files, newest first.
    pub fn list_backups(&self) -> Result<Vec<PathBuf>> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            entries.push(path);
        }
        entries.sort_by(|a, b| parse_backup_timestamp(b).cmp(&parse_backup_timestamp(a)));
        Ok(entries)
    }

    fn backup_existing_file(&self) -> Result<()> {
        if !self.state_file.exists() {
            return Ok(());
        }
        utils::ensure_dir(&self.backups_dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT);
        let backup_path = self.backups_dir.join(format!(
            "{}{}.{}",
            BACKUP_PREFIX, timestamp, BACKUP_EXTENSION
        ));
        fs::copy(&self.state_file, &backup_path)?;
        self.prune_backups()?;
        Ok(())
    }

    fn prune_backups(&self) -> Result<()> {
        let backups = self.list_backups()?;
        for path in backups.iter().skip(self.retention) {
            let _ = fs::remove_file(path);
        }
        Ok(())
    }
}

impl StorageBackend for JsonStorage {
    fn save(&self, ledger: &Ledger) -> Result<()> {
        if let Some(parent) = self.state_file.parent() {
            utils::ensure_dir(parent)?;
        }
        self.backup_existing_file()?;
        let json = serde_json::to_string_pretty(ledger)?;
        let tmp = tmp_path(&self.state_file);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.state_file)?;
        Ok(())
    }

    /// Loads the stored state, or a fresh ledger when no file exists yet.
    fn load(&self) -> Result<Ledger> {
        if !self.state_file.exists() {
            return Ok(Ledger::new());
        }
        let data = fs::read_to_string(&self.state_file)?;
        let ledger: Ledger = serde_json::from_str(&data)?;
        if ledger.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(TrackerError::Storage(format!(
                "state file `{}` uses schema version {} but this build supports up to {}",
                self.state_file.display(),
                ledger.schema_version,
                CURRENT_SCHEMA_VERSION
            )));
        }
        Ok(ledger)
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

fn parse_backup_timestamp(path: &Path) -> Option<DateTime<Utc>> {
    let stem = path.file_name()?.to_str()?;
    let raw = stem
        .strip_prefix(BACKUP_PREFIX)?
        .strip_suffix(&format!(".{}", BACKUP_EXTENSION))?;
    NaiveDateTime::parse_from_str(raw, BACKUP_TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}
