//! Recent activity list persisted as a JSON array in a single file.

use crate::model::{DownloadStatus, RecentDownload};
use rand::Rng;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Maximum number of records kept
pub const HISTORY_CAPACITY: usize = 10;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 9;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("History I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("History JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Most-recent-first list of completed (simulated) downloads
pub struct HistoryStore {
    path: PathBuf,
    entries: Vec<RecentDownload>,
}

impl HistoryStore {
    /// Opens the store at `path`, loading whatever is saved there.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load(&path);
        Self { path, entries }
    }

    pub fn entries(&self) -> &[RecentDownload] {
        &self.entries
    }

    /// Prepends `record`, truncates to capacity and persists the whole list.
    pub fn append(&mut self, record: RecentDownload) -> Result<(), HistoryError> {
        self.entries.insert(0, record);
        self.entries.truncate(HISTORY_CAPACITY);
        self.save()
    }

    /// Empties the list and removes the persisted file.
    pub fn clear(&mut self) -> Result<(), HistoryError> {
        self.entries.clear();
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(&self.entries)?;
        std::fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), count = self.entries.len(), "history saved");
        Ok(())
    }
}

/// Reads the saved list; absent or unparsable files yield an empty list.
pub fn load(path: &Path) -> Vec<RecentDownload> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %path.display(), error = %e, "could not read history");
            }
            return Vec::new();
        }
    };
    match serde_json::from_str(&text) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unparsable history");
            Vec::new()
        }
    }
}

/// Builds the record appended when a simulated download completes.
pub fn new_record<R: Rng + ?Sized>(rng: &mut R, url: &str, title: &str) -> RecentDownload {
    let id = (0..ID_LEN)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect();
    RecentDownload {
        id,
        url: url.to_string(),
        title: title.to_string(),
        timestamp: chrono::Utc::now().timestamp_millis(),
        status: DownloadStatus::Completed,
    }
}
