#![forbid(unsafe_code)]

use std::path::Path;

use tl_core::config::Config;
use tl_core::model::State;

use crate::StoreError;
use crate::formats::{self, FormatCodec};

/// Loads and saves one backing file through the codec its extension selects.
/// Holds the configuration so every load produces the same skeleton of
/// configured status groups.
pub struct FileStore {
    config: Config,
}

impl FileStore {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Missing files are materialized as the empty skeleton immediately, so
    /// setup always leaves a real file behind. Corrupt files degrade to the
    /// empty skeleton instead of failing the call.
    pub fn load(&self, path: &Path) -> Result<State, StoreError> {
        let empty = self.empty_state();
        if !path.exists() {
            self.save(path, &empty)?;
            return Ok(empty);
        }
        let codec = self.codec_for(path)?;
        let mut read = match codec.read(&self.config, path) {
            Ok(state) => state,
            Err(_) => return Ok(empty),
        };
        if !self.config.keep_deleted {
            // In case retention was switched off after tasks were deleted.
            read.groups.shift_remove(&self.config.status_deleted);
        }
        // Configured statuses come first in configured order; groups only
        // present in the file keep their file order after them.
        let mut merged = empty;
        for (group, tasks) in read.groups {
            merged.groups.insert(group, tasks);
        }
        Ok(merged)
    }

    pub fn save(&self, path: &Path, state: &State) -> Result<(), StoreError> {
        self.codec_for(path)?.write(&self.config, path, state)
    }

    pub(crate) fn codec_for(&self, path: &Path) -> Result<&'static dyn FormatCodec, StoreError> {
        let extension = file_extension(path);
        formats::codec_for_extension(&extension)
            .ok_or(StoreError::UnsupportedExtension { extension })
    }

    /// Validates that the path's extension maps to a codec.
    pub fn check_extension(&self, path: &Path) -> Result<(), StoreError> {
        self.codec_for(path).map(|_| ())
    }

    pub fn supported_extensions() -> &'static str {
        formats::SUPPORTED_EXTENSIONS
    }

    pub fn empty_state(&self) -> State {
        let mut state = State::default();
        for status in &self.config.statuses {
            state.groups.insert(status.clone(), Vec::new());
        }
        state
    }
}

// Trailing `.ext` of 2-5 word characters, e.g. `tasks.md` -> `md`.
fn file_extension(path: &Path) -> String {
    let raw = path.to_string_lossy();
    let Some((_, extension)) = raw.rsplit_once('.') else {
        return String::new();
    };
    let plausible = (2..=5).contains(&extension.len())
        && extension
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_');
    if plausible {
        extension.to_string()
    } else {
        String::new()
    }
}
