#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tl_core::ids::generate_id;
use tl_core::model::Source;

use crate::StoreError;

/// What the registry file persists per source. The id is derived from the
/// path on every read, never stored.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct SourceRecord {
    path: String,
    workspace: String,
}

/// Ordered list of registered backing files, most recently registered first.
/// The file is the single source of truth; it is re-read on every call.
pub struct SourceRegistry {
    path: PathBuf,
}

impl SourceRegistry {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn raw(&self) -> Vec<SourceRecord> {
        let Ok(content) = std::fs::read_to_string(&self.path) else {
            return Vec::new();
        };
        let Ok(entries) = serde_json::from_str::<Vec<serde_json::Value>>(&content) else {
            return Vec::new();
        };
        // Non-object entries come from a legacy registry layout; skip them.
        entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect()
    }

    pub fn load(&self) -> Vec<Source> {
        self.raw().into_iter().map(source_from_record).collect()
    }

    /// Registering the same path again moves it to the front without changing
    /// its id.
    pub fn register(&self, source_path: &str, workspace: &str) -> Result<Source, StoreError> {
        let path = if Path::new(source_path).is_absolute() {
            source_path.to_string()
        } else {
            if workspace.is_empty() {
                return Err(StoreError::RelativePathNeedsWorkspace);
            }
            Path::new(workspace)
                .join(source_path)
                .to_string_lossy()
                .to_string()
        };

        let mut entries = self.raw();
        entries.retain(|entry| entry.path != path);
        let record = SourceRecord {
            path,
            workspace: workspace.to_string(),
        };
        entries.insert(0, record.clone());

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string(&entries)?)?;
        Ok(source_from_record(record))
    }

    /// With an id: exact match or a caller-facing "re-register" error.
    /// Without: the most recent source in the caller's workspace, then the
    /// most recent overall.
    pub fn require(&self, id: Option<&str>, workspace: &str) -> Result<Source, StoreError> {
        let mut sources = self.load();
        if let Some(id) = id {
            return sources
                .into_iter()
                .find(|source| source.id == id)
                .ok_or_else(|| StoreError::SourceNotFound {
                    id: Some(id.to_string()),
                });
        }
        if let Some(position) = sources
            .iter()
            .position(|source| source.workspace == workspace)
        {
            return Ok(sources.swap_remove(position));
        }
        if sources.is_empty() {
            return Err(StoreError::SourceNotFound { id: None });
        }
        Ok(sources.swap_remove(0))
    }
}

fn source_from_record(record: SourceRecord) -> Source {
    Source {
        id: generate_id(&record.path),
        path: record.path,
        workspace: record.workspace,
    }
}

/// The caller's working directory, unless that is the home directory (a
/// session started from `$HOME` is not a meaningful workspace).
pub fn default_workspace() -> String {
    let cwd = std::env::current_dir()
        .map(|path| path.to_string_lossy().to_string())
        .unwrap_or_default();
    let home = std::env::var("HOME").unwrap_or_default();
    if !home.is_empty() && cwd == home {
        String::new()
    } else {
        cwd
    }
}
