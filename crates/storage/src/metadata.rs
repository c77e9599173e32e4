#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::path::Path;

use indexmap::IndexMap;
use tl_core::ids::generate_id;
use tl_core::model::{Source, State, Task};

use crate::{FileStore, SourceRegistry, StoreError};

/// One projection of a source's raw state into addressable task records.
/// Rebuilt from disk for every operation and discarded afterwards.
pub struct Metadata {
    pub source: Source,
    pub state: State,
    pub groups: IndexMap<String, Vec<Task>>,
    pub tasks: Vec<Task>,
    /// Every task is indexed twice: by id and by its literal text, so callers
    /// may reference either. Identical texts share an id, and the later task
    /// wins both slots.
    pub by_id_or_text: HashMap<String, Task>,
    pub statuses: Vec<String>,
}

pub(crate) fn load(
    registry: &SourceRegistry,
    store: &FileStore,
    source_id: Option<&str>,
    workspace: &str,
) -> Result<Metadata, StoreError> {
    let source = registry.require(source_id, workspace)?;
    let state = store.load(Path::new(&source.path))?;
    let statuses: Vec<String> = state.groups.keys().cloned().collect();

    let mut groups = IndexMap::new();
    let mut tasks = Vec::new();
    let mut by_id_or_text = HashMap::new();
    for (status, texts) in &state.groups {
        let mut group_tasks = Vec::with_capacity(texts.len());
        for (index, text) in texts.iter().enumerate() {
            let task = Task {
                id: generate_id(text),
                text: text.clone(),
                status: status.clone(),
                index,
            };
            tasks.push(task.clone());
            by_id_or_text.insert(task.id.clone(), task.clone());
            by_id_or_text.insert(task.text.clone(), task.clone());
            group_tasks.push(task);
        }
        groups.insert(status.clone(), group_tasks);
    }

    Ok(Metadata {
        source,
        state,
        groups,
        tasks,
        by_id_or_text,
        statuses,
    })
}
