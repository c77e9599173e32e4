#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};

use serde_json::{Map, Value, json};
use tl_core::config::Config;
use tl_core::ids::is_id;
use tl_core::model::{State, Task};
use tl_core::text::fuzzy_contains;

use crate::metadata::{self, Metadata};
use crate::{FileStore, SourceRegistry, StoreError};

pub struct SetupArgs {
    pub source_path: String,
    pub workspace: Option<String>,
}

pub struct SearchArgs {
    pub source_id: Option<String>,
    pub statuses: Option<Vec<String>>,
    pub terms: Option<Vec<String>>,
    pub ids: Option<Vec<String>>,
    pub limit: Option<usize>,
}

pub struct AddArgs {
    pub source_id: Option<String>,
    pub texts: Vec<String>,
    pub status: String,
    pub index: Option<i64>,
}

pub struct UpdateArgs {
    pub source_id: Option<String>,
    pub ids: Vec<String>,
    pub status: String,
    pub index: Option<i64>,
}

/// The status-group state machine: every operation re-reads the backing file,
/// mutates the ordered groups, persists, and answers from a fresh projection.
/// Nothing is cached across calls.
pub struct TaskEngine {
    config: Config,
    store: FileStore,
    registry: SourceRegistry,
    workspace: String,
}

impl TaskEngine {
    pub fn new(config: Config, sources_path: PathBuf, workspace: String) -> Self {
        Self {
            store: FileStore::new(config.clone()),
            registry: SourceRegistry::new(sources_path),
            config,
            workspace,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Registers a backing file and returns the summary for it. Loading the
    /// summary creates the file when it does not exist yet.
    pub fn setup(&self, args: SetupArgs) -> Result<String, StoreError> {
        self.store.check_extension(Path::new(&args.source_path))?;
        let workspace = args.workspace.unwrap_or_else(|| self.workspace.clone());
        let source = self.registry.register(&args.source_path, &workspace)?;
        self.summary_for(Some(&source.id), None)
    }

    pub fn search(&self, args: SearchArgs) -> Result<Vec<Task>, StoreError> {
        let meta = self.metadata(args.source_id.as_deref())?;
        let statuses = match args.statuses {
            Some(statuses) if !statuses.is_empty() => statuses,
            _ => meta.statuses.clone(),
        };
        let mut results: Vec<Task> = statuses
            .iter()
            .flat_map(|status| meta.groups.get(status).cloned().unwrap_or_default())
            .collect();
        if let Some(ids) = &args.ids {
            results.retain(|task| ids.iter().any(|id| id == &task.id));
        }
        if let Some(terms) = &args.terms
            && !terms.is_empty()
        {
            // Text and status are matched as one string, so a status-name
            // guess and a text keyword both work through `terms`.
            results.retain(|task| {
                let haystack = format!("{} {}", task.text, task.status);
                terms.iter().any(|term| fuzzy_contains(&haystack, term))
            });
        }
        if let Some(limit) = args.limit {
            results.truncate(limit);
        }
        Ok(results)
    }

    pub fn add(&self, args: AddArgs) -> Result<String, StoreError> {
        self.add_inner(args, false)
    }

    /// Resolves each reference to its current text, then delegates to the add
    /// path: a move is a remove-everywhere plus insert, and deletion is an
    /// add targeting a group that only performs the removal.
    pub fn update(&self, args: UpdateArgs) -> Result<String, StoreError> {
        let meta = self.metadata(args.source_id.as_deref())?;
        let mut texts = Vec::with_capacity(args.ids.len());
        for reference in &args.ids {
            if let Some(task) = meta.by_id_or_text.get(reference) {
                texts.push(task.text.clone());
            } else if is_id(reference) {
                return Err(StoreError::TaskNotFound {
                    id: reference.clone(),
                });
            } else {
                // Callers sometimes pass task text where an id belongs; treat
                // it as the text of a task to create or move.
                texts.push(reference.clone());
            }
        }
        self.add_inner(
            AddArgs {
                source_id: args.source_id,
                texts,
                status: args.status,
                index: args.index,
            },
            true,
        )
    }

    pub fn summary(&self, source_id: Option<&str>) -> Result<String, StoreError> {
        self.summary_for(source_id, None)
    }

    fn add_inner(&self, args: AddArgs, from_update: bool) -> Result<String, StoreError> {
        let meta = self.metadata(args.source_id.as_deref())?;
        let mut state = meta.state;
        let texts = args.texts;

        // A text lives in at most one group: adding it anywhere removes it
        // everywhere else first. Re-adding a deleted text is a fresh task.
        for tasks in state.groups.values_mut() {
            tasks.retain(|text| !texts.iter().any(|incoming| incoming == text));
        }

        if !state.groups.contains_key(&args.status) {
            // Unknown statuses, and Deleted without retention, are
            // removal-only: persist the removals and report nothing added.
            self.store.save(Path::new(&meta.source.path), &state)?;
            return self.summary_for(Some(&meta.source.id), Some(Vec::new()));
        }

        if self.config.auto_wip && args.status == self.config.status_wip {
            // Park the current WIP at the front of To Do before the new batch
            // lands, so at most one task is in progress going in.
            let parked = state
                .groups
                .get_mut(&self.config.status_wip)
                .map(std::mem::take)
                .unwrap_or_default();
            if let Some(todos) = state.groups.get_mut(&self.config.status_todo) {
                todos.splice(0..0, parked);
            }
        }

        if let Some(group) = state.groups.get_mut(&args.status) {
            let len = group.len() as i64;
            // Out-of-range indexes clamp instead of failing.
            let index = args.index.unwrap_or(len).clamp(0, len) as usize;
            group.splice(index..index, texts.iter().cloned());
        }

        if self.config.auto_wip {
            self.fill_wip(&mut state, texts.first(), from_update);
        }

        self.store.save(Path::new(&meta.source.path), &state)?;
        let meta = self.metadata(Some(&meta.source.id))?;
        let tasks = texts
            .iter()
            .filter_map(|text| meta.by_id_or_text.get(text).cloned())
            .collect();
        self.summary_for(Some(&meta.source.id), Some(tasks))
    }

    /// When WIP has drained, promote the head of To Do. The exception: when
    /// that head is the text an update just placed there, an explicit
    /// demotion must not be undone by its own call.
    fn fill_wip(&self, state: &mut State, first_text: Option<&String>, from_update: bool) {
        let wip_is_empty = state
            .groups
            .get(&self.config.status_wip)
            .is_none_or(|tasks| tasks.is_empty());
        if !wip_is_empty {
            return;
        }
        let Some(head) = state
            .groups
            .get(&self.config.status_todo)
            .and_then(|tasks| tasks.first())
            .cloned()
        else {
            return;
        };
        if from_update && first_text == Some(&head) {
            return;
        }
        if let Some(todos) = state.groups.get_mut(&self.config.status_todo) {
            todos.remove(0);
        }
        if let Some(wip) = state.groups.get_mut(&self.config.status_wip) {
            wip.push(head);
        }
    }

    fn metadata(&self, source_id: Option<&str>) -> Result<Metadata, StoreError> {
        metadata::load(&self.registry, &self.store, source_id, &self.workspace)
    }

    /// The summary is a JSON string: source descriptor, per-group counts in
    /// group order, total, optional configured instructions, the full WIP
    /// task list, and (after mutations) the resolved input tasks.
    fn summary_for(
        &self,
        source_id: Option<&str>,
        tasks: Option<Vec<Task>>,
    ) -> Result<String, StoreError> {
        let meta = self.metadata(source_id)?;
        let mut body = Map::new();
        body.insert(
            "source".to_string(),
            json!({ "path": meta.source.path, "id": meta.source.id }),
        );
        let mut total = 0usize;
        for (status, group) in &meta.groups {
            total += group.len();
            body.insert(status.clone(), json!(group.len()));
        }
        body.insert("total".to_string(), json!(total));
        if !self.config.instructions.is_empty() {
            body.insert("instructions".to_string(), json!(self.config.instructions));
        }
        if let Some(wip) = meta.groups.get(&self.config.status_wip) {
            body.insert("wip".to_string(), json!(wip));
        }
        if let Some(tasks) = tasks {
            body.insert("tasks".to_string(), json!(tasks));
        }
        Ok(Value::Object(body).to_string())
    }
}
