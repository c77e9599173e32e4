#![forbid(unsafe_code)]

use std::path::Path;

use tl_core::config::Config;
use tl_core::model::State;

use super::{FormatCodec, read_to_string_or_default, write_creating_dirs};
use crate::StoreError;

const HEADING_PREFIX: &str = "## ";

/// Restricted markdown dialect: one `## Status` heading per group, one bullet
/// per task, multi-line task text escaped to stay on a single line.
pub(crate) struct MarkdownCodec;

impl FormatCodec for MarkdownCodec {
    fn read(&self, config: &Config, path: &Path) -> Result<State, StoreError> {
        let content = read_to_string_or_default(path)?;
        let mut state = State::default();
        let mut current_group = config.status_todo.clone();

        for line in content.lines().map(str::trim).filter(|line| !line.is_empty()) {
            if let Some(heading) = line.strip_prefix(HEADING_PREFIX) {
                let heading = heading.trim();
                // A heading with no text keeps the previous group active.
                if !heading.is_empty() {
                    current_group = heading.to_string();
                }
            } else if let Some(text) = bullet_text(line) {
                state
                    .groups
                    .entry(current_group.clone())
                    .or_default()
                    .push(text.replace("\\n", "\n"));
            }
        }
        Ok(state)
    }

    fn write(&self, config: &Config, path: &Path, state: &State) -> Result<(), StoreError> {
        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();
        let mut content = format!("# Tasks - {}\n\n", start_case(&stem));

        for (group, tasks) in &state.groups {
            // Optional sections and file-only headings disappear once empty;
            // configured statuses keep their heading either way.
            if tasks.is_empty() && (config.skip_if_empty(group) || !config.is_configured(group)) {
                continue;
            }
            content.push_str(HEADING_PREFIX);
            content.push_str(group);
            content.push_str("\n\n");
            for task in tasks {
                let escaped = task.replace("\r\n", "\\n").replace('\n', "\\n");
                if group == &config.status_done {
                    content.push_str("- [x] ");
                } else if group == &config.status_notes || group == &config.status_reminders {
                    content.push_str("- ");
                } else {
                    content.push_str("- [ ] ");
                }
                content.push_str(&escaped);
                content.push('\n');
            }
            content.push('\n');
        }

        write_creating_dirs(path, &format!("{}\n", content.trim()))
    }
}

/// A task line requires the leading dash; the checkbox is optional and holds
/// at most one character. Anything else (including the title line) is not a
/// task.
fn bullet_text(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('-')?.trim_start();
    let text = strip_checkbox(rest).trim();
    if text.is_empty() { None } else { Some(text) }
}

fn strip_checkbox(rest: &str) -> &str {
    let Some(inner) = rest.strip_prefix('[') else {
        return rest;
    };
    if let Some(after) = inner.strip_prefix(']') {
        return after;
    }
    let mut chars = inner.chars();
    if chars.next().is_some()
        && let Some(after) = chars.as_str().strip_prefix(']')
    {
        return after;
    }
    rest
}

/// `my-tasks` / `myTasks` / `my_tasks` -> `My Tasks`, for the title line.
fn start_case(value: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for ch in value.chars() {
        if ch.is_alphanumeric() {
            if prev_lower && ch.is_uppercase() && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = ch.is_lowercase() || ch.is_numeric();
            current.push(ch);
        } else {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
        }
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
