#![forbid(unsafe_code)]

use std::path::PathBuf;

use tl_core::config::Config;

/// Everything the process reads from the environment, resolved once in
/// `main`. Components receive values from here, never the environment.
pub(crate) struct Settings {
    pub(crate) config: Config,
    pub(crate) sources_path: PathBuf,
    pub(crate) prefix_tools: bool,
    pub(crate) debug: bool,
}

pub(crate) fn load_settings(sources_path_override: Option<PathBuf>) -> Settings {
    let config = Config {
        statuses: read_strings("STATUSES", "Backlog"),
        status_wip: read_string("STATUS_WIP", "In Progress"),
        status_todo: read_string("STATUS_TODO", "To Do"),
        status_done: read_string("STATUS_DONE", "Done"),
        status_deleted: read_string("STATUS_DELETED", "Deleted"),
        status_notes: read_string("STATUS_NOTES", "Notes"),
        status_reminders: read_string("STATUS_REMINDERS", "Reminders"),
        auto_wip: read_bool("AUTO_WIP", true),
        keep_deleted: read_bool("KEEP_DELETED", false),
        instructions: read_string("INSTRUCTIONS", ""),
    }
    .normalized();

    let sources_path = sources_path_override
        .unwrap_or_else(|| PathBuf::from(read_string("SOURCES_PATH", "./sources.json")));
    let sources_path = if sources_path.is_absolute() {
        sources_path
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(sources_path)
    };

    Settings {
        config,
        sources_path,
        prefix_tools: read_bool("PREFIX_TOOLS", true),
        debug: read_bool("DEBUG", false),
    }
}

fn read_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn read_bool(key: &str, default: bool) -> bool {
    read_string(key, if default { "true" } else { "false" }) == "true"
}

fn read_strings(key: &str, default: &str) -> Vec<String> {
    read_string(key, default)
        .split(',')
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}
