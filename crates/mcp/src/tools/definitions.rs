#![forbid(unsafe_code)]

use serde_json::{Value, json};
use tl_core::config::Config;
use tl_storage::FileStore;

fn tool_name(prefix_tools: bool, bare: &str) -> String {
    if prefix_tools {
        format!("tasks_{bare}")
    } else {
        bare.to_string()
    }
}

fn source_path_schema() -> Value {
    json!({
        "type": "string",
        "minLength": 1,
        "description": format!(
            "Path to a file (one of {}).\n- Must be absolute\n- Never invent or guess one! Ask the user for it",
            FileStore::supported_extensions()
        )
    })
}

fn source_id_schema() -> Value {
    json!({
        "type": "string",
        "description": "Source ID from tasks_setup() response\n\
            - Defaults to most recent (across projects) if not provided\n\
            - Try to always provide it!\n\
            - If you don't have it, ask the user for a file path and call tasks_setup()"
    })
}

fn status_schema(config: &Config) -> Value {
    json!({
        "type": "string",
        "enum": config.statuses,
        "description": format!(
            "You might need to infer it from the context. e.g.:\n\
             - \"{}\" when they say \"Do this next\"\n\
             - \"{}\" when they say \"First do this\"",
            config.status_todo, config.status_wip
        )
    })
}

fn update_status_schema(config: &Config) -> Value {
    let mut statuses = config.statuses.clone();
    if !statuses.contains(&config.status_deleted) {
        statuses.push(config.status_deleted.clone());
    }
    let mut description = format!(
        "You might need to infer it from the context. e.g.:\n\
         - \"{}\" when they say \"Do this next\"\n\
         - \"{}\" when they say \"First do this\"\n\
         - \"{}\" when they want these removed",
        config.status_todo, config.status_wip, config.status_deleted
    );
    if config.auto_wip {
        description.push_str(&format!(
            "\n- Updating tasks to {} moves others to {}, finishing a {} task moves the first {} to {}",
            config.status_wip,
            config.status_todo,
            config.status_wip,
            config.status_todo,
            config.status_wip
        ));
    }
    json!({
        "type": "string",
        "enum": statuses,
        "description": description
    })
}

fn index_schema() -> Value {
    json!({
        "type": "integer",
        "minimum": 0,
        "description": "0-based index to place the tasks. e.g.:\n\
            - 0 for \"Do this next\"\n\
            - Omit to place at the end (\"Do this later\")"
    })
}

fn setup_description(config: &Config) -> String {
    let mut description = "Initializes an source file from a path\n\
        - Always call once per conversation when asked to use these tools\n\
        - Ask the user to clarify the file path if not given, before calling this tool\n\
        - Creates the file if it does not exist\n\
        - Returns the source ID for further use"
        .to_string();
    if !config.instructions.is_empty() {
        description.push_str("\n- ");
        description.push_str(&config.instructions);
    }
    description
}

pub(crate) fn tool_definitions(prefix_tools: bool, debug: bool, config: &Config) -> Vec<Value> {
    let name = |bare: &str| tool_name(prefix_tools, bare);
    let mut tools = vec![
        json!({
            "name": name("setup"),
            "description": setup_description(config),
            "annotations": { "openWorldHint": false, "readOnlyHint": false, "title": name("setup") },
            "inputSchema": {
                "type": "object",
                "properties": {
                    "workspace": {
                        "type": "string",
                        "description": "Workspace/project directory path (provided by the IDE or use $PWD)"
                    },
                    "source_path": source_path_schema()
                },
                "required": ["source_path"]
            }
        }),
        json!({
            "name": name("search"),
            "description": "Search tasks from specific statuses with optional text & ID filtering",
            "annotations": { "openWorldHint": false, "readOnlyHint": true, "title": name("search") },
            "inputSchema": {
                "type": "object",
                "properties": {
                    "source_id": source_id_schema(),
                    "statuses": {
                        "type": "array",
                        "items": { "type": "string", "enum": config.statuses },
                        "description": "Specific statuses to get. Gets all if omitted"
                    },
                    "terms": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Search terms to filter tasks by text or status (case-insensitive, OR logic, no regex or wildcards)"
                    },
                    "ids": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Optional list of task IDs to search for"
                    },
                    "limit": {
                        "type": "integer",
                        "minimum": 1,
                        "description": "Maximum number of results (only for large task lists)"
                    }
                }
            }
        }),
        json!({
            "name": name("add"),
            "description": "Add new tasks with a specific status. It's faster and cheaper if you use this in batch, add all at once",
            "annotations": { "openWorldHint": false, "readOnlyHint": false, "title": name("add") },
            "inputSchema": {
                "type": "object",
                "properties": {
                    "source_id": source_id_schema(),
                    "texts": {
                        "type": "array",
                        "items": { "type": "string", "minLength": 1 },
                        "minItems": 1,
                        "description": "Each text becomes a task"
                    },
                    "status": status_schema(config),
                    "index": index_schema()
                },
                "required": ["texts", "status"]
            }
        }),
        json!({
            "name": name("update"),
            "description": "Update tasks by ID to a different status. It's faster and cheaper if you use this in batch, update all at once",
            "annotations": { "openWorldHint": false, "readOnlyHint": false, "title": name("update") },
            "inputSchema": {
                "type": "object",
                "properties": {
                    "source_id": source_id_schema(),
                    "ids": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "The IDs of existing tasks"
                    },
                    "status": update_status_schema(config),
                    "index": index_schema()
                },
                "required": ["ids", "status"]
            }
        }),
        json!({
            "name": name("summary"),
            "description": "Get count of tasks in each status and the work-in-progress tasks",
            "annotations": { "openWorldHint": false, "readOnlyHint": true, "title": name("summary") },
            "inputSchema": {
                "type": "object",
                "properties": {
                    "source_id": source_id_schema()
                }
            }
        }),
    ];

    if debug {
        tools.push(json!({
            "name": name("debug"),
            "description": "Get debug information about the MCP server and context",
            "annotations": { "openWorldHint": false, "readOnlyHint": true, "title": name("debug") },
            "inputSchema": { "type": "object", "properties": {} }
        }));
    }

    tools
}
