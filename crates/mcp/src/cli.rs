#![forbid(unsafe_code)]

use serde_json::{Value, json};

use crate::render_result;
use crate::server::McpServer;

pub(crate) fn is_command(value: &str) -> bool {
    matches!(
        value,
        "setup" | "search" | "add" | "update" | "summary" | "debug"
    )
}

/// One-shot command mode: maps positional arguments onto the same tool
/// handlers the MCP surface uses, prints the result, and exits.
pub(crate) fn run(
    server: &McpServer,
    command: &str,
    rest: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let args = match command {
        "setup" => json!({
            "source_path": rest.first(),
            "workspace": rest.get(1),
        }),
        "search" => json!({
            "statuses": split_csv(rest.first()),
            "terms": split_csv(rest.get(1)),
        }),
        "add" => json!({
            "texts": [rest.first()],
            "status": rest
                .get(1)
                .cloned()
                .unwrap_or_else(|| server.engine().config().status_todo.clone()),
        }),
        "update" => json!({
            "ids": split_csv(rest.first()).unwrap_or_default(),
            "status": rest.get(1),
        }),
        _ => json!({}),
    };

    match crate::tools::dispatch_bare(server, command, args) {
        Some(Ok(value)) => {
            println!("{}", render_result(&value));
            Ok(())
        }
        Some(Err(message)) => {
            eprintln!("Error: {message}");
            std::process::exit(1);
        }
        None => {
            eprintln!("Error: unknown command: {command}");
            std::process::exit(1);
        }
    }
}

fn split_csv(value: Option<&String>) -> Option<Vec<String>> {
    let value = value?;
    if value.is_empty() {
        return None;
    }
    Some(
        value
            .split(',')
            .map(|part| part.trim().to_string())
            .filter(|part| !part.is_empty())
            .collect(),
    )
}
