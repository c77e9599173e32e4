#![forbid(unsafe_code)]

use serde_json::{Value, json};

use crate::server::McpServer;

pub(crate) fn handle(server: &McpServer, args: Value) -> Result<Value, String> {
    let config = server.engine().config();
    let cwd = std::env::current_dir()
        .map(|path| path.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(json!({
        "args": args,
        "version": crate::SERVER_VERSION,
        "cwd": cwd,
        "argv": std::env::args().collect::<Vec<_>>(),
        "config": {
            "statuses": config.statuses,
            "status_wip": config.status_wip,
            "status_todo": config.status_todo,
            "status_done": config.status_done,
            "auto_wip": config.auto_wip,
            "keep_deleted": config.keep_deleted,
            "instructions": config.instructions,
        },
    }))
}
