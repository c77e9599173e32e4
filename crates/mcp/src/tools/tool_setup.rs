#![forbid(unsafe_code)]

use serde_json::Value;
use tl_storage::SetupArgs;

use crate::server::McpServer;
use crate::{optional_string, require_string};

pub(crate) fn handle(server: &McpServer, args: Value) -> Result<Value, String> {
    // Older clients sent `path` instead of `source_path`.
    let source_path = match optional_string(&args, "source_path")? {
        Some(path) => path,
        None => require_string(&args, "path").map_err(|_| "source_path is required".to_string())?,
    };
    let workspace = optional_string(&args, "workspace")?;

    server
        .engine()
        .setup(SetupArgs {
            source_path,
            workspace,
        })
        .map(Value::String)
        .map_err(|err| err.to_string())
}
