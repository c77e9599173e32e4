#![forbid(unsafe_code)]

use serde_json::Value;

use crate::optional_string;
use crate::server::McpServer;

pub(crate) fn handle(server: &McpServer, args: Value) -> Result<Value, String> {
    let source_id = optional_string(&args, "source_id")?;

    server
        .engine()
        .summary(source_id.as_deref())
        .map(Value::String)
        .map_err(|err| err.to_string())
}
