#![forbid(unsafe_code)]

use serde_json::Value;
use tl_storage::AddArgs;

use crate::server::McpServer;
use crate::{optional_integer, optional_string, require_string, require_string_list};

pub(crate) fn handle(server: &McpServer, args: Value) -> Result<Value, String> {
    let texts = require_string_list(&args, "texts")?;
    if texts.is_empty() || texts.iter().any(String::is_empty) {
        return Err("texts must be non-empty strings".to_string());
    }
    let add = AddArgs {
        source_id: optional_string(&args, "source_id")?,
        texts,
        status: require_string(&args, "status")?,
        index: optional_integer(&args, "index")?,
    };

    server
        .engine()
        .add(add)
        .map(Value::String)
        .map_err(|err| err.to_string())
}
