#![forbid(unsafe_code)]

use serde_json::Value;
use tl_storage::UpdateArgs;

use crate::server::McpServer;
use crate::{optional_integer, optional_string, require_string, require_string_list};

pub(crate) fn handle(server: &McpServer, args: Value) -> Result<Value, String> {
    let update = UpdateArgs {
        source_id: optional_string(&args, "source_id")?,
        ids: require_string_list(&args, "ids")?,
        status: require_string(&args, "status")?,
        index: optional_integer(&args, "index")?,
    };

    server
        .engine()
        .update(update)
        .map(Value::String)
        .map_err(|err| err.to_string())
}
