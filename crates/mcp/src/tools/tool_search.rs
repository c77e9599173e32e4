#![forbid(unsafe_code)]

use serde_json::{Value, json};
use tl_storage::SearchArgs;

use crate::server::McpServer;
use crate::{optional_limit, optional_string, optional_string_list};

pub(crate) fn handle(server: &McpServer, args: Value) -> Result<Value, String> {
    let search = SearchArgs {
        source_id: optional_string(&args, "source_id")?,
        statuses: optional_string_list(&args, "statuses")?,
        terms: optional_string_list(&args, "terms")?,
        ids: optional_string_list(&args, "ids")?,
        limit: optional_limit(&args, "limit")?,
    };

    server
        .engine()
        .search(search)
        .map(|tasks| json!(tasks))
        .map_err(|err| err.to_string())
}
