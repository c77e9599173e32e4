#![forbid(unsafe_code)]

use serde_json::Value;

use super::{tool_add, tool_debug, tool_search, tool_setup, tool_summary, tool_update};
use crate::server::McpServer;

pub(crate) fn dispatch_tool(
    server: &McpServer,
    name: &str,
    args: Value,
) -> Option<Result<Value, String>> {
    // With prefixed names only the prefixed form is registered, so only the
    // prefixed form dispatches.
    let bare = if server.prefix_tools() {
        name.strip_prefix("tasks_")?
    } else {
        name
    };
    dispatch_bare(server, bare, args)
}

pub(crate) fn dispatch_bare(
    server: &McpServer,
    name: &str,
    args: Value,
) -> Option<Result<Value, String>> {
    let resp = match name {
        "setup" => tool_setup::handle(server, args),
        "search" => tool_search::handle(server, args),
        "add" => tool_add::handle(server, args),
        "update" => tool_update::handle(server, args),
        "summary" => tool_summary::handle(server, args),
        "debug" if server.debug() => tool_debug::handle(server, args),
        _ => return None,
    };
    Some(resp)
}
