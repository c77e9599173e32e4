#![forbid(unsafe_code)]

use serde_json::{Value, json};
use tl_storage::TaskEngine;

use crate::{
    JsonRpcRequest, SessionLog, json_rpc_error, json_rpc_response, render_result, tool_response,
};

pub(crate) struct McpServer {
    initialized: bool,
    engine: TaskEngine,
    prefix_tools: bool,
    debug: bool,
    log: SessionLog,
}

impl McpServer {
    pub(crate) fn new(
        engine: TaskEngine,
        prefix_tools: bool,
        debug: bool,
        log: SessionLog,
    ) -> Self {
        Self {
            initialized: false,
            engine,
            prefix_tools,
            debug,
            log,
        }
    }

    pub(crate) fn engine(&self) -> &TaskEngine {
        &self.engine
    }

    pub(crate) fn prefix_tools(&self) -> bool {
        self.prefix_tools
    }

    pub(crate) fn debug(&self) -> bool {
        self.debug
    }

    pub(crate) fn note_exit(&mut self, reason: &str) {
        self.log.note_exit(reason);
    }

    pub(crate) fn handle(&mut self, request: JsonRpcRequest) -> Option<Value> {
        let method = request.method.as_str();
        self.log.note_method(method);

        if method == "initialize" {
            return Some(json_rpc_response(
                request.id,
                json!({
                    "protocolVersion": crate::MCP_VERSION,
                    "serverInfo": { "name": crate::SERVER_NAME, "version": crate::SERVER_VERSION },
                    "capabilities": { "tools": {} }
                }),
            ));
        }

        if !self.initialized && method != "notifications/initialized" {
            return Some(json_rpc_error(
                request.id,
                -32002,
                "Server not initialized",
            ));
        }

        if method == "notifications/initialized" {
            self.initialized = true;
            return None;
        }

        if method == "ping" {
            return Some(json_rpc_response(request.id, json!({})));
        }

        // Some clients probe optional resources methods by default; keep the
        // surface deterministic by advertising an empty set.
        if method == "resources/list" {
            return Some(json_rpc_response(request.id, json!({ "resources": [] })));
        }
        if method == "resources/read" {
            return Some(json_rpc_response(request.id, json!({ "contents": [] })));
        }

        if method == "tools/list" {
            return Some(json_rpc_response(
                request.id,
                json!({
                    "tools": crate::tools::tool_definitions(
                        self.prefix_tools,
                        self.debug,
                        self.engine.config(),
                    )
                }),
            ));
        }

        if method == "tools/call" {
            let Some(params) = request.params else {
                return Some(json_rpc_error(request.id, -32602, "params must be an object"));
            };
            let Some(params_obj) = params.as_object() else {
                return Some(json_rpc_error(request.id, -32602, "params must be an object"));
            };
            let tool_name = params_obj
                .get("name")
                .and_then(|value| value.as_str())
                .unwrap_or("");
            let args = params_obj
                .get("arguments")
                .cloned()
                .unwrap_or_else(|| json!({}));

            let (text, is_error) = match crate::tools::dispatch_tool(self, tool_name, args) {
                Some(Ok(value)) => (render_result(&value), false),
                Some(Err(message)) => (message, true),
                None => (format!("Unknown tool: {tool_name}"), true),
            };
            if is_error {
                self.log.note_error(&text);
            }
            return Some(json_rpc_response(request.id, tool_response(&text, is_error)));
        }

        Some(json_rpc_error(
            request.id,
            -32601,
            &format!("Method not found: {method}"),
        ))
    }
}
