#![forbid(unsafe_code)]
#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use serde_json::{Value, json};

// Cleared before every spawn so the harness environment cannot leak into the
// server under test.
const CONFIG_ENV_KEYS: &[&str] = &[
    "STATUSES",
    "STATUS_WIP",
    "STATUS_TODO",
    "STATUS_DONE",
    "STATUS_DELETED",
    "STATUS_NOTES",
    "STATUS_REMINDERS",
    "AUTO_WIP",
    "KEEP_DELETED",
    "INSTRUCTIONS",
    "SOURCES_PATH",
    "PREFIX_TOOLS",
    "DEBUG",
];

pub(crate) struct Server {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    dir: PathBuf,
}

impl Server {
    pub(crate) fn start(test_name: &str) -> Self {
        Self::start_with_env(test_name, &[])
    }

    pub(crate) fn start_with_env(test_name: &str, envs: &[(&str, &str)]) -> Self {
        let dir = temp_dir(test_name);
        let mut command = Command::new(env!("CARGO_BIN_EXE_tl_mcp"));
        command
            .arg("--sources-path")
            .arg(dir.join("sources.json"))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped());
        for key in CONFIG_ENV_KEYS {
            command.env_remove(key);
        }
        for (key, value) in envs {
            command.env(key, value);
        }
        let mut child = command.spawn().expect("spawn tl_mcp");

        let stdin = child.stdin.take().expect("stdin");
        let stdout = BufReader::new(child.stdout.take().expect("stdout"));

        Self {
            child,
            stdin,
            stdout,
            dir,
        }
    }

    /// Absolute path for a backing file inside the test's temp dir.
    pub(crate) fn source_path(&self, file_name: &str) -> String {
        self.dir.join(file_name).to_string_lossy().to_string()
    }

    pub(crate) fn send(&mut self, req: Value) {
        writeln!(self.stdin, "{req}").expect("write request");
        self.stdin.flush().expect("flush request");
    }

    pub(crate) fn recv(&mut self) -> Value {
        let mut line = String::new();
        self.stdout.read_line(&mut line).expect("read response");
        assert!(!line.trim().is_empty(), "empty response line");
        serde_json::from_str(&line).expect("parse response json")
    }

    pub(crate) fn request(&mut self, req: Value) -> Value {
        self.send(req);
        self.recv()
    }

    pub(crate) fn initialize_default(&mut self) {
        let _ = self.request(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": { "protocolVersion": "2024-11-05", "capabilities": {}, "clientInfo": { "name": "test", "version": "0" } }
        }));
        self.send(json!({
            "jsonrpc": "2.0",
            "method": "notifications/initialized",
            "params": {}
        }));
    }

    pub(crate) fn start_initialized(test_name: &str) -> Self {
        let mut server = Self::start(test_name);
        server.initialize_default();
        server
    }

    pub(crate) fn start_initialized_with_env(test_name: &str, envs: &[(&str, &str)]) -> Self {
        let mut server = Self::start_with_env(test_name, envs);
        server.initialize_default();
        server
    }

    pub(crate) fn call_tool(&mut self, id: i64, name: &str, arguments: Value) -> Value {
        self.request(json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "tools/call",
            "params": { "name": name, "arguments": arguments }
        }))
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

pub(crate) fn extract_tool_text(resp: &Value) -> String {
    resp.get("result")
        .and_then(|result| result.get("content"))
        .and_then(|content| content.get(0))
        .and_then(|entry| entry.get("text"))
        .and_then(|text| text.as_str())
        .expect("result.content[0].text")
        .to_string()
}

pub(crate) fn tool_is_error(resp: &Value) -> bool {
    resp.get("result")
        .and_then(|result| result.get("isError"))
        .and_then(|flag| flag.as_bool())
        .unwrap_or(false)
}

pub(crate) fn tool_text_json(resp: &Value) -> Value {
    serde_json::from_str(&extract_tool_text(resp)).expect("tool text is json")
}

pub(crate) fn temp_dir(test_name: &str) -> PathBuf {
    let base = std::env::temp_dir();
    let pid = std::process::id();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let dir = base.join(format!("tl_mcp_{test_name}_{pid}_{nonce}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}
