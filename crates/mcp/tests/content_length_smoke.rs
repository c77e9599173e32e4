#![forbid(unsafe_code)]

mod support;

use std::io::{BufRead, BufReader, Read, Write};
use std::process::{Command, Stdio};

use serde_json::{Value, json};

/// Clients using MCP header framing must get header-framed responses back.
#[test]
fn content_length_framed_initialize_roundtrips() {
    let dir = support::temp_dir("content_length_framed_initialize_roundtrips");
    let mut child = Command::new(env!("CARGO_BIN_EXE_tl_mcp"))
        .arg("--sources-path")
        .arg(dir.join("sources.json"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn tl_mcp");

    let mut stdin = child.stdin.take().expect("stdin");
    let mut stdout = BufReader::new(child.stdout.take().expect("stdout"));

    let body = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "initialize",
        "params": { "protocolVersion": "2024-11-05", "capabilities": {}, "clientInfo": { "name": "test", "version": "0" } }
    })
    .to_string();
    write!(stdin, "Content-Length: {}\r\n\r\n{}", body.len(), body).expect("write frame");
    stdin.flush().expect("flush");

    let mut content_length = None;
    loop {
        let mut line = String::new();
        stdout.read_line(&mut line).expect("read header");
        if line.trim().is_empty() {
            break;
        }
        if let Some((key, value)) = line.split_once(':')
            && key.trim().eq_ignore_ascii_case("content-length")
        {
            content_length = value.trim().parse::<usize>().ok();
        }
    }

    let len = content_length.expect("Content-Length header in response");
    let mut body = vec![0u8; len];
    stdout.read_exact(&mut body).expect("read body");
    let resp: Value = serde_json::from_slice(&body).expect("parse body");
    assert_eq!(
        resp["result"]["serverInfo"]["name"].as_str(),
        Some("tasklist-mcp")
    );

    let _ = child.kill();
    let _ = child.wait();
    let _ = std::fs::remove_dir_all(&dir);
}
