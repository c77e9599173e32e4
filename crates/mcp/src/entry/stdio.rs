#![forbid(unsafe_code)]

use std::io::{BufRead, BufReader, Read, Write};

use serde_json::Value;

use crate::server::McpServer;
use crate::{JsonRpcRequest, json_rpc_error};

const MAX_CONTENT_LENGTH_BYTES: usize = 16 * 1024 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Framing {
    NewlineJson,
    ContentLength,
}

/// Framing is detected from the first non-empty line and then fixed for the
/// process, so responses never interleave two styles on one transport.
fn detect_framing(first_line: &str) -> Framing {
    let trimmed = first_line.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return Framing::NewlineJson;
    }
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("content-length:") || lower.starts_with("content-type:") {
        return Framing::ContentLength;
    }
    Framing::NewlineJson
}

fn parse_content_length(line: &str) -> Option<usize> {
    let (key, value) = line.trim().split_once(':')?;
    if !key.trim().eq_ignore_ascii_case("content-length") {
        return None;
    }
    value.trim().parse::<usize>().ok()
}

/// Reads the remaining headers and the body of one Content-Length frame.
/// `first_header` is the header line already consumed by the caller.
fn read_frame(
    reader: &mut BufReader<std::io::StdinLock<'_>>,
    mut first_header: String,
) -> std::io::Result<Option<Vec<u8>>> {
    let mut content_length = parse_content_length(&first_header);

    while !first_header.trim_end().is_empty() {
        first_header.clear();
        if reader.read_line(&mut first_header)? == 0 {
            // EOF mid-header: treat as connection close.
            return Ok(None);
        }
        if content_length.is_none() {
            content_length = parse_content_length(&first_header);
        }
    }

    let Some(len) = content_length else {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "Missing Content-Length header",
        ));
    };
    if len > MAX_CONTENT_LENGTH_BYTES {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "Content-Length exceeds max allowed size",
        ));
    }

    let mut body = vec![0u8; len];
    reader.read_exact(&mut body)?;
    Ok(Some(body))
}

fn write_response(
    stdout: &mut std::io::StdoutLock<'_>,
    framing: Framing,
    resp: &Value,
) -> Result<(), Box<dyn std::error::Error>> {
    match framing {
        Framing::NewlineJson => writeln!(stdout, "{}", serde_json::to_string(resp)?)?,
        Framing::ContentLength => {
            let body = serde_json::to_vec(resp)?;
            write!(stdout, "Content-Length: {}\r\n\r\n", body.len())?;
            stdout.write_all(&body)?;
        }
    }
    stdout.flush()?;
    Ok(())
}

/// Parses one request body and produces at most one response. Malformed
/// payloads answer with the matching JSON-RPC error instead of closing the
/// connection.
fn handle_body(server: &mut McpServer, body: &[u8]) -> Option<Value> {
    let data: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(err) => return Some(json_rpc_error(None, -32700, &format!("Parse error: {err}"))),
    };

    let (id, has_method) = match data.as_object() {
        Some(obj) => (obj.get("id").cloned(), obj.contains_key("method")),
        None => return Some(json_rpc_error(None, -32600, "Invalid Request")),
    };
    if !has_method {
        return Some(json_rpc_error(id, -32600, "Invalid Request"));
    }

    let request: JsonRpcRequest = match serde_json::from_value(data) {
        Ok(request) => request,
        Err(err) => return Some(json_rpc_error(id, -32600, &format!("Invalid Request: {err}"))),
    };

    server.handle(request)
}

pub(crate) fn run_stdio(server: &mut McpServer) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = std::io::stdin();
    let mut reader = BufReader::new(stdin.lock());
    let mut stdout = std::io::stdout().lock();
    let mut mode: Option<Framing> = None;

    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let framing = *mode.get_or_insert_with(|| detect_framing(&line));
        let response = match framing {
            Framing::NewlineJson => handle_body(server, line.trim().as_bytes()),
            Framing::ContentLength => {
                let Some(body) = read_frame(&mut reader, line)? else {
                    break;
                };
                handle_body(server, &body)
            }
        };

        if let Some(response) = response {
            write_response(&mut stdout, framing, &response)?;
        }
    }

    Ok(())
}
