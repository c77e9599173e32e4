#![forbid(unsafe_code)]

mod cli;
mod entry;
mod server;
mod support;
mod tools;

pub(crate) use support::*;

use std::path::{Path, PathBuf};

use tl_storage::TaskEngine;

// Some MCP clients are strict about the server echoing a compatible protocol
// version; this stays at the widely deployed baseline.
const MCP_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "tasklist-mcp";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

fn usage() -> &'static str {
    "tl_mcp — task-list MCP server (stdio-first)\n\n\
USAGE:\n\
  tl_mcp [--sources-path PATH]        # run the MCP server on stdio\n\
  tl_mcp setup PATH [WORKSPACE]       # one-shot commands, print the result\n\
  tl_mcp search [STATUSES] [TERMS]    # comma-separated lists\n\
  tl_mcp add TEXT [STATUS]\n\
  tl_mcp update IDS STATUS\n\
  tl_mcp summary\n\
\n\
FLAGS:\n\
  -h, --help       Print this help and exit\n\
  -V, --version    Print version and exit\n\
\n\
NOTES:\n\
  - Configuration comes from the environment: STATUSES, STATUS_WIP,\n\
    STATUS_TODO, STATUS_DONE, AUTO_WIP, KEEP_DELETED, SOURCES_PATH,\n\
    PREFIX_TOOLS, INSTRUCTIONS, DEBUG.\n"
}

struct ParsedArgs {
    sources_path: Option<PathBuf>,
    positional: Vec<String>,
}

fn parse_args(args: &[String]) -> ParsedArgs {
    let mut parsed = ParsedArgs {
        sources_path: None,
        positional: Vec::new(),
    };
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--sources-path" => {
                if let Some(value) = iter.next() {
                    parsed.sources_path = Some(PathBuf::from(value));
                }
            }
            _ => parsed.positional.push(arg.clone()),
        }
    }
    parsed
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args
        .iter()
        .any(|arg| matches!(arg.as_str(), "-h" | "--help"))
    {
        print!("{}", usage());
        return Ok(());
    }
    if args
        .iter()
        .any(|arg| matches!(arg.as_str(), "-V" | "--version"))
    {
        println!("{SERVER_NAME} {SERVER_VERSION}");
        return Ok(());
    }

    let parsed = parse_args(&args);
    let settings = load_settings(parsed.sources_path);
    let engine = TaskEngine::new(
        settings.config.clone(),
        settings.sources_path.clone(),
        tl_storage::default_workspace(),
    );

    // The session log never touches stdout/stderr; stdio carries JSON-RPC.
    let log_dir = settings
        .sources_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let log = SessionLog::new(settings.debug, &log_dir);
    let mut server = server::McpServer::new(engine, settings.prefix_tools, settings.debug, log);

    if let Some(command) = parsed.positional.first() {
        if cli::is_command(command) {
            return cli::run(&server, command, &parsed.positional[1..]);
        }
        return Err(format!("Unknown command: {command} (see --help)").into());
    }

    let result = entry::run_stdio(&mut server);
    server.note_exit(match &result {
        Ok(()) => "eof",
        Err(_) => "error",
    });
    result
}
