#![forbid(unsafe_code)]

mod args;
mod env;
mod jsonrpc;
mod session_log;
mod time;

pub(crate) use args::*;
pub(crate) use env::*;
pub(crate) use jsonrpc::*;
pub(crate) use session_log::*;
pub(crate) use time::*;
