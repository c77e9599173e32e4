#![forbid(unsafe_code)]

use std::path::Path;

use serde::Serialize as _;
use tl_core::config::Config;
use tl_core::model::State;

use super::{FormatCodec, read_to_string_or_default, write_creating_dirs};
use crate::StoreError;

pub(crate) struct JsonCodec;

impl FormatCodec for JsonCodec {
    fn read(&self, _config: &Config, path: &Path) -> Result<State, StoreError> {
        let content = read_to_string_or_default(path)?;
        let content = content.trim();
        if content.is_empty() {
            return Ok(State::default());
        }
        Ok(serde_json::from_str(content)?)
    }

    fn write(&self, _config: &Config, path: &Path, state: &State) -> Result<(), StoreError> {
        // Tab-indented, matching how the files are edited by hand.
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        state.serialize(&mut ser)?;
        write_creating_dirs(path, &String::from_utf8_lossy(&buf))
    }
}
