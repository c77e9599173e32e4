#![forbid(unsafe_code)]

use std::path::Path;

use tl_core::config::Config;
use tl_core::model::State;

use super::{FormatCodec, read_to_string_or_default, write_creating_dirs};
use crate::StoreError;

pub(crate) struct YamlCodec;

impl FormatCodec for YamlCodec {
    fn read(&self, _config: &Config, path: &Path) -> Result<State, StoreError> {
        let content = read_to_string_or_default(path)?;
        let content = content.trim();
        if content.is_empty() {
            return Ok(State::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    fn write(&self, _config: &Config, path: &Path, state: &State) -> Result<(), StoreError> {
        let content = serde_yaml::to_string(state)?;
        write_creating_dirs(path, &content)
    }
}
