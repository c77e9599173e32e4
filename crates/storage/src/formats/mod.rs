#![forbid(unsafe_code)]

mod json;
mod md;
mod yml;

use std::path::Path;

use tl_core::config::Config;
use tl_core::model::State;

use crate::StoreError;

pub(crate) const SUPPORTED_EXTENSIONS: &str = "md, json, yml";

/// One backing-file encoding. Every codec maps the same ordered-groups state
/// to and from raw bytes; quirks (empty-section skipping, escaping) live in
/// the individual implementations.
pub(crate) trait FormatCodec {
    fn read(&self, config: &Config, path: &Path) -> Result<State, StoreError>;
    fn write(&self, config: &Config, path: &Path, state: &State) -> Result<(), StoreError>;
}

pub(crate) fn codec_for_extension(extension: &str) -> Option<&'static dyn FormatCodec> {
    match extension {
        "md" => Some(&md::MarkdownCodec),
        "json" => Some(&json::JsonCodec),
        "yml" => Some(&yml::YamlCodec),
        _ => None,
    }
}

pub(crate) fn read_to_string_or_default(path: &Path) -> Result<String, StoreError> {
    if !path.exists() {
        return Ok(String::new());
    }
    Ok(std::fs::read_to_string(path)?)
}

pub(crate) fn write_creating_dirs(path: &Path, content: &str) -> Result<(), StoreError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}
