#![forbid(unsafe_code)]

mod engine;
mod formats;
mod metadata;
mod sources;
mod store;

pub use engine::{AddArgs, SearchArgs, SetupArgs, TaskEngine, UpdateArgs};
pub use metadata::Metadata;
pub use sources::{SourceRegistry, default_workspace};
pub use store::FileStore;

const SETUP_HINT: &str =
    "You must request a file path from the user, make it absolute and call tasks_setup.";

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Yaml(serde_yaml::Error),
    UnsupportedExtension { extension: String },
    RelativePathNeedsWorkspace,
    SourceNotFound { id: Option<String> },
    TaskNotFound { id: String },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io: {err}"),
            Self::Json(err) => write!(f, "json: {err}"),
            Self::Yaml(err) => write!(f, "yaml: {err}"),
            Self::UnsupportedExtension { extension } => write!(
                f,
                "Unsupported file extension: {extension}. Use one of: {}",
                formats::SUPPORTED_EXTENSIONS
            ),
            Self::RelativePathNeedsWorkspace => write!(
                f,
                "You must specify a workspace directory when registering a relative path."
            ),
            Self::SourceNotFound { id: Some(id) } => {
                write!(f, "Source \"{id}\" not found. {SETUP_HINT}")
            }
            Self::SourceNotFound { id: None } => write!(f, "{SETUP_HINT}"),
            Self::TaskNotFound { id } => write!(f, "Task ID {id} not found"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<serde_yaml::Error> for StoreError {
    fn from(value: serde_yaml::Error) -> Self {
        Self::Yaml(value)
    }
}
