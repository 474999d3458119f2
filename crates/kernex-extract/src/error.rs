use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("'{path}' is not a valid input directory")]
    InvalidInputDir { path: PathBuf },

    #[error("'{path}' is not a valid output directory")]
    InvalidOutputDir { path: PathBuf },

    #[error("extraction tool not found on PATH: {source}")]
    ToolNotFound { source: which::Error },

    #[error("failed to run '{cmd}': {source}")]
    CommandFailed { cmd: String, source: io::Error },

    #[error("failed to create workspace: {source}")]
    WorkspaceFailed { source: io::Error },

    #[error("failed to move '{from}' to '{to}': {source}")]
    MoveFailed {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },

    #[error("invalid catalog: {0}")]
    InvalidCatalog(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
