use thiserror::Error;

/// Recoverable engine errors. Song-level "not found" conditions are not
/// errors at all - those come back as `None`/`false` from the operation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("playlist '{0}' already exists")]
    DuplicatePlaylist(String),

    #[error("playlist '{0}' not found")]
    PlaylistNotFound(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
