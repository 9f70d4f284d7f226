use std::str::Utf8Error;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DragDropError>;

#[derive(Error, Debug)]
pub enum DragDropError {
    #[error("\"{0}\" does not match any drop surface")]
    Selector(String),
    #[error("Drag event carries no data transfer")]
    MissingPayload,
    #[error("Failed to resolve \"{path}\": {source}")]
    Resolution {
        path: String,
        #[source]
        source: Box<DragDropError>,
    },
    #[error("Access denied: {0}")]
    Access(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parsing error")]
    Parse,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DragDropError {
    /// Attach the path of the entry that failed to resolve
    pub(crate) fn resolving<S: Into<String>>(path: S, source: Self) -> Self {
        Self::Resolution {
            path: path.into(),
            source: Box::new(source),
        }
    }
}

impl From<Utf8Error> for DragDropError {
    fn from(_: Utf8Error) -> Self {
        Self::Parse
    }
}

impl From<serde_json::Error> for DragDropError {
    fn from(_: serde_json::Error) -> Self {
        Self::Parse
    }
}
