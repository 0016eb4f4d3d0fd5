use thiserror::Error;

#[derive(Debug, Error)]
pub enum FolderError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Path has no base name: {path:?}")]
    NoBaseName { path: String },
}

impl FolderError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        FolderError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, FolderError>;
