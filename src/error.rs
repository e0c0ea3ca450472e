use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("no annotation files (*.json) found in {}", .0.display())]
    NoAnnotationFiles(PathBuf),

    #[error("input directory does not exist: {}", .0.display())]
    MissingInputDir(PathBuf),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to decode point cloud {}: {message}", path.display())]
    Pcd { path: PathBuf, message: String },

    #[error("invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

impl ConvertError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn pcd(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        ConvertError::Pcd {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
