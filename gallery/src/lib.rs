mod entry;
mod manifest;
mod paths;

use std::path::PathBuf;

use thiserror::Error;

pub use entry::{title_from_filename, unique_name, MediaEntry};
pub use manifest::Gallery;
pub use paths::{GalleryPaths, LOCAL_URL_PREFIX};

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("gallery manifest not found at {}", .0.display())]
    ManifestMissing(PathBuf),

    #[error("invalid gallery manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{selected} files selected, the limit is {limit}")]
    TooManySelected { selected: usize, limit: usize },
}
