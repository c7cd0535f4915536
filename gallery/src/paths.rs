use std::path::{Path, PathBuf};

/// Manifest urls under this prefix refer to files in the managed uploads
/// directory.
pub const LOCAL_URL_PREFIX: &str = "/uploads/";

/// Where the manifest and the managed uploads directory live. Passed into
/// each tool explicitly so the logic runs against temp directories in tests.
#[derive(Debug, Clone)]
pub struct GalleryPaths {
    pub manifest: PathBuf,
    pub uploads_dir: PathBuf,
}

impl GalleryPaths {
    pub fn new(manifest: PathBuf, uploads_dir: PathBuf) -> Self {
        GalleryPaths {
            manifest,
            uploads_dir,
        }
    }

    /// The conventional layout under a project root: `public/gallery.json`
    /// and `public/uploads/`.
    pub fn under(root: &Path) -> Self {
        GalleryPaths {
            manifest: root.join("public").join("gallery.json"),
            uploads_dir: root.join("public").join("uploads"),
        }
    }

    /// Manifest url for a stored file name.
    pub fn local_url(&self, stored_name: &str) -> String {
        format!("{LOCAL_URL_PREFIX}{stored_name}")
    }

    /// Maps a manifest url back to the on-disk file, iff it points into the
    /// managed uploads directory. Remote urls map to `None`.
    pub fn local_path(&self, url: &str) -> Option<PathBuf> {
        url.strip_prefix(LOCAL_URL_PREFIX)
            .map(|name| self.uploads_dir.join(name))
    }
}
