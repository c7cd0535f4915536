use std::fs;
use std::path::Path;

use log::debug;

use crate::{GalleryError, MediaEntry};

/// The full manifest, read and rewritten as a whole. Entry order is
/// insertion order and survives every rewrite.
#[derive(Debug, Default)]
pub struct Gallery {
    pub entries: Vec<MediaEntry>,
}

impl Gallery {
    pub fn load(path: &Path) -> Result<Self, GalleryError> {
        if !path.exists() {
            return Err(GalleryError::ManifestMissing(path.to_path_buf()));
        }
        let text = fs::read_to_string(path)?;
        let entries: Vec<MediaEntry> = serde_json::from_str(&text)?;
        debug!("loaded {} entries from {}", entries.len(), path.display());
        Ok(Gallery { entries })
    }

    /// Missing manifest reads as an empty gallery. Parse errors still fail.
    pub fn load_or_default(path: &Path) -> Result<Self, GalleryError> {
        match Self::load(path) {
            Err(GalleryError::ManifestMissing(_)) => Ok(Gallery::default()),
            other => other,
        }
    }

    /// Overwrites the manifest in place. Durability against a crash
    /// mid-write is left to external backups.
    pub fn save(&self, path: &Path) -> Result<(), GalleryError> {
        let text = serde_json::to_string_pretty(&self.entries)?;
        fs::write(path, text)?;
        debug!("wrote {} entries to {}", self.entries.len(), path.display());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
