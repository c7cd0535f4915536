use std::fs;
use std::path::PathBuf;

use gallery::{unique_name, Gallery, GalleryError, GalleryPaths, MediaEntry};
use log::{info, warn};

/// Hard cap on one selection. Exceeding it aborts the whole batch before
/// any file is touched.
pub const MAX_SELECTION: usize = 500;

#[derive(Debug, Default)]
pub struct IngestReport {
    pub added: usize,
    pub skipped: usize,
}

/// Copies each selected file into the uploads directory under a
/// collision-free name and appends one entry per copy to the manifest.
/// A file that fails to copy is skipped; the rest of the batch continues.
pub fn ingest_files(
    selection: &[PathBuf],
    paths: &GalleryPaths,
) -> Result<IngestReport, GalleryError> {
    if selection.len() > MAX_SELECTION {
        return Err(GalleryError::TooManySelected {
            selected: selection.len(),
            limit: MAX_SELECTION,
        });
    }

    fs::create_dir_all(&paths.uploads_dir)?;
    let mut gallery = Gallery::load_or_default(&paths.manifest)?;

    info!("processing {} files", selection.len());
    let mut report = IngestReport::default();
    for source in selection {
        let Some(filename) = source.file_name().and_then(|n| n.to_str()) else {
            warn!("skipping {}: no usable file name", source.display());
            report.skipped += 1;
            continue;
        };
        let stored = unique_name(filename);
        let dest = paths.uploads_dir.join(&stored);
        if let Err(err) = fs::copy(source, &dest) {
            warn!("failed to copy {}: {err}", source.display());
            report.skipped += 1;
            continue;
        }
        info!("copied {filename}");
        gallery
            .entries
            .push(MediaEntry::new(filename, paths.local_url(&stored)));
        report.added += 1;
    }

    gallery.save(&paths.manifest)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_source(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn ingest_appends_entries_and_copies_files() {
        let source_dir = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();
        let paths = GalleryPaths::under(root.path());
        let a = write_source(&source_dir, "a.mp4", b"aaaa");
        let b = write_source(&source_dir, "b_clip.mov", b"bbbb");

        let report = ingest_files(&[a, b], &paths).unwrap();
        assert_eq!(report.added, 2);
        assert_eq!(report.skipped, 0);

        let gallery = Gallery::load(&paths.manifest).unwrap();
        assert_eq!(gallery.len(), 2);
        assert_eq!(gallery.entries[1].title, "B Clip");
        for entry in &gallery.entries {
            let file = paths.local_path(&entry.url).unwrap();
            assert!(file.exists());
        }
    }

    #[test]
    fn duplicate_base_names_get_distinct_stored_names() {
        let src_a = TempDir::new().unwrap();
        let src_b = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();
        let paths = GalleryPaths::under(root.path());
        let a = write_source(&src_a, "clip.mp4", b"first");
        let b = write_source(&src_b, "clip.mp4", b"second");

        let report = ingest_files(&[a, b], &paths).unwrap();
        assert_eq!(report.added, 2);

        let gallery = Gallery::load(&paths.manifest).unwrap();
        assert_ne!(gallery.entries[0].url, gallery.entries[1].url);
        assert_eq!(
            fs::read(paths.local_path(&gallery.entries[0].url).unwrap()).unwrap(),
            b"first"
        );
        assert_eq!(
            fs::read(paths.local_path(&gallery.entries[1].url).unwrap()).unwrap(),
            b"second"
        );
    }

    #[test]
    fn existing_entries_are_untouched() {
        let source_dir = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();
        let paths = GalleryPaths::under(root.path());
        fs::create_dir_all(paths.manifest.parent().unwrap()).unwrap();
        let existing = serde_json::json!([{
            "id": "old", "title": "Old", "url": "https://files.example/old.mp4",
            "thumbnail": "/t.png", "date": "2024-01-01T00:00:00Z",
            "tags": ["UPLOADED"], "views": 7
        }]);
        fs::write(&paths.manifest, existing.to_string()).unwrap();

        let a = write_source(&source_dir, "a.mp4", b"aaaa");
        ingest_files(&[a], &paths).unwrap();

        let rewritten: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&paths.manifest).unwrap()).unwrap();
        assert_eq!(rewritten[0], existing[0]);
        assert_eq!(rewritten.as_array().unwrap().len(), 2);
    }

    #[test]
    fn copy_failure_skips_the_file_and_continues() {
        let source_dir = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();
        let paths = GalleryPaths::under(root.path());
        let good = write_source(&source_dir, "good.mp4", b"gggg");
        let missing = source_dir.path().join("vanished.mp4");

        let report = ingest_files(&[missing, good], &paths).unwrap();
        assert_eq!(report.added, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(Gallery::load(&paths.manifest).unwrap().len(), 1);
    }

    #[test]
    fn oversized_selection_is_rejected_before_any_work() {
        let root = TempDir::new().unwrap();
        let paths = GalleryPaths::under(root.path());
        let selection: Vec<PathBuf> = (0..=MAX_SELECTION)
            .map(|i| PathBuf::from(format!("clip_{i}.mp4")))
            .collect();

        let err = ingest_files(&selection, &paths).unwrap_err();
        assert!(matches!(
            err,
            GalleryError::TooManySelected { selected: 501, limit: 500 }
        ));
        assert!(!paths.manifest.exists());
        assert!(!paths.uploads_dir.exists());
    }
}
