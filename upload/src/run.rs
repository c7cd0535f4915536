use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use gallery::{Gallery, GalleryPaths};
use log::{debug, info, warn};

use crate::hosts::UploadHost;

/// Max file size the primary host accepts (200 MiB). Larger files go
/// straight to the fallback.
pub const PRIMARY_MAX_SIZE: u64 = 200 * 1024 * 1024;

/// One manifest entry queued for upload. `uploaded` is set only by a
/// successful upload and is the sole gate for the cleanup deletion.
#[derive(Debug)]
pub struct WorkItem {
    pub index: usize,
    pub path: PathBuf,
    pub size: u64,
    pub uploaded: bool,
}

#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub uploaded: usize,
    pub failed: usize,
    pub work: Vec<WorkItem>,
}

#[derive(Debug, PartialEq)]
enum HostPlan {
    PrimaryThenFallback,
    FallbackOnly,
}

impl HostPlan {
    fn for_size(size: u64) -> Self {
        if size <= PRIMARY_MAX_SIZE {
            HostPlan::PrimaryThenFallback
        } else {
            HostPlan::FallbackOnly
        }
    }
}

/// Uploads every manifest entry still backed by a file in the uploads
/// directory, rewriting its url to the remote one. The manifest is written
/// back only when at least one upload succeeded; a failed entry keeps its
/// local url and the batch moves on.
pub async fn upload_gallery(
    paths: &GalleryPaths,
    primary: &dyn UploadHost,
    fallback: &dyn UploadHost,
) -> Result<BatchOutcome> {
    let mut gallery = Gallery::load(&paths.manifest)?;
    let mut work = select_local(&gallery, paths);
    if work.is_empty() {
        info!("no local videos found in {}", paths.manifest.display());
        return Ok(BatchOutcome::default());
    }
    info!("found {} videos to upload", work.len());

    let total = work.len();
    let mut outcome = BatchOutcome::default();
    for (i, item) in work.iter_mut().enumerate() {
        let size_mb = item.size as f64 / (1024.0 * 1024.0);
        info!(
            "[{}/{total}] {} ({size_mb:.2} MB)",
            i + 1,
            item.path.display()
        );
        match upload_one(item, primary, fallback).await {
            Some(url) => {
                info!("success: {url}");
                gallery.entries[item.index].url = url;
                item.uploaded = true;
                outcome.uploaded += 1;
            }
            None => {
                warn!("all upload methods failed for {}", item.path.display());
                outcome.failed += 1;
            }
        }
    }

    if outcome.uploaded > 0 {
        gallery.save(&paths.manifest)?;
        info!("gallery updated with {} remote links", outcome.uploaded);
    }
    outcome.work = work;
    Ok(outcome)
}

/// Entries whose url points into the uploads directory and whose file is
/// still there. An entry referencing a vanished file is not an error, it
/// just is not work.
fn select_local(gallery: &Gallery, paths: &GalleryPaths) -> Vec<WorkItem> {
    gallery
        .entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let path = paths.local_path(&entry.url)?;
            let size = fs::metadata(&path).ok()?.len();
            Some(WorkItem {
                index,
                path,
                size,
                uploaded: false,
            })
        })
        .collect()
}

async fn upload_one(
    item: &WorkItem,
    primary: &dyn UploadHost,
    fallback: &dyn UploadHost,
) -> Option<String> {
    match HostPlan::for_size(item.size) {
        HostPlan::PrimaryThenFallback => match primary.upload(&item.path).await {
            Ok(url) => return Some(url),
            Err(err) => {
                warn!("{} upload failed: {err:#}", primary.name());
                info!("falling back to {}", fallback.name());
            }
        },
        HostPlan::FallbackOnly => {
            info!(
                "file too large for {} (>200 MiB), using {}",
                primary.name(),
                fallback.name()
            );
        }
    }
    match fallback.upload(&item.path).await {
        Ok(url) => Some(url),
        Err(err) => {
            warn!("{} upload failed: {err:#}", fallback.name());
            None
        }
    }
}

/// Best-effort removal of the local copies behind successful uploads.
/// Failures are swallowed; the files are orphans either way.
pub fn delete_uploaded(work: &[WorkItem]) {
    for item in work.iter().filter(|item| item.uploaded) {
        match fs::remove_file(&item.path) {
            Ok(()) => info!("deleted {}", item.path.display()),
            Err(err) => debug!("could not delete {}: {err}", item.path.display()),
        }
    }
}
