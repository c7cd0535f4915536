mod run;

use gallery::{GalleryError, GalleryPaths};
use log::info;
use rfd::{FileDialog, MessageDialog, MessageLevel};
use run::{ingest_files, MAX_SELECTION};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let root = std::env::current_dir()?;
    let paths = GalleryPaths::under(&root);

    let Some(selection) = FileDialog::new()
        .set_title(format!("Select Videos (Max {MAX_SELECTION})"))
        .add_filter("Video Files", &["mp4", "webm", "ogg", "mov", "m4v"])
        .pick_files()
    else {
        info!("no files selected");
        return Ok(());
    };

    match ingest_files(&selection, &paths) {
        Ok(report) => {
            let mut message = format!("Added {} videos to the gallery.", report.added);
            if report.skipped > 0 {
                message.push_str(&format!(" {} files could not be copied.", report.skipped));
            }
            MessageDialog::new()
                .set_level(MessageLevel::Info)
                .set_title("Gallery")
                .set_description(message)
                .show();
        }
        Err(err @ GalleryError::TooManySelected { .. }) => {
            MessageDialog::new()
                .set_level(MessageLevel::Error)
                .set_title("Limit Exceeded")
                .set_description(err.to_string())
                .show();
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}
