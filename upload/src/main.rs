mod hosts;
mod run;

use std::io::{self, BufRead, Write};

use gallery::GalleryPaths;
use hosts::{Catbox, TransferSh, CATBOX_API, TRANSFER_BASE};
use log::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let root = std::env::current_dir()?;
    let paths = GalleryPaths::under(&root);
    let primary = Catbox::new(CATBOX_API, "");
    let fallback = TransferSh::new(TRANSFER_BASE);

    let outcome = run::upload_gallery(&paths, &primary, &fallback).await?;
    if outcome.failed > 0 {
        info!("{} uploads failed and keep their local files", outcome.failed);
    }
    if outcome.uploaded == 0 {
        return Ok(());
    }

    info!("you can now push the gallery without large files");
    if confirm("Delete uploaded local files to free space? (y/n): ")? {
        run::delete_uploaded(&outcome.work);
        info!("cleanup complete");
    }
    Ok(())
}

fn confirm(prompt: &str) -> anyhow::Result<bool> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().to_lowercase().starts_with('y'))
}
