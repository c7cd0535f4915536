use std::path::Path;

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use log::info;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use tokio::fs::File;
use tokio_util::io::ReaderStream;

pub const CATBOX_API: &str = "https://catbox.moe/user/api.php";
pub const TRANSFER_BASE: &str = "https://transfer.sh";

/// An external upload destination. Takes a local file, returns the remote
/// url the host serves it under.
#[async_trait]
pub trait UploadHost {
    fn name(&self) -> &str;
    async fn upload(&self, path: &Path) -> Result<String>;
}

/// Primary host. Permanent storage, but rejects files over 200 MiB.
/// Multipart POST; the response body is the raw url.
pub struct Catbox {
    client: Client,
    api_url: String,
    userhash: String,
}

impl Catbox {
    /// `userhash` is the optional account hash; empty means anonymous.
    pub fn new(api_url: &str, userhash: &str) -> Self {
        Catbox {
            client: Client::new(),
            api_url: api_url.to_owned(),
            userhash: userhash.to_owned(),
        }
    }
}

#[async_trait]
impl UploadHost for Catbox {
    fn name(&self) -> &str {
        "catbox"
    }

    async fn upload(&self, path: &Path) -> Result<String> {
        let filename = file_name(path)?;
        let file = File::open(path).await?;
        let len = file.metadata().await?.len();
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        info!("uploading {filename} to {} (permanent)", self.name());

        let part = Part::stream_with_length(Body::wrap_stream(ReaderStream::new(file)), len)
            .file_name(filename)
            .mime_str(mime.as_ref())?;
        let form = Form::new()
            .text("reqtype", "fileupload")
            .text("userhash", self.userhash.clone())
            .part("fileToUpload", part);

        let response = self.client.post(&self.api_url).multipart(form).send().await?;
        body_url(response).await
    }
}

/// Fallback host. Accepts large files; uploads expire after 14 days, so it
/// is never used ahead of the primary. Raw PUT with the filename in the
/// request path; the response body is the raw url.
pub struct TransferSh {
    client: Client,
    base_url: String,
}

impl TransferSh {
    pub fn new(base_url: &str) -> Self {
        TransferSh {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }
}

#[async_trait]
impl UploadHost for TransferSh {
    fn name(&self) -> &str {
        "transfer.sh"
    }

    async fn upload(&self, path: &Path) -> Result<String> {
        let filename = file_name(path)?;
        let file = File::open(path).await?;
        let len = file.metadata().await?.len();
        info!("uploading {filename} to {} (14 day retention)", self.name());

        let response = self
            .client
            .put(format!("{}/{filename}", self.base_url))
            .header(reqwest::header::CONTENT_LENGTH, len)
            .body(Body::wrap_stream(ReaderStream::new(file)))
            .send()
            .await?;
        body_url(response).await
    }
}

/// The hosts answer a successful upload with the remote url as the
/// plain-text body. It is taken verbatim, trimmed, with no url validation.
async fn body_url(response: reqwest::Response) -> Result<String> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        bail!("status {status}: {}", body.trim());
    }
    Ok(body.trim().to_owned())
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_owned)
        .ok_or_else(|| anyhow!("no usable file name in {}", path.display()))
}
