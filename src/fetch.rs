use std::fs::{self, OpenOptions};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, warn};

use crate::error::Error;
use crate::progress::SpinnerHelper;

const DEFAULT_EXTENSION: &str = "jpg";
const NAME_MAX: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Downloaded(PathBuf),
    Skipped(PathBuf),
}

impl FetchOutcome {
    pub fn path(&self) -> &Path {
        match self {
            FetchOutcome::Downloaded(path) | FetchOutcome::Skipped(path) => path,
        }
    }
}

/// Downloads the image behind `url` to `destination/{name}.{extension}`.
///
/// An existing file at the target path counts as a finished download and is never
/// touched again. The existence check and the write are separate steps, so two
/// processes sharing a destination directory can race; only one of them wins the
/// write and the other fails with an I/O error.
#[async_trait]
pub trait ImageFetcher {
    async fn fetch_image(
        &self,
        url: &str,
        name: &str,
        destination: &Path,
    ) -> Result<FetchOutcome, Error>;
}

pub struct HttpImageFetcher {
    pub client: Client,
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch_image(
        &self,
        url: &str,
        name: &str,
        destination: &Path,
    ) -> Result<FetchOutcome, Error> {
        fs::create_dir_all(destination)?;

        let target = destination.join(file_name_for(name, url));
        let url = sanitize_url(url);

        if target.exists() {
            info!(path = %target.display(), "already downloaded, skipping");
            return Ok(FetchOutcome::Skipped(target));
        }

        println!("Downloading: {url}");
        let spinner = SpinnerHelper::create(format!("Fetching {}", target.display()))?;

        let bytes = match self.download(url).await {
            Ok(bytes) => bytes,
            Err(error) => {
                spinner.abandon_with_message(format!("FAILURE – could not fetch {url}"));
                return Err(error);
            }
        };

        let mut slice: &[u8] = &bytes;
        write_new_file(&target, &mut slice)?;

        spinner.finish_with_message(format!("Saved {}", target.display()));
        Ok(FetchOutcome::Downloaded(target))
    }
}

impl HttpImageFetcher {
    async fn download(&self, url: &str) -> Result<Vec<u8>, Error> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, url, "unexpected status, keeping the response body anyway");
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Creates `target` and fills it from `reader`. A partly written file is removed again
/// so it is never mistaken for a finished download.
fn write_new_file<R: Read>(target: &Path, reader: &mut R) -> Result<(), Error> {
    let mut out = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)?;

    if let Err(error) = io::copy(reader, &mut out) {
        drop(out);
        fs::remove_file(target)?;
        return Err(error.into());
    }
    Ok(())
}

/// Cuts the URL at its first space.
pub fn sanitize_url(url: &str) -> &str {
    url.split(' ').next().unwrap_or(url)
}

/// `jpg` for URLs with a query, otherwise whatever follows the last `.`.
/// Expects the URL as found in the document, before [`sanitize_url`].
/// Falls back to `jpg` when nothing follows the last `.` or it spans a `/`.
pub fn extension_for(url: &str) -> &str {
    if url.contains('?') {
        return DEFAULT_EXTENSION;
    }

    match url.rsplit_once('.') {
        Some((_, extension)) if !extension.is_empty() && !extension.contains('/') => extension,
        _ => DEFAULT_EXTENSION,
    }
}

/// `{stem}.{extension}`, with the stem made safe to use as a single path component.
pub fn file_name_for(name: &str, url: &str) -> String {
    let extension = extension_for(url);
    let max_stem = NAME_MAX.saturating_sub(extension.len() + 1).max(1);
    format!("{}.{extension}", file_stem_for(name, max_stem))
}

// Keeps the name's UTF-8 text; only separators and control characters are replaced.
fn file_stem_for(name: &str, max_len: usize) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if c == '/' || c == '\\' || c.is_control() { '_' } else { c })
        .collect();

    let trimmed = replaced.trim_matches(|c: char| c.is_whitespace() || c == '.');
    if trimmed.is_empty() {
        return "_".to_string();
    }

    let mut take = trimmed.len().min(max_len);
    while !trimmed.is_char_boundary(take) {
        take -= 1;
    }
    trimmed[..take].to_string()
}
