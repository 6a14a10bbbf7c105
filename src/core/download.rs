use crate::core::config::Config;
use crate::core::progress::{ConsoleProgress, ProgressSink};
use crate::error::{FetchError, Result};
use crate::utils::fs;
use reqwest::blocking::Client;
use reqwest::Url;
use std::io::{ErrorKind, Read, Write};
use std::path::Path;
use std::time::Duration;

/// Mode given to freshly downloaded files that replace nothing.
const NEW_FILE_MODE: u32 = 0o644;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The destination already existed and `overwrite` was not set.
    Skipped,
    Downloaded { bytes: u64 },
}

pub struct Downloader {
    client: Client,
    chunk_size: usize,
}

impl Downloader {
    pub fn new() -> Result<Self> {
        Self::from_config(&Config::default())
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        // No timeout: a slow server is waited on for as long as it keeps the connection.
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(None::<Duration>)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            chunk_size: config.chunk_size,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Fetches `url` into `destination`.
    ///
    /// An existing destination is left alone, without any request, unless
    /// `overwrite` is set. The body is streamed into a staging file
    /// next to `destination` and only renamed over it once the stream has ended,
    /// so a failed transfer never leaves a partial file at `destination`.
    pub fn download(
        &self,
        url: &str,
        destination: &Path,
        overwrite: bool,
        progress: &mut dyn ProgressSink,
    ) -> Result<DownloadOutcome> {
        progress.notice(&format!("Downloading {} from {url}", destination.display()));

        if fs::path_is_taken(destination) && !overwrite {
            log::debug!("{} exists, skipping {url}", destination.display());
            progress.notice("File already exists, not overwriting.");
            return Ok(DownloadOutcome::Skipped);
        }

        if destination.is_dir() {
            return Err(FetchError::DestinationIsDirectory {
                path: destination.to_path_buf(),
            });
        }

        let parsed = Url::parse(url).map_err(|_| FetchError::InvalidUrl {
            url: url.to_string(),
        })?;

        log::info!("GET {parsed}");
        let mut response = self
            .client
            .get(parsed)
            .send()
            .map_err(|source| FetchError::Transfer {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // A zero length gives no usable ratio, so it is reported as unknown.
        let total = response.content_length().filter(|&len| len > 0);
        log::debug!("Content-Length: {total:?}");

        let mode = fs::file_mode(destination).unwrap_or(NEW_FILE_MODE);
        let mut staged = fs::stage_beside(destination)?;
        let bytes = copy_with_progress(
            &mut response,
            staged.as_file_mut(),
            total,
            self.chunk_size,
            progress,
        )?;
        fs::set_file_mode(staged.path(), mode)?;
        fs::commit_staged(staged, destination)?;

        log::info!("Wrote {bytes} bytes to {}", destination.display());
        Ok(DownloadOutcome::Downloaded { bytes })
    }
}

/// Downloads with default settings, reporting progress on stdout.
pub fn download(url: &str, destination: &Path, overwrite: bool) -> Result<DownloadOutcome> {
    let mut console = ConsoleProgress::stdout();
    Downloader::new()?.download(url, destination, overwrite, &mut console)
}

/// Copies `reader` into `writer` one chunk at a time until a read returns
/// nothing, reporting the running total after every chunk.
///
/// Read failures are transfer errors, write failures are filesystem errors.
pub fn copy_with_progress<R: Read + ?Sized, W: Write + ?Sized>(
    reader: &mut R,
    writer: &mut W,
    total: Option<u64>,
    chunk_size: usize,
    progress: &mut dyn ProgressSink,
) -> Result<u64> {
    if chunk_size == 0 {
        return Err(FetchError::config_error("chunk_size must be greater than zero"));
    }

    let mut chunk = vec![0u8; chunk_size];
    let mut received: u64 = 0;

    progress.begin(total);
    loop {
        let read = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(read) => read,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(FetchError::Stream(e)),
        };

        writer.write_all(&chunk[..read])?;
        received += read as u64;
        progress.advance(received, total);
    }
    writer.flush()?;
    progress.finish(received, total);

    Ok(received)
}

/// Last path segment of `url`, used as a default file name.
pub fn file_name_from_url(url: &str) -> Result<String> {
    let invalid = || FetchError::InvalidUrl {
        url: url.to_string(),
    };

    let parsed = Url::parse(url).map_err(|_| invalid())?;
    parsed
        .path_segments()
        .and_then(|segments| segments.last())
        .filter(|name| !name.is_empty() && *name != "." && *name != "..")
        .map(str::to_string)
        .ok_or_else(invalid)
}
