use crate::commands::progress_sink;
use crate::core::config::Config;
use crate::core::download::{DownloadOutcome, Downloader};
use crate::error::Result;
use std::path::Path;

pub fn download_file(url: &str, destination: &Path, overwrite: bool, quiet: bool) -> Result<()> {
    let config = Config::load()?;
    download_file_with(&config, url, destination, overwrite, quiet).map(|_| ())
}

pub fn download_file_with(
    config: &Config,
    url: &str,
    destination: &Path,
    overwrite: bool,
    quiet: bool,
) -> Result<DownloadOutcome> {
    let downloader = Downloader::from_config(config)?;
    let mut progress = progress_sink(config, quiet);

    let outcome = downloader
        .download(url, destination, overwrite, &mut *progress)
        .inspect_err(|e| {
            if e.is_transfer() && !quiet {
                println!(
                    "❌ Transfer failed, nothing was written to {}",
                    destination.display()
                );
            }
        })?;

    if let DownloadOutcome::Downloaded { bytes } = outcome {
        if !quiet {
            println!("✅ Saved {bytes} bytes to {}", destination.display());
        }
    }

    Ok(outcome)
}
