use crate::commands::download::download_file_with;
use crate::commands::unzip::print_summary;
use crate::core::config::Config;
use crate::core::download::{file_name_from_url, DownloadOutcome};
use crate::core::extract::{self, ExtractSummary};
use crate::error::Result;
use crate::utils::fs;
use std::path::{Path, PathBuf};

/// Downloads a ZIP and extracts it into `destination`.
///
/// Without `archive`, the file lands in `destination` under the last segment
/// of the URL. Both steps skip work that is already done.
pub fn fetch_archive(
    url: &str,
    destination: &Path,
    archive: Option<&Path>,
    overwrite: bool,
    quiet: bool,
) -> Result<()> {
    let config = Config::load()?;
    fetch_archive_with(&config, url, destination, archive, overwrite, quiet).map(|_| ())
}

pub fn fetch_archive_with(
    config: &Config,
    url: &str,
    destination: &Path,
    archive: Option<&Path>,
    overwrite: bool,
    quiet: bool,
) -> Result<(DownloadOutcome, ExtractSummary)> {
    fs::ensure_dir_exists(destination)?;

    let archive_path: PathBuf = match archive {
        Some(path) => path.to_path_buf(),
        None => destination.join(file_name_from_url(url)?),
    };

    let outcome = download_file_with(config, url, &archive_path, overwrite, quiet)?;
    let summary = extract::unzip(&archive_path, destination)?;

    if !quiet {
        print_summary(&summary);
    }

    Ok((outcome, summary))
}
