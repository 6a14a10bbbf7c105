use crate::error::{FetchError, Result};
use crate::utils::fs;
use std::fs::File;
use std::io::{ErrorKind, Read, Seek, Write};
use std::path::{Path, PathBuf};
use zip::result::ZipError;
use zip::ZipArchive;

const DEFAULT_FILE_MODE: u32 = 0o644;
const COPY_BUFFER: usize = 64 * 1024;

/// What a single extraction pass did with each entry.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtractSummary {
    pub extracted: Vec<PathBuf>,
    /// Targets that already existed and were left untouched.
    pub skipped: Vec<PathBuf>,
    /// Entry names that would resolve outside the destination.
    pub rejected: Vec<String>,
}

impl ExtractSummary {
    pub fn is_noop(&self) -> bool {
        self.extracted.is_empty()
    }
}

/// Extracts every entry of the ZIP at `source` whose target under
/// `destination` does not exist yet. Existing paths are never overwritten.
pub fn unzip(source: &Path, destination: &Path) -> Result<ExtractSummary> {
    log::info!("Extracting {source:?} to {destination:?}");

    let file = File::open(source).map_err(|e| FetchError::from_io(e, source))?;
    unzip_reader(file, destination)
}

pub fn unzip_reader<R: Read + Seek>(reader: R, destination: &Path) -> Result<ExtractSummary> {
    let mut archive = ZipArchive::new(reader)?;
    let mut summary = ExtractSummary::default();

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;

        let target = match entry.enclosed_name() {
            Some(path) => destination.join(path),
            None => {
                log::warn!("Not extracting {:?}: path leaves the destination", entry.name());
                summary.rejected.push(entry.name().to_string());
                continue;
            }
        };

        if fs::path_is_taken(&target) {
            log::debug!("{target:?} exists, skipping");
            summary.skipped.push(target);
            continue;
        }

        if entry.is_dir() {
            fs::ensure_dir_exists(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::ensure_dir_exists(parent)?;
            }

            let mode = entry
                .unix_mode()
                .map(|m| m & 0o777)
                .filter(|m| *m != 0)
                .unwrap_or(DEFAULT_FILE_MODE);

            let mut staged = fs::stage_beside(&target)?;
            let written = copy_entry(&mut entry, staged.as_file_mut())?;
            fs::set_file_mode(staged.path(), mode)?;
            fs::commit_staged(staged, &target)?;
            log::debug!("{target:?} extracted ({written} bytes)");
        }

        summary.extracted.push(target);
    }

    log::info!(
        "Extracted {} entries, skipped {}",
        summary.extracted.len(),
        summary.skipped.len()
    );
    Ok(summary)
}

// Decompression and checksum failures surface on read and belong to the archive.
fn copy_entry<R: Read, W: Write>(entry: &mut R, out: &mut W) -> Result<u64> {
    let mut buf = vec![0u8; COPY_BUFFER];
    let mut written: u64 = 0;

    loop {
        let read = match entry.read(&mut buf) {
            Ok(0) => break,
            Ok(read) => read,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(FetchError::Archive(ZipError::Io(e))),
        };
        out.write_all(&buf[..read])?;
        written += read as u64;
    }
    out.flush()?;

    Ok(written)
}
