//! Release archive download and extraction
//!
//! Downloads a release zip into a temporary file next to the installer and
//! unpacks it into the DCS Saved Games folder.

use std::fs;
use std::io::{Read, Seek, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{InstallerConfig, TEMP_ARCHIVE_PREFIX};

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("download failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid archive: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Source of archive bytes.
pub trait Downloader {
    /// Write the resource at `url` into `dest`, returning the number of bytes written.
    fn download(&self, url: &str, dest: &mut dyn Write) -> Result<u64, ArchiveError>;
}

/// Blocking HTTP downloader used by the installer.
pub struct HttpDownloader {
    client: reqwest::blocking::Client,
}

impl HttpDownloader {
    pub fn new(user_agent: &str) -> Result<Self, ArchiveError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent.to_owned())
            .build()?;
        Ok(Self { client })
    }

    pub fn from_config(config: &InstallerConfig) -> Result<Self, ArchiveError> {
        Self::new(&config.user_agent)
    }
}

impl Downloader for HttpDownloader {
    fn download(&self, url: &str, dest: &mut dyn Write) -> Result<u64, ArchiveError> {
        let mut response = self.client.get(url).send()?.error_for_status()?;
        let size = response.copy_to(dest)?;
        Ok(size)
    }
}

/// Extract every entry of a zip archive into `out_dir`, returning the extracted file paths.
pub fn unpack_zip<R>(reader: R, out_dir: &Path) -> Result<Vec<PathBuf>, ArchiveError>
where
    R: Read + Seek,
{
    debug_assert!(!out_dir.is_file(), "Output directory is a file");
    let mut archive = zip::ZipArchive::new(reader)?;
    let mut extracted = Vec::with_capacity(archive.len());

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        let outpath = match file.enclosed_name() {
            Some(path) => out_dir.join(path),
            None => {
                log::warn!("Skipping archive entry outside the target folder: {}", file.name());
                continue;
            }
        };

        if file.name().ends_with('/') {
            fs::create_dir_all(&outpath)?;
        } else {
            if let Some(p) = outpath.parent() {
                if !p.exists() {
                    fs::create_dir_all(p)?;
                }
            }
            let mut outfile = fs::File::create(&outpath)?;
            std::io::copy(&mut file, &mut outfile)?;
            log::debug!("Extracted {}", outpath.display());
            extracted.push(outpath);
        }
    }
    Ok(extracted)
}

/// Download `url` into a temporary archive inside `temp_dir` and extract it into `install_dir`.
///
/// The temporary archive is removed when this returns, whether or not extraction succeeded.
pub fn fetch_and_extract(
    downloader: &dyn Downloader,
    temp_dir: &Path,
    install_dir: &Path,
    url: &str,
) -> Result<Vec<PathBuf>, ArchiveError> {
    let mut archive = tempfile::Builder::new()
        .prefix(TEMP_ARCHIVE_PREFIX)
        .suffix(".zip")
        .tempfile_in(temp_dir)?;

    log::info!("Downloading {} to {}", url, archive.path().display());
    let size = downloader.download(url, archive.as_file_mut())?;
    archive.as_file_mut().flush()?;
    log::info!("Downloaded {} bytes", size);

    archive.as_file_mut().rewind()?;
    let extracted = unpack_zip(archive.as_file_mut(), install_dir)?;
    log::info!(
        "Extracted {} files into {}",
        extracted.len(),
        install_dir.display()
    );

    archive.close()?;
    Ok(extracted)
}
