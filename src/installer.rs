//! Install orchestration
//!
//! Validates the user's selections, patches MissionScripting.lua and installs
//! the release archive into the Saved Games folder.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::archive::{self, ArchiveError, Downloader, HttpDownloader};
use crate::config::InstallerConfig;
use crate::patcher::{self, PatchError, PatchRules};

pub const SUCCESS_MESSAGE: &str = "Installed Succesfully";

const EXPECTED_FILE_SUFFIX: &str = "missionscripting.lua";

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("DCS Saved games folder not found")]
    InstallDirNotFound,
    #[error("MissionScripting.lua file not found")]
    ScriptFileNotFound,
    #[error("your file was not the expected MissionScripting.lua file")]
    UnexpectedScriptFile,
    #[error("Something went wrong while update the MissionScripting.lua file")]
    Patch(#[source] PatchError),
    #[error("Something went wrong while installing all the Saved Games files")]
    Archive(#[source] ArchiveError),
}

/// Everything needed for one install run.
#[derive(Debug, Clone, PartialEq)]
pub struct InstallRequest {
    pub install_dir: PathBuf,
    pub script_file: PathBuf,
    pub download_url: String,
}

/// Result shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct InstallOutcome {
    pub success: bool,
    pub message: String,
}

impl From<Result<(), InstallError>> for InstallOutcome {
    fn from(result: Result<(), InstallError>) -> Self {
        match result {
            Ok(()) => Self {
                success: true,
                message: SUCCESS_MESSAGE.to_string(),
            },
            Err(e) => Self {
                success: false,
                message: e.to_string(),
            },
        }
    }
}

fn has_expected_name(script_file: &Path) -> bool {
    script_file
        .file_name()
        .map(|name| name.to_string_lossy().to_lowercase().ends_with(EXPECTED_FILE_SUFFIX))
        .unwrap_or(false)
}

/// Check the three preconditions in order, stopping at the first failure.
pub fn validate(request: &InstallRequest) -> Result<(), InstallError> {
    if !request.install_dir.exists() {
        return Err(InstallError::InstallDirNotFound);
    }
    if !request.script_file.exists() {
        return Err(InstallError::ScriptFileNotFound);
    }
    if !has_expected_name(&request.script_file) {
        return Err(InstallError::UnexpectedScriptFile);
    }
    Ok(())
}

pub struct Installer<D: Downloader> {
    downloader: D,
    rules: PatchRules,
    temp_dir: PathBuf,
}

impl Installer<HttpDownloader> {
    pub fn from_config(config: &InstallerConfig) -> Result<Self, ArchiveError> {
        Ok(Self::new(
            HttpDownloader::from_config(config)?,
            PatchRules::from_config(config),
            config.staging_dir(),
        ))
    }
}

impl<D: Downloader> Installer<D> {
    pub fn new(downloader: D, rules: PatchRules, temp_dir: PathBuf) -> Self {
        Self {
            downloader,
            rules,
            temp_dir,
        }
    }

    pub fn try_install(&self, request: &InstallRequest) -> Result<(), InstallError> {
        validate(request)?;

        patcher::patch_file(&request.script_file, &self.rules).map_err(|e| {
            log::error!("Patching {} failed: {}", request.script_file.display(), e);
            InstallError::Patch(e)
        })?;

        archive::fetch_and_extract(
            &self.downloader,
            &self.temp_dir,
            &request.install_dir,
            &request.download_url,
        )
        .map_err(|e| {
            log::error!("Installing {} failed: {}", request.download_url, e);
            InstallError::Archive(e)
        })?;

        Ok(())
    }

    pub fn install(&self, request: &InstallRequest) -> InstallOutcome {
        log::info!(
            "Installing {} into {} (script file {})",
            request.download_url,
            request.install_dir.display(),
            request.script_file.display()
        );
        let outcome = InstallOutcome::from(self.try_install(request));
        log::info!("Install finished: {}", outcome.message);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_name_is_case_insensitive() {
        assert!(has_expected_name(Path::new("C:/DCS/Scripts/MissionScripting.lua")));
        assert!(has_expected_name(Path::new("/x/MISSIONSCRIPTING.LUA")));
        assert!(has_expected_name(Path::new("/x/old_missionscripting.lua")));
        assert!(!has_expected_name(Path::new("/x/foo.lua")));
        assert!(!has_expected_name(Path::new("/")));
    }

    #[test]
    fn outcome_messages() {
        let ok = InstallOutcome::from(Ok::<(), InstallError>(()));
        assert!(ok.success);
        assert_eq!(ok.message, "Installed Succesfully");

        let err = InstallOutcome::from(Err::<(), _>(InstallError::ScriptFileNotFound));
        assert!(!err.success);
        assert_eq!(err.message, "MissionScripting.lua file not found");
    }
}
