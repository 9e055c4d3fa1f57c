//! Default locations used to prefill the file selection page

use std::path::{Path, PathBuf};

use crate::config::MISSION_SCRIPTING_FILENAME;

#[cfg(windows)]
use winreg::enums::HKEY_CURRENT_USER;
#[cfg(windows)]
use winreg::RegKey;

/// Saved Games folder names, checked in order
const SAVED_GAMES_CANDIDATES: [&str; 2] = ["DCS.openbeta", "DCS"];

#[cfg(windows)]
const DCS_REGISTRY_KEYS: [&str; 2] = [
    "Software\\Eagle Dynamics\\DCS World OpenBeta",
    "Software\\Eagle Dynamics\\DCS World",
];

/// First existing `Saved Games/<candidate>` below `home`.
pub fn saved_games_dir_in(home: &Path) -> Option<PathBuf> {
    SAVED_GAMES_CANDIDATES
        .iter()
        .map(|name| home.join("Saved Games").join(name))
        .find(|p| p.is_dir())
}

pub fn default_install_dir() -> Option<PathBuf> {
    let dir = saved_games_dir_in(&dirs::home_dir()?);
    if let Some(dir) = &dir {
        log::info!("Found DCS Saved Games folder: {}", dir.display());
    }
    dir
}

/// `Scripts/MissionScripting.lua` below a DCS install directory, if it exists.
pub fn mission_scripting_in(dcs_dir: &Path) -> Option<PathBuf> {
    let path = dcs_dir.join("Scripts").join(MISSION_SCRIPTING_FILENAME);
    path.is_file().then_some(path)
}

#[cfg(windows)]
pub fn default_script_file() -> Option<PathBuf> {
    let hkcu = RegKey::predef(HKEY_CURRENT_USER);
    for key in DCS_REGISTRY_KEYS {
        let install_path: Option<String> = hkcu
            .open_subkey(key)
            .and_then(|k| k.get_value("Path"))
            .ok();
        if let Some(file) = install_path.and_then(|p| mission_scripting_in(Path::new(&p))) {
            log::info!("Found MissionScripting.lua: {}", file.display());
            return Some(file);
        }
    }
    None
}

#[cfg(not(windows))]
pub fn default_script_file() -> Option<PathBuf> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_openbeta_saved_games() {
        let home = tempfile::tempdir().unwrap();
        assert_eq!(saved_games_dir_in(home.path()), None);

        let stable = home.path().join("Saved Games").join("DCS");
        std::fs::create_dir_all(&stable).unwrap();
        assert_eq!(saved_games_dir_in(home.path()), Some(stable));

        let beta = home.path().join("Saved Games").join("DCS.openbeta");
        std::fs::create_dir_all(&beta).unwrap();
        assert_eq!(saved_games_dir_in(home.path()), Some(beta));
    }

    #[test]
    fn mission_scripting_must_exist() {
        let dcs = tempfile::tempdir().unwrap();
        assert_eq!(mission_scripting_in(dcs.path()), None);

        let scripts = dcs.path().join("Scripts");
        std::fs::create_dir_all(&scripts).unwrap();
        std::fs::write(scripts.join("MissionScripting.lua"), "").unwrap();
        assert_eq!(
            mission_scripting_in(dcs.path()),
            Some(scripts.join("MissionScripting.lua"))
        );
    }
}
