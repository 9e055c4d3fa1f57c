//! Wizard page flow and session state
//!
//! The four installer pages form a linear sequence. All user selections live in
//! a [`Session`] that the GUI feeds events into and reads effects back from.

use std::path::PathBuf;

use crate::installer::{InstallOutcome, InstallRequest};
use crate::releases::VersionEntry;

pub const NO_VERSION_MESSAGE: &str = "No DCS-gRPC version available, restart the installer to try again";
pub const SUCCESS_POPUP: &str = "Everything installed succesfully";
pub const NO_RELEASES_MESSAGE: &str = "No DCS-gRPC release with a downloadable archive was found";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Start,
    VersionSelect,
    FileSelect,
    Overview,
}

/// Forward edges of the page sequence. `previous` walks them backwards.
const TRANSITIONS: [(Page, Page); 3] = [
    (Page::Start, Page::VersionSelect),
    (Page::VersionSelect, Page::FileSelect),
    (Page::FileSelect, Page::Overview),
];

impl Page {
    pub fn next(self) -> Option<Page> {
        TRANSITIONS
            .iter()
            .find(|(from, _)| *from == self)
            .map(|(_, to)| *to)
    }

    pub fn previous(self) -> Option<Page> {
        TRANSITIONS
            .iter()
            .find(|(_, to)| *to == self)
            .map(|(from, _)| *from)
    }

    pub fn buttons(self) -> NavButtons {
        NavButtons {
            previous: self != Page::Start,
            next: self != Page::Overview,
            install: self == Page::Overview,
        }
    }
}

/// Which navigation buttons are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavButtons {
    pub previous: bool,
    pub next: bool,
    pub install: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WizardEvent {
    Next,
    Previous,
    Install,
    SelectVersion(String),
    InstallDirChanged(String),
    ScriptFileChanged(String),
}

/// What the GUI has to do after an event.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardEffect {
    None,
    RunInstall(InstallRequest),
    ShowMessage(String),
    /// Show the message, then close the installer.
    Exit(String),
}

#[derive(Debug, Clone)]
pub struct Session {
    page: Page,
    versions: Vec<VersionEntry>,
    versions_error: Option<String>,
    // Set until the release fetch reports back
    versions_pending: bool,
    selected_version: Option<String>,
    pub install_dir: String,
    pub script_file: String,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            page: Page::Start,
            versions: Vec::new(),
            versions_error: None,
            versions_pending: true,
            selected_version: None,
            install_dir: String::new(),
            script_file: String::new(),
        }
    }
}

impl Session {
    pub fn new(install_dir: Option<PathBuf>, script_file: Option<PathBuf>) -> Self {
        Self {
            install_dir: install_dir.map(|p| p.display().to_string()).unwrap_or_default(),
            script_file: script_file.map(|p| p.display().to_string()).unwrap_or_default(),
            ..Default::default()
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    /// Page buttons, with Install held back until the release list has arrived.
    pub fn buttons(&self) -> NavButtons {
        let mut buttons = self.page.buttons();
        buttons.install &= !self.versions_pending;
        buttons
    }

    pub fn versions_pending(&self) -> bool {
        self.versions_pending
    }

    pub fn versions(&self) -> &[VersionEntry] {
        &self.versions
    }

    pub fn versions_error(&self) -> Option<&str> {
        self.versions_error.as_deref()
    }

    pub fn selected_version(&self) -> Option<&str> {
        self.selected_version.as_deref()
    }

    pub fn selected_entry(&self) -> Option<&VersionEntry> {
        let tag = self.selected_version.as_deref()?;
        self.versions.iter().find(|v| v.tag == tag)
    }

    /// Store the fetched versions. The newest one is selected by default.
    pub fn set_versions(&mut self, result: Result<Vec<VersionEntry>, String>) {
        self.versions_pending = false;
        match result {
            Ok(versions) if versions.is_empty() => {
                self.versions.clear();
                self.selected_version = None;
                self.versions_error = Some(NO_RELEASES_MESSAGE.to_string());
            }
            Ok(versions) => {
                self.selected_version = versions.first().map(|v| v.tag.clone());
                self.versions = versions;
                self.versions_error = None;
            }
            Err(message) => {
                self.versions.clear();
                self.selected_version = None;
                self.versions_error = Some(message);
            }
        }
    }

    pub fn handle(&mut self, event: WizardEvent) -> WizardEffect {
        match event {
            WizardEvent::Next => {
                if let Some(page) = self.page.next() {
                    self.page = page;
                }
                WizardEffect::None
            }
            WizardEvent::Previous => {
                if let Some(page) = self.page.previous() {
                    self.page = page;
                }
                WizardEffect::None
            }
            WizardEvent::Install => self.install_request(),
            WizardEvent::SelectVersion(tag) => {
                if self.versions.iter().any(|v| v.tag == tag) {
                    self.selected_version = Some(tag);
                }
                WizardEffect::None
            }
            WizardEvent::InstallDirChanged(dir) => {
                self.install_dir = dir;
                WizardEffect::None
            }
            WizardEvent::ScriptFileChanged(file) => {
                self.script_file = file;
                WizardEffect::None
            }
        }
    }

    fn install_request(&self) -> WizardEffect {
        if !self.buttons().install {
            return WizardEffect::None;
        }
        match self.selected_entry() {
            Some(entry) => WizardEffect::RunInstall(InstallRequest {
                install_dir: PathBuf::from(self.install_dir.trim()),
                script_file: PathBuf::from(self.script_file.trim()),
                download_url: entry.download_url.clone(),
            }),
            None => WizardEffect::ShowMessage(format!("Not all fields were correct: {}", NO_VERSION_MESSAGE)),
        }
    }

    /// Turn an install outcome into the popup to show. The page stays on the overview.
    pub fn install_finished(&self, outcome: &InstallOutcome) -> WizardEffect {
        if outcome.success {
            WizardEffect::Exit(SUCCESS_POPUP.to_string())
        } else {
            WizardEffect::ShowMessage(format!("Not all fields were correct: {}", outcome.message))
        }
    }
}
