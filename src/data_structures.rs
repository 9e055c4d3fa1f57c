//! Data structures and types for the DCS-gRPC Installer
//!
//! This module contains the application state shared by the GUI: the wizard
//! session, the background release fetch and the background install run.

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::{Arc, Mutex};

use crate::config::InstallerConfig;
use crate::installer::{InstallError, InstallOutcome, InstallRequest, Installer};
use crate::locations;
use crate::releases::{self, ReleaseError, VersionEntry, LOAD_FAILED_MESSAGE};
use crate::wizard::{Session, WizardEffect};

/// Message box shown over the wizard
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub message: String,
    /// Close the installer once the popup is dismissed
    pub exit_on_close: bool,
}

/// Main application state for the DCS-gRPC installer
pub struct DcsGrpcInstaller {
    pub config: InstallerConfig,
    pub session: Session,

    // Release list fetched on startup
    pub versions_rx: Option<Receiver<Result<Vec<VersionEntry>, ReleaseError>>>,

    // Install run state
    pub installing: bool,
    pub install_result: Arc<Mutex<Option<InstallOutcome>>>,

    // UI state
    pub popup: Option<Popup>,
}

impl DcsGrpcInstaller {
    /// Build the app and start fetching the release list in the background.
    pub fn new(config: InstallerConfig) -> Self {
        let (tx, rx) = channel();
        releases::spawn_release_fetch(config.clone(), tx);

        let mut app = Self::with_receiver(config, rx);
        app.session = Session::new(
            locations::default_install_dir(),
            locations::default_script_file(),
        );
        app
    }

    /// Build the app around an already running release fetch.
    pub fn with_receiver(
        config: InstallerConfig,
        versions_rx: Receiver<Result<Vec<VersionEntry>, ReleaseError>>,
    ) -> Self {
        Self {
            config,
            session: Session::default(),
            versions_rx: Some(versions_rx),
            installing: false,
            install_result: Arc::new(Mutex::new(None)),
            popup: None,
        }
    }

    /// Is the wizard accepting input?
    pub fn is_idle(&self) -> bool {
        !self.installing && self.popup.is_none()
    }

    /// Poll for the release list
    pub fn poll_versions(&mut self) {
        let received = match &self.versions_rx {
            Some(rx) => rx.try_recv(),
            None => return,
        };
        match received {
            Ok(result) => {
                self.session
                    .set_versions(result.map_err(|_| LOAD_FAILED_MESSAGE.to_string()));
                self.versions_rx = None;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                self.session.set_versions(Err(LOAD_FAILED_MESSAGE.to_string()));
                self.versions_rx = None;
            }
        }
    }

    pub fn apply_effect(&mut self, effect: WizardEffect) {
        match effect {
            WizardEffect::None => {}
            WizardEffect::RunInstall(request) => self.start_install(request),
            WizardEffect::ShowMessage(message) => {
                self.popup = Some(Popup {
                    message,
                    exit_on_close: false,
                })
            }
            WizardEffect::Exit(message) => {
                self.popup = Some(Popup {
                    message,
                    exit_on_close: true,
                })
            }
        }
    }

    /// Run the install on a worker thread. The outcome lands in `install_result`.
    pub fn start_install(&mut self, request: InstallRequest) {
        if self.installing {
            return;
        }
        self.installing = true;
        let config = self.config.clone();
        let result = self.install_result.clone();
        std::thread::spawn(move || {
            let outcome = match Installer::from_config(&config) {
                Ok(installer) => installer.install(&request),
                Err(e) => {
                    log::error!("Could not create HTTP client: {}", e);
                    InstallOutcome::from(Err::<(), _>(InstallError::Archive(e)))
                }
            };
            if let Ok(mut guard) = result.lock() {
                *guard = Some(outcome);
            }
        });
    }

    /// Poll for the install outcome
    pub fn poll_install(&mut self) {
        let outcome = match self.install_result.lock() {
            Ok(mut guard) => guard.take(),
            Err(_) => None,
        };
        if let Some(outcome) = outcome {
            self.installing = false;
            let effect = self.session.install_finished(&outcome);
            self.apply_effect(effect);
        }
    }
}
