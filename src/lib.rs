//! DCS-gRPC Installer Library Root
//!
//! Exposes the installer logic (patching, archive install, release listing,
//! wizard flow) separately from the egui front end so it can be tested headless.

pub mod archive;
pub mod center_window;
pub mod config;
pub mod data_structures;
pub mod gui;
pub mod installer;
pub mod locations;
pub mod logging;
pub mod patcher;
pub mod releases;
pub mod wizard;

pub use data_structures::DcsGrpcInstaller;
