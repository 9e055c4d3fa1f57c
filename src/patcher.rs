//! MissionScripting.lua patching
//!
//! Blanks every line carrying a previous DCS-gRPC activation and inserts a single
//! fresh activation directive right after the scripting system anchor line.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::InstallerConfig;

#[derive(Debug, Error)]
pub enum PatchError {
    #[error("{} does not exist", .0.display())]
    NotFound(PathBuf),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// What to neutralize, where to insert and what to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchRules {
    /// Case-sensitive substrings marking a previously installed directive.
    pub markers: Vec<String>,
    /// Case-insensitive substring of the line the directive goes after.
    pub anchor: String,
    pub directive: String,
}

impl Default for PatchRules {
    fn default() -> Self {
        Self::from_config(&InstallerConfig::default())
    }
}

impl PatchRules {
    pub fn from_config(config: &InstallerConfig) -> Self {
        Self {
            markers: config.markers.clone(),
            anchor: config.anchor.clone(),
            directive: config.directive.clone(),
        }
    }

    fn is_marker(&self, line: &str) -> bool {
        self.markers.iter().any(|m| line.contains(m.as_str()))
    }

    /// Patch a sequence of lines without touching the filesystem.
    ///
    /// Marker lines become empty lines so the line count only ever grows by the
    /// one inserted directive. Only the first anchor match counts. A directive
    /// already sitting right after the anchor is reused instead of being blanked
    /// and inserted again, which keeps repeated runs byte-identical.
    pub fn apply(&self, lines: &[String]) -> Vec<String> {
        let anchor = self.anchor.to_lowercase();
        let mut patched = Vec::with_capacity(lines.len() + 1);
        let mut anchor_found = false;
        let mut iter = lines.iter().peekable();

        while let Some(line) = iter.next() {
            let line = if self.is_marker(line) {
                String::new()
            } else {
                line.clone()
            };
            let is_anchor = !anchor_found && line.to_lowercase().contains(&anchor);
            patched.push(line);

            if is_anchor {
                anchor_found = true;
                if iter
                    .peek()
                    .map_or(false, |next| next.trim() == self.directive.trim())
                {
                    iter.next();
                }
                patched.push(self.directive.clone());
            }
        }

        if !anchor_found {
            log::warn!("Anchor '{}' not found, no directive inserted", self.anchor);
        }
        patched
    }
}

/// Line layout of a text file, kept so the file is written back the way it was read.
struct TextLayout {
    newline: &'static str,
    trailing_newline: bool,
}

fn split_lines(contents: &str) -> (Vec<String>, TextLayout) {
    let layout = TextLayout {
        newline: if contents.contains("\r\n") { "\r\n" } else { "\n" },
        trailing_newline: contents.ends_with('\n'),
    };
    (contents.lines().map(str::to_owned).collect(), layout)
}

fn join_lines(lines: &[String], layout: &TextLayout) -> String {
    let mut out = lines.join(layout.newline);
    if layout.trailing_newline && !lines.is_empty() {
        out.push_str(layout.newline);
    }
    out
}

/// Patch the file at `path` in place.
pub fn patch_file(path: &Path, rules: &PatchRules) -> Result<(), PatchError> {
    if !path.exists() {
        return Err(PatchError::NotFound(path.to_path_buf()));
    }

    let contents = fs::read_to_string(path)?;
    let (lines, layout) = split_lines(&contents);
    let patched = rules.apply(&lines);
    fs::write(path, join_lines(&patched, &layout))?;

    log::info!("Edited file: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(|s| s.to_string()).collect()
    }

    fn rules() -> PatchRules {
        PatchRules {
            markers: vec!["grpc-mission.lua".to_string()],
            anchor: "scripts/scriptingSystem.lua".to_string(),
            directive: "dofile(lfs.writedir()..[[Scripts\\DCS-gRPC\\grpc-mission.lua]])".to_string(),
        }
    }

    #[test]
    fn inserts_directive_after_anchor() {
        let input = lines(&[
            "local function sanitizeModule(name)",
            "dofile('Scripts/ScriptingSystem.lua')",
            "sanitizeModule('os')",
        ]);
        let out = rules().apply(&input);
        assert_eq!(out.len(), 4);
        assert_eq!(out[1], input[1]);
        assert_eq!(out[2], rules().directive);
        assert_eq!(out[3], input[2]);
    }

    #[test]
    fn blanks_previous_markers_without_removing_lines() {
        let input = lines(&[
            "dofile(lfs.writedir()..[[Scripts\\DCS-gRPC\\grpc-mission.lua]])",
            "dofile('Scripts/ScriptingSystem.lua')",
            "-- old grpc-mission.lua include",
            "sanitizeModule('io')",
        ]);
        let out = rules().apply(&input);
        assert_eq!(
            out,
            lines(&[
                "",
                "dofile('Scripts/ScriptingSystem.lua')",
                "dofile(lfs.writedir()..[[Scripts\\DCS-gRPC\\grpc-mission.lua]])",
                "",
                "sanitizeModule('io')",
            ])
        );
        let active = out.iter().filter(|l| l.contains("grpc-mission.lua")).count();
        assert_eq!(active, 1);
    }

    #[test]
    fn marker_match_is_case_sensitive() {
        let input = lines(&["GRPC-MISSION.LUA stays", "scripts/scriptingSystem.lua"]);
        let out = rules().apply(&input);
        assert_eq!(out[0], "GRPC-MISSION.LUA stays");
    }

    #[test]
    fn missing_anchor_only_blanks() {
        let input = lines(&["a", "b grpc-mission.lua", "c"]);
        let out = rules().apply(&input);
        assert_eq!(out, lines(&["a", "", "c"]));
    }

    #[test]
    fn first_anchor_wins() {
        let input = lines(&[
            "SCRIPTS/SCRIPTINGSYSTEM.LUA",
            "x",
            "scripts/scriptingSystem.lua",
        ]);
        let out = rules().apply(&input);
        assert_eq!(out.len(), 4);
        assert_eq!(out[1], rules().directive);
        assert_eq!(out[3], "scripts/scriptingSystem.lua");
    }

    #[test]
    fn apply_is_idempotent() {
        let input = lines(&[
            "grpc-mission.lua",
            "dofile('Scripts/ScriptingSystem.lua')",
            "grpc-mission.lua again",
            "end",
        ]);
        let once = rules().apply(&input);
        let twice = rules().apply(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn patch_file_keeps_crlf_and_trailing_newline() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("MissionScripting.lua");
        fs::write(&path, "a\r\nscripts/scriptingSystem.lua\r\nb\r\n").unwrap();

        patch_file(&path, &rules()).unwrap();
        let first = fs::read_to_string(&path).unwrap();
        assert_eq!(
            first,
            format!("a\r\nscripts/scriptingSystem.lua\r\n{}\r\nb\r\n", rules().directive)
        );

        patch_file(&path, &rules()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), first);
    }

    #[test]
    fn patch_file_missing_path() {
        let tmp = tempfile::tempdir().unwrap();
        let err = patch_file(&tmp.path().join("gone.lua"), &rules()).unwrap_err();
        assert!(matches!(err, PatchError::NotFound(_)));
    }
}
