use std::fs;

use dcs_grpc_installer::config::{DEFAULT_DIRECTIVE, DEFAULT_MARKER};
use dcs_grpc_installer::patcher::{patch_file, PatchRules};

/// MissionScripting.lua variants seen in the wild, plus a few odd ones.
const SAMPLES: &[&str] = &[
    "--Initialization script for the Mission lua Environment (SSE)\n\ndofile('Scripts/ScriptingSystem.lua')\n\n--Sanitize Mission Scripting environment\nlocal function sanitizeModule(name)\n\t_G[name] = nil\n\tpackage.loaded[name] = nil\nend\n\ndo\n\tsanitizeModule('os')\n\tsanitizeModule('io')\n\tsanitizeModule('lfs')\n\t_G['require'] = nil\n\t_G['loadlib'] = nil\n\t_G['package'] = nil\nend\n",
    "dofile('Scripts/ScriptingSystem.lua')\r\ndofile(lfs.writedir()..[[Scripts\\DCS-gRPC\\grpc-mission.lua]])\r\n\r\ndo\r\nend\r\n",
    "dofile(lfs.writedir()..[[Scripts\\DCS-gRPC\\grpc-mission.lua]])\ndofile('Scripts/ScriptingSystem.lua')\n-- grpc-mission.lua\n",
    "no anchor here\ndofile(lfs.writedir()..[[Scripts\\DCS-gRPC\\grpc-mission.lua]])\n",
    "",
    "scripts/scriptingSystem.lua",
];

fn patched(text: &str) -> String {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("MissionScripting.lua");
    fs::write(&path, text).unwrap();
    patch_file(&path, &PatchRules::default()).unwrap();
    fs::read_to_string(&path).unwrap()
}

fn has_anchor(text: &str) -> bool {
    text.to_lowercase().contains("scripts/scriptingsystem.lua")
}

#[test]
fn at_most_one_active_marker_right_after_anchor() {
    for sample in SAMPLES {
        let out = patched(sample);
        let lines: Vec<&str> = out.lines().collect();
        let active: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, l)| l.contains(DEFAULT_MARKER))
            .map(|(i, _)| i)
            .collect();

        if has_anchor(sample) {
            assert_eq!(active.len(), 1, "sample: {:?}", sample);
            let i = active[0];
            assert_eq!(lines[i], DEFAULT_DIRECTIVE);
            assert!(has_anchor(lines[i - 1]));
        } else {
            assert!(active.is_empty(), "sample: {:?}", sample);
        }
    }
}

#[test]
fn no_anchor_keeps_line_count() {
    for sample in SAMPLES.iter().filter(|s| !has_anchor(s)) {
        let out = patched(sample);
        assert_eq!(out.lines().count(), sample.lines().count());
    }
}

#[test]
fn patching_twice_is_byte_identical() {
    for sample in SAMPLES {
        let once = patched(sample);
        let twice = patched(&once);
        assert_eq!(once, twice, "sample: {:?}", sample);
    }
}
