// Release listing for the version page.
// Fetches the GitHub release list and keeps the newest archives per tag.

use std::sync::mpsc::Sender;

use serde::Deserialize;
use thiserror::Error;

use crate::config::InstallerConfig;

pub const LOAD_FAILED_MESSAGE: &str = "Could not load versions, restart the installer to try again";

#[derive(Clone, Debug, Deserialize)]
pub struct GithubAsset {
    pub name: String,
    pub browser_download_url: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GithubRelease {
    pub tag_name: String,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub assets: Vec<GithubAsset>,
}

/// A selectable version on the version page.
#[derive(Clone, Debug, PartialEq)]
pub struct VersionEntry {
    pub tag: String,
    pub download_url: String,
    pub html_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error("release request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("could not start runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Take the first `count` releases and, for each, the first asset ending in `extension`.
/// Releases without a matching asset are left out. Order is kept, newest first.
pub fn select_versions(releases: &[GithubRelease], count: usize, extension: &str) -> Vec<VersionEntry> {
    releases
        .iter()
        .take(count)
        .filter_map(|release| {
            release
                .assets
                .iter()
                .find(|asset| asset.name.ends_with(extension))
                .map(|asset| VersionEntry {
                    tag: release.tag_name.clone(),
                    download_url: asset.browser_download_url.clone(),
                    html_url: release.html_url.clone(),
                })
        })
        .collect()
}

pub async fn fetch_releases(url: &str, user_agent: &str) -> Result<Vec<GithubRelease>, ReleaseError> {
    let client = reqwest::Client::new();
    let releases = client
        .get(url)
        .header("User-Agent", user_agent)
        .send()
        .await?
        .error_for_status()?
        .json::<Vec<GithubRelease>>()
        .await?;
    Ok(releases)
}

/// Fetch and select versions on a fresh runtime. Must not be called from inside a runtime.
pub fn fetch_versions(config: &InstallerConfig) -> Result<Vec<VersionEntry>, ReleaseError> {
    let rt = tokio::runtime::Runtime::new()?;
    let releases = rt.block_on(fetch_releases(&config.releases_url, &config.user_agent))?;
    log::info!("Fetched {} releases from {}", releases.len(), config.releases_url);
    Ok(select_versions(
        &releases,
        config.release_count,
        &config.archive_extension,
    ))
}

pub fn spawn_release_fetch(config: InstallerConfig, tx: Sender<Result<Vec<VersionEntry>, ReleaseError>>) {
    std::thread::spawn(move || {
        let result = fetch_versions(&config);
        if let Err(e) = &result {
            log::error!("Could not load versions: {}", e);
        }
        let _ = tx.send(result);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    static RELEASES_JSON: &str = r#"[
        {
            "tag_name": "0.8.1",
            "html_url": "https://github.com/DCS-gRPC/rust-server/releases/tag/0.8.1",
            "assets": [
                { "name": "checksums.txt", "browser_download_url": "https://example.invalid/0.8.1/checksums.txt" },
                { "name": "DCS-gRPC-0.8.1.zip", "browser_download_url": "https://example.invalid/0.8.1/DCS-gRPC-0.8.1.zip" },
                { "name": "DCS-gRPC-0.8.1-debug.zip", "browser_download_url": "https://example.invalid/0.8.1/debug.zip" }
            ]
        },
        { "tag_name": "0.8.0", "assets": [] },
        { "tag_name": "0.7.1", "assets": [ { "name": "DCS-gRPC-0.7.1.zip", "browser_download_url": "https://example.invalid/0.7.1.zip" } ] },
        { "tag_name": "0.7.0", "assets": [ { "name": "DCS-gRPC-0.7.0.zip", "browser_download_url": "https://example.invalid/0.7.0.zip" } ] },
        { "tag_name": "0.6.2", "assets": [ { "name": "DCS-gRPC-0.6.2.zip", "browser_download_url": "https://example.invalid/0.6.2.zip" } ] },
        { "tag_name": "0.6.1", "assets": [ { "name": "DCS-gRPC-0.6.1.zip", "browser_download_url": "https://example.invalid/0.6.1.zip" } ] }
    ]"#;

    fn releases() -> Vec<GithubRelease> {
        serde_json::from_str(RELEASES_JSON).unwrap()
    }

    #[test]
    fn takes_first_matching_asset_of_newest_releases() {
        let versions = select_versions(&releases(), 5, ".zip");
        let tags: Vec<&str> = versions.iter().map(|v| v.tag.as_str()).collect();
        assert_eq!(tags, vec!["0.8.1", "0.7.1", "0.7.0", "0.6.2"]);
        assert_eq!(
            versions[0].download_url,
            "https://example.invalid/0.8.1/DCS-gRPC-0.8.1.zip"
        );
        assert!(versions[0].html_url.is_some());
        assert!(versions[1].html_url.is_none());
    }

    #[test]
    fn count_limits_releases_not_entries() {
        let versions = select_versions(&releases(), 2, ".zip");
        assert_eq!(versions.len(), 1);
        assert_eq!(versions[0].tag, "0.8.1");
    }

    #[test]
    fn empty_list() {
        assert!(select_versions(&[], 5, ".zip").is_empty());
    }
}
