//! Song release synchronization.
//!
//! Downloads the latest songs release archive from GitHub, moves any
//! existing library directory aside under a timestamped name and unpacks
//! the archive in its place.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// GitHub API base URL.
const GITHUB_API: &str = "https://api.github.com";

/// File-name prefix identifying the songs archive among release assets.
const ASSET_PREFIX: &str = "songs-v";

/// A downloadable asset attached to a GitHub release.
#[derive(Debug, Clone, Deserialize)]
pub struct Asset {
    /// Asset file name.
    pub name: String,
    /// Direct download URL.
    pub browser_download_url: String,
}

/// The subset of a GitHub release the sync needs.
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    /// Release tag name.
    #[serde(default)]
    pub tag_name: String,
    /// Assets attached to the release.
    #[serde(default)]
    pub assets: Vec<Asset>,
}

/// Pick the songs archive from a release's assets.
#[must_use]
pub fn pick_asset(release: &Release) -> Option<&Asset> {
    release
        .assets
        .iter()
        .find(|asset| asset.name.starts_with(ASSET_PREFIX) && asset.name.ends_with(".zip"))
}

/// Download and unpack the latest songs release.
///
/// An existing `target_dir` is renamed to a timestamped sibling first. The
/// archive's entries are written relative to the current directory, which
/// is how the release archives are laid out.
pub async fn sync_latest(repo: &str, target_dir: &Path) -> Result<()> {
    let client = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let release: Release = client
        .get(format!("{GITHUB_API}/repos/{repo}/releases/latest"))
        .header(reqwest::header::ACCEPT, "application/vnd.github.v3+json")
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let asset = pick_asset(&release)
        .ok_or_else(|| Error::Network("songs asset not found in the release".to_string()))?;
    tracing::info!("Downloading '{}' ({})", asset.name, release.tag_name);

    let archive = client
        .get(&asset.browser_download_url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;

    if target_dir.is_dir() {
        let stamp = chrono::Local::now().format("%y%m%dT%H%M%S").to_string();
        let backup = backup_path(target_dir, &stamp);
        fs_err::rename(target_dir, &backup)?;
        tracing::info!("Archived '{}' -> '{}'", target_dir.display(), backup.display());
    }

    extract(&archive, Path::new("."))
}

/// Backup location for an existing library directory: `<dir>-<stamp>`.
fn backup_path(dir: &Path, stamp: &str) -> PathBuf {
    let name = dir
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("Songs");
    dir.with_file_name(format!("{name}-{stamp}"))
}

/// Unpack a zip archive under `base`, creating directories as needed.
fn extract(archive: &[u8], base: &Path) -> Result<()> {
    let mut zip = zip::ZipArchive::new(Cursor::new(archive))?;
    for index in 0..zip.len() {
        let mut entry = zip.by_index(index)?;
        let Some(relative) = entry.enclosed_name().map(Path::to_path_buf) else {
            tracing::warn!("Skipping archive entry with unsafe path: {}", entry.name());
            continue;
        };

        let target = base.join(relative);
        if entry.is_dir() {
            fs_err::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs_err::create_dir_all(parent)?;
            }
            let mut file = fs_err::File::create(&target)?;
            std::io::copy(&mut entry, &mut file)?;
            tracing::info!("{}", target.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use std::io::Write;

    use super::*;

    #[test]
    fn picks_the_songs_zip_asset() {
        let release: Release = serde_json::from_str(
            r#"{
                "tag_name": "v1.4.0",
                "assets": [
                    {"name": "checksums.txt", "browser_download_url": "https://example.com/c"},
                    {"name": "songs-v1.4.0.zip", "browser_download_url": "https://example.com/s"}
                ]
            }"#,
        )
        .unwrap();

        let asset = pick_asset(&release).unwrap();
        assert_eq!(asset.name, "songs-v1.4.0.zip");
    }

    #[test]
    fn ignores_releases_without_a_songs_archive() {
        let release: Release =
            serde_json::from_str(r#"{"tag_name": "v1.0.0", "assets": []}"#).unwrap();
        assert!(pick_asset(&release).is_none());
    }

    #[test]
    fn backup_keeps_the_parent_directory() {
        let backup = backup_path(Path::new("library/Songs"), "250806T101500");
        assert_eq!(backup, PathBuf::from("library/Songs-250806T101500"));
    }

    #[test]
    fn extracts_files_and_directories() {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buffer);
            let options = zip::write::FileOptions::default();
            writer.add_directory("Songs/", options).unwrap();
            writer.start_file("Songs/song.xml", options).unwrap();
            writer.write_all(b"<song><title>T</title></song>").unwrap();
            writer.finish().unwrap();
        }

        let base = tempfile::tempdir().unwrap();
        extract(buffer.get_ref(), base.path()).unwrap();

        let written = std::fs::read_to_string(base.path().join("Songs/song.xml")).unwrap();
        assert_eq!(written, "<song><title>T</title></song>");
    }
}
