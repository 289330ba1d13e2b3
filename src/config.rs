//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::error::Result;

/// Configuration for the song library tools.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the plain-text song library.
    pub songs_dir: PathBuf,
    /// Directory the release archive unpacks into.
    pub archive_dir: PathBuf,
    /// GitHub `owner/repo` slug the release sync pulls from.
    pub release_repo: String,
    /// Similarity threshold for duplicate detection, `0.0..=1.0`.
    pub similarity_threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            songs_dir: PathBuf::from("lyrics"),
            archive_dir: PathBuf::from("Songs"),
            release_repo: "cblistna/songs".to_string(),
            similarity_threshold: 0.7,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    #[allow(clippy::unnecessary_wraps)] // Returns Result for forward-compatible API
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        if let Ok(dir) = env::var("SONGS_DIR") {
            config.songs_dir = expand(&dir);
        }

        if let Ok(dir) = env::var("ARCHIVE_DIR") {
            config.archive_dir = expand(&dir);
        }

        if let Ok(repo) = env::var("SONGS_REPO") {
            config.release_repo = repo;
        }

        if let Ok(threshold) = env::var("SIMILARITY_THRESHOLD") {
            if let Ok(threshold) = threshold.parse::<f64>() {
                config.similarity_threshold = threshold;
            }
        }

        Ok(config)
    }
}

/// Expand a leading tilde in a configured path.
fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).to_string())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn defaults_match_the_song_library_layout() {
        let config = Config::default();
        assert_eq!(config.songs_dir, PathBuf::from("lyrics"));
        assert_eq!(config.archive_dir, PathBuf::from("Songs"));
        assert_eq!(config.release_repo, "cblistna/songs");
        assert!((config.similarity_threshold - 0.7).abs() < f64::EPSILON);
    }
}
