//! Near-duplicate song detection.
//!
//! Compares every pair of text songs by Jaccard similarity over their word
//! sets and reports the pairs at or above a threshold, most similar first.

use std::collections::HashSet;
use std::path::Path;

use rayon::prelude::*;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Songs whose normalized content is shorter than this are skipped.
const MIN_CONTENT_LEN: usize = 20;

/// Words this short carry no signal and are left out of the word sets.
const MIN_WORD_LEN: usize = 3;

/// A pair of song files with similar content.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicatePair {
    /// File names of the two similar songs.
    pub files: (String, String),
    /// Jaccard similarity of their word sets, `0.0..=1.0`.
    pub similarity: f64,
}

/// Normalize song content for comparison: lowercase, drop diacritics, keep
/// only ASCII letters and digits, collapse whitespace runs.
#[must_use]
pub fn normalize_content(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());
    for c in text.to_lowercase().nfd() {
        if is_combining_mark(c) {
            continue;
        }
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
            cleaned.push(c);
        }
    }
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Jaccard similarity of two normalized texts over their word sets.
///
/// Identical texts score `1.0`; texts where either word set is empty score
/// `0.0`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let words_a: HashSet<&str> = a.split(' ').filter(|w| w.len() >= MIN_WORD_LEN).collect();
    let words_b: HashSet<&str> = b.split(' ').filter(|w| w.len() >= MIN_WORD_LEN).collect();
    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }

    let intersection = words_a.intersection(&words_b).count();
    let union = words_a.union(&words_b).count();
    intersection as f64 / union as f64
}

/// Scan `dir` for near-duplicate text songs.
pub fn find_duplicates(dir: &Path, threshold: f64) -> Result<Vec<DuplicatePair>> {
    if !dir.is_dir() {
        return Err(Error::Library(format!(
            "songs directory does not exist: {}",
            dir.display()
        )));
    }

    let songs: Vec<(String, String)> = WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
        })
        .filter_map(|entry| {
            let name = entry.file_name().to_str()?.to_string();
            let content = fs_err::read_to_string(entry.path()).ok()?;
            let normalized = normalize_content(&content);
            (normalized.len() >= MIN_CONTENT_LEN).then_some((name, normalized))
        })
        .collect();

    tracing::info!("Analyzing {} song(s) for duplicates", songs.len());

    let mut pairs: Vec<DuplicatePair> = (0..songs.len())
        .into_par_iter()
        .flat_map_iter(|i| {
            let songs = &songs;
            ((i + 1)..songs.len()).filter_map(move |j| {
                let sim = similarity(&songs[i].1, &songs[j].1);
                (sim >= threshold).then(|| DuplicatePair {
                    files: (songs[i].0.clone(), songs[j].0.clone()),
                    similarity: sim,
                })
            })
        })
        .collect();

    pairs.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn normalizes_case_diacritics_and_whitespace() {
        assert_eq!(
            normalize_content("Vzdej  DÍKY,\nvzdej chválu!"),
            "vzdej diky vzdej chvalu"
        );
    }

    #[test]
    fn identical_content_scores_one() {
        let a = normalize_content("Amazing grace how sweet the sound");
        assert!((similarity(&a, &a) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn disjoint_content_scores_zero() {
        let a = normalize_content("amazing grace sweet sound");
        let b = normalize_content("completely different words here");
        assert!(similarity(&a, &b).abs() < f64::EPSILON);
    }

    #[test]
    fn short_words_carry_no_signal() {
        // "we"/"go"/"so"/"to" are too short to count; the word sets match.
        let sim = similarity("we go gather home", "so to gather home");
        assert!((sim - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn overlapping_content_scores_between() {
        let a = normalize_content("amazing grace how sweet the sound");
        let b = normalize_content("amazing grace how bitter the taste");
        let sim = similarity(&a, &b);
        assert!(sim > 0.0 && sim < 1.0);
    }

    #[test]
    fn scan_reports_similar_pairs_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let verse = "Amazing grace how sweet the sound that saved a wretch like me";
        std::fs::write(dir.path().join("a.txt"), verse).unwrap();
        std::fs::write(dir.path().join("b.txt"), format!("{verse} indeed")).unwrap();
        std::fs::write(
            dir.path().join("c.txt"),
            "Completely different lyrics about something else entirely",
        )
        .unwrap();

        let pairs = find_duplicates(dir.path(), 0.7).unwrap();
        assert_eq!(pairs.len(), 1);
        let mut names = vec![pairs[0].files.0.clone(), pairs[0].files.1.clone()];
        names.sort();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
        assert!(pairs[0].similarity >= 0.7);
    }

    #[test]
    fn skips_very_short_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "la la").unwrap();
        std::fs::write(dir.path().join("b.txt"), "la la").unwrap();

        let pairs = find_duplicates(dir.path(), 0.7).unwrap();
        assert!(pairs.is_empty());
    }
}
