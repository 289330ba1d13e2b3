//! Batch conversion between the text and XML song formats.
//!
//! Walks a flat source directory, converts every song file to the sibling
//! format and writes it under the destination with the extension swapped.
//! Files convert independently and in parallel; a file that cannot be read,
//! parsed or written is counted and logged, never fatal to the batch.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::format;

/// Conversion direction for a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Plain-text sources to XML documents.
    TextToXml,
    /// XML documents to plain-text sources.
    XmlToText,
}

impl Direction {
    /// Extension of the files this direction reads (no dot, matched
    /// case-insensitively).
    #[must_use]
    pub const fn source_extension(self) -> &'static str {
        match self {
            Self::TextToXml => "txt",
            Self::XmlToText => "xml",
        }
    }

    /// Extension of the files this direction writes.
    #[must_use]
    pub const fn target_extension(self) -> &'static str {
        match self {
            Self::TextToXml => "xml",
            Self::XmlToText => "txt",
        }
    }
}

/// Outcome of a batch conversion.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Files converted and written.
    pub converted: usize,
    /// Files that could not be read, parsed or written.
    pub failed: usize,
}

/// Convert every song file in `source`, writing results to `destination`.
///
/// Only the directory's immediate files are considered; subdirectories and
/// files with other extensions are skipped.
pub fn convert_dir(source: &Path, destination: &Path, direction: Direction) -> Result<Summary> {
    if !source.is_dir() {
        return Err(Error::Library(format!(
            "source directory does not exist: {}",
            source.display()
        )));
    }

    let files: Vec<PathBuf> = WalkDir::new(source)
        .max_depth(1)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| has_extension(entry.path(), direction.source_extension()))
        .map(walkdir::DirEntry::into_path)
        .collect();

    let outcomes: Vec<bool> = files
        .par_iter()
        .map(|path| match convert_file(path, destination, direction) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed converting '{}': {e}", path.display());
                false
            }
        })
        .collect();

    let converted = outcomes.iter().filter(|ok| **ok).count();
    let summary = Summary { converted, failed: outcomes.len() - converted };
    tracing::info!("Converted {} song(s), failed: {}.", summary.converted, summary.failed);
    Ok(summary)
}

/// Convert one song file and write the sibling-format document.
fn convert_file(path: &Path, destination: &Path, direction: Direction) -> Result<()> {
    let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
        return Err(Error::parse("song file has no usable name", Some(path.to_path_buf())));
    };

    let input = fs_err::read_to_string(path)?;
    let output = match direction {
        Direction::TextToXml => {
            let song = format::parse_text(&input)
                .ok_or_else(|| Error::parse("failed to parse song text", Some(path.to_path_buf())))?;
            format::to_xml(&song)
        }
        Direction::XmlToText => {
            let song = format::parse_xml(file_name, &input)
                .ok_or_else(|| Error::parse("failed to parse song XML", Some(path.to_path_buf())))?;
            format::to_text(&song)
        }
    };

    let mut target = destination.join(file_name);
    target.set_extension(direction.target_extension());
    fs_err::write(target, output)?;
    Ok(())
}

/// Case-insensitive extension check.
fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}
