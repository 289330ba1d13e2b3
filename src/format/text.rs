//! Plain-text song format.
//!
//! Line 1 is the title header, line 2 the outline (possibly blank), then a
//! blank separator and one block per section: a `:ID` header line followed
//! by its slides, blank lines between slides and between sections.

use std::fmt::Write;

use crate::song::{Section, Song};

use super::machine::{self, Dialect};
use super::title;

/// Marker character opening a section header line, e.g. `:V1`.
const SECTION_SENTINEL: char = ':';

struct TextDialect;

impl Dialect for TextDialect {
    fn is_section_tag(line: &str) -> bool {
        line.starts_with(SECTION_SENTINEL)
    }

    fn section_id(line: &str) -> String {
        line.strip_prefix(SECTION_SENTINEL).unwrap_or(line).to_string()
    }

    fn strip_slide_markers(line: &str) -> String {
        // Text lyric lines carry no markers; they are stored verbatim.
        line.to_string()
    }

    fn is_end_of_slide(_line: &str) -> bool {
        false
    }

    fn derive_file(title: &str, alt: Option<&str>) -> String {
        title::derive_file_name(title, alt)
    }
}

/// Parse a plain-text song document.
///
/// Returns `None` when the document violates the section grammar.
#[must_use]
pub fn parse_text(text: &str) -> Option<Song> {
    let events: Vec<&str> = text.trim().split('\n').map(str::trim).collect();
    let song = machine::run::<TextDialect>(&events);
    if song.is_none() {
        tracing::debug!("text document rejected by the section grammar");
    }
    song
}

/// Render a song to the plain-text format.
///
/// Inverse of [`parse_text`] up to blank-line normalization. Lyric lines
/// are written as-is: a line that itself starts with the section sentinel
/// would be re-read as a section header.
#[must_use]
pub fn to_text(song: &Song) -> String {
    let mut out = String::new();

    out.push_str(&song.title);
    if let Some(alt) = song.alt.as_deref().filter(|alt| !alt.is_empty()) {
        let _ = write!(out, " ({alt})");
    }
    for tag in &song.tags {
        let _ = write!(out, " #{tag}");
    }
    out.push('\n');

    if !song.outline.is_empty() {
        out.push_str(&song.outline.join(" "));
        out.push('\n');
    }
    out.push('\n');

    let blocks = song
        .sections
        .iter()
        .map(section_block)
        .collect::<Vec<_>>()
        .join("\n");
    out.push_str(&blocks);

    out
}

fn section_block(section: &Section) -> String {
    let slides = section
        .slides
        .iter()
        .map(|slide| slide.join("\n") + "\n")
        .collect::<Vec<_>>()
        .join("\n");
    format!("{SECTION_SENTINEL}{}\n{slides}", section.id)
}
