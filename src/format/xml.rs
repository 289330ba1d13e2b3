//! `OpenSong`-style XML song format.
//!
//! `<song>` with `<title>`, `<lyrics>` (bracketed `[ID]` section tags,
//! space-indented lyric lines, a trailing ` ||` closing a slide without a
//! blank line) and `<presentation>` holding the outline. The format has no
//! tag storage, so parsing always yields empty tags.
//!
//! Neither serializer escapes markup inside titles or lyric lines. Content
//! containing XML-significant characters, a fully bracketed line of its own
//! or the `||` marker will be misread as structure when the rendered
//! document is parsed again.

use std::sync::LazyLock;

use regex::Regex;
use roxmltree::Document;

use crate::song::{Section, Song};

use super::machine::{self, Dialect};
use super::title;

/// End-of-slide marker token.
const SLIDE_MARKER: &str = "||";

/// Regex matching a fully bracketed section header line like `[V1]`.
#[allow(clippy::expect_used)]
static RE_SECTION_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[.+\]$").expect("valid regex: RE_SECTION_TAG"));

struct XmlDialect;

impl Dialect for XmlDialect {
    fn is_section_tag(line: &str) -> bool {
        RE_SECTION_TAG.is_match(line)
    }

    fn section_id(line: &str) -> String {
        let inner = line.strip_prefix('[').unwrap_or(line);
        inner.strip_suffix(']').unwrap_or(inner).to_string()
    }

    fn strip_slide_markers(line: &str) -> String {
        line.replace(SLIDE_MARKER, "").trim().to_string()
    }

    fn is_end_of_slide(line: &str) -> bool {
        line.ends_with(SLIDE_MARKER)
    }

    fn derive_file(title: &str, alt: Option<&str>) -> String {
        // Reproducing existing documents keeps the undecomposed join; the
        // caller-supplied name overrides it after the parse anyway.
        title::join_parts(title, alt) + super::XML_EXTENSION
    }
}

/// Parse an XML song document.
///
/// `file_name` is carried into [`Song::file`] verbatim. Missing `<title>`,
/// `<lyrics>` or `<presentation>` elements read as empty strings. Returns
/// `None` for unreadable XML or a document violating the section grammar.
#[must_use]
pub fn parse_xml(file_name: &str, xml: &str) -> Option<Song> {
    let doc = match Document::parse(xml) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::debug!("not an XML song document: {e}");
            return None;
        }
    };

    let lyrics = element_text(&doc, "lyrics");
    let mut events = vec![element_text(&doc, "title"), element_text(&doc, "presentation")];
    events.extend(lyrics.trim().split('\n').map(str::trim));

    let mut song = machine::run::<XmlDialect>(&events)?;
    song.file = file_name.to_string();
    song.tags = Vec::new();
    Some(song)
}

/// Text content of the document's first element with the given tag name.
fn element_text<'a, 'input>(doc: &'a Document<'input>, tag: &str) -> &'a str {
    doc.descendants()
        .find(|node| node.has_tag_name(tag))
        .and_then(|node| node.text())
        .unwrap_or("")
}

/// Render a song to the XML format.
#[must_use]
pub fn to_xml(song: &Song) -> String {
    let body = song
        .sections
        .iter()
        .map(section_block)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "<?xml version='1.0' encoding='UTF-8'?>\n\
         <song>\n  <title>{}</title>\n  <lyrics>{}\n</lyrics>\n\
         <presentation>{}</presentation>\n</song>\n",
        song.title,
        body.trim(),
        song.outline.join(" "),
    )
}

fn section_block(section: &Section) -> String {
    let slides = section
        .slides
        .iter()
        .map(|slide| {
            slide
                .iter()
                .map(|line| format!(" {line}"))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join(" ||\n");
    format!("[{}]\n{slides}\n", section.id)
}
