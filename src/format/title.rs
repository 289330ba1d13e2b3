//! Title-line parsing and file-name derivation.
//!
//! The first line of either format carries the title, an optional
//! parenthesized alternate title and an optional run of `#tag` labels:
//! `A Song Title (Alternative Title) #Leszek #new`.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::XML_EXTENSION;

/// Regex splitting a header line into title, alternate title and tags.
#[allow(clippy::expect_used)]
static RE_TITLE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<title>[^(]+?)(?:\s*\((?P<alt>[^)]+?)\)?)?\s*(?P<tags>#.+?)?\s*$")
        .expect("valid regex: RE_TITLE_LINE")
});

/// Parsed parts of a header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleLine {
    /// Song title; empty for a blank header line.
    pub title: String,
    /// Alternate title, if a parenthesized group is present.
    pub alt: Option<String>,
    /// `#tag` labels in header order, empty tokens discarded.
    pub tags: Vec<String>,
}

/// Parse one header line.
///
/// Any input is accepted as at least a title: a line the grammar cannot
/// split (an empty line, or one starting with `(`) becomes the title
/// verbatim, with no alternate title and no tags.
#[must_use]
pub fn parse(line: &str) -> TitleLine {
    RE_TITLE_LINE.captures(line).map_or_else(
        || TitleLine {
            title: line.trim().to_string(),
            alt: None,
            tags: Vec::new(),
        },
        |caps| TitleLine {
            title: caps.name("title").map_or("", |m| m.as_str()).to_string(),
            alt: caps.name("alt").map(|m| m.as_str().to_string()),
            tags: caps.name("tags").map_or_else(Vec::new, |m| split_tags(m.as_str())),
        },
    )
}

/// Split a `#a #b` run into labels, dropping empty tokens.
fn split_tags(raw: &str) -> Vec<String> {
    raw.split('#')
        .map(|tag| tag.trim_end_matches(' '))
        .filter(|tag| !tag.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Join title and alternate title with a single space, skipping absent or
/// empty parts.
pub(crate) fn join_parts(title: &str, alt: Option<&str>) -> String {
    match alt.filter(|alt| !alt.is_empty()) {
        Some(alt) if title.is_empty() => alt.to_string(),
        Some(alt) => format!("{title} {alt}"),
        None => title.to_string(),
    }
}

/// Derive the filesystem-safe file name for a song.
///
/// Joins title and alternate title, decomposes accented letters and drops
/// their combining marks, maps the fixed special-letter table, strips
/// everything else outside `[A-Za-z0-9 ]` and appends the `.xml` extension.
/// Non-ASCII letters without a table entry are dropped, not transliterated.
#[must_use]
pub fn derive_file_name(title: &str, alt: Option<&str>) -> String {
    let mut name = String::new();
    for c in join_parts(title, alt).nfd() {
        if is_combining_mark(c) {
            continue;
        }
        if c.is_ascii() {
            if c.is_ascii_alphanumeric() || c == ' ' {
                name.push(c);
            }
        } else if let Some(mapped) = special_letter(c) {
            name.push_str(mapped);
        }
    }
    name + XML_EXTENSION
}

/// ASCII equivalents for letters NFD cannot decompose.
const fn special_letter(c: char) -> Option<&'static str> {
    Some(match c {
        'ł' => "l",
        'Ł' => "L",
        'ø' => "o",
        'Ø' => "O",
        'ß' => "ss",
        'æ' => "ae",
        'Æ' => "AE",
        'ð' | 'đ' => "d",
        'Ð' | 'Đ' => "D",
        'þ' => "th",
        'Þ' => "TH",
        'ı' => "i",
        'ſ' => "s",
        _ => return None,
    })
}
