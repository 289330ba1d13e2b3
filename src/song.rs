//! Song document model shared by both textual formats.
//!
//! A [`Song`] is built wholly by one parse call and consumed wholly by one
//! serialize call; nothing mutates it in between.

use serde::{Deserialize, Serialize};

/// One slide: the lyric lines displayed together. Lines are raw text and may
/// embed inline chord markers such as `[C]`; those are payload, not grammar.
pub type Slide = Vec<String>;

/// A named group of slides, addressable from the outline by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section id, unique within a song (`V1`, `C`, `B`, ...).
    pub id: String,
    /// Slides in source order.
    pub slides: Vec<Slide>,
}

/// Root song document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Derived filesystem-safe file name. Always carries the `.xml`
    /// extension, whichever format the song was parsed from.
    pub file: String,
    /// Song title from the header line.
    pub title: String,
    /// Alternate title from the header line's parenthesized group.
    pub alt: Option<String>,
    /// Sections in first-encountered source order, independent of the
    /// outline's presentation order.
    pub sections: Vec<Section>,
    /// Presentation order as section-id references. Ids may repeat and are
    /// not checked against `sections`.
    pub outline: Vec<String>,
    /// Ordered `#tag` labels from the header line. Only the text format
    /// stores tags; parsing XML always leaves this empty.
    pub tags: Vec<String>,
}
