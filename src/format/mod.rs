//! Bidirectional song format engine.
//!
//! A format-specific front end tokenizes raw input into an ordered event
//! sequence (title line, outline line, body lines) and drives the shared
//! state machine in `machine`; serialization renders the model straight back
//! to text. The four entry points are [`parse_text`], [`parse_xml`],
//! [`to_text`] and [`to_xml`].
//!
//! Parsing is total over IO concerns but partial over the grammar: a
//! document the section grammar rejects yields `None`, which callers treat
//! as a per-file outcome, not an error.

mod machine;
mod text;
pub mod title;
mod xml;

pub use text::{parse_text, to_text};
pub use xml::{parse_xml, to_xml};

/// Extension of XML song documents; also the extension every derived
/// [`crate::song::Song::file`] name carries.
pub const XML_EXTENSION: &str = ".xml";

/// Extension of plain-text song documents.
pub const TEXT_EXTENSION: &str = ".txt";
