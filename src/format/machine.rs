//! Shared section/slide parsing core.
//!
//! Both formats reduce to the same event sequence — title line, outline
//! line, body lines — and the same grammar: section tags open sections,
//! blank lines separate slides. The formats differ only in how lines are
//! recognized, captured by the [`Dialect`] trait, so each front end is a
//! small adapter over one state machine.

use crate::song::{Section, Song};

use super::title;

/// Format-specific line rules feeding the shared state machine.
pub(crate) trait Dialect {
    /// Whether a line is a section header.
    fn is_section_tag(line: &str) -> bool;

    /// Section id carried by a section header line.
    fn section_id(line: &str) -> String;

    /// Remove in-line slide markers from a lyric line.
    fn strip_slide_markers(line: &str) -> String;

    /// Whether a lyric line also closes the current slide.
    fn is_end_of_slide(line: &str) -> bool;

    /// Derive the song's file name from its title parts.
    fn derive_file(title: &str, alt: Option<&str>) -> String;
}

/// Parser states, one per structural position in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Title,
    Outline,
    Sections,
    Section,
    Slides,
    Slide,
    Error,
}

/// Whether a transition consumed its event or wants it re-evaluated in the
/// new state.
enum Step {
    Consume,
    Replay,
}

/// Run the state machine over an event sequence.
///
/// Returns the accumulated song, or `None` when the grammar was violated.
pub(crate) fn run<D: Dialect>(events: &[&str]) -> Option<Song> {
    let mut state = State::Title;
    let mut song = Song::default();

    for event in events {
        loop {
            let (next, step) = transition::<D>(state, event, &mut song);
            state = next;
            match step {
                Step::Replay => {}
                Step::Consume => break,
            }
        }
    }

    (state != State::Error).then_some(song)
}

fn transition<D: Dialect>(state: State, line: &str, song: &mut Song) -> (State, Step) {
    match state {
        State::Title => {
            let header = title::parse(line);
            song.file = D::derive_file(&header.title, header.alt.as_deref());
            song.title = header.title;
            song.alt = header.alt;
            song.tags = header.tags;
            (State::Outline, Step::Consume)
        }
        State::Outline => {
            if !line.is_empty() {
                song.outline = line.split_whitespace().map(ToString::to_string).collect();
            }
            (State::Sections, Step::Consume)
        }
        State::Sections => {
            if D::is_section_tag(line) {
                // A blank line before this tag left a dangling empty slide.
                if let Some(section) = song.sections.last_mut() {
                    if section.slides.last().is_some_and(Vec::is_empty) {
                        section.slides.pop();
                    }
                }
                song.sections.push(Section {
                    id: D::section_id(line),
                    slides: Vec::new(),
                });
                (State::Section, Step::Consume)
            } else {
                (State::Sections, Step::Consume)
            }
        }
        State::Section => {
            if line.is_empty() {
                (State::Section, Step::Consume)
            } else {
                (State::Slides, Step::Replay)
            }
        }
        State::Slides => {
            if D::is_section_tag(line) {
                (State::Sections, Step::Replay)
            } else if line.is_empty() {
                (State::Slides, Step::Consume)
            } else {
                let Some(section) = song.sections.last_mut() else {
                    return (State::Error, Step::Consume);
                };
                section.slides.push(Vec::new());
                (State::Slide, Step::Replay)
            }
        }
        State::Slide => {
            if D::is_section_tag(line) {
                (State::Sections, Step::Replay)
            } else if line.is_empty() {
                (State::Slides, Step::Consume)
            } else {
                let Some(slide) = song
                    .sections
                    .last_mut()
                    .and_then(|section| section.slides.last_mut())
                else {
                    return (State::Error, Step::Consume);
                };
                slide.push(D::strip_slide_markers(line));
                if D::is_end_of_slide(line) {
                    (State::Slides, Step::Consume)
                } else {
                    (State::Slide, Step::Consume)
                }
            }
        }
        State::Error => (State::Error, Step::Consume),
    }
}
