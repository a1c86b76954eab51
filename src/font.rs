use crate::{PDFError, Pt};
use id_arena::{Arena, Id};
use owned_ttf_parser::{AsFaceRef, OwnedFace};
use std::fmt;

/// Glyph metrics are normalised to this many units per em, the usual
/// PDF convention. A glyph that is 600 units wide is 6pt wide at 10pt.
pub const UNITS_PER_EM: f32 = 1000.0;

/// Every font used by a document. Runs refer to fonts by their [FontId]
/// within this arena, never by reference.
pub type Fonts = Arena<Font>;

/// Handle to a [Font] stored in a [Fonts] arena
pub type FontId = Id<Font>;

enum Metrics {
    /// A parsed TrueType / OpenType face
    Face(OwnedFace),
    /// Metrics only: every glyph has the same advance
    Fixed {
        advance: f32,
        ascender: f32,
        descender: f32,
    },
}

/// A font, as far as layout is concerned: a source of glyph advances and
/// vertical metrics. Fonts are either parsed from TTF / OTF bytes or
/// described purely by fixed metrics (e.g. one of the standard monospaced
/// PDF fonts, which need no font file).
pub struct Font {
    name: String,
    metrics: Metrics,
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font").field("name", &self.name).finish()
    }
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, PDFError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        let name = face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FULL_NAME && name.is_unicode())
            .and_then(|name| name.to_string())
            .unwrap_or_else(|| "Unnamed".to_string());

        Ok(Font {
            name,
            metrics: Metrics::Face(face),
        })
    }

    /// A metrics-only font where every glyph advances by `advance` units
    /// (out of [UNITS_PER_EM])
    pub fn fixed<S: ToString>(name: S, advance: f32, ascender: f32, descender: f32) -> Font {
        Font {
            name: name.to_string(),
            metrics: Metrics::Fixed {
                advance,
                ascender,
                descender,
            },
        }
    }

    /// Metrics of the standard PDF Courier font
    pub fn courier() -> Font {
        Font::fixed("Courier", 600.0, 629.0, -157.0)
    }

    /// Metrics of the standard PDF Courier-Bold font
    pub fn courier_bold() -> Font {
        Font::fixed("Courier-Bold", 600.0, 629.0, -157.0)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn scaling(&self) -> f32 {
        match &self.metrics {
            Metrics::Face(face) => UNITS_PER_EM / face.as_face_ref().units_per_em() as f32,
            Metrics::Fixed { .. } => 1.0,
        }
    }

    /// Advance width of a single character, in 1/1000 em. Characters the
    /// face cannot map fall back to the replacement glyph, then to `?`.
    pub fn glyph_width(&self, ch: char) -> f32 {
        match &self.metrics {
            Metrics::Face(face) => {
                let face = face.as_face_ref();
                face.glyph_index(ch)
                    .or_else(|| face.glyph_index('\u{FFFD}'))
                    .or_else(|| face.glyph_index('?'))
                    .and_then(|gid| face.glyph_hor_advance(gid))
                    .map(|advance| advance as f32 * self.scaling())
                    .unwrap_or_default()
            }
            Metrics::Fixed { advance, .. } => *advance,
        }
    }

    /// Calculate the width of a given string of text at the given font size
    pub fn text_width(&self, text: &str, size: Pt) -> Pt {
        let units: f32 = text.chars().map(|ch| self.glyph_width(ch)).sum();
        Pt(units * size.0 / UNITS_PER_EM)
    }

    /// Average advance of the lowercase latin alphabet, a cheap estimate of
    /// how many characters fit a given width
    pub fn average_char_width(&self, size: Pt) -> Pt {
        match &self.metrics {
            Metrics::Fixed { advance, .. } => Pt(advance * size.0 / UNITS_PER_EM),
            Metrics::Face(_) => {
                let total: f32 = ('a'..='z').map(|ch| self.glyph_width(ch)).sum();
                Pt(total / 26.0 * size.0 / UNITS_PER_EM)
            }
        }
    }

    /// Calculate the ascent (distance from the baseline to the top of the font) for the given font size
    pub fn ascent(&self, size: Pt) -> Pt {
        let ascender = match &self.metrics {
            Metrics::Face(face) => face.as_face_ref().ascender() as f32 * self.scaling(),
            Metrics::Fixed { ascender, .. } => *ascender,
        };
        Pt(ascender * size.0 / UNITS_PER_EM)
    }

    /// Calculate the descent (distance from the baseline to the bottom of the font) for the given font size.
    /// Note: this is usually negative
    pub fn descent(&self, size: Pt) -> Pt {
        let descender = match &self.metrics {
            Metrics::Face(face) => face.as_face_ref().descender() as f32 * self.scaling(),
            Metrics::Fixed { descender, .. } => *descender,
        };
        Pt(descender * size.0 / UNITS_PER_EM)
    }

    /// Encode text the way a text-showing operator expects it: big-endian
    /// glyph ids for embedded faces (Identity-H), single WinAnsi bytes for
    /// metrics-only fonts.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match &self.metrics {
            Metrics::Face(face) => {
                let face = face.as_face_ref();
                let mut bytes = Vec::with_capacity(text.len() * 2);
                for ch in text.chars() {
                    let gid = face
                        .glyph_index(ch)
                        .or_else(|| face.glyph_index('\u{FFFD}'))
                        .or_else(|| face.glyph_index('?'))
                        .map(|gid| gid.0)
                        .unwrap_or_default();
                    bytes.extend_from_slice(&gid.to_be_bytes());
                }
                bytes
            }
            Metrics::Fixed { .. } => text
                .chars()
                .map(|ch| u8::try_from(u32::from(ch)).unwrap_or(b'?'))
                .collect(),
        }
    }
}

/// The font a run is drawn with: which font, and at what size
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: FontId,
    pub size: Pt,
}

impl SpanFont {
    pub fn new(id: FontId, size: Pt) -> SpanFont {
        SpanFont { id, size }
    }
}

/// The four variants of a typeface that markup switches between with its
/// bold and italic toggles
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct FontFamily {
    pub regular: FontId,
    pub bold: FontId,
    pub italic: FontId,
    pub bold_italic: FontId,
}

impl FontFamily {
    pub fn new(regular: FontId, bold: FontId, italic: FontId, bold_italic: FontId) -> FontFamily {
        FontFamily {
            regular,
            bold,
            italic,
            bold_italic,
        }
    }

    /// A family which uses the same font for every variant
    pub fn single(id: FontId) -> FontFamily {
        FontFamily::new(id, id, id, id)
    }

    pub fn select(&self, bold: bool, italic: bool) -> FontId {
        match (bold, italic) {
            (false, false) => self.regular,
            (true, false) => self.bold,
            (false, true) => self.italic,
            (true, true) => self.bold_italic,
        }
    }
}
