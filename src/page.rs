use crate::content::{encode_ops, DrawOp};
use crate::font::Fonts;
use crate::pagesize::PageFormat;
use crate::rect::{Position, Rect};

/// Where a hyperlink leads
#[derive(Clone, PartialEq, Debug)]
pub enum LinkTarget {
    /// An external URI
    Uri(String),
    /// A named anchor somewhere in the same document (`{link[#name]}`)
    Anchor(String),
}

/// How hyperlinked text is decorated
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub enum LinkStyle {
    #[default]
    Underline,
    None,
}

/// Metadata attached to runs of text, reported to the page whenever the run
/// is drawn
#[derive(Clone, PartialEq, Debug)]
pub enum Annotation {
    Link { target: LinkTarget, style: LinkStyle },
    Anchor { name: String },
}

/// An [Annotation] together with the area it was drawn in
#[derive(Clone, PartialEq, Debug)]
pub struct PlacedAnnotation {
    pub annotation: Annotation,
    pub rect: Rect,
}

/// A link destination after all pages have been drawn
#[derive(Clone, PartialEq, Debug)]
pub enum ResolvedTarget {
    Uri(String),
    Destination { page: usize, position: Position },
}

/// A clickable area on a page
#[derive(Clone, PartialEq, Debug)]
pub struct Link {
    pub rect: Rect,
    pub target: ResolvedTarget,
}

/// A finished page: its geometry, the drawing operations laid out onto it,
/// and the annotations those operations reported
#[derive(Debug)]
pub struct Page {
    /// 0-based position of the page in the document
    pub index: usize,
    /// The size of the page
    pub media_box: Rect,
    /// Where content can live, i.e. within the margins
    pub content_box: Rect,
    /// Everything drawn on the page, in order
    pub ops: Vec<DrawOp>,
    pub annotations: Vec<PlacedAnnotation>,
    /// Filled in when the document is finalized
    pub links: Vec<Link>,
}

impl Page {
    pub fn new(index: usize, format: &PageFormat) -> Page {
        Page {
            index,
            media_box: format.media_box(),
            content_box: format.content_box(),
            ops: Vec::default(),
            annotations: Vec::default(),
            links: Vec::default(),
        }
    }

    /// The text drawn on this page in drawing order, handy for inspection
    pub fn text(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::ShowText(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn content_stream(&self, fonts: &Fonts) -> Vec<u8> {
        encode_ops(&self.ops, fonts)
    }
}
