use super::cutter::Cutter;
use crate::content::Surface;
use crate::error::PDFError;
use crate::font::Fonts;
use crate::rect::Position;
use crate::text::BreakRules;
use crate::units::Pt;
use std::fmt;
use std::rc::Rc;

/// Drawables are shared between the document, the layout and the pieces
/// division produces, and never mutated once built
pub type DrawableRef = Rc<dyn Drawable>;

/// Everything measuring, drawing and dividing depends on besides the
/// drawable itself. Layout builds one per placement, so the same drawable
/// can be laid out at different widths without being changed.
#[derive(Copy, Clone, Debug)]
pub struct LayoutRequest<'a> {
    pub fonts: &'a Fonts,
    /// The width offered by the enclosing layout or container. A drawable
    /// with a maximum width of its own uses that instead.
    pub max_width: Option<Pt>,
    pub break_rules: &'a BreakRules,
}

impl<'a> LayoutRequest<'a> {
    pub fn new(fonts: &'a Fonts, break_rules: &'a BreakRules) -> LayoutRequest<'a> {
        LayoutRequest {
            fonts,
            max_width: None,
            break_rules,
        }
    }

    pub fn with_max_width(self, max_width: Option<Pt>) -> LayoutRequest<'a> {
        LayoutRequest { max_width, ..self }
    }

    /// The width a drawable wraps to: its own maximum if it has one, the
    /// offered width otherwise
    pub fn width_for(&self, own: Option<Pt>) -> Option<Pt> {
        own.or(self.max_width)
    }
}

/// Anything that can be measured and drawn onto a page.
///
/// Positions are upper-left corners in PDF user space; drawing at
/// `upper_left` fills the area from there down by [Drawable::height] and
/// right by [Drawable::width].
pub trait Drawable: fmt::Debug {
    fn width(&self, request: &LayoutRequest) -> Pt;

    fn height(&self, request: &LayoutRequest) -> Pt;

    /// If set, the drawable is drawn here and layout skips it entirely
    fn absolute_position(&self) -> Option<Position> {
        None
    }

    /// A maximum width of the drawable's own, overriding the one layout offers
    fn max_width(&self) -> Option<Pt> {
        None
    }

    fn draw(
        &self,
        surface: &mut Surface,
        upper_left: Position,
        request: &LayoutRequest,
    ) -> Result<(), PDFError>;

    /// Drawables which know how to split themselves at a page boundary
    /// return themselves here. Everything else is cut by a [Cutter].
    fn as_dividable(&self) -> Option<&dyn Dividable> {
        None
    }
}

/// The result of dividing a drawable: `head` fits the remaining space,
/// `tail` continues on the next page (and may be divided again).
#[derive(Debug, Clone)]
pub struct Divided {
    pub head: DrawableRef,
    pub tail: DrawableRef,
}

/// Splitting a drawable which is taller than the space left on a page
pub trait Dividable {
    /// Split so that the head is at most `remaining` tall. `next_page_height`
    /// is the full height available after a page turn, which lets a
    /// drawable decide to move to the next page as a whole.
    fn divide(&self, remaining: Pt, next_page_height: Pt, request: &LayoutRequest) -> Divided;
}

/// How a particular drawable gets divided
pub enum Divider<'a> {
    Native(&'a dyn Dividable),
    Cutter,
}

impl<'a> Divider<'a> {
    pub fn of(drawable: &'a dyn Drawable) -> Divider<'a> {
        match drawable.as_dividable() {
            Some(dividable) => Divider::Native(dividable),
            None => Divider::Cutter,
        }
    }
}

/// Divide any drawable, natively where it can, through a [Cutter] otherwise
pub fn divide(
    drawable: &DrawableRef,
    remaining: Pt,
    next_page_height: Pt,
    request: &LayoutRequest,
) -> Divided {
    match Divider::of(drawable.as_ref()) {
        Divider::Native(dividable) => dividable.divide(remaining, next_page_height, request),
        Divider::Cutter => {
            Cutter::new(drawable.clone(), request).divide(remaining, next_page_height, request)
        }
    }
}
