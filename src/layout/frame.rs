use super::drawable::{Dividable, Divided, Drawable, DrawableRef, LayoutRequest};
use super::margins::Margins;
use super::shape::{Shape, Stroke};
use super::spacer::Spacer;
use super::stack::Stack;
use crate::colour::Colour;
use crate::content::Surface;
use crate::error::PDFError;
use crate::rect::{Position, Rect};
use crate::units::Pt;
use log::debug;
use std::rc::Rc;

/// A box around other drawables, with an optional border and background.
///
/// From the outside in a frame is made of its margin, the border, the
/// padding and finally the content. A fixed width or height sizes the
/// border box, i.e. everything except the margin. When a frame is divided
/// at a page boundary, both halves keep the decoration.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    inner: Stack,
    shape: Shape,
    stroke: Option<Stroke>,
    border_colour: Colour,
    background: Option<Colour>,
    padding: Margins,
    margin: Margins,
    width: Option<Pt>,
    height: Option<Pt>,
    max_width: Option<Pt>,
    absolute_position: Option<Position>,
}

impl Frame {
    pub fn new() -> Frame {
        Frame::default()
    }

    /// Append a drawable to the frame's content
    pub fn add<D: Drawable + 'static>(&mut self, drawable: D) {
        self.inner.push(drawable);
    }

    pub fn add_ref(&mut self, drawable: DrawableRef) {
        self.inner.push_ref(drawable);
    }

    pub fn with<D: Drawable + 'static>(mut self, drawable: D) -> Frame {
        self.add(drawable);
        self
    }

    pub fn with_shape(mut self, shape: Shape) -> Frame {
        self.shape = shape;
        self
    }

    pub fn with_border(mut self, stroke: Stroke, colour: Colour) -> Frame {
        self.stroke = Some(stroke);
        self.border_colour = colour;
        self
    }

    pub fn with_background(mut self, colour: Colour) -> Frame {
        self.background = Some(colour);
        self
    }

    pub fn with_padding(mut self, padding: Margins) -> Frame {
        self.padding = padding;
        self
    }

    pub fn with_margin(mut self, margin: Margins) -> Frame {
        self.margin = margin;
        self
    }

    /// Fix the width of the border box
    pub fn with_width(mut self, width: Pt) -> Frame {
        self.width = Some(width);
        self
    }

    /// Fix the height of the border box
    pub fn with_height(mut self, height: Pt) -> Frame {
        self.height = Some(height);
        self
    }

    pub fn with_max_width(mut self, max_width: Pt) -> Frame {
        self.max_width = Some(max_width);
        self
    }

    pub fn with_absolute_position(mut self, position: Position) -> Frame {
        self.absolute_position = Some(position);
        self
    }

    pub fn content(&self) -> &Stack {
        &self.inner
    }

    fn border_width(&self) -> Pt {
        self.stroke.map(|stroke| stroke.width).unwrap_or_default()
    }

    /// Border and padding, left plus right
    fn shape_spacing_h(&self) -> Pt {
        self.border_width() * 2.0 + self.padding.horizontal()
    }

    /// Border and padding, top plus bottom
    fn shape_spacing_v(&self) -> Pt {
        self.border_width() * 2.0 + self.padding.vertical()
    }

    /// Everything around the content, left plus right
    pub fn spacing_h(&self) -> Pt {
        self.shape_spacing_h() + self.margin.horizontal()
    }

    /// Everything around the content, top plus bottom
    pub fn spacing_v(&self) -> Pt {
        self.shape_spacing_v() + self.margin.vertical()
    }

    /// The request the content is laid out with
    fn inner_request<'a>(&self, request: &LayoutRequest<'a>) -> LayoutRequest<'a> {
        let max_width = match self.width {
            Some(width) => Some(width - self.shape_spacing_h()),
            None => request
                .width_for(self.max_width)
                .map(|width| width - self.spacing_h()),
        };
        request.with_max_width(max_width.map(|width| width.max(Pt::ZERO)))
    }

    fn border_box(&self, upper_left: Position, request: &LayoutRequest) -> Rect {
        Rect::from_upper_left(
            upper_left.add(self.margin.left, -self.margin.top),
            self.width(request) - self.margin.horizontal(),
            self.height(request) - self.margin.vertical(),
        )
    }

    fn with_content(&self, inner: Stack, height: Option<Pt>) -> Frame {
        Frame {
            inner,
            height,
            ..self.clone()
        }
    }
}

impl Drawable for Frame {
    fn width(&self, request: &LayoutRequest) -> Pt {
        match self.width {
            Some(width) => width + self.margin.horizontal(),
            None => self.inner.width(&self.inner_request(request)) + self.spacing_h(),
        }
    }

    fn height(&self, request: &LayoutRequest) -> Pt {
        match self.height {
            Some(height) => height + self.margin.vertical(),
            None => self.inner.height(&self.inner_request(request)) + self.spacing_v(),
        }
    }

    fn absolute_position(&self) -> Option<Position> {
        self.absolute_position
    }

    fn max_width(&self) -> Option<Pt> {
        self.max_width
    }

    fn draw(
        &self,
        surface: &mut Surface,
        upper_left: Position,
        request: &LayoutRequest,
    ) -> Result<(), PDFError> {
        let border_box = self.border_box(upper_left, request);
        if let Some(background) = self.background {
            self.shape.fill(surface, border_box, background);
        }

        let border = self.border_width();
        let content = border_box
            .upper_left()
            .add(border + self.padding.left, -(border + self.padding.top));
        self.inner
            .draw(surface, content, &self.inner_request(request))?;

        if let Some(stroke) = &self.stroke {
            self.shape
                .stroke(surface, border_box, stroke, self.border_colour);
        }
        Ok(())
    }

    fn as_dividable(&self) -> Option<&dyn Dividable> {
        Some(self)
    }
}

impl Dividable for Frame {
    fn divide(&self, remaining: Pt, next_page_height: Pt, request: &LayoutRequest) -> Divided {
        let spacing = self.spacing_v();
        if remaining < spacing {
            debug!("frame decoration does not fit {}, moving to next page", remaining);
            return Divided {
                head: Rc::new(Spacer::new(self.width(request), remaining)),
                tail: Rc::new(self.clone()),
            };
        }

        let inner_request = self.inner_request(request);
        let (head, tail) = self
            .inner
            .split(remaining - spacing, next_page_height - spacing, &inner_request);

        let (head_height, tail_height) = match self.height {
            Some(height) => {
                let head_height = remaining - self.margin.vertical();
                let tail_content = tail.height(&inner_request) + self.shape_spacing_v();
                (
                    Some(head_height),
                    Some((height - head_height).max(tail_content)),
                )
            }
            None => (None, None),
        };

        Divided {
            head: Rc::new(self.with_content(head, head_height)),
            tail: Rc::new(self.with_content(tail, tail_height)),
        }
    }
}
