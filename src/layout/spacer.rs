use super::drawable::{Dividable, Divided, Drawable, LayoutRequest};
use crate::content::Surface;
use crate::error::PDFError;
use crate::rect::Position;
use crate::units::Pt;
use std::rc::Rc;

/// Empty space. Without a width it only takes up vertical space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spacer {
    pub width: Option<Pt>,
    pub height: Pt,
}

impl Spacer {
    pub fn vertical<H: Into<Pt>>(height: H) -> Spacer {
        Spacer {
            width: None,
            height: height.into(),
        }
    }

    pub fn new<W: Into<Pt>, H: Into<Pt>>(width: W, height: H) -> Spacer {
        Spacer {
            width: Some(width.into()),
            height: height.into(),
        }
    }
}

impl Drawable for Spacer {
    fn width(&self, _request: &LayoutRequest) -> Pt {
        self.width.unwrap_or_default()
    }

    fn height(&self, _request: &LayoutRequest) -> Pt {
        self.height
    }

    fn draw(
        &self,
        _surface: &mut Surface,
        _upper_left: Position,
        _request: &LayoutRequest,
    ) -> Result<(), PDFError> {
        Ok(())
    }

    fn as_dividable(&self) -> Option<&dyn Dividable> {
        Some(self)
    }
}

impl Dividable for Spacer {
    fn divide(&self, remaining: Pt, _next_page_height: Pt, _request: &LayoutRequest) -> Divided {
        let cut = remaining.max(Pt::ZERO).min(self.height);
        Divided {
            head: Rc::new(Spacer {
                width: self.width,
                height: cut,
            }),
            tail: Rc::new(Spacer {
                width: self.width,
                height: self.height - cut,
            }),
        }
    }
}
