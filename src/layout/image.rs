use super::cutter::Cutter;
use super::drawable::{Dividable, Divided, Drawable, LayoutRequest};
use super::spacer::Spacer;
use crate::content::Surface;
use crate::error::PDFError;
use crate::rect::{Dimension, Position, Rect};
use crate::units::Pt;
use std::rc::Rc;

/// An image XObject which is registered with the PDF under `name` by
/// whoever serializes the document. Layout only needs its size.
///
/// Images are scaled down, keeping their aspect ratio, when they are wider
/// than the width layout offers. At a page boundary an image moves to the
/// next page as a whole if it fits there, and is cut otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBox {
    name: String,
    size: Dimension,
    absolute_position: Option<Position>,
}

impl ImageBox {
    pub fn new<S: Into<String>>(name: S, width: Pt, height: Pt) -> ImageBox {
        ImageBox {
            name: name.into(),
            size: Dimension::new(width, height),
            absolute_position: None,
        }
    }

    pub fn with_absolute_position(mut self, position: Position) -> ImageBox {
        self.absolute_position = Some(position);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The size the image is drawn at under `request`
    pub fn scaled_size(&self, request: &LayoutRequest) -> Dimension {
        match request.max_width {
            Some(max) if max > Pt::ZERO && self.size.width > max => {
                let scale = max / self.size.width;
                Dimension::new(max, self.size.height * scale)
            }
            _ => self.size,
        }
    }
}

impl Drawable for ImageBox {
    fn width(&self, request: &LayoutRequest) -> Pt {
        self.scaled_size(request).width
    }

    fn height(&self, request: &LayoutRequest) -> Pt {
        self.scaled_size(request).height
    }

    fn absolute_position(&self) -> Option<Position> {
        self.absolute_position
    }

    fn draw(
        &self,
        surface: &mut Surface,
        upper_left: Position,
        request: &LayoutRequest,
    ) -> Result<(), PDFError> {
        let size = self.scaled_size(request);
        surface.image(
            &self.name,
            Rect::from_upper_left(upper_left, size.width, size.height),
        );
        Ok(())
    }

    fn as_dividable(&self) -> Option<&dyn Dividable> {
        Some(self)
    }
}

impl Dividable for ImageBox {
    fn divide(&self, remaining: Pt, next_page_height: Pt, request: &LayoutRequest) -> Divided {
        if self.height(request) <= next_page_height {
            return Divided {
                head: Rc::new(Spacer::new(self.width(request), remaining)),
                tail: Rc::new(self.clone()),
            };
        }
        Cutter::new(Rc::new(self.clone()), request).divide(remaining, next_page_height, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::Fonts;
    use crate::text::BreakRules;

    #[test]
    fn scales_down_to_offered_width() {
        let fonts = Fonts::new();
        let rules = BreakRules::default();
        let request = LayoutRequest::new(&fonts, &rules).with_max_width(Some(Pt(100.0)));
        let image = ImageBox::new("Im1", Pt(200.0), Pt(50.0));
        assert_eq!(image.width(&request), Pt(100.0));
        assert_eq!(image.height(&request), Pt(25.0));

        let narrow = ImageBox::new("Im1", Pt(80.0), Pt(50.0));
        assert_eq!(narrow.width(&request), Pt(80.0));
    }

    #[test]
    fn defers_whole_when_it_fits_the_next_page() {
        let fonts = Fonts::new();
        let rules = BreakRules::default();
        let request = LayoutRequest::new(&fonts, &rules);
        let image = ImageBox::new("Im1", Pt(100.0), Pt(300.0));

        let divided = image.divide(Pt(120.0), Pt(700.0), &request);
        assert_eq!(divided.head.height(&request), Pt(120.0));
        assert_eq!(divided.head.width(&request), Pt(100.0));
        assert_eq!(divided.tail.height(&request), Pt(300.0));

        let divided = image.divide(Pt(120.0), Pt(200.0), &request);
        assert_eq!(divided.head.height(&request), Pt(120.0));
        assert_eq!(divided.tail.height(&request), Pt(180.0));
    }
}
