use super::drawable::{Dividable, Divided, Drawable, DrawableRef, LayoutRequest};
use crate::content::Surface;
use crate::error::PDFError;
use crate::rect::{Position, Rect};
use crate::units::Pt;
use log::debug;
use std::rc::Rc;

/// Makes any drawable dividable by showing a vertical window of it.
///
/// The head shows the part of the drawable that fits, the tail shows the
/// rest, each clipped to its own window. Every division shrinks the window
/// that is left, so even a drawable taller than a page ends after a finite
/// number of pages.
#[derive(Debug, Clone)]
pub struct Cutter {
    inner: DrawableRef,
    /// How far down the drawable the window starts
    offset: Pt,
    view_height: Pt,
}

impl Cutter {
    /// A window over the whole drawable
    pub fn new(inner: DrawableRef, request: &LayoutRequest) -> Cutter {
        let view_height = inner.height(request);
        Cutter {
            inner,
            offset: Pt::ZERO,
            view_height,
        }
    }
}

impl Drawable for Cutter {
    fn width(&self, request: &LayoutRequest) -> Pt {
        self.inner.width(request)
    }

    fn height(&self, _request: &LayoutRequest) -> Pt {
        self.view_height
    }

    fn draw(
        &self,
        surface: &mut Surface,
        upper_left: Position,
        request: &LayoutRequest,
    ) -> Result<(), PDFError> {
        let width = self.inner.width(request);
        surface.save_state();
        surface.clip(Rect::from_upper_left(upper_left, width, self.view_height));
        self.inner
            .draw(surface, upper_left.add(Pt::ZERO, self.offset), request)?;
        surface.restore_state();
        Ok(())
    }

    fn as_dividable(&self) -> Option<&dyn Dividable> {
        Some(self)
    }
}

impl Dividable for Cutter {
    fn divide(&self, remaining: Pt, _next_page_height: Pt, _request: &LayoutRequest) -> Divided {
        let cut = remaining.max(Pt::ZERO).min(self.view_height);
        debug!("cutting {:?} at {} of {}", self.inner, cut, self.view_height);
        Divided {
            head: Rc::new(Cutter {
                inner: self.inner.clone(),
                offset: self.offset,
                view_height: cut,
            }),
            tail: Rc::new(Cutter {
                inner: self.inner.clone(),
                offset: self.offset + cut,
                view_height: self.view_height - cut,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::DrawOp;
    use crate::font::Fonts;
    use crate::layout::divide;
    use crate::text::BreakRules;

    #[derive(Debug)]
    struct Block;

    impl Drawable for Block {
        fn width(&self, _request: &LayoutRequest) -> Pt {
            Pt(50.0)
        }

        fn height(&self, _request: &LayoutRequest) -> Pt {
            Pt(250.0)
        }

        fn draw(
            &self,
            surface: &mut Surface,
            upper_left: Position,
            _request: &LayoutRequest,
        ) -> Result<(), PDFError> {
            surface.rect(Rect::from_upper_left(upper_left, Pt(50.0), Pt(250.0)));
            Ok(())
        }
    }

    #[test]
    fn cuts_until_nothing_is_left() {
        let fonts = Fonts::new();
        let rules = BreakRules::default();
        let request = LayoutRequest::new(&fonts, &rules);
        let block: DrawableRef = Rc::new(Block);

        let mut rest = divide(&block, Pt(100.0), Pt(100.0), &request);
        let mut pieces = vec![rest.head.height(&request)];
        while rest.tail.height(&request) > Pt(100.0) {
            rest = divide(&rest.tail, Pt(100.0), Pt(100.0), &request);
            pieces.push(rest.head.height(&request));
        }
        pieces.push(rest.tail.height(&request));
        assert_eq!(pieces, vec![Pt(100.0), Pt(100.0), Pt(50.0)]);
    }

    #[test]
    fn draws_a_shifted_window() {
        let fonts = Fonts::new();
        let rules = BreakRules::default();
        let request = LayoutRequest::new(&fonts, &rules);
        let cutter = Cutter::new(Rc::new(Block), &request);
        let Divided { tail, .. } = cutter.divide(Pt(100.0), Pt(500.0), &request);

        let mut surface = Surface::new();
        tail.draw(&mut surface, Position::new(Pt(0.0), Pt(500.0)), &request)
            .unwrap();
        assert_eq!(
            surface.ops(),
            &[
                DrawOp::SaveState,
                DrawOp::Clip(Rect::from_upper_left(
                    Position::new(Pt(0.0), Pt(500.0)),
                    Pt(50.0),
                    Pt(150.0)
                )),
                DrawOp::Rect(Rect::from_upper_left(
                    Position::new(Pt(0.0), Pt(600.0)),
                    Pt(50.0),
                    Pt(250.0)
                )),
                DrawOp::RestoreState,
            ]
        );
    }
}
