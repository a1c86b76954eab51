use super::context::RenderContext;
use super::drawable::{divide, DrawableRef, LayoutRequest};
use super::hint::LayoutHint;
use crate::error::PDFError;
use crate::rect::Position;
use crate::units::Pt;
use log::{trace, warn};
use std::fmt;

/// Elements steering layout rather than drawing anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlElement {
    /// Continue on a fresh page
    NewPage,
    /// Continue in the next column, or on a fresh page after the last one.
    /// Outside of columns this is the same as [ControlElement::NewPage].
    ColumnBreak,
}

/// A strategy placing the elements of a document on pages.
///
/// A document switches strategies as it goes: the old layout is left, the
/// new one entered, and from then on every element goes through it.
pub trait Layout: fmt::Debug {
    fn enter(&mut self, _context: &mut RenderContext) -> Result<(), PDFError> {
        Ok(())
    }

    fn leave(&mut self, _context: &mut RenderContext) -> Result<(), PDFError> {
        Ok(())
    }

    fn render(
        &mut self,
        context: &mut RenderContext,
        drawable: &DrawableRef,
        hint: &LayoutHint,
    ) -> Result<(), PDFError>;

    fn control(&mut self, context: &mut RenderContext, control: ControlElement) -> Result<(), PDFError>;
}

/// How a layout moves on once the current area is full
pub(crate) trait Turner {
    /// Move the cursor to the top of the next area
    fn turn(&mut self, context: &mut RenderContext) -> Result<(), PDFError>;

    /// The height of the area after the next turn
    fn next_height(&self, context: &RenderContext) -> Pt;
}

/// Place a drawable at the cursor, dividing it across as many areas as it
/// takes. Drawables with an absolute position are drawn there and leave
/// the cursor alone.
pub(crate) fn place_element<T: Turner>(
    turner: &mut T,
    context: &mut RenderContext,
    drawable: &DrawableRef,
    hint: &LayoutHint,
) -> Result<(), PDFError> {
    if let Some(position) = drawable.absolute_position() {
        let request = context.request().with_max_width(drawable.max_width());
        trace!("drawing {:?} at {:?}", drawable, position);
        return drawable.draw(context.surface()?, position, &request);
    }

    context.surface()?;
    let start = (context.page_index(), context.cursor());

    let margins = hint.margins;
    if margins.top > context.remaining_height() {
        turner.turn(context)?;
    } else {
        context.move_down(margins.top);
    }

    let width = (context.area().width() - margins.horizontal()).max(Pt::ZERO);
    let request = context.request().with_max_width(Some(width));

    let mut current = drawable.clone();
    loop {
        let height = current.height(&request);
        let remaining = context.remaining_height();
        if height <= remaining {
            break;
        }

        let next_height = turner.next_height(context);
        let divided = divide(&current, remaining, next_height, &request);
        // only overfill an area as tall as the next one
        if remaining >= next_height && divided.tail.height(&request) >= height {
            warn!(
                "{:?} is {} tall and cannot be divided to fit {}, drawing it anyway",
                current, height, remaining
            );
            break;
        }

        draw_at(context, &divided.head, hint, &request)?;
        turner.turn(context)?;
        current = divided.tail;
    }

    draw_at(context, &current, hint, &request)?;

    if hint.move_cursor {
        context.move_down(current.height(&request));
        let bottom = margins.bottom.min(context.remaining_height());
        context.move_down(bottom);
    } else if context.page_index() == start.0 {
        context.set_cursor(start.1);
    }
    Ok(())
}

/// Draw at the cursor, aligned within the area and clipped to it
fn draw_at(
    context: &mut RenderContext,
    drawable: &DrawableRef,
    hint: &LayoutHint,
    request: &LayoutRequest,
) -> Result<(), PDFError> {
    let area = context.area();
    let x = area.x1 + hint.offset(area.width(), drawable.width(request));
    let position = Position::new(x, context.cursor().y);

    let surface = context.surface()?;
    surface.save_state();
    surface.clip(area);
    drawable.draw(surface, position, request)?;
    surface.restore_state();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::DrawOp;
    use crate::font::Fonts;
    use crate::layout::{ImageBox, Margins, VerticalLayout};
    use crate::pagesize::PageFormat;
    use crate::rect::Rect;
    use crate::text::BreakRules;
    use std::rc::Rc;

    #[test]
    fn absolute_position_bypasses_layout() {
        let fonts = Fonts::new();
        let rules = BreakRules::default();
        let format = PageFormat::new((Pt(400.0), Pt(600.0)), Margins::all(Pt(50.0)));
        let mut context = RenderContext::new(&fonts, &rules, format);
        let mut layout = VerticalLayout::new();
        layout.enter(&mut context).unwrap();
        context.surface().unwrap();
        context.move_down(Pt(100.0));
        let before = context.cursor();

        // far taller than a page, so layout would have to divide it
        let at = Position::new(Pt(10.0), Pt(590.0));
        let image: DrawableRef =
            Rc::new(ImageBox::new("Im1", Pt(100.0), Pt(2000.0)).with_absolute_position(at));
        layout
            .render(&mut context, &image, &LayoutHint::default())
            .unwrap();

        assert_eq!(context.cursor(), before);
        assert_eq!(context.page_index(), 0);

        let pages = context.finish().unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(
            pages[0].ops,
            vec![DrawOp::Image {
                name: "Im1".into(),
                rect: Rect::from_upper_left(at, Pt(100.0), Pt(2000.0)),
            }]
        );
    }
}
