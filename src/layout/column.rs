use super::context::RenderContext;
use super::drawable::DrawableRef;
use super::hint::LayoutHint;
use super::strategy::{place_element, ControlElement, Layout, Turner};
use crate::error::PDFError;
use crate::rect::{Position, Rect};
use crate::units::Pt;
use log::debug;

/// Content flowing down equally wide columns, left to right, then on to
/// the next page.
///
/// The columns start at the cursor when the layout is entered. Leaving the
/// layout puts the cursor below the longest column.
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    columns: usize,
    spacing: Pt,
    column: usize,
    top: Pt,
    lowest: Pt,
}

impl ColumnLayout {
    pub fn new(columns: usize, spacing: Pt) -> ColumnLayout {
        ColumnLayout {
            columns: columns.max(1),
            spacing,
            column: 0,
            top: Pt::ZERO,
            lowest: Pt::ZERO,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// The index of the column currently filled
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn column_width(&self, content: Rect) -> Pt {
        let gaps = self.spacing * (self.columns - 1) as f32;
        ((content.width() - gaps) / self.columns as f32).max(Pt::ZERO)
    }

    fn column_area(&self, content: Rect) -> Rect {
        let width = self.column_width(content);
        let x1 = content.x1 + (width + self.spacing) * self.column as f32;
        Rect {
            x1,
            y1: content.y1,
            x2: x1 + width,
            y2: self.top,
        }
    }

    /// Start filling `column` from the top
    fn start_column(&mut self, context: &mut RenderContext, column: usize) {
        self.column = column;
        let area = self.column_area(context.content_box());
        context.set_area(area);
        context.set_cursor(Position::new(area.x1, self.top));
    }

    /// Start over with the first column of a fresh page
    fn start_page(&mut self, context: &mut RenderContext) -> Result<(), PDFError> {
        context.new_page()?;
        self.top = context.content_box().y2;
        self.lowest = self.top;
        self.start_column(context, 0);
        Ok(())
    }
}

impl Turner for ColumnLayout {
    fn turn(&mut self, context: &mut RenderContext) -> Result<(), PDFError> {
        self.lowest = self.lowest.min(context.cursor().y);
        if self.column + 1 < self.columns {
            debug!("continuing in column {}", self.column + 2);
            self.start_column(context, self.column + 1);
            Ok(())
        } else {
            self.start_page(context)
        }
    }

    fn next_height(&self, context: &RenderContext) -> Pt {
        let content = context.content_box();
        if self.column + 1 < self.columns {
            self.top - content.y1
        } else {
            content.height()
        }
    }
}

impl Layout for ColumnLayout {
    fn enter(&mut self, context: &mut RenderContext) -> Result<(), PDFError> {
        context.surface()?;
        self.top = context.cursor().y;
        self.lowest = self.top;
        self.start_column(context, 0);
        Ok(())
    }

    fn leave(&mut self, context: &mut RenderContext) -> Result<(), PDFError> {
        self.lowest = self.lowest.min(context.cursor().y);
        let content = context.content_box();
        context.set_area(content);
        context.set_cursor(Position::new(content.x1, self.lowest));
        Ok(())
    }

    fn render(
        &mut self,
        context: &mut RenderContext,
        drawable: &DrawableRef,
        hint: &LayoutHint,
    ) -> Result<(), PDFError> {
        place_element(self, context, drawable, hint)?;
        self.lowest = self.lowest.min(context.cursor().y);
        Ok(())
    }

    fn control(&mut self, context: &mut RenderContext, control: ControlElement) -> Result<(), PDFError> {
        match control {
            ControlElement::ColumnBreak => self.turn(context),
            ControlElement::NewPage => self.start_page(context),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::colours;
    use crate::content::DrawOp;
    use crate::font::{Font, Fonts};
    use crate::layout::{Margins, Spacer};
    use crate::pagesize::PageFormat;
    use crate::text::{BreakRules, TextFlow};
    use std::rc::Rc;

    // content box 50..350 wide, 50..550 high
    fn format() -> PageFormat {
        PageFormat::new((Pt(400.0), Pt(600.0)), Margins::all(Pt(50.0)))
    }

    #[test]
    fn column_geometry() {
        let layout = ColumnLayout::new(2, Pt(20.0));
        assert_eq!(layout.column_width(format().content_box()), Pt(140.0));
    }

    #[test]
    fn fills_columns_then_pages() {
        let fonts = Fonts::new();
        let rules = BreakRules::default();
        let mut context = RenderContext::new(&fonts, &rules, format());
        let mut layout = ColumnLayout::new(2, Pt(20.0));
        layout.enter(&mut context).unwrap();

        let spacer: DrawableRef = Rc::new(Spacer::vertical(Pt(300.0)));
        layout
            .render(&mut context, &spacer, &LayoutHint::default())
            .unwrap();
        layout
            .render(&mut context, &spacer, &LayoutHint::default())
            .unwrap();
        // the second spacer is split across both columns
        assert_eq!(layout.column(), 1);
        assert_eq!(context.area().x1, Pt(210.0));
        assert_eq!(context.cursor(), Position::new(Pt(210.0), Pt(450.0)));

        let long: DrawableRef = Rc::new(Spacer::vertical(Pt(450.0)));
        layout
            .render(&mut context, &long, &LayoutHint::default())
            .unwrap();
        assert_eq!(context.page_index(), 1);
        assert_eq!(layout.column(), 0);
        assert_eq!(context.cursor(), Position::new(Pt(50.0), Pt(500.0)));
    }

    #[test]
    fn leaving_moves_below_longest_column() {
        let fonts = Fonts::new();
        let rules = BreakRules::default();
        let mut context = RenderContext::new(&fonts, &rules, format());
        context.surface().unwrap();
        context.move_down(Pt(100.0));

        let mut layout = ColumnLayout::new(3, Pt(0.0));
        layout.enter(&mut context).unwrap();
        assert_eq!(context.area().y2, Pt(450.0));

        let tall: DrawableRef = Rc::new(Spacer::vertical(Pt(120.0)));
        let short: DrawableRef = Rc::new(Spacer::vertical(Pt(30.0)));
        layout
            .render(&mut context, &tall, &LayoutHint::default())
            .unwrap();
        layout
            .control(&mut context, ControlElement::ColumnBreak)
            .unwrap();
        layout
            .render(&mut context, &short, &LayoutHint::default())
            .unwrap();
        layout.leave(&mut context).unwrap();

        assert_eq!(context.cursor(), Position::new(Pt(50.0), Pt(330.0)));
        assert_eq!(context.area(), context.content_box());
    }

    #[test]
    fn short_last_column_moves_content_to_next_page() {
        let mut fonts = Fonts::new();
        let id = fonts.alloc(Font::courier());
        let rules = BreakRules::default();
        let mut context = RenderContext::new(&fonts, &rules, format());
        context.surface().unwrap();
        context.move_down(Pt(300.0));

        // a single column only 200pt tall, lines 240pt tall each
        let mut layout = ColumnLayout::new(1, Pt(0.0));
        layout.enter(&mut context).unwrap();
        let mut flow = TextFlow::new();
        flow.add_text("a\nb\nc", Pt(240.0), id, colours::BLACK);
        let flow: DrawableRef = Rc::new(flow);
        layout
            .render(&mut context, &flow, &LayoutHint::default())
            .unwrap();
        layout.leave(&mut context).unwrap();

        let pages = context.finish().unwrap();
        assert_eq!(pages.len(), 3);
        assert!(pages[0].text().is_empty());
        assert_eq!(pages[1].text(), vec!["a", "b"]);
        assert_eq!(pages[2].text(), vec!["c"]);
        for page in &pages {
            for op in &page.ops {
                if let DrawOp::TextPosition(position) = op {
                    assert!(position.y >= page.content_box.y1);
                }
            }
        }
    }
}
