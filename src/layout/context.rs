use super::drawable::LayoutRequest;
use crate::content::Surface;
use crate::error::PDFError;
use crate::font::Fonts;
use crate::page::{Annotation, Link, LinkTarget, Page, ResolvedTarget};
use crate::pagesize::PageFormat;
use crate::rect::{Position, Rect};
use crate::text::BreakRules;
use crate::units::Pt;
use log::debug;
use std::collections::HashMap;
use std::rc::Rc;

/// Hooks around page transitions, e.g. for headers, footers or page
/// numbers. Both run with the page in question open, so they can draw on
/// it through [RenderContext::surface].
pub trait RenderListener {
    fn before_page(&self, _context: &mut RenderContext) -> Result<(), PDFError> {
        Ok(())
    }

    fn after_page(&self, _context: &mut RenderContext) -> Result<(), PDFError> {
        Ok(())
    }
}

/// The state of rendering a document: the finished pages, the page being
/// drawn and the cursor on it.
///
/// The cursor is the upper-left corner of where the next element goes. It
/// only moves down the page; a new page puts it back at the top left of the
/// content box.
pub struct RenderContext<'a> {
    fonts: &'a Fonts,
    break_rules: &'a BreakRules,
    format: PageFormat,
    pages: Vec<Page>,
    current: Option<(Page, Surface)>,
    cursor: Position,
    /// Where layout may currently place content: the content box, or a
    /// column of it
    area: Rect,
    listeners: Vec<Rc<dyn RenderListener>>,
    closed: bool,
}

impl<'a> RenderContext<'a> {
    pub fn new(fonts: &'a Fonts, break_rules: &'a BreakRules, format: PageFormat) -> RenderContext<'a> {
        let area = format.content_box();
        RenderContext {
            fonts,
            break_rules,
            format,
            pages: Vec::new(),
            current: None,
            cursor: area.upper_left(),
            area,
            listeners: Vec::new(),
            closed: false,
        }
    }

    /// Listeners may be added at any time, even while listeners are being
    /// notified. They are first called on the next page transition.
    pub fn add_listener(&mut self, listener: Rc<dyn RenderListener>) {
        self.listeners.push(listener);
    }

    pub fn fonts(&self) -> &'a Fonts {
        self.fonts
    }

    /// A layout request without any width constraint
    pub fn request(&self) -> LayoutRequest<'a> {
        LayoutRequest::new(self.fonts, self.break_rules)
    }

    pub fn format(&self) -> &PageFormat {
        &self.format
    }

    pub fn content_box(&self) -> Rect {
        self.format.content_box()
    }

    /// 0-based index of the page being drawn, or of the next page if none
    /// is open
    pub fn page_index(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: Position) {
        self.cursor = cursor;
    }

    pub fn move_down(&mut self, dy: Pt) {
        self.cursor = self.cursor.down(dy);
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    /// Height left between the cursor and the bottom of the area
    pub fn remaining_height(&self) -> Pt {
        (self.cursor.y - self.area.y1).max(Pt::ZERO)
    }

    /// The surface of the current page, opening the first page if
    /// necessary
    pub fn surface(&mut self) -> Result<&mut Surface, PDFError> {
        if self.current.is_none() {
            self.new_page()?;
        }
        let index = self.pages.len();
        self.current
            .as_mut()
            .map(|(_, surface)| surface)
            .ok_or(PDFError::PageMissing(index))
    }

    /// Finish the current page (if any) and start a new one
    pub fn new_page(&mut self) -> Result<(), PDFError> {
        self.close_page()?;

        let index = self.pages.len();
        debug!("starting page {}", index + 1);
        self.current = Some((Page::new(index, &self.format), Surface::new()));
        self.area = self.format.content_box();
        self.cursor = self.area.upper_left();
        self.closed = false;

        self.notify(|listener, context| listener.before_page(context))
    }

    /// Finish the current page. Listeners are told first; the page is
    /// stored even if one of them fails.
    fn close_page(&mut self) -> Result<(), PDFError> {
        if self.current.is_none() {
            return Ok(());
        }
        let notified = self.notify(|listener, context| listener.after_page(context));
        if let Some((mut page, surface)) = self.current.take() {
            let (ops, annotations) = surface.into_parts();
            page.ops = ops;
            page.annotations = annotations;
            self.pages.push(page);
        }
        notified
    }

    /// Finish the last page. Closing again does nothing.
    pub fn close(&mut self) -> Result<(), PDFError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.close_page()
    }

    /// Close the context and resolve links between pages
    pub fn finish(mut self) -> Result<Vec<Page>, PDFError> {
        self.close()?;
        finalize(&mut self.pages)?;
        Ok(self.pages)
    }

    fn notify<F>(&mut self, call: F) -> Result<(), PDFError>
    where
        F: Fn(&dyn RenderListener, &mut RenderContext<'a>) -> Result<(), PDFError>,
    {
        let listeners = self.listeners.clone();
        for listener in listeners.iter() {
            call(listener.as_ref(), self)?;
        }
        Ok(())
    }
}

/// Turn the links every page collected into [Link]s. Links to anchors
/// point at the first place the anchor was drawn; a link to an anchor that
/// was never drawn fails.
pub fn finalize(pages: &mut [Page]) -> Result<(), PDFError> {
    let mut anchors: HashMap<String, (usize, Position)> = HashMap::new();
    for page in pages.iter() {
        for placed in &page.annotations {
            if let Annotation::Anchor { name } = &placed.annotation {
                anchors
                    .entry(name.clone())
                    .or_insert((page.index, placed.rect.upper_left()));
            }
        }
    }

    for page in pages.iter_mut() {
        let mut links = Vec::new();
        for placed in &page.annotations {
            let Annotation::Link { target, .. } = &placed.annotation else {
                continue;
            };
            let target = match target {
                LinkTarget::Uri(uri) => ResolvedTarget::Uri(uri.clone()),
                LinkTarget::Anchor(name) => {
                    let (page, position) = anchors
                        .get(name)
                        .copied()
                        .ok_or_else(|| PDFError::UnresolvedAnchor(name.clone()))?;
                    ResolvedTarget::Destination { page, position }
                }
            };
            links.push(Link {
                rect: placed.rect,
                target,
            });
        }
        page.links = links;
    }

    debug!("resolved {} anchors", anchors.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Margins;
    use crate::page::{LinkStyle, PlacedAnnotation};
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        events: RefCell<Vec<String>>,
    }

    impl RenderListener for Recorder {
        fn before_page(&self, context: &mut RenderContext) -> Result<(), PDFError> {
            self.events
                .borrow_mut()
                .push(format!("before {}", context.page_index()));
            Ok(())
        }

        fn after_page(&self, context: &mut RenderContext) -> Result<(), PDFError> {
            self.events
                .borrow_mut()
                .push(format!("after {}", context.page_index()));
            Ok(())
        }
    }

    #[test]
    fn listeners_wrap_every_page() {
        let fonts = Fonts::new();
        let rules = BreakRules::default();
        let recorder = Rc::new(Recorder::default());
        let mut context = RenderContext::new(&fonts, &rules, PageFormat::default());
        context.add_listener(recorder.clone());

        context.surface().unwrap();
        context.new_page().unwrap();
        context.close().unwrap();
        context.close().unwrap();

        assert_eq!(
            *recorder.events.borrow(),
            vec!["before 0", "after 0", "before 1", "after 1"]
        );
        assert_eq!(context.pages().len(), 2);
    }

    #[test]
    fn new_page_resets_cursor() {
        let fonts = Fonts::new();
        let rules = BreakRules::default();
        let format = PageFormat::new((Pt(400.0), Pt(600.0)), Margins::all(Pt(50.0)));
        let mut context = RenderContext::new(&fonts, &rules, format);
        context.new_page().unwrap();
        context.move_down(Pt(100.0));
        assert_eq!(context.remaining_height(), Pt(400.0));
        context.new_page().unwrap();
        assert_eq!(context.cursor(), format.content_box().upper_left());
    }

    fn placed(annotation: Annotation, x: f32) -> PlacedAnnotation {
        PlacedAnnotation {
            annotation,
            rect: Rect {
                x1: Pt(x),
                y1: Pt(0.0),
                x2: Pt(x + 10.0),
                y2: Pt(10.0),
            },
        }
    }

    #[test]
    fn finalize_resolves_anchors_across_pages() {
        let format = PageFormat::default();
        let mut first = Page::new(0, &format);
        first.annotations.push(placed(
            Annotation::Link {
                target: LinkTarget::Anchor("end".into()),
                style: LinkStyle::Underline,
            },
            0.0,
        ));
        let mut second = Page::new(1, &format);
        second
            .annotations
            .push(placed(Annotation::Anchor { name: "end".into() }, 50.0));

        let mut pages = vec![first, second];
        finalize(&mut pages).unwrap();
        assert_eq!(
            pages[0].links[0].target,
            ResolvedTarget::Destination {
                page: 1,
                position: Position::new(Pt(50.0), Pt(10.0)),
            }
        );
    }

    #[test]
    fn finalize_fails_on_unknown_anchor() {
        let mut page = Page::new(0, &PageFormat::default());
        page.annotations.push(placed(
            Annotation::Link {
                target: LinkTarget::Anchor("nowhere".into()),
                style: LinkStyle::None,
            },
            0.0,
        ));
        let err = finalize(&mut [page]).unwrap_err();
        assert!(matches!(err, PDFError::UnresolvedAnchor(name) if name == "nowhere"));
    }
}
