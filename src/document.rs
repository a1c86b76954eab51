use crate::error::PDFError;
use crate::font::{Font, FontId, Fonts};
use crate::layout::{
    ControlElement, Drawable, DrawableRef, Layout, LayoutHint, RenderContext, RenderListener,
    VerticalLayout,
};
use crate::page::Page;
use crate::pagesize::PageFormat;
use crate::text::BreakRules;
use log::debug;
use std::rc::Rc;

/// One entry in a document's element list
#[derive(Debug)]
pub enum Element {
    /// Something to draw, and how to place it
    Drawable(DrawableRef, LayoutHint),
    Control(ControlElement),
    /// Switch the layout strategy for every element that follows
    Layout(Box<dyn Layout>),
}

/// A document is an ordered list of elements which, once complete, is laid
/// out onto pages with a call to [Document::render].
///
/// Elements are placed by a vertical layout until an [Element::Layout]
/// switches to another strategy.
pub struct Document {
    pub format: PageFormat,
    pub fonts: Fonts,
    pub break_rules: BreakRules,
    elements: Vec<Element>,
    listeners: Vec<Rc<dyn RenderListener>>,
}

impl Default for Document {
    fn default() -> Self {
        Document::new(PageFormat::default())
    }
}

impl Document {
    pub fn new(format: PageFormat) -> Document {
        Document {
            format,
            fonts: Fonts::new(),
            break_rules: BreakRules::default(),
            elements: Vec::new(),
            listeners: Vec::new(),
        }
    }

    /// Register a font, returning the id runs refer to it by
    pub fn add_font(&mut self, font: Font) -> FontId {
        self.fonts.alloc(font)
    }

    pub fn add<D: Drawable + 'static>(&mut self, drawable: D, hint: LayoutHint) {
        self.add_ref(Rc::new(drawable), hint);
    }

    /// Add a drawable which may be shared with other documents
    pub fn add_ref(&mut self, drawable: DrawableRef, hint: LayoutHint) {
        self.elements.push(Element::Drawable(drawable, hint));
    }

    pub fn add_control(&mut self, control: ControlElement) {
        self.elements.push(Element::Control(control));
    }

    /// Place every element added from now on with `layout`
    pub fn set_layout<L: Layout + 'static>(&mut self, layout: L) {
        self.elements.push(Element::Layout(Box::new(layout)));
    }

    pub fn add_listener<L: RenderListener + 'static>(&mut self, listener: L) {
        self.listeners.push(Rc::new(listener));
    }

    pub fn add_listener_ref(&mut self, listener: Rc<dyn RenderListener>) {
        self.listeners.push(listener);
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Lay out every element onto pages. There is always at least one page,
    /// even for a document without elements.
    pub fn render(self) -> Result<RenderedDocument, PDFError> {
        let Document {
            format,
            fonts,
            break_rules,
            elements,
            listeners,
        } = self;

        let pages = {
            let mut context = RenderContext::new(&fonts, &break_rules, format);
            for listener in listeners {
                context.add_listener(listener);
            }
            context.new_page()?;

            let mut layout: Box<dyn Layout> = Box::new(VerticalLayout::new());
            layout.enter(&mut context)?;
            for element in elements {
                match element {
                    Element::Drawable(drawable, hint) => {
                        layout.render(&mut context, &drawable, &hint)?
                    }
                    Element::Control(control) => layout.control(&mut context, control)?,
                    Element::Layout(next) => {
                        debug!("switching layout to {:?}", next);
                        layout.leave(&mut context)?;
                        layout = next;
                        layout.enter(&mut context)?;
                    }
                }
            }
            layout.leave(&mut context)?;
            context.finish()?
        };

        debug!("rendered {} pages", pages.len());
        Ok(RenderedDocument { fonts, pages })
    }
}

/// The pages a [Document] was laid out onto, ready to be handed to a PDF
/// writer together with the fonts they use
#[derive(Debug)]
pub struct RenderedDocument {
    pub fonts: Fonts,
    pub pages: Vec<Page>,
}

impl RenderedDocument {
    pub fn page(&self, index: usize) -> Result<&Page, PDFError> {
        self.pages.get(index).ok_or(PDFError::PageMissing(index))
    }

    /// The encoded content stream of page `index`
    pub fn content_stream(&self, index: usize) -> Result<Vec<u8>, PDFError> {
        Ok(self.page(index)?.content_stream(&self.fonts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Spacer;
    use crate::units::Pt;

    #[test]
    fn empty_document_has_one_page() {
        let rendered = Document::default().render().unwrap();
        assert_eq!(rendered.pages.len(), 1);
        assert!(rendered.content_stream(0).is_ok());
        assert!(matches!(
            rendered.content_stream(1),
            Err(PDFError::PageMissing(1))
        ));
    }

    #[test]
    fn controls_turn_pages() {
        let mut doc = Document::default();
        doc.add(Spacer::vertical(Pt(10.0)), LayoutHint::default());
        doc.add_control(ControlElement::NewPage);
        doc.add(Spacer::vertical(Pt(10.0)), LayoutHint::default());
        doc.add_control(ControlElement::ColumnBreak);
        let rendered = doc.render().unwrap();
        assert_eq!(rendered.pages.len(), 3);
        assert_eq!(rendered.pages[2].index, 2);
    }
}
