use super::context::RenderContext;
use super::drawable::DrawableRef;
use super::hint::LayoutHint;
use super::strategy::{place_element, ControlElement, Layout, Turner};
use crate::error::PDFError;
use crate::units::Pt;

/// Elements one below the other across the full content width, continuing
/// on a new page whenever one is full
#[derive(Debug, Default, Clone, Copy)]
pub struct VerticalLayout;

impl VerticalLayout {
    pub fn new() -> VerticalLayout {
        VerticalLayout
    }
}

impl Turner for VerticalLayout {
    fn turn(&mut self, context: &mut RenderContext) -> Result<(), PDFError> {
        context.new_page()
    }

    fn next_height(&self, context: &RenderContext) -> Pt {
        context.content_box().height()
    }
}

impl Layout for VerticalLayout {
    fn enter(&mut self, context: &mut RenderContext) -> Result<(), PDFError> {
        let content = context.content_box();
        context.set_area(content);
        Ok(())
    }

    fn render(
        &mut self,
        context: &mut RenderContext,
        drawable: &DrawableRef,
        hint: &LayoutHint,
    ) -> Result<(), PDFError> {
        place_element(self, context, drawable, hint)
    }

    fn control(&mut self, context: &mut RenderContext, control: ControlElement) -> Result<(), PDFError> {
        match control {
            ControlElement::NewPage | ControlElement::ColumnBreak => context.new_page(),
        }
    }
}
