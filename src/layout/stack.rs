use super::drawable::{divide, Dividable, Divided, Drawable, DrawableRef, LayoutRequest};
use crate::content::Surface;
use crate::error::PDFError;
use crate::rect::Position;
use crate::units::Pt;
use std::rc::Rc;

/// Drawables stacked top to bottom, left aligned
#[derive(Debug, Clone, Default)]
pub struct Stack {
    items: Vec<DrawableRef>,
}

impl Stack {
    pub fn new() -> Stack {
        Stack::default()
    }

    pub fn push<D: Drawable + 'static>(&mut self, drawable: D) {
        self.items.push(Rc::new(drawable));
    }

    pub fn push_ref(&mut self, drawable: DrawableRef) {
        self.items.push(drawable);
    }

    pub fn items(&self) -> &[DrawableRef] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Split into the drawables that fit `remaining` and the rest. The one
    /// drawable straddling the boundary is divided itself, its head ending
    /// the first stack and its tail starting the second.
    pub fn split(&self, remaining: Pt, next_page_height: Pt, request: &LayoutRequest) -> (Stack, Stack) {
        let mut head = Vec::new();
        let mut tail = Vec::new();
        let mut used = Pt::ZERO;

        let mut items = self.items.iter();
        while let Some(item) = items.next() {
            let height = item.height(request);
            if used + height <= remaining {
                head.push(item.clone());
                used += height;
                continue;
            }

            let divided = divide(item, remaining - used, next_page_height, request);
            head.push(divided.head);
            tail.push(divided.tail);
            tail.extend(items.by_ref().cloned());
            break;
        }

        (Stack { items: head }, Stack { items: tail })
    }
}

impl FromIterator<DrawableRef> for Stack {
    fn from_iter<T: IntoIterator<Item = DrawableRef>>(iter: T) -> Self {
        Stack {
            items: iter.into_iter().collect(),
        }
    }
}

impl Drawable for Stack {
    fn width(&self, request: &LayoutRequest) -> Pt {
        self.items
            .iter()
            .map(|item| item.width(request))
            .reduce(Pt::max)
            .unwrap_or_default()
    }

    fn height(&self, request: &LayoutRequest) -> Pt {
        self.items.iter().map(|item| item.height(request)).sum()
    }

    fn draw(
        &self,
        surface: &mut Surface,
        upper_left: Position,
        request: &LayoutRequest,
    ) -> Result<(), PDFError> {
        let mut position = upper_left;
        for item in &self.items {
            item.draw(surface, position, request)?;
            position = position.down(item.height(request));
        }
        Ok(())
    }

    fn as_dividable(&self) -> Option<&dyn Dividable> {
        Some(self)
    }
}

impl Dividable for Stack {
    fn divide(&self, remaining: Pt, next_page_height: Pt, request: &LayoutRequest) -> Divided {
        let (head, tail) = self.split(remaining, next_page_height, request);
        Divided {
            head: Rc::new(head),
            tail: Rc::new(tail),
        }
    }
}
