use super::margins::Margins;
use crate::units::Pt;

/// Horizontal placement within the available width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Offset of something `width` wide inside `available`, never negative
    pub fn offset(&self, available: Pt, width: Pt) -> Pt {
        let leftover = (available - width).max(Pt::ZERO);
        match self {
            Alignment::Left => Pt::ZERO,
            Alignment::Center => leftover / 2.0,
            Alignment::Right => leftover,
        }
    }
}

/// How layout places an element: its alignment, the margins around it, and
/// whether the cursor moves past it afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutHint {
    pub alignment: Alignment,
    pub margins: Margins,
    /// When false the element is drawn but the next one starts at the same
    /// place, e.g. for overlays
    pub move_cursor: bool,
}

impl Default for LayoutHint {
    fn default() -> Self {
        LayoutHint {
            alignment: Alignment::Left,
            margins: Margins::empty(),
            move_cursor: true,
        }
    }
}

impl LayoutHint {
    pub fn new(alignment: Alignment) -> LayoutHint {
        LayoutHint {
            alignment,
            ..LayoutHint::default()
        }
    }

    pub fn with_margins(mut self, margins: Margins) -> LayoutHint {
        self.margins = margins;
        self
    }

    pub fn without_moving_cursor(mut self) -> LayoutHint {
        self.move_cursor = false;
        self
    }

    /// Horizontal offset of an element `width` wide in an area `area_width`
    /// wide. Left aligned elements start at the left margin, right aligned
    /// ones end at the right margin, centred ones are centred between the
    /// margins.
    pub fn offset(&self, area_width: Pt, width: Pt) -> Pt {
        match self.alignment {
            Alignment::Left => self.margins.left,
            Alignment::Center => {
                let inner = area_width - self.margins.horizontal();
                self.margins.left + Alignment::Center.offset(inner, width)
            }
            Alignment::Right => (area_width - width - self.margins.right).max(Pt::ZERO),
        }
    }
}
