use crate::units::*;

/// A rectangle, specified by two opposite corners.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Rect {
    /// The x-coordinate of the first (typically, lower-left) corner.
    pub x1: Pt,
    /// The y-coordinate of the first (typically, lower-left) corner.
    pub y1: Pt,
    /// The x-coordinate of the second (typically, upper-right) corner.
    pub x2: Pt,
    /// The y-coordinate of the second (typically, upper-right) corner.
    pub y2: Pt,
}

impl Rect {
    /// Build a rectangle hanging down and to the right of `upper_left`
    pub fn from_upper_left(upper_left: Position, width: Pt, height: Pt) -> Rect {
        Rect {
            x1: upper_left.x,
            y1: upper_left.y - height,
            x2: upper_left.x + width,
            y2: upper_left.y,
        }
    }

    pub fn width(&self) -> Pt {
        self.x2 - self.x1
    }

    pub fn height(&self) -> Pt {
        self.y2 - self.y1
    }

    pub fn upper_left(&self) -> Position {
        Position::new(self.x1, self.y2)
    }
}

impl From<Rect> for pdf_writer::Rect {
    fn from(r: Rect) -> Self {
        pdf_writer::Rect {
            x1: r.x1.into(),
            y1: r.y1.into(),
            x2: r.x2.into(),
            y2: r.y2.into(),
        }
    }
}

/// A point in PDF user space. Drawables are positioned by their upper-left
/// corner, and content flows downwards, so `y` shrinks as a page fills.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Position {
    pub x: Pt,
    pub y: Pt,
}

impl Position {
    pub fn new(x: Pt, y: Pt) -> Position {
        Position { x, y }
    }

    pub fn add(&self, dx: Pt, dy: Pt) -> Position {
        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move right by `dx`
    pub fn add_x(&self, dx: Pt) -> Position {
        self.add(dx, Pt::ZERO)
    }

    /// Move down the page by `dy`
    pub fn down(&self, dy: Pt) -> Position {
        self.add(Pt::ZERO, -dy)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Dimension {
    pub width: Pt,
    pub height: Pt,
}

impl Dimension {
    pub fn new(width: Pt, height: Pt) -> Dimension {
        Dimension { width, height }
    }
}
