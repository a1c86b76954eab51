use crate::colour::Colour;
use crate::content::Surface;
use crate::rect::{Position, Rect};
use crate::units::Pt;

/// Control point distance for approximating a quarter circle with a cubic
/// bézier curve, as a fraction of the radius
const KAPPA: f32 = 0.552_284_8;

/// The outline of a frame's border and background
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Shape {
    #[default]
    Rect,
    RoundRect {
        radius: Pt,
    },
    Ellipse,
}

/// How an outline is stroked
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width: Pt,
    /// (on, off) dash lengths, [None] for a solid line
    pub dash: Option<(Pt, Pt)>,
}

impl Stroke {
    pub fn solid<W: Into<Pt>>(width: W) -> Stroke {
        Stroke {
            width: width.into(),
            dash: None,
        }
    }

    pub fn dashed<W: Into<Pt>>(width: W, on: Pt, off: Pt) -> Stroke {
        Stroke {
            width: width.into(),
            dash: Some((on, off)),
        }
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Stroke::solid(Pt(1.0))
    }
}

impl Shape {
    /// Append the outline of this shape inscribed in `rect` as a path
    pub fn add_path(&self, surface: &mut Surface, rect: Rect) {
        match *self {
            Shape::Rect => surface.rect(rect),
            Shape::RoundRect { radius } => {
                let r = radius
                    .min(rect.width() / 2.0)
                    .min(rect.height() / 2.0)
                    .max(Pt::ZERO);
                let k = r * (1.0 - KAPPA);
                let Rect { x1, y1, x2, y2 } = rect;
                surface.move_to(Position::new(x1 + r, y1));
                surface.line_to(Position::new(x2 - r, y1));
                surface.curve_to(
                    Position::new(x2 - k, y1),
                    Position::new(x2, y1 + k),
                    Position::new(x2, y1 + r),
                );
                surface.line_to(Position::new(x2, y2 - r));
                surface.curve_to(
                    Position::new(x2, y2 - k),
                    Position::new(x2 - k, y2),
                    Position::new(x2 - r, y2),
                );
                surface.line_to(Position::new(x1 + r, y2));
                surface.curve_to(
                    Position::new(x1 + k, y2),
                    Position::new(x1, y2 - k),
                    Position::new(x1, y2 - r),
                );
                surface.line_to(Position::new(x1, y1 + r));
                surface.curve_to(
                    Position::new(x1, y1 + k),
                    Position::new(x1 + k, y1),
                    Position::new(x1 + r, y1),
                );
                surface.close_path();
            }
            Shape::Ellipse => {
                let rx = rect.width() / 2.0;
                let ry = rect.height() / 2.0;
                let cx = rect.x1 + rx;
                let cy = rect.y1 + ry;
                let (kx, ky) = (rx * KAPPA, ry * KAPPA);
                surface.move_to(Position::new(cx + rx, cy));
                surface.curve_to(
                    Position::new(cx + rx, cy + ky),
                    Position::new(cx + kx, cy + ry),
                    Position::new(cx, cy + ry),
                );
                surface.curve_to(
                    Position::new(cx - kx, cy + ry),
                    Position::new(cx - rx, cy + ky),
                    Position::new(cx - rx, cy),
                );
                surface.curve_to(
                    Position::new(cx - rx, cy - ky),
                    Position::new(cx - kx, cy - ry),
                    Position::new(cx, cy - ry),
                );
                surface.curve_to(
                    Position::new(cx + kx, cy - ry),
                    Position::new(cx + rx, cy - ky),
                    Position::new(cx + rx, cy),
                );
                surface.close_path();
            }
        }
    }

    pub fn fill(&self, surface: &mut Surface, rect: Rect, colour: Colour) {
        surface.set_fill_colour(colour);
        self.add_path(surface, rect);
        surface.fill();
    }

    /// Stroke the outline. The stroke is centred on the path, so it is
    /// inset by half its width to stay within `rect`.
    pub fn stroke(&self, surface: &mut Surface, rect: Rect, stroke: &Stroke, colour: Colour) {
        let inset = stroke.width / 2.0;
        let rect = Rect {
            x1: rect.x1 + inset,
            y1: rect.y1 + inset,
            x2: rect.x2 - inset,
            y2: rect.y2 - inset,
        };
        surface.set_stroke_colour(colour);
        surface.set_line_width(stroke.width);
        surface.set_dash(stroke.dash);
        self.add_path(surface, rect);
        surface.stroke();
    }
}
