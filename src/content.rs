//! The drawing surface that layout renders into, and its encoding into a
//! PDF content stream.
//!
//! Drawables never write PDF operators directly. They append [`DrawOp`]s to
//! a [`Surface`], one per page, which can be inspected (tests do) or encoded
//! with [`encode_ops`] once the fonts are known.

use crate::colour::Colour;
use crate::font::{Fonts, SpanFont};
use crate::page::{Annotation, PlacedAnnotation};
use crate::rect::{Position, Rect};
use crate::units::Pt;
use pdf_writer::{Content, Name, Str};

/// A single drawing operation
#[derive(Clone, PartialEq, Debug)]
pub enum DrawOp {
    SaveState,
    RestoreState,
    /// Intersect the clipping path with a rectangle
    Clip(Rect),
    BeginText,
    EndText,
    SetFont(SpanFont),
    SetFillColour(Colour),
    SetStrokeColour(Colour),
    SetLineWidth(Pt),
    /// Dash pattern as (on, off) lengths, [None] for a solid line
    SetDash(Option<(Pt, Pt)>),
    /// Absolute baseline origin for the next [DrawOp::ShowText]
    TextPosition(Position),
    ShowText(String),
    MoveTo(Position),
    LineTo(Position),
    CurveTo(Position, Position, Position),
    Rect(Rect),
    ClosePath,
    Stroke,
    Fill,
    FillStroke,
    /// Paint an externally registered image XObject into a rectangle
    Image { name: String, rect: Rect },
}

/// An appendable drawing surface for a single page
#[derive(Debug, Default)]
pub struct Surface {
    ops: Vec<DrawOp>,
    annotations: Vec<PlacedAnnotation>,
}

impl Surface {
    pub fn new() -> Surface {
        Surface::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn annotations(&self) -> &[PlacedAnnotation] {
        &self.annotations
    }

    pub(crate) fn into_parts(self) -> (Vec<DrawOp>, Vec<PlacedAnnotation>) {
        (self.ops, self.annotations)
    }

    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    pub fn save_state(&mut self) {
        self.push(DrawOp::SaveState);
    }

    pub fn restore_state(&mut self) {
        self.push(DrawOp::RestoreState);
    }

    pub fn clip(&mut self, rect: Rect) {
        self.push(DrawOp::Clip(rect));
    }

    pub fn begin_text(&mut self) {
        self.push(DrawOp::BeginText);
    }

    pub fn end_text(&mut self) {
        self.push(DrawOp::EndText);
    }

    pub fn set_font(&mut self, font: SpanFont) {
        self.push(DrawOp::SetFont(font));
    }

    pub fn set_fill_colour(&mut self, colour: Colour) {
        self.push(DrawOp::SetFillColour(colour));
    }

    pub fn set_stroke_colour(&mut self, colour: Colour) {
        self.push(DrawOp::SetStrokeColour(colour));
    }

    pub fn set_line_width(&mut self, width: Pt) {
        self.push(DrawOp::SetLineWidth(width));
    }

    pub fn set_dash(&mut self, dash: Option<(Pt, Pt)>) {
        self.push(DrawOp::SetDash(dash));
    }

    pub fn show_text_at(&mut self, baseline: Position, text: &str) {
        self.push(DrawOp::TextPosition(baseline));
        self.push(DrawOp::ShowText(text.to_string()));
    }

    pub fn move_to(&mut self, p: Position) {
        self.push(DrawOp::MoveTo(p));
    }

    pub fn line_to(&mut self, p: Position) {
        self.push(DrawOp::LineTo(p));
    }

    pub fn curve_to(&mut self, c1: Position, c2: Position, end: Position) {
        self.push(DrawOp::CurveTo(c1, c2, end));
    }

    pub fn rect(&mut self, rect: Rect) {
        self.push(DrawOp::Rect(rect));
    }

    pub fn close_path(&mut self) {
        self.push(DrawOp::ClosePath);
    }

    pub fn stroke(&mut self) {
        self.push(DrawOp::Stroke);
    }

    pub fn fill(&mut self) {
        self.push(DrawOp::Fill);
    }

    pub fn fill_and_stroke(&mut self) {
        self.push(DrawOp::FillStroke);
    }

    pub fn image(&mut self, name: &str, rect: Rect) {
        self.push(DrawOp::Image {
            name: name.to_string(),
            rect,
        });
    }

    /// Record that an annotated object (a hyperlink or an anchor) was drawn
    /// at `rect`
    pub fn annotate(&mut self, annotation: Annotation, rect: Rect) {
        self.annotations.push(PlacedAnnotation { annotation, rect });
    }

    pub fn content_stream(&self, fonts: &Fonts) -> Vec<u8> {
        encode_ops(&self.ops, fonts)
    }
}

/// Encode drawing operations into PDF content stream bytes. Fonts are
/// referenced as `/F{index}` resources, images by their own name.
pub fn encode_ops(ops: &[DrawOp], fonts: &Fonts) -> Vec<u8> {
    let mut content = Content::new();
    let mut current_font = None;

    for op in ops {
        match op {
            DrawOp::SaveState => {
                content.save_state();
            }
            DrawOp::RestoreState => {
                content.restore_state();
            }
            DrawOp::Clip(r) => {
                content.rect(*r.x1, *r.y1, *r.width(), *r.height());
                content.clip_nonzero();
                content.end_path();
            }
            DrawOp::BeginText => {
                content.begin_text();
            }
            DrawOp::EndText => {
                content.end_text();
            }
            DrawOp::SetFont(font) => {
                current_font = Some(font.id);
                content.set_font(
                    Name(format!("F{}", font.id.index()).as_bytes()),
                    *font.size,
                );
            }
            DrawOp::SetFillColour(colour) => match *colour {
                Colour::RGB { r, g, b } => {
                    content.set_fill_rgb(r, g, b);
                }
                Colour::CMYK { c, m, y, k } => {
                    content.set_fill_cmyk(c, m, y, k);
                }
                Colour::Grey { g } => {
                    content.set_fill_gray(g);
                }
            },
            DrawOp::SetStrokeColour(colour) => match *colour {
                Colour::RGB { r, g, b } => {
                    content.set_stroke_rgb(r, g, b);
                }
                Colour::CMYK { c, m, y, k } => {
                    content.set_stroke_cmyk(c, m, y, k);
                }
                Colour::Grey { g } => {
                    content.set_stroke_gray(g);
                }
            },
            DrawOp::SetLineWidth(width) => {
                content.set_line_width(**width);
            }
            DrawOp::SetDash(Some((on, off))) => {
                content.set_dash_pattern([**on, **off], 0.0);
            }
            DrawOp::SetDash(None) => {
                content.set_dash_pattern([], 0.0);
            }
            DrawOp::TextPosition(p) => {
                content.set_text_matrix([1.0, 0.0, 0.0, 1.0, *p.x, *p.y]);
            }
            DrawOp::ShowText(text) => {
                let bytes = match current_font.and_then(|id| fonts.get(id)) {
                    Some(font) => font.encode(text),
                    None => text.as_bytes().to_vec(),
                };
                content.show(Str(&bytes));
            }
            DrawOp::MoveTo(p) => {
                content.move_to(*p.x, *p.y);
            }
            DrawOp::LineTo(p) => {
                content.line_to(*p.x, *p.y);
            }
            DrawOp::CurveTo(c1, c2, end) => {
                content.cubic_to(*c1.x, *c1.y, *c2.x, *c2.y, *end.x, *end.y);
            }
            DrawOp::Rect(r) => {
                content.rect(*r.x1, *r.y1, *r.width(), *r.height());
            }
            DrawOp::ClosePath => {
                content.close_path();
            }
            DrawOp::Stroke => {
                content.stroke();
            }
            DrawOp::Fill => {
                content.fill_nonzero();
            }
            DrawOp::FillStroke => {
                content.fill_nonzero_and_stroke();
            }
            DrawOp::Image { name, rect } => {
                content.save_state();
                content.transform([
                    *rect.width(),
                    0.0,
                    0.0,
                    *rect.height(),
                    *rect.x1,
                    *rect.y1,
                ]);
                content.x_object(Name(name.as_bytes()));
                content.restore_state();
            }
        }
    }

    content.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::Font;

    #[test]
    fn encodes_text_with_font_resource() {
        let mut fonts = Fonts::new();
        let id = fonts.alloc(Font::courier());

        let mut surface = Surface::new();
        surface.begin_text();
        surface.set_font(SpanFont::new(id, Pt(12.0)));
        surface.set_fill_colour(crate::colours::RED);
        surface.show_text_at(Position::new(Pt(10.0), Pt(20.0)), "Hi");
        surface.end_text();

        let stream = String::from_utf8_lossy(&surface.content_stream(&fonts)).into_owned();
        assert!(stream.contains("BT"));
        assert!(stream.contains("/F0 12 Tf"));
        assert!(stream.contains("1 0 0 rg"));
        assert!(stream.contains("1 0 0 1 10 20 Tm"));
        assert!(stream.contains("(Hi) Tj"));
        assert!(stream.contains("ET"));
    }

    #[test]
    fn encodes_images_in_their_own_state() {
        let fonts = Fonts::new();
        let mut surface = Surface::new();
        surface.image(
            "Im1",
            Rect {
                x1: Pt(0.0),
                y1: Pt(0.0),
                x2: Pt(50.0),
                y2: Pt(25.0),
            },
        );
        let stream = String::from_utf8_lossy(&surface.content_stream(&fonts)).into_owned();
        assert!(stream.contains("q"));
        assert!(stream.contains("50 0 0 25 0 0 cm"));
        assert!(stream.contains("/Im1 Do"));
        assert!(stream.contains("Q"));
    }
}
