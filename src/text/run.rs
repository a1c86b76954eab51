use crate::colour::Colour;
use crate::font::{Fonts, SpanFont};
use crate::page::Annotation;
use crate::units::Pt;
use std::cell::OnceCell;

/// An atomic run of styled text: one font, one colour, no line breaks.
///
/// Runs are immutable once built. Their width only depends on the text, the
/// font and the margins, so it is measured once and cached.
#[derive(Clone, Debug)]
pub struct StyledText {
    text: String,
    font: SpanFont,
    colour: Colour,
    left_margin: Pt,
    right_margin: Pt,
    baseline_offset: Pt,
    annotations: Vec<Annotation>,
    width: OnceCell<Pt>,
}

impl PartialEq for StyledText {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
            && self.font == other.font
            && self.colour == other.colour
            && self.left_margin == other.left_margin
            && self.right_margin == other.right_margin
            && self.baseline_offset == other.baseline_offset
            && self.annotations == other.annotations
    }
}

impl StyledText {
    /// Create a run. Line breaks are represented by [NewLine] items, never
    /// inside a run.
    pub fn new<S: Into<String>>(text: S, font: SpanFont, colour: Colour) -> StyledText {
        let text = text.into();
        debug_assert!(
            !text.contains(['\n', '\r']),
            "styled text must not contain line breaks"
        );
        StyledText {
            text,
            font,
            colour,
            left_margin: Pt::ZERO,
            right_margin: Pt::ZERO,
            baseline_offset: Pt::ZERO,
            annotations: Vec::new(),
            width: OnceCell::new(),
        }
    }

    /// Gaps drawn before and after the glyphs
    pub fn with_margins(mut self, left: Pt, right: Pt) -> StyledText {
        self.left_margin = left;
        self.right_margin = right;
        self.width = OnceCell::new();
        self
    }

    /// Shift the glyphs up (positive) or down (negative) from the baseline
    pub fn with_baseline_offset(mut self, offset: Pt) -> StyledText {
        self.baseline_offset = offset;
        self
    }

    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> StyledText {
        self.annotations = annotations;
        self
    }

    /// A run in the same style holding other text. Margins are not carried
    /// over.
    pub fn inherit<S: Into<String>>(&self, text: S) -> StyledText {
        StyledText::new(text, self.font, self.colour)
            .with_baseline_offset(self.baseline_offset)
            .with_annotations(self.annotations.clone())
    }

    /// Same run with different text, keeping margins
    pub(crate) fn with_text<S: Into<String>>(&self, text: S) -> StyledText {
        self.inherit(text)
            .with_margins(self.left_margin, self.right_margin)
    }

    /// Split at a byte index. The head keeps the left margin, the tail the
    /// right one.
    pub(crate) fn split_at(&self, index: usize) -> (StyledText, StyledText) {
        let (head, tail) = self.text.split_at(index);
        (
            self.inherit(head).with_margins(self.left_margin, Pt::ZERO),
            self.inherit(tail).with_margins(Pt::ZERO, self.right_margin),
        )
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font(&self) -> SpanFont {
        self.font
    }

    pub fn colour(&self) -> Colour {
        self.colour
    }

    pub fn left_margin(&self) -> Pt {
        self.left_margin
    }

    pub fn right_margin(&self) -> Pt {
        self.right_margin
    }

    pub fn baseline_offset(&self) -> Pt {
        self.baseline_offset
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Width of the glyphs alone
    pub fn text_width(&self, fonts: &Fonts) -> Pt {
        fonts[self.font.id].text_width(&self.text, self.font.size)
    }

    /// Width including margins
    pub fn width(&self, fonts: &Fonts) -> Pt {
        *self
            .width
            .get_or_init(|| self.left_margin + self.text_width(fonts) + self.right_margin)
    }

    /// Width ignoring trailing blanks, which may hang past the end of a line
    pub(crate) fn visible_width(&self, fonts: &Fonts) -> Pt {
        let trimmed = self.text.trim_end_matches(' ');
        let right = if trimmed.len() == self.text.len() {
            self.right_margin
        } else {
            Pt::ZERO
        };
        self.left_margin + fonts[self.font.id].text_width(trimmed, self.font.size) + right
    }

    pub fn height(&self) -> Pt {
        self.font.size
    }

    pub fn ascent(&self, fonts: &Fonts) -> Pt {
        fonts[self.font.id].ascent(self.font.size)
    }

    pub fn descent(&self, fonts: &Fonts) -> Pt {
        fonts[self.font.id].descent(self.font.size)
    }

    /// Whether `other` can be appended to this run without changing how
    /// either is drawn
    pub(crate) fn can_merge(&self, other: &StyledText) -> bool {
        self.font == other.font
            && self.colour == other.colour
            && self.baseline_offset == other.baseline_offset
            && self.annotations == other.annotations
            && self.right_margin == Pt::ZERO
            && other.left_margin == Pt::ZERO
    }
}

/// A line break. Breaks inserted by word wrapping are flagged so that
/// de-wrapping can tell them apart from the ones the author wrote.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct NewLine {
    /// Gives an otherwise empty line its height
    pub font: SpanFont,
    pub wrapped: bool,
}

impl NewLine {
    pub fn new(font: SpanFont) -> NewLine {
        NewLine {
            font,
            wrapped: false,
        }
    }

    pub fn wrapping(font: SpanFont) -> NewLine {
        NewLine {
            font,
            wrapped: true,
        }
    }
}

/// Indentation of the current and all following lines, optionally with a
/// label (a bullet or a number) right-aligned inside the indent.
#[derive(Clone, PartialEq, Debug)]
pub struct Indent {
    label: String,
    width: Pt,
    font: SpanFont,
    colour: Colour,
    continuation: bool,
}

impl Indent {
    pub fn new<S: Into<String>>(label: S, width: Pt, font: SpanFont, colour: Colour) -> Indent {
        Indent {
            label: label.into(),
            width,
            font,
            colour,
            continuation: false,
        }
    }

    /// Ends any indentation
    pub fn none(font: SpanFont) -> Indent {
        Indent::new("", Pt::ZERO, font, Colour::default())
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn width(&self) -> Pt {
        self.width
    }

    pub fn font(&self) -> SpanFont {
        self.font
    }

    /// Whether this is the blank that word wrapping repeats at the start of
    /// every line under an active indent
    pub fn is_continuation(&self) -> bool {
        self.continuation
    }

    /// The label-sized blank for following lines
    pub(crate) fn continuation(&self) -> Indent {
        Indent {
            label: String::new(),
            continuation: true,
            ..self.clone()
        }
    }

    /// The run this indent draws as. It spans exactly `width` unless the
    /// label itself is wider.
    pub fn to_run(&self, fonts: &Fonts) -> StyledText {
        let run = StyledText::new(self.label.clone(), self.font, self.colour);
        if self.label.is_empty() {
            return run.with_margins(self.width, Pt::ZERO);
        }
        let font = &fonts[self.font.id];
        let label_width = font.text_width(&self.label, self.font.size);
        let gap = font.text_width(" ", self.font.size);
        if label_width + gap <= self.width {
            run.with_margins(self.width - label_width - gap, gap)
        } else {
            run.with_margins(Pt::ZERO, (self.width - label_width).max(Pt::ZERO))
        }
    }
}

/// Blanks removed from the start of a wrapped line. They are not drawn but
/// de-wrapping restores them.
#[derive(Clone, PartialEq, Debug)]
pub struct ReplacedWhitespace {
    pub run: StyledText,
}

/// One element of a text flow
#[derive(Clone, PartialEq, Debug)]
pub enum FlowItem {
    Text(StyledText),
    NewLine(NewLine),
    Indent(Indent),
    ReplacedWhitespace(ReplacedWhitespace),
}

impl From<StyledText> for FlowItem {
    fn from(run: StyledText) -> Self {
        FlowItem::Text(run)
    }
}

impl From<NewLine> for FlowItem {
    fn from(newline: NewLine) -> Self {
        FlowItem::NewLine(newline)
    }
}

impl From<Indent> for FlowItem {
    fn from(indent: Indent) -> Self {
        FlowItem::Indent(indent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::Font;

    fn setup() -> (Fonts, SpanFont) {
        let mut fonts = Fonts::new();
        let id = fonts.alloc(Font::courier());
        (fonts, SpanFont::new(id, Pt(10.0)))
    }

    #[test]
    fn width_includes_margins_and_is_stable() {
        let (fonts, font) = setup();
        let run = StyledText::new("abcd", font, Colour::default()).with_margins(Pt(2.0), Pt(3.0));
        assert_eq!(run.width(&fonts), Pt(29.0));
        assert_eq!(run.width(&fonts), Pt(29.0));
        assert_eq!(run.text_width(&fonts), Pt(24.0));
    }

    #[test]
    fn visible_width_ignores_trailing_blanks() {
        let (fonts, font) = setup();
        let run = StyledText::new("ab  ", font, Colour::default());
        assert_eq!(run.visible_width(&fonts), Pt(12.0));
        assert_eq!(run.width(&fonts), Pt(24.0));
    }

    #[test]
    fn split_keeps_outer_margins() {
        let (_, font) = setup();
        let run = StyledText::new("abcd", font, Colour::default()).with_margins(Pt(2.0), Pt(3.0));
        let (head, tail) = run.split_at(1);
        assert_eq!(head.text(), "a");
        assert_eq!(head.left_margin(), Pt(2.0));
        assert_eq!(head.right_margin(), Pt::ZERO);
        assert_eq!(tail.text(), "bcd");
        assert_eq!(tail.right_margin(), Pt(3.0));
    }

    #[test]
    fn indent_label_is_right_aligned() {
        let (fonts, font) = setup();
        let indent = Indent::new("1.", Pt(40.0), font, Colour::default());
        let run = indent.to_run(&fonts);
        assert_eq!(run.text(), "1.");
        assert_eq!(run.left_margin(), Pt(22.0));
        assert_eq!(run.right_margin(), Pt(6.0));
        assert_eq!(run.width(&fonts), Pt(40.0));

        let blank = indent.continuation().to_run(&fonts);
        assert_eq!(blank.text(), "");
        assert_eq!(blank.width(&fonts), Pt(40.0));
    }

    #[test]
    fn oversized_label_overflows_indent() {
        let (fonts, font) = setup();
        let indent = Indent::new("XIV.", Pt(10.0), font, Colour::default());
        assert_eq!(indent.to_run(&fonts).width(&fonts), Pt(24.0));
    }
}
