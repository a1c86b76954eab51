use super::run::{FlowItem, NewLine, StyledText};
use crate::colour::Colour;
use crate::content::Surface;
use crate::font::{Fonts, SpanFont};
use crate::page::{Annotation, LinkStyle};
use crate::rect::{Position, Rect};
use crate::units::Pt;
use std::borrow::Cow;
use std::cell::OnceCell;

/// One line of a wrapped text flow: the items between two line breaks.
///
/// Width, height and ascent are measured lazily and cached until the next
/// item is added.
#[derive(Clone, Debug, Default)]
pub struct TextLine {
    items: Vec<FlowItem>,
    /// Gives an empty line its height
    fallback: Option<SpanFont>,
    /// The break that ended this line, if any
    terminator: Option<NewLine>,
    width: OnceCell<Pt>,
    height: OnceCell<Pt>,
    ascent: OnceCell<Pt>,
}

impl TextLine {
    pub fn new() -> TextLine {
        TextLine::default()
    }

    pub fn add(&mut self, item: FlowItem) {
        debug_assert!(!matches!(item, FlowItem::NewLine(_)));
        self.items.push(item);
        self.width = OnceCell::new();
        self.height = OnceCell::new();
        self.ascent = OnceCell::new();
    }

    pub fn items(&self) -> &[FlowItem] {
        &self.items
    }

    pub fn terminator(&self) -> Option<NewLine> {
        self.terminator
    }

    /// Whether nothing visible is on this line
    pub fn is_empty(&self) -> bool {
        !self.items.iter().any(|item| match item {
            FlowItem::Text(run) => !run.text().is_empty(),
            FlowItem::Indent(indent) => !indent.label().is_empty(),
            _ => false,
        })
    }

    /// The text of the line's runs, without indentation
    pub fn text(&self) -> String {
        self.items
            .iter()
            .filter_map(|item| match item {
                FlowItem::Text(run) => Some(run.text()),
                _ => None,
            })
            .collect()
    }

    /// Everything that occupies space on the line, in order. Replaced
    /// whitespace is skipped; indents are drawn as their label runs.
    fn runs<'a>(&'a self, fonts: &Fonts) -> impl Iterator<Item = Cow<'a, StyledText>> + 'a {
        let indents: Vec<Option<StyledText>> = self
            .items
            .iter()
            .map(|item| match item {
                FlowItem::Indent(indent) => Some(indent.to_run(fonts)),
                _ => None,
            })
            .collect();
        self.items
            .iter()
            .zip(indents)
            .filter_map(|(item, indent)| match item {
                FlowItem::Text(run) => Some(Cow::Borrowed(run)),
                FlowItem::Indent(_) => indent.map(Cow::Owned),
                _ => None,
            })
    }

    pub fn width(&self, fonts: &Fonts) -> Pt {
        *self
            .width
            .get_or_init(|| self.runs(fonts).map(|run| run.width(fonts)).sum())
    }

    pub fn height(&self, fonts: &Fonts) -> Pt {
        *self.height.get_or_init(|| {
            self.runs(fonts)
                .map(|run| run.height())
                .reduce(Pt::max)
                .or(self.fallback.map(|font| font.size))
                .unwrap_or_default()
        })
    }

    pub fn ascent(&self, fonts: &Fonts) -> Pt {
        *self.ascent.get_or_init(|| {
            self.runs(fonts)
                .map(|run| run.ascent(fonts))
                .reduce(Pt::max)
                .or(self.fallback.map(|font| fonts[font.id].ascent(font.size)))
                .unwrap_or_default()
        })
    }

    /// Draw the line with its top left corner at `upper_left`, in a single
    /// text object. Font and colour are only set when they change. Every
    /// annotated run reports its area to the surface, even an empty one (an
    /// anchor marker); underlined links get their underline once the text
    /// object is closed.
    pub fn draw(&self, surface: &mut Surface, fonts: &Fonts, upper_left: Position) {
        let baseline = upper_left.y - self.ascent(fonts);
        let mut x = upper_left.x;
        let mut font: Option<SpanFont> = None;
        let mut colour: Option<Colour> = None;
        let mut in_text = false;
        let mut underlines: Vec<(Position, Position, Colour, Pt)> = Vec::new();

        for run in self.runs(fonts) {
            x += run.left_margin();
            let glyphs = run.text_width(fonts);
            let origin = Position::new(x, baseline + run.baseline_offset());
            if !run.text().is_empty() {
                if !in_text {
                    surface.begin_text();
                    in_text = true;
                }
                if font != Some(run.font()) {
                    surface.set_font(run.font());
                    font = Some(run.font());
                }
                if colour != Some(run.colour()) {
                    surface.set_fill_colour(run.colour());
                    colour = Some(run.colour());
                }
                surface.show_text_at(origin, run.text());
            }

            let descent = run.descent(fonts);
            for annotation in run.annotations() {
                let rect = Rect {
                    x1: x,
                    y1: origin.y + descent,
                    x2: x + glyphs,
                    y2: origin.y + run.ascent(fonts),
                };
                if let Annotation::Link {
                    style: LinkStyle::Underline,
                    ..
                } = annotation
                {
                    if glyphs > Pt::ZERO {
                        let y = origin.y + descent * 0.5;
                        underlines.push((
                            Position::new(x, y),
                            Position::new(x + glyphs, y),
                            run.colour(),
                            run.font().size / 20.0,
                        ));
                    }
                }
                surface.annotate(annotation.clone(), rect);
            }
            x += glyphs + run.right_margin();
        }

        if in_text {
            surface.end_text();
        }

        for (from, to, colour, width) in underlines {
            surface.set_stroke_colour(colour);
            surface.set_line_width(width);
            surface.move_to(from);
            surface.line_to(to);
            surface.stroke();
        }
    }
}

/// Group flow items into lines at line breaks. A trailing break yields a
/// final empty line.
pub fn split_lines(items: &[FlowItem]) -> Vec<TextLine> {
    let mut lines = Vec::new();
    if items.is_empty() {
        return lines;
    }

    let mut current = TextLine::new();
    for item in items {
        match item {
            FlowItem::NewLine(newline) => {
                current.fallback = Some(newline.font);
                current.terminator = Some(*newline);
                lines.push(std::mem::take(&mut current));
                current.fallback = Some(newline.font);
            }
            other => current.add(other.clone()),
        }
    }
    lines.push(current);
    lines
}

/// The flow items of consecutive lines, with the breaks between them but
/// not after the last one
pub fn join_lines(lines: &[TextLine]) -> Vec<FlowItem> {
    let mut items = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        items.extend(line.items.iter().cloned());
        if i + 1 < lines.len() {
            if let Some(newline) = line.terminator.or(line.fallback.map(NewLine::new)) {
                items.push(FlowItem::NewLine(newline));
            }
        }
    }
    items
}
